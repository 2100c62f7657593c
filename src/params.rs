use crate::error::{NodeError, Result};
use serde::Serialize;
use std::collections::HashMap;

/// Primitive parameter types a node can declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    Text,
    Integer,
}

/// A bound parameter value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ParamValue {
    Text(String),
    Integer(i64),
}

impl ParamValue {
    pub fn kind(&self) -> ParamKind {
        match self {
            ParamValue::Text(_) => ParamKind::Text,
            ParamValue::Integer(_) => ParamKind::Integer,
        }
    }
}

/// Declaration of a single node parameter: name, type, default and help text.
#[derive(Debug, Clone)]
pub struct ParamSpec {
    pub name: &'static str,
    pub kind: ParamKind,
    pub default: ParamValue,
    pub help: &'static str,
}

impl ParamSpec {
    pub fn text(name: &'static str, default: &str, help: &'static str) -> Self {
        Self {
            name,
            kind: ParamKind::Text,
            default: ParamValue::Text(default.to_string()),
            help,
        }
    }

    pub fn integer(name: &'static str, default: i64, help: &'static str) -> Self {
        Self {
            name,
            kind: ParamKind::Integer,
            default: ParamValue::Integer(default),
            help,
        }
    }
}

/// The parameter set bound to a node before execution.
///
/// Binding starts from the declared defaults and applies user-supplied
/// string overrides, parsing them against the declared parameter type.
/// Unknown names and unparseable integers are configuration errors.
#[derive(Debug, Clone, Default)]
pub struct ParamValues {
    values: HashMap<String, ParamValue>,
}

impl ParamValues {
    pub fn defaults(specs: &[ParamSpec]) -> Self {
        let values = specs
            .iter()
            .map(|spec| (spec.name.to_string(), spec.default.clone()))
            .collect();
        Self { values }
    }

    pub fn bind(specs: &[ParamSpec], overrides: &HashMap<String, String>) -> Result<Self> {
        let mut bound = Self::defaults(specs);
        for (name, raw) in overrides {
            let spec = specs.iter().find(|s| s.name == name.as_str()).ok_or_else(|| {
                NodeError::Config(format!("Unknown parameter '{}'", name))
            })?;
            let value = match spec.kind {
                ParamKind::Text => ParamValue::Text(raw.clone()),
                ParamKind::Integer => {
                    let parsed = raw.parse::<i64>().map_err(|_| {
                        NodeError::Config(format!(
                            "Parameter '{}' expects an integer, got '{}'",
                            name, raw
                        ))
                    })?;
                    ParamValue::Integer(parsed)
                }
            };
            bound.values.insert(name.to_string(), value);
        }
        Ok(bound)
    }

    pub fn text(&self, name: &str) -> Result<&str> {
        match self.values.get(name) {
            Some(ParamValue::Text(s)) => Ok(s),
            Some(other) => Err(NodeError::Config(format!(
                "Parameter '{}' is {:?}, expected text",
                name,
                other.kind()
            ))),
            None => Err(NodeError::Config(format!("Parameter '{}' is not bound", name))),
        }
    }

    pub fn integer(&self, name: &str) -> Result<i64> {
        match self.values.get(name) {
            Some(ParamValue::Integer(i)) => Ok(*i),
            Some(other) => Err(NodeError::Config(format!(
                "Parameter '{}' is {:?}, expected integer",
                name,
                other.kind()
            ))),
            None => Err(NodeError::Config(format!("Parameter '{}' is not bound", name))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn specs() -> Vec<ParamSpec> {
        vec![
            ParamSpec::text("keyword", "*", "search keyword"),
            ParamSpec::integer("last_hours", 24, "lookback window"),
        ]
    }

    #[test]
    fn test_defaults_are_applied() {
        let params = ParamValues::defaults(&specs());
        assert_eq!(params.text("keyword").unwrap(), "*");
        assert_eq!(params.integer("last_hours").unwrap(), 24);
    }

    #[test]
    fn test_overrides_replace_defaults() {
        let overrides = HashMap::from([
            ("keyword".to_string(), "earthquake".to_string()),
            ("last_hours".to_string(), "48".to_string()),
        ]);
        let params = ParamValues::bind(&specs(), &overrides).unwrap();
        assert_eq!(params.text("keyword").unwrap(), "earthquake");
        assert_eq!(params.integer("last_hours").unwrap(), 48);
    }

    #[test]
    fn test_unknown_parameter_is_rejected() {
        let overrides = HashMap::from([("bogus".to_string(), "1".to_string())]);
        let err = ParamValues::bind(&specs(), &overrides).unwrap_err();
        assert!(err.to_string().contains("Unknown parameter"));
    }

    #[test]
    fn test_bad_integer_is_rejected() {
        let overrides = HashMap::from([("last_hours".to_string(), "soon".to_string())]);
        let err = ParamValues::bind(&specs(), &overrides).unwrap_err();
        assert!(err.to_string().contains("expects an integer"));
    }

    #[test]
    fn test_type_mismatch_on_access() {
        let params = ParamValues::defaults(&specs());
        assert!(params.integer("keyword").is_err());
        assert!(params.text("last_hours").is_err());
    }
}
