use crate::constants;
use crate::error::{NodeError, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Runtime configuration, read from `config.toml` when present.
///
/// Every field has a default, so running without a config file uses the
/// hardcoded upstream endpoints and the standard 120 second timeout.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub timeout_seconds: u64,
    pub endpoints: Endpoints,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Endpoints {
    pub gdelt: String,
    pub opensky: String,
    pub datacenters: String,
    pub hub: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            timeout_seconds: constants::REQUEST_TIMEOUT_SECS,
            endpoints: Endpoints::default(),
        }
    }
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            gdelt: constants::GDELT_GEO_URL.to_string(),
            opensky: constants::OPENSKY_API_URL.to_string(),
            datacenters: constants::DATACENTERS_API_URL.to_string(),
            hub: constants::ARCGIS_CONTENT_URL.to_string(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from("config.toml")
    }

    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path).map_err(|e| {
            NodeError::Config(format!("Failed to read config file '{}': {}", path.display(), e))
        })?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_use_hardcoded_endpoints() {
        let config = Config::default();
        assert_eq!(config.timeout_seconds, 120);
        assert_eq!(config.endpoints.gdelt, constants::GDELT_GEO_URL);
        assert_eq!(config.endpoints.opensky, constants::OPENSKY_API_URL);
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let config = Config::load_from("does-not-exist.toml").unwrap();
        assert_eq!(config.timeout_seconds, 120);
    }

    #[test]
    fn test_partial_config_keeps_remaining_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "timeout_seconds = 5\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.timeout_seconds, 5);
        assert_eq!(config.endpoints.datacenters, constants::DATACENTERS_API_URL);
    }
}
