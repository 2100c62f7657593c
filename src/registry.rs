use std::collections::HashMap;

use crate::config::Config;
use crate::error::{NodeError, Result};
use crate::fetch::Fetcher;
use crate::node::DatasetNode;
use crate::nodes::datacenters::DataCentersNode;
use crate::nodes::gdelt::GdeltGeoNode;
use crate::nodes::hub::HubDownloadNode;
use crate::nodes::opensky::OpenskyStatesNode;
use std::time::Duration;

/// Registry of the built-in dataset source nodes.
pub struct NodeRegistry {
    nodes: HashMap<&'static str, Box<dyn DatasetNode>>,
}

impl NodeRegistry {
    /// Create a registry with the default endpoints and timeout.
    pub fn new() -> Result<Self> {
        Self::with_config(&Config::default())
    }

    /// Create a registry wired to the endpoints and timeout in `config`.
    pub fn with_config(config: &Config) -> Result<Self> {
        let fetcher = Fetcher::new(Duration::from_secs(config.timeout_seconds))?;
        let mut nodes: HashMap<&'static str, Box<dyn DatasetNode>> = HashMap::new();

        let gdelt = GdeltGeoNode::new(fetcher.clone(), &config.endpoints.gdelt);
        nodes.insert(gdelt.node_name(), Box::new(gdelt));

        let opensky = OpenskyStatesNode::new(fetcher.clone(), &config.endpoints.opensky);
        nodes.insert(opensky.node_name(), Box::new(opensky));

        let datacenters = DataCentersNode::new(fetcher.clone(), &config.endpoints.datacenters);
        nodes.insert(datacenters.node_name(), Box::new(datacenters));

        let hub = HubDownloadNode::new(fetcher, &config.endpoints.hub);
        nodes.insert(hub.node_name(), Box::new(hub));

        Ok(Self { nodes })
    }

    pub fn get(&self, node_name: &str) -> Result<&dyn DatasetNode> {
        self.nodes
            .get(node_name)
            .map(|n| n.as_ref())
            .ok_or_else(|| NodeError::Config(format!("Unknown node '{}'", node_name)))
    }

    /// List all registered node names, sorted for stable output.
    pub fn list_nodes(&self) -> Vec<&'static str> {
        let mut names: Vec<&'static str> = self.nodes.keys().copied().collect();
        names.sort_unstable();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants;

    #[test]
    fn test_registry_has_built_in_nodes() {
        let registry = NodeRegistry::new().unwrap();
        let nodes = registry.list_nodes();
        assert!(nodes.contains(&constants::GDELT_NODE));
        assert!(nodes.contains(&constants::OPENSKY_NODE));
        assert!(nodes.contains(&constants::DATACENTERS_NODE));
        assert!(nodes.contains(&constants::HUB_NODE));
        assert_eq!(nodes.len(), constants::supported_nodes().len());
    }

    #[test]
    fn test_registry_returns_error_for_unknown_node() {
        let registry = NodeRegistry::new().unwrap();
        assert!(registry.get("unknown_source").is_err());
    }

    #[test]
    fn test_every_node_declares_its_parameters() {
        let registry = NodeRegistry::new().unwrap();
        for name in registry.list_nodes() {
            let node = registry.get(name).unwrap();
            assert_eq!(node.node_name(), name);
            assert!(!node.description().is_empty());
        }
    }
}
