/// Node name constants to ensure consistency across the codebase.
/// These constants define the names used in the CLI and the node registry.

// Node names (used in CLI and registry lookups)
pub const GDELT_NODE: &str = "gdelt_geo";
pub const OPENSKY_NODE: &str = "opensky_states";
pub const DATACENTERS_NODE: &str = "blockchain_datacenters";
pub const HUB_NODE: &str = "hub_download";

// Upstream endpoints. Overridable through config.toml, see `config::Endpoints`.
pub const GDELT_GEO_URL: &str = "https://api.gdeltproject.org/api/v2/geo/geo";
pub const OPENSKY_API_URL: &str = "https://opensky-network.org/api";
pub const DATACENTERS_API_URL: &str = "https://api.blockchaindatacenters.io";
pub const ARCGIS_CONTENT_URL: &str = "https://www.arcgis.com/sharing/rest/content/items";

/// Per-request timeout applied to every outbound call.
pub const REQUEST_TIMEOUT_SECS: u64 = 120;

/// Get all supported node names
pub fn supported_nodes() -> Vec<&'static str> {
    vec![GDELT_NODE, OPENSKY_NODE, DATACENTERS_NODE, HUB_NODE]
}
