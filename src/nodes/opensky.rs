use crate::constants::OPENSKY_NODE;
use crate::error::{NodeError, Result};
use crate::fetch::{Credentials, Fetcher};
use crate::node::DatasetNode;
use crate::normalize::tuples_to_table;
use crate::params::{ParamSpec, ParamValues};
use crate::table::GeoTable;
use serde_json::Value;
use tracing::{info, instrument};
use url::Url;

const USERNAME_PARAM: &str = "username";
const PASSWORD_PARAM: &str = "password";

/// The fixed, ordered column schema of an OpenSky state vector.
pub static STATE_COLUMNS: [&str; 17] = [
    "icao24",
    "callsign",
    "origin_country",
    "time_position",
    "last_contact",
    "longitude",
    "latitude",
    "baro_altitude",
    "on_ground",
    "velocity",
    "true_track",
    "vertical_rate",
    "sensors",
    "geo_altitude",
    "squawk",
    "spi",
    "position_source",
];

const LONGITUDE_INDEX: usize = 5;
const LATITUDE_INDEX: usize = 6;

/// Fetches the current aircraft state snapshot from the OpenSky network.
///
/// Anonymous by default; requests are authenticated only when both
/// credential parameters are non-empty. Row order follows the payload.
pub struct OpenskyStatesNode {
    fetcher: Fetcher,
    base_url: String,
}

impl OpenskyStatesNode {
    pub fn new(fetcher: Fetcher, base_url: &str) -> Self {
        Self {
            fetcher,
            base_url: base_url.to_string(),
        }
    }
}

fn states_url(base: &str) -> Result<Url> {
    let url = Url::parse(&format!("{}/states/all", base.trim_end_matches('/')))?;
    Ok(url)
}

#[async_trait::async_trait]
impl DatasetNode for OpenskyStatesNode {
    fn node_name(&self) -> &'static str {
        OPENSKY_NODE
    }

    fn description(&self) -> &'static str {
        "Live aircraft state vectors from the OpenSky network"
    }

    fn parameters(&self) -> Vec<ParamSpec> {
        vec![
            ParamSpec::text(USERNAME_PARAM, "", "OpenSky account name, empty for anonymous"),
            ParamSpec::text(PASSWORD_PARAM, "", "OpenSky account password"),
        ]
    }

    #[instrument(skip(self, params))]
    async fn execute(&self, params: &ParamValues) -> Result<GeoTable> {
        let username = params.text(USERNAME_PARAM)?;
        let password = params.text(PASSWORD_PARAM)?;
        let credentials = Credentials::from_pair(username, password);

        let url = states_url(&self.base_url)?;
        let raw = self.fetcher.get_json(url, credentials.as_ref()).await?;
        let states = raw
            .get("states")
            .and_then(Value::as_array)
            .ok_or_else(|| NodeError::MissingField("states not found".into()))?;

        let table = tuples_to_table(states, &STATE_COLUMNS, LONGITUDE_INDEX, LATITUDE_INDEX)?;
        info!("Fetched {} aircraft state vectors", table.row_count());
        Ok(table)
    }
}
