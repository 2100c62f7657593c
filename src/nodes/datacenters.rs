use crate::constants::DATACENTERS_NODE;
use crate::error::{NodeError, Result};
use crate::fetch::Fetcher;
use crate::node::DatasetNode;
use crate::normalize::{records_to_table, GeoFields, SchemaPolicy};
use crate::params::{ParamSpec, ParamValues};
use crate::table::GeoTable;
use serde_json::Value;
use tracing::{info, instrument};
use url::Url;

const GEO_FIELDS: GeoFields = GeoFields {
    longitude: "longitude",
    latitude: "latitude",
};

/// Fetches the blockchain data-center directory.
///
/// Takes no parameters. The column set is whatever keys the directory
/// records carry. Coordinates are read straight off each record when the
/// point column is built; a payload without longitude/latitude fields fails
/// at that step rather than up front.
pub struct DataCentersNode {
    fetcher: Fetcher,
    base_url: String,
}

impl DataCentersNode {
    pub fn new(fetcher: Fetcher, base_url: &str) -> Self {
        Self {
            fetcher,
            base_url: base_url.to_string(),
        }
    }
}

fn directory_url(base: &str) -> Result<Url> {
    let url = Url::parse(&format!("{}/data-centers", base.trim_end_matches('/')))?;
    Ok(url)
}

#[async_trait::async_trait]
impl DatasetNode for DataCentersNode {
    fn node_name(&self) -> &'static str {
        DATACENTERS_NODE
    }

    fn description(&self) -> &'static str {
        "Directory of blockchain data-center locations"
    }

    fn parameters(&self) -> Vec<ParamSpec> {
        Vec::new()
    }

    #[instrument(skip(self, _params))]
    async fn execute(&self, _params: &ParamValues) -> Result<GeoTable> {
        let url = directory_url(&self.base_url)?;
        let raw = self.fetcher.get_json(url, None).await?;
        let records = raw
            .get("data_centers")
            .and_then(Value::as_array)
            .ok_or_else(|| NodeError::MissingField("data_centers not found".into()))?;

        let table = records_to_table(records, &SchemaPolicy::Inferred, Some(&GEO_FIELDS))?;
        info!("Fetched {} data-center records", table.row_count());
        Ok(table)
    }
}
