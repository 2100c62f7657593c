use crate::constants::GDELT_NODE;
use crate::error::{NodeError, Result};
use crate::fetch::Fetcher;
use crate::node::DatasetNode;
use crate::normalize::{records_to_table, SchemaPolicy};
use crate::params::{ParamSpec, ParamValues};
use crate::table::{GeoTable, WGS84};
use geo_types::Point;
use geojson::FeatureCollection;
use serde_json::Value;
use tracing::{info, instrument};
use url::Url;

const KEYWORD_PARAM: &str = "keyword";
const LAST_HOURS_PARAM: &str = "last_hours";

/// Fetches geolocated news coverage from the GDELT knowledge graph.
///
/// One GET with the keyword and a lookback window expressed in minutes;
/// the response is a GeoJSON feature collection whose properties drive the
/// column set.
pub struct GdeltGeoNode {
    fetcher: Fetcher,
    base_url: String,
}

impl GdeltGeoNode {
    pub fn new(fetcher: Fetcher, base_url: &str) -> Self {
        Self {
            fetcher,
            base_url: base_url.to_string(),
        }
    }
}

fn request_url(base: &str, keyword: &str, last_hours: i64) -> Result<Url> {
    if last_hours < 0 {
        return Err(NodeError::Config(format!(
            "Parameter '{}' must be non-negative, got {}",
            LAST_HOURS_PARAM, last_hours
        )));
    }
    let timespan_minutes = last_hours * 60;
    let url = Url::parse_with_params(
        base,
        &[
            ("QUERY", keyword),
            ("TIMESPAN", timespan_minutes.to_string().as_str()),
            ("FORMAT", "GeoJSON"),
        ],
    )?;
    Ok(url)
}

fn feature_table(collection: FeatureCollection) -> Result<GeoTable> {
    let mut records = Vec::with_capacity(collection.features.len());
    let mut points = Vec::with_capacity(collection.features.len());

    for feature in collection.features {
        let geometry = feature
            .geometry
            .ok_or_else(|| NodeError::MissingField("geometry not found".into()))?;
        match geometry.value {
            geojson::Value::Point(coords) if coords.len() >= 2 => {
                points.push(Point::new(coords[0], coords[1]));
            }
            _ => {
                return Err(NodeError::Api {
                    message: "Expected point geometry in feature collection".into(),
                })
            }
        }
        records.push(Value::Object(feature.properties.unwrap_or_default()));
    }

    let mut table = records_to_table(&records, &SchemaPolicy::Inferred, None)?;
    table.attach_geometry(points, WGS84)?;
    Ok(table)
}

#[async_trait::async_trait]
impl DatasetNode for GdeltGeoNode {
    fn node_name(&self) -> &'static str {
        GDELT_NODE
    }

    fn description(&self) -> &'static str {
        "Geolocated news coverage from the GDELT knowledge graph"
    }

    fn parameters(&self) -> Vec<ParamSpec> {
        vec![
            ParamSpec::text(KEYWORD_PARAM, "*", "Free-text search keyword"),
            ParamSpec::integer(LAST_HOURS_PARAM, 24, "Lookback window in hours"),
        ]
    }

    #[instrument(skip(self, params))]
    async fn execute(&self, params: &ParamValues) -> Result<GeoTable> {
        let keyword = params.text(KEYWORD_PARAM)?;
        let last_hours = params.integer(LAST_HOURS_PARAM)?;

        let url = request_url(&self.base_url, keyword, last_hours)?;
        let raw = self.fetcher.get_json(url, None).await?;
        let collection: FeatureCollection = serde_json::from_value(raw)?;
        let table = feature_table(collection)?;

        info!(
            "Fetched {} knowledge graph features for '{}'",
            table.row_count(),
            keyword
        );
        Ok(table)
    }
}
