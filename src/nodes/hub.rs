use crate::constants::HUB_NODE;
use crate::error::{NodeError, Result};
use crate::fetch::Fetcher;
use crate::node::DatasetNode;
use crate::params::{ParamSpec, ParamValues};
use crate::table::GeoTable;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};
use url::Url;

const ITEM_ID_PARAM: &str = "item_id";
const DEST_DIR_PARAM: &str = "dest_dir";

/// Downloads an archived dataset from the ArcGIS content hub and extracts
/// it locally.
///
/// Unlike the fetch-only nodes this one writes to the filesystem: it creates
/// the destination directory, stores the downloaded archive there, and
/// extracts it in place. The result table is the single `path` column
/// listing the destination directory's immediate entries after extraction.
pub struct HubDownloadNode {
    fetcher: Fetcher,
    content_url: String,
}

impl HubDownloadNode {
    pub fn new(fetcher: Fetcher, content_url: &str) -> Self {
        Self {
            fetcher,
            content_url: content_url.to_string(),
        }
    }

    fn item_url(&self, item_id: &str) -> Result<Url> {
        let url = Url::parse_with_params(
            &format!("{}/{}", self.content_url.trim_end_matches('/'), item_id),
            &[("f", "json")],
        )?;
        Ok(url)
    }

    fn data_url(&self, item_id: &str) -> Result<Url> {
        let url = Url::parse(&format!(
            "{}/{}/data",
            self.content_url.trim_end_matches('/'),
            item_id
        ))?;
        Ok(url)
    }

    /// Look the identifier up in the content API. The API answers unknown
    /// ids with HTTP 200 and an error document, so the body is inspected.
    async fn resolve_item(&self, item_id: &str) -> Result<String> {
        let raw = self.fetcher.get_json(self.item_url(item_id)?, None).await?;
        if let Some(error) = raw.get("error") {
            return Err(NodeError::Api {
                message: format!("Item '{}' not found: {}", item_id, error),
            });
        }
        let title = raw
            .get("title")
            .and_then(Value::as_str)
            .unwrap_or(item_id)
            .to_string();
        Ok(title)
    }
}

/// Extract `archive_path` into `dest_dir` and list the directory's
/// immediate entries, sorted for stable output.
pub fn unpack_and_list(archive_path: &Path, dest_dir: &Path) -> Result<Vec<String>> {
    let file = fs::File::open(archive_path)?;
    let mut archive = zip::ZipArchive::new(file)?;
    debug!("Extracting {} archive entries", archive.len());
    archive.extract(dest_dir)?;

    let mut entries = Vec::new();
    for entry in fs::read_dir(dest_dir)? {
        entries.push(entry?.path().to_string_lossy().into_owned());
    }
    entries.sort();
    Ok(entries)
}

#[async_trait::async_trait]
impl DatasetNode for HubDownloadNode {
    fn node_name(&self) -> &'static str {
        HUB_NODE
    }

    fn description(&self) -> &'static str {
        "Download and extract an archived dataset from the content hub"
    }

    fn parameters(&self) -> Vec<ParamSpec> {
        vec![
            ParamSpec::text(ITEM_ID_PARAM, "", "Public content item identifier"),
            ParamSpec::text(DEST_DIR_PARAM, "hub_data", "Local destination directory"),
        ]
    }

    #[instrument(skip(self, params))]
    async fn execute(&self, params: &ParamValues) -> Result<GeoTable> {
        let item_id = params.text(ITEM_ID_PARAM)?;
        if item_id.is_empty() {
            return Err(NodeError::Config(format!(
                "Parameter '{}' must not be empty",
                ITEM_ID_PARAM
            )));
        }
        let dest_dir = PathBuf::from(params.text(DEST_DIR_PARAM)?);

        let title = self.resolve_item(item_id).await?;
        info!("Resolved item '{}' ({})", item_id, title);

        fs::create_dir_all(&dest_dir)?;
        let payload = self.fetcher.get_bytes(self.data_url(item_id)?, None).await?;
        let archive_path = dest_dir.join(format!("{}.zip", item_id));
        fs::write(&archive_path, &payload)?;

        let entries = unpack_and_list(&archive_path, &dest_dir)?;
        info!(
            "Extracted archive into {} ({} entries)",
            dest_dir.display(),
            entries.len()
        );

        let mut table = GeoTable::new(vec!["path".to_string()]);
        for entry in entries {
            table.push_row(vec![Value::String(entry)])?;
        }
        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node() -> HubDownloadNode {
        HubDownloadNode::new(
            Fetcher::with_default_timeout().unwrap(),
            "https://www.arcgis.com/sharing/rest/content/items",
        )
    }

    #[test]
    fn test_item_url_requests_json() {
        let url = node().item_url("abc123").unwrap();
        assert_eq!(
            url.as_str(),
            "https://www.arcgis.com/sharing/rest/content/items/abc123?f=json"
        );
    }

    #[test]
    fn test_data_url() {
        let url = node().data_url("abc123").unwrap();
        assert_eq!(
            url.as_str(),
            "https://www.arcgis.com/sharing/rest/content/items/abc123/data"
        );
    }

    #[tokio::test]
    async fn test_empty_item_id_is_rejected() {
        let params = ParamValues::defaults(&node().parameters());
        let err = node().execute(&params).await.unwrap_err();
        assert!(matches!(err, NodeError::Config(_)));
    }
}
