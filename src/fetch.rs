use crate::constants::REQUEST_TIMEOUT_SECS;
use crate::error::Result;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Basic-auth credentials for sources that accept them.
#[derive(Debug, Clone)]
pub struct Credentials {
    username: String,
    password: String,
}

impl Credentials {
    /// A credential pair only counts when both halves are non-empty.
    /// One empty half means the request goes out unauthenticated.
    pub fn from_pair(username: &str, password: &str) -> Option<Self> {
        if username.is_empty() || password.is_empty() {
            return None;
        }
        Some(Self {
            username: username.to_string(),
            password: password.to_string(),
        })
    }

    pub fn username(&self) -> &str {
        &self.username
    }
}

/// Shared HTTP client wrapper used by every fetch node.
///
/// One GET per node execution; any transport failure, timeout, or
/// non-success status surfaces as an error with no retry.
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: reqwest::Client,
}

impl Fetcher {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }

    pub fn with_default_timeout() -> Result<Self> {
        Self::new(Duration::from_secs(REQUEST_TIMEOUT_SECS))
    }

    pub async fn get_json(&self, url: Url, credentials: Option<&Credentials>) -> Result<Value> {
        let body = self.get_bytes(url, credentials).await?;
        let value: Value = serde_json::from_slice(&body)?;
        Ok(value)
    }

    pub async fn get_bytes(&self, url: Url, credentials: Option<&Credentials>) -> Result<Vec<u8>> {
        debug!("GET {}", url);
        let mut request = self.client.get(url);
        if let Some(creds) = credentials {
            request = request.basic_auth(&creds.username, Some(&creds.password));
        }
        let response = request.send().await?.error_for_status()?;
        let body = response.bytes().await?;
        Ok(body.to_vec())
    }
}
