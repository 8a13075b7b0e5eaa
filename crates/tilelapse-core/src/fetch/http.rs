use std::time::Duration;

use crate::error::{Result, TilelapseError};

/// Blocking HTTP GET, abstracted so tile fetching can run against stubs.
pub trait HttpClient: Send + Sync {
    /// Fetch `url` and return the response body.
    ///
    /// Transport errors and non-2xx statuses are both errors.
    fn get(&self, url: &str) -> Result<Vec<u8>>;
}

/// Production client backed by `reqwest::blocking`.
pub struct ReqwestClient {
    client: reqwest::blocking::Client,
}

impl ReqwestClient {
    pub fn new(timeout: Duration, user_agent: &str) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()
            .map_err(|e| TilelapseError::Http(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self { client })
    }
}

impl HttpClient for ReqwestClient {
    fn get(&self, url: &str) -> Result<Vec<u8>> {
        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| TilelapseError::Http(format!("Request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(TilelapseError::Http(format!("HTTP {status} from {url}")));
        }

        response
            .bytes()
            .map(|b| b.to_vec())
            .map_err(|e| TilelapseError::Http(format!("Failed to read response: {e}")))
    }
}
