// ============================================================
// Layer 6 — HTTP Fetcher
// ============================================================
// reqwest-backed PageFetcher for the crawler. One shared client
// with fixed timeouts. A non-success status is an error; there
// are no retries.

use std::time::Duration;

use anyhow::{Context, Result};
use url::Url;

use crate::domain::traits::PageFetcher;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new() -> Result<Self> {
        let client = reqwest::Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .timeout(REQUEST_TIMEOUT)
            .user_agent(concat!("concept-classifier/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Cannot build HTTP client")?;
        Ok(Self { client })
    }

    async fn get(&self, url: &Url) -> Result<reqwest::Response> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .with_context(|| format!("Request to '{url}' failed"))?;

        response
            .error_for_status()
            .with_context(|| format!("Could not fetch '{url}'"))
    }
}

impl PageFetcher for HttpFetcher {
    async fn fetch_text(&self, url: &Url) -> Result<String> {
        let response = self.get(url).await?;
        response
            .text()
            .await
            .with_context(|| format!("Cannot read body of '{url}'"))
    }

    async fn fetch_bytes(&self, url: &Url) -> Result<Vec<u8>> {
        let response = self.get(url).await?;
        let bytes = response
            .bytes()
            .await
            .with_context(|| format!("Cannot read body of '{url}'"))?;
        Ok(bytes.to_vec())
    }
}
