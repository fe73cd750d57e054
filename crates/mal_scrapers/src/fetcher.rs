use async_trait::async_trait;
use mal_core::fetch::USER_AGENT;
use mal_core::{PageFetcher, Result};
use tracing::debug;

/// Fetches pages over HTTP with a browser-like `User-Agent`.
///
/// No retries and no timeout: a failed request surfaces immediately.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new() -> Result<Self> {
        let client = reqwest::Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String> {
        debug!(url = %url, "requesting page");
        let response = self
            .client
            .get(url)
            .send()
            .await?
            .error_for_status()?;
        debug!(url = %url, status = %response.status(), "page received");
        Ok(response.text().await?)
    }
}
