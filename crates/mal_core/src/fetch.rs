use async_trait::async_trait;
use crate::Result;

/// Browser-like identifier sent with every page request; the site rejects
/// default client identifiers.
pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64)";

#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Retrieves the raw markup behind `url`.
    ///
    /// Fails on transport errors and non-2xx responses.
    async fn fetch(&self, url: &str) -> Result<String>;
}
