use async_trait::async_trait;
use crate::types::{ArticleRecord, ContentMode, SummaryRecord};
use crate::Result;

#[async_trait]
pub trait Scraper: Send + Sync {
    /// Returns the name of the news source
    fn source(&self) -> &str;

    /// Returns true if this scraper can handle the given URL
    fn can_handle(&self, url: &str) -> bool;

    /// Fetches listing page `page` (1-based) and extracts its summaries in document order
    async fn scrape_listing(&self, page: u32) -> Result<Vec<SummaryRecord>>;

    /// Fetches the article `id` and renders its body in `mode`
    async fn scrape_article(&self, id: &str, mode: ContentMode) -> Result<ArticleRecord>;
}
