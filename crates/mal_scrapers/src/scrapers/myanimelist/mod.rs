use std::sync::Arc;

use async_trait::async_trait;
use mal_core::{ArticleRecord, ContentMode, Error, PageFetcher, Result, Scraper, SummaryRecord};
use url::Url;

use crate::fetcher::HttpFetcher;
use crate::logging::Logger;
use crate::scrapers::utils;

pub mod article;
pub mod listing;
pub mod markup;

pub use article::{derive_article_time, extract_article};
pub use listing::{derive_listing_time, extract_listing, id_from_link};

/// Scheme and host that relative links on the site resolve against.
pub const ORIGIN: &str = "https://myanimelist.net";

#[derive(Clone)]
pub struct MyAnimeListScraper {
    fetcher: Arc<dyn PageFetcher>,
    logger: Logger,
}

impl MyAnimeListScraper {
    const NEWS_URL: &'static str = "https://myanimelist.net/news";

    pub fn new() -> Result<Self> {
        Ok(Self::with_fetcher(Arc::new(HttpFetcher::new()?)))
    }

    pub fn with_fetcher(fetcher: Arc<dyn PageFetcher>) -> Self {
        Self {
            fetcher,
            logger: Logger::new().with_prefix("[MyAnimeList]".to_string()),
        }
    }

    /// The first page is the bare news URL; later pages carry `?p=<page>`.
    pub fn listing_url(page: u32) -> Result<Url> {
        let mut url = utils::parse_url(Self::NEWS_URL)?;
        if page > 1 {
            url.query_pairs_mut().append_pair("p", &page.to_string());
        }
        Ok(url)
    }

    pub fn article_url(id: &str) -> Result<Url> {
        let mut url = utils::parse_url(Self::NEWS_URL)?;
        url.path_segments_mut()
            .map_err(|_| Error::InvalidUrl(format!("{} cannot take path segments", Self::NEWS_URL)))?
            .push(id);
        Ok(url)
    }
}

#[async_trait]
impl Scraper for MyAnimeListScraper {
    fn source(&self) -> &str {
        "MyAnimeList"
    }

    fn can_handle(&self, url: &str) -> bool {
        url.contains("myanimelist.net/news")
    }

    async fn scrape_listing(&self, page: u32) -> Result<Vec<SummaryRecord>> {
        let logger = self.logger.clone().with_prefix(format!("[page {}]", page));
        let url = Self::listing_url(page).map_err(Error::listing_fetch)?;

        logger.debug(&format!("fetching {}", url));
        let html = match self.fetcher.fetch(url.as_str()).await {
            Ok(html) => html,
            Err(e) => {
                logger.error(&format!("Error scraping news list: {}", e));
                return Err(Error::listing_fetch(e));
            }
        };

        let records = extract_listing(&html);
        logger.info(&format!("extracted {} news entries", records.len()));
        Ok(records)
    }

    async fn scrape_article(&self, id: &str, mode: ContentMode) -> Result<ArticleRecord> {
        let logger = self.logger.clone().with_prefix(format!("[news {}]", id));
        let url = Self::article_url(id).map_err(|e| Error::article_fetch(id, e))?;

        logger.debug(&format!("fetching {}", url));
        let html = match self.fetcher.fetch(url.as_str()).await {
            Ok(html) => html,
            Err(e) => {
                logger.error(&format!("Error scraping news: {}", e));
                return Err(Error::article_fetch(id, e));
            }
        };

        let article = extract_article(&html, id, mode);
        logger.info(&format!("extracted {} article", mode));
        Ok(article)
    }
}
