use std::sync::Arc;
use mal_core::{Result, Scraper};
use mal_scrapers::MyAnimeListScraper;

pub struct AppState {
    pub scraper: Arc<dyn Scraper>,
    /// Highest listing page clients may request
    pub max_page: u32,
}

impl AppState {
    /// State backed by the live MyAnimeList scraper.
    pub fn new(max_page: u32) -> Result<Self> {
        Ok(Self::with_scraper(Arc::new(MyAnimeListScraper::new()?), max_page))
    }

    pub fn with_scraper(scraper: Arc<dyn Scraper>, max_page: u32) -> Self {
        Self { scraper, max_page }
    }
}
