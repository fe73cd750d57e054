pub mod cli;
pub mod fetcher;
pub mod logging;
pub mod scrapers;

pub use fetcher::HttpFetcher;
pub use scrapers::myanimelist::MyAnimeListScraper;

pub use cli::{handle_command, ScraperArgs, ScraperCommands};

pub mod prelude {
    pub use mal_core::{ArticleRecord, ContentMode, Error, Result, Scraper, SummaryRecord};
}
