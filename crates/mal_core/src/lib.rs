pub mod error;
pub mod fetch;
pub mod scraper;
pub mod types;

pub use error::{Error, Result};
pub use fetch::PageFetcher;
pub use scraper::Scraper;
pub use types::{ArticleRecord, ContentMode, ContentType, SummaryRecord};
