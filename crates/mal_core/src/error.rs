use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The listing page could not be retrieved at all.
    #[error("Failed to fetch news list")]
    ListingFetch(#[source] Box<Error>),

    /// The article page for `id` could not be retrieved at all.
    #[error("Failed to fetch news with ID: {id}")]
    ArticleFetch {
        id: String,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    pub fn listing_fetch(cause: Error) -> Self {
        Error::ListingFetch(Box::new(cause))
    }

    pub fn article_fetch(id: impl Into<String>, cause: Error) -> Self {
        Error::ArticleFetch {
            id: id.into(),
            source: Box::new(cause),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
