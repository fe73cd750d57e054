use std::error::Error as StdError;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(String),

    #[error("Maximum page number is {max_page}")]
    PageOutOfRange { max_page: u32 },

    /// Any scraper failure; clients only ever see a 500 with its message.
    #[error(transparent)]
    Scraper(#[from] mal_core::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            AppError::BadRequest(message) => {
                (StatusCode::BAD_REQUEST, Json(json!({ "error": message }))).into_response()
            }
            AppError::PageOutOfRange { max_page } => (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": self.to_string(), "max_page": max_page })),
            )
                .into_response(),
            AppError::Scraper(err) => {
                tracing::error!("{}", cause_chain(err));
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": err.to_string() })),
                )
                    .into_response()
            }
        }
    }
}

/// Joins an error with its causes, skipping causes already quoted by the
/// message wrapping them.
fn cause_chain(err: &dyn StdError) -> String {
    let mut chain = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let message = cause.to_string();
        if !chain.ends_with(&message) {
            chain.push_str(": ");
            chain.push_str(&message);
        }
        source = cause.source();
    }
    chain
}
