use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
    Json,
};
use mal_core::{ArticleRecord, ContentMode};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

use crate::error::AppError;
use crate::pagination::{resolve_page, NewsPage, Pagination};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct ArticleQuery {
    pub format: Option<String>,
}

pub async fn root() -> impl IntoResponse {
    Json(json!({ "message": "MAL News API is running!" }))
}

pub async fn list_news(
    State(state): State<Arc<AppState>>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<Json<NewsPage>, AppError> {
    // Raw pairs: junk or repeated `p` values fall back instead of failing extraction.
    let raw_page = params.iter().find(|(key, _)| key == "p").map(|(_, value)| value.as_str());
    let page = resolve_page(raw_page, state.max_page)?;
    let data = state.scraper.scrape_listing(page).await?;
    let pagination = Pagination::new(page, data.len(), state.max_page);
    Ok(Json(NewsPage { data, pagination }))
}

pub async fn get_news(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Query(query): Query<ArticleQuery>,
) -> Result<Json<ArticleRecord>, AppError> {
    if id.trim().is_empty() {
        return Err(AppError::BadRequest("News ID is required".to_string()));
    }
    let mode = match query.format.as_deref() {
        Some(format) => format.parse::<ContentMode>().map_err(AppError::BadRequest)?,
        None => ContentMode::default(),
    };
    let article = state.scraper.scrape_article(&id, mode).await?;
    Ok(Json(article))
}
