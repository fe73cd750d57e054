use axum::{routing::get, Router};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

pub mod error;
pub mod handlers;
pub mod pagination;
pub mod state;

pub use error::AppError;
pub use pagination::DEFAULT_MAX_PAGE;
pub use state::AppState;

pub fn create_app(state: AppState) -> Router {
    let cors = CorsLayer::permissive();

    Router::new()
        .route("/", get(handlers::root))
        .route("/api/news", get(handlers::list_news))
        .route("/api/news/:id", get(handlers::get_news))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(Arc::new(state))
}

/// Binds `addr` and serves the API until the process is stopped.
pub async fn serve(state: AppState, addr: SocketAddr) -> mal_core::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Server is running on http://{}", listener.local_addr()?);
    axum::serve(listener, create_app(state)).await?;
    Ok(())
}

pub mod prelude {
    pub use mal_core::{ArticleRecord, Error, Result, SummaryRecord};
    pub use crate::AppState;
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use mal_core::{ArticleRecord, ContentMode, ContentType, Error, Result, Scraper, SummaryRecord};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    /// Returns `per_page` made-up summaries per page, or fails every call.
    struct StubScraper {
        per_page: usize,
        fail: bool,
    }

    #[async_trait]
    impl Scraper for StubScraper {
        fn source(&self) -> &str {
            "stub"
        }

        fn can_handle(&self, _url: &str) -> bool {
            true
        }

        async fn scrape_listing(&self, page: u32) -> Result<Vec<SummaryRecord>> {
            if self.fail {
                return Err(Error::listing_fetch(Error::InvalidUrl("offline".to_string())));
            }
            Ok((0..self.per_page)
                .map(|i| SummaryRecord {
                    id: Some(format!("{}{}", page, i)),
                    title: format!("page {} item {}", page, i),
                    link: Some(format!("https://myanimelist.net/news/{}{}", page, i)),
                    image: None,
                    text: String::new(),
                    time: None,
                    author: String::new(),
                })
                .collect())
        }

        async fn scrape_article(&self, id: &str, mode: ContentMode) -> Result<ArticleRecord> {
            if self.fail {
                return Err(Error::article_fetch(id, Error::InvalidUrl("offline".to_string())));
            }
            Ok(ArticleRecord {
                id: id.to_string(),
                title: "Headline".to_string(),
                author: "Alpha".to_string(),
                time: Some("Oct 18".to_string()),
                image: None,
                content: format!("{} body", mode),
                content_type: (mode == ContentMode::Html).then_some(ContentType::Html),
            })
        }
    }

    fn app(per_page: usize, fail: bool) -> Router {
        create_app(AppState::with_scraper(
            Arc::new(StubScraper { per_page, fail }),
            DEFAULT_MAX_PAGE,
        ))
    }

    async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_root() {
        let (status, body) = get_json(app(1, false), "/").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "message": "MAL News API is running!" }));
    }

    #[tokio::test]
    async fn test_list_news_defaults_to_first_page() {
        let (status, body) = get_json(app(2, false), "/api/news").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"].as_array().unwrap().len(), 2);
        assert_eq!(body["data"][0]["title"], "page 1 item 0");
        assert!(body["data"][0].get("image").is_none());
        assert_eq!(
            body["pagination"],
            json!({ "current_page": 1, "has_next": true, "next_page": 2, "max_page": 100 })
        );
    }

    #[tokio::test]
    async fn test_list_news_bad_page_values_fall_back() {
        for uri in ["/api/news?p=abc", "/api/news?p=0", "/api/news?p=-2", "/api/news?p="] {
            let (status, body) = get_json(app(1, false), uri).await;
            assert_eq!(status, StatusCode::OK, "{}", uri);
            assert_eq!(body["pagination"]["current_page"], 1, "{}", uri);
        }
    }

    #[tokio::test]
    async fn test_list_news_passes_page() {
        let (_, body) = get_json(app(1, false), "/api/news?p=7").await;
        assert_eq!(body["data"][0]["title"], "page 7 item 0");
        assert_eq!(body["pagination"]["next_page"], 8);
    }

    #[tokio::test]
    async fn test_list_news_repeated_page_uses_first() {
        let (status, body) = get_json(app(1, false), "/api/news?p=3&p=9").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["pagination"]["current_page"], 3);
        assert_eq!(body["data"][0]["title"], "page 3 item 0");
    }

    #[tokio::test]
    async fn test_list_news_rejects_pages_above_ceiling() {
        let (status, body) = get_json(app(1, false), "/api/news?p=101").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body,
            json!({ "error": "Maximum page number is 100", "max_page": 100 })
        );
    }

    #[tokio::test]
    async fn test_list_news_last_and_empty_pages() {
        let (_, body) = get_json(app(3, false), "/api/news?p=100").await;
        assert_eq!(body["pagination"]["has_next"], false);
        assert_eq!(body["pagination"]["next_page"], Value::Null);

        let (_, body) = get_json(app(0, false), "/api/news?p=5").await;
        assert_eq!(body["data"], json!([]));
        assert_eq!(body["pagination"]["has_next"], false);
        assert_eq!(body["pagination"]["next_page"], 6);
    }

    #[tokio::test]
    async fn test_list_news_failure_is_500() {
        let (status, body) = get_json(app(1, true), "/api/news").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({ "error": "Failed to fetch news list" }));
    }

    #[tokio::test]
    async fn test_get_news_html_by_default() {
        let (status, body) = get_json(app(1, false), "/api/news/71234567").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["id"], "71234567");
        assert_eq!(body["content"], "html body");
        assert_eq!(body["content_type"], "html");
    }

    #[tokio::test]
    async fn test_get_news_text_format() {
        let (status, body) = get_json(app(1, false), "/api/news/1?format=text").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["content"], "text body");
        assert!(body.get("content_type").is_none());
    }

    #[tokio::test]
    async fn test_get_news_unknown_format() {
        let (status, body) = get_json(app(1, false), "/api/news/1?format=pdf").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "error": "Unsupported format: pdf" }));
    }

    #[tokio::test]
    async fn test_get_news_blank_id() {
        let (status, body) = get_json(app(1, false), "/api/news/%20").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "error": "News ID is required" }));
    }

    #[tokio::test]
    async fn test_get_news_failure_is_500() {
        let (status, body) = get_json(app(1, true), "/api/news/404").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({ "error": "Failed to fetch news with ID: 404" }));
    }
}
