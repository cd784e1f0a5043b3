//! HTTP surface.
//!
//! | Route | Response |
//! |-------|----------|
//! | `<feed_path>` | RSS 2.0, `application/rss+xml` |
//! | `<api_path>` | JSON record list, `application/json` |
//! | `/` | temporary redirect to `<feed_path>` |
//! | `/health` | `ok` |
//!
//! Every feed or API request re-reads the site list and re-runs the whole
//! pipeline. The only shared state is the immutable config and the HTTP
//! client's connection pool.

use crate::aggregate::build_feed;
use crate::config::FeedConfig;
use crate::fetcher::PageFetcher;
use crate::models::FeedDocument;
use crate::outputs::{JSON_CONTENT_TYPE, RSS_CONTENT_TYPE, json, rss};
use crate::sites::load_sites;
use axum::extract::State;
use axum::http::StatusCode;
use axum::http::header::CONTENT_TYPE;
use axum::response::{IntoResponse, Redirect, Response};
use axum::routing::get;
use axum::Router;
use std::error::Error;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{error, info, instrument};

#[derive(Debug, Clone)]
pub struct AppState {
    config: Arc<FeedConfig>,
    fetcher: PageFetcher,
}

impl AppState {
    pub fn new(config: FeedConfig, fetcher: PageFetcher) -> Self {
        Self {
            config: Arc::new(config),
            fetcher,
        }
    }

    async fn build_document(&self) -> Result<FeedDocument, std::io::Error> {
        let urls = load_sites(&self.config.sites_file).await?;
        Ok(build_feed(&self.fetcher, &self.config, &urls).await)
    }
}

pub fn create_router(state: AppState) -> Router {
    let config = Arc::clone(&state.config);

    let mut router = Router::new()
        .route(&config.feed_path, get(feed))
        .route(&config.api_path, get(api))
        .route("/health", get(|| async { "ok" }));
    if config.feed_path != "/" && config.api_path != "/" {
        router = router.route("/", get(index));
    }
    router.with_state(state)
}

/// Bind `listen` and serve until the process is stopped.
pub async fn serve(state: AppState, listen: &str) -> Result<(), Box<dyn Error>> {
    let listener = TcpListener::bind(listen).await?;
    info!(
        addr = %listener.local_addr()?,
        feed = %state.config.feed_url(),
        api_path = %state.config.api_path,
        "Serving feed"
    );
    axum::serve(listener, create_router(state)).await?;
    Ok(())
}

#[instrument(level = "info", skip_all)]
async fn feed(State(state): State<AppState>) -> Response {
    let doc = match state.build_document().await {
        Ok(doc) => doc,
        Err(e) => return internal_error("site list", &e),
    };
    match rss::render_rss(&doc) {
        Ok(bytes) => ([(CONTENT_TYPE, RSS_CONTENT_TYPE)], bytes).into_response(),
        Err(e) => internal_error("rss rendering", &*e),
    }
}

#[instrument(level = "info", skip_all)]
async fn api(State(state): State<AppState>) -> Response {
    let doc = match state.build_document().await {
        Ok(doc) => doc,
        Err(e) => return internal_error("site list", &e),
    };
    match json::render_json(&doc) {
        Ok(bytes) => ([(CONTENT_TYPE, JSON_CONTENT_TYPE)], bytes).into_response(),
        Err(e) => internal_error("json rendering", &e),
    }
}

async fn index(State(state): State<AppState>) -> Redirect {
    Redirect::temporary(&state.config.feed_path)
}

fn internal_error(stage: &str, e: &(dyn Error + 'static)) -> Response {
    error!(stage, error = %e, "Request failed");
    (StatusCode::INTERNAL_SERVER_ERROR, format!("{stage} failed: {e}")).into_response()
}
