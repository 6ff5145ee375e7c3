//! HTTP front end for the viewer.

pub mod routes;

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::routing::get;
use tower_http::trace::TraceLayer;

use crate::state::SchemaBrowser;

#[derive(Clone)]
pub struct AppState {
    pub browser: Arc<SchemaBrowser>,
    pub default_base: String,
    pub http_timeout: Duration,
}

impl AppState {
    pub fn new(default_base: impl Into<String>, http_timeout: Duration) -> Self {
        Self {
            browser: Arc::new(SchemaBrowser::new()),
            default_base: default_base.into(),
            http_timeout,
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(|| async { "ok\n" }))
        .route("/", get(routes::index))
        .route("/load", get(routes::load_base))
        .route("/load-dir", get(routes::load_dir))
        .route("/select", get(routes::select))
        .route("/api/snapshot", get(routes::api_snapshot))
        .route("/api/page", get(routes::api_page))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
