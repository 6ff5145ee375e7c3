use std::path::PathBuf;
use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{Html, Json, Redirect};
use serde::Deserialize;

use crate::app::AppState;
use crate::fetch::fetcher_for_base;
use crate::model::PageSchema;
use crate::render::html::render_browser_page;
use crate::state::{LoadOutcome, Snapshot};

#[derive(Debug, Deserialize)]
pub struct LoadBaseQuery {
    base: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoadDirQuery {
    dir: String,
}

#[derive(Debug, Deserialize)]
pub struct PageQuery {
    page: String,
}

pub async fn index(State(state): State<AppState>) -> Html<String> {
    Html(render_browser_page(
        &state.browser.status(),
        &state.default_base,
    ))
}

/// Loads from a base URL or path, then sends the browser back to the index.
///
/// The load runs on its own task so that a client disconnect cannot cancel it halfway.
pub async fn load_base(
    State(state): State<AppState>,
    Query(q): Query<LoadBaseQuery>,
) -> Result<Redirect, (StatusCode, String)> {
    let base = q
        .base
        .map(|b| b.trim().to_owned())
        .filter(|b| !b.is_empty())
        .unwrap_or_else(|| state.default_base.clone());

    let browser = Arc::clone(&state.browser);
    let timeout = state.http_timeout;
    let outcome = tokio::spawn(async move {
        match fetcher_for_base(&base, timeout) {
            Ok(fetcher) => browser.load_from_base_path(fetcher.as_ref(), &base).await,
            Err(err) => {
                let ticket = browser.begin_load();
                browser.finish_load(ticket, Err(err))
            }
        }
    })
    .await
    .map_err(|err| (StatusCode::INTERNAL_SERVER_ERROR, format!("load task failed: {err}")))?;

    log_outcome(&outcome);
    Ok(Redirect::to("/"))
}

pub async fn load_dir(
    State(state): State<AppState>,
    Query(q): Query<LoadDirQuery>,
) -> Result<Redirect, (StatusCode, String)> {
    let dir = q.dir.trim();
    if dir.is_empty() {
        return Err((StatusCode::BAD_REQUEST, "dir is required".to_string()));
    }

    let browser = Arc::clone(&state.browser);
    let dir = PathBuf::from(dir);
    let outcome = tokio::spawn(async move { browser.load_from_dir(dir).await })
        .await
        .map_err(|err| (StatusCode::INTERNAL_SERVER_ERROR, format!("load task failed: {err}")))?;

    log_outcome(&outcome);
    Ok(Redirect::to("/"))
}

pub async fn select(State(state): State<AppState>, Query(q): Query<PageQuery>) -> Html<String> {
    if state.browser.select(&q.page).is_none() {
        tracing::debug!(page = %q.page, "selected page is not loaded");
    }
    Html(render_browser_page(
        &state.browser.status(),
        &state.default_base,
    ))
}

pub async fn api_snapshot(State(state): State<AppState>) -> Json<Snapshot> {
    Json(Snapshot::clone(&state.browser.snapshot()))
}

pub async fn api_page(
    State(state): State<AppState>,
    Query(q): Query<PageQuery>,
) -> Result<Json<PageSchema>, StatusCode> {
    state
        .browser
        .snapshot()
        .page(&q.page)
        .cloned()
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

fn log_outcome(outcome: &LoadOutcome) {
    match outcome {
        LoadOutcome::Applied { pages } => tracing::info!(pages, "load applied"),
        LoadOutcome::Failed(message) => tracing::warn!(error = %message, "load failed"),
        LoadOutcome::Superseded => tracing::info!("load superseded by a newer one"),
    }
}
