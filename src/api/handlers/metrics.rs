use axum::extract::State;
use axum::http::header::CONTENT_TYPE;
use axum::response::IntoResponse;
use metrics::gauge;

use crate::AppState;

/// Prometheus scrape endpoint. The page-store gauge is refreshed at
/// scrape time so it tracks the live store rather than the last render.
pub async fn render(State(state): State<AppState>) -> impl IntoResponse {
    gauge!("pages_cached").set(state.site.page_count().await as f64);

    let body = state.metrics_handle.render();
    ([(CONTENT_TYPE, "text/plain; version=0.0.4")], body)
}
