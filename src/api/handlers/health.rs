use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;

use crate::AppState;

/// Healthy means the database answers and the page store holds the
/// startup build. An empty store would serve 404 for every page, so it
/// is reported as unhealthy even when the database is up.
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let db_ok = sqlx::query("SELECT 1").execute(&state.db).await.is_ok();
    let pages = state.site.page_count().await;

    if db_ok && pages > 0 {
        (
            StatusCode::OK,
            Json(json!({ "status": "healthy", "pages": pages })),
        )
    } else {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({
                "status": "unhealthy",
                "db": if db_ok { "connected" } else { "disconnected" },
                "pages": pages,
            })),
        )
    }
}
