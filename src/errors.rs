use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid submission: {0}")]
    Validation(String),

    /// The row was persisted but re-rendering the affected pages (or the
    /// deploy hook) failed. The body says so explicitly rather than
    /// pretending the whole operation failed.
    #[error("Regeneration failed: {0}")]
    Regeneration(String),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

#[derive(Serialize)]
struct ErrorBody {
    success: bool,
    persisted: bool,
    revalidated: bool,
    error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, persisted, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, false, msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, false, msg.clone()),
            AppError::Regeneration(msg) => {
                tracing::error!("Regeneration error after commit: {msg}");
                (StatusCode::INTERNAL_SERVER_ERROR, true, msg.clone())
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    false,
                    "Internal server error".into(),
                )
            }
        };

        (
            status,
            Json(ErrorBody {
                success: false,
                persisted,
                revalidated: false,
                error: message,
            }),
        )
            .into_response()
    }
}
