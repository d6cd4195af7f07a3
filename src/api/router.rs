use axum::middleware;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::auth::require_auth;
use super::handlers;
use crate::AppState;

pub fn create_router(state: AppState) -> Router {
    // Public routes — no authentication required
    let public = Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/metrics", get(handlers::metrics::render));

    // Organizer write route — requires Bearer token when one is configured
    let admin = Router::new()
        .route("/api/race", post(handlers::race::submit))
        .layer(middleware::from_fn_with_state(state.clone(), require_auth));

    // CORS: pages and API are same-origin; direct API access needs the token
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    public
        .merge(admin)
        // Every other path is a pre-rendered page lookup.
        .fallback(handlers::pages::serve)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
