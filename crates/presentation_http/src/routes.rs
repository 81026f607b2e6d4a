//! Route definitions

use axum::{Router, extract::DefaultBodyLimit, routing::get};

use crate::{handlers, state::AppState};

/// Create the main router with all routes
pub fn create_router(state: AppState) -> Router {
    let body_limit = state.config.server.max_body_size_bytes;

    Router::new()
        // Health and status endpoints
        .route("/health", get(handlers::health::health_check))
        .route("/ready", get(handlers::health::readiness_check))
        // Synthesis
        .route(
            "/synthesize-speech",
            get(handlers::synthesis::synthesize_query).post(handlers::synthesis::synthesize_json),
        )
        .layer(DefaultBodyLimit::max(body_limit))
        // Attach state
        .with_state(state)
}
