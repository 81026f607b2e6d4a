//! TTS gateway HTTP presentation layer
//!
//! Serves `synthesize-speech` plus liveness and readiness probes.

pub mod error;
pub mod handlers;
pub mod routes;
pub mod server;
pub mod state;

pub use error::ApiError;
pub use routes::create_router;
pub use server::serve_with_shutdown;
pub use state::AppState;
