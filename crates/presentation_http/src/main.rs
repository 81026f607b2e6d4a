//! TTS gateway server
//!
//! Main entry point for the HTTP API server.

use std::sync::Arc;

use anyhow::Context;
use axum::http::{HeaderValue, Method};
use infrastructure::{AppConfig, build_synthesis_service, init_logging};
use presentation_http::{AppState, create_router, serve_with_shutdown};
use tokio::{net::TcpListener, signal};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load().context("Failed to load configuration")?;
    init_logging(&config.logging)?;

    info!("TTS gateway v{} starting...", env!("CARGO_PKG_VERSION"));

    for warning in config.validate() {
        warn!("{warning}");
    }

    let synthesis = build_synthesis_service(&config).context("Failed to build synthesis service")?;

    let readiness = synthesis.readiness().await;
    info!(
        primary = readiness.primary_configured,
        secondary = readiness.secondary_configured,
        ffmpeg = readiness.transcoder_available,
        "Pipeline components"
    );
    if !readiness.transcoder_available {
        warn!(
            ffmpeg = %config.speech.transcoder.ffmpeg_path,
            "ffmpeg is not available; synthesis requests will fail"
        );
    }

    let state = AppState {
        synthesis: Arc::new(synthesis),
        config: Arc::new(config.clone()),
    };

    // Configure CORS layer
    let cors_layer = if config.server.allowed_origins.is_empty() {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([Method::GET, Method::POST])
            .allow_headers(Any)
    } else {
        let origins: Vec<HeaderValue> = config
            .server
            .allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([Method::GET, Method::POST])
            .allow_headers(Any)
    };

    // Add middleware (order matters: first added = innermost)
    let mut app = create_router(state).layer(TraceLayer::new_for_http());
    if config.server.cors_enabled {
        app = app.layer(cors_layer);
    }

    // Start server
    let addr = config.server.bind_addr();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    info!("Server listening on http://{addr}");

    serve_with_shutdown(listener, app, shutdown_signal(), config.server.shutdown_timeout()).await?;

    info!("Server shutdown complete");

    Ok(())
}

/// Wait for shutdown signals (SIGINT, SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            },
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            },
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received Ctrl+C, initiating graceful shutdown...");
        }
        () = terminate => {
            info!("Received SIGTERM, initiating graceful shutdown...");
        }
    }
}
