//! Server loop with bounded graceful shutdown

use std::future::{Future, IntoFuture};
use std::time::Duration;

use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tracing::{info, warn};

/// Serve `app` until `signal` resolves, then drain in-flight requests
///
/// With a `drain_timeout`, connections still open when it elapses are
/// abandoned and the function returns. `None` waits for every connection.
///
/// # Errors
///
/// Returns the I/O error that stopped the accept loop.
pub async fn serve_with_shutdown<F>(
    listener: TcpListener,
    app: Router,
    signal: F,
    drain_timeout: Option<Duration>,
) -> std::io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let (signalled_tx, signalled_rx) = oneshot::channel::<()>();
    let shutdown = async move {
        signal.await;
        let _ = signalled_tx.send(());
    };

    let server = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .into_future();

    let deadline = async move {
        match (signalled_rx.await, drain_timeout) {
            (Ok(()), Some(timeout)) => {
                info!("Waiting up to {timeout:?} for connections to close...");
                tokio::time::sleep(timeout).await;
                timeout
            },
            _ => std::future::pending().await,
        }
    };

    tokio::select! {
        result = server => result,
        timeout = deadline => {
            warn!(?timeout, "Shutdown timeout elapsed, abandoning open connections");
            Ok(())
        }
    }
}
