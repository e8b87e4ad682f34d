//! HTTP server lifecycle for calculator-gateway.

use std::net::SocketAddr;

use anyhow::Context;
use axum::Router;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;

/// Bind the HTTP listener.
///
/// # Errors
/// Returns an error if `addr` is not a socket address or the port is taken.
pub async fn bind(addr: &str) -> anyhow::Result<TcpListener> {
    let addr: SocketAddr = addr
        .parse()
        .with_context(|| format!("invalid listen address '{addr}'"))?;
    TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind HTTP listener on {addr}"))
}

/// Log the endpoints served on `addr`.
pub fn log_endpoints(addr: SocketAddr) {
    tracing::info!("HTTP gateway listening on http://{addr}");
    tracing::info!("Available endpoints:");
    tracing::info!("  GET  /health - Health check");
    tracing::info!("  GET  /add?a=<number>&b=<number> - Add two numbers via query parameters");
    tracing::info!("  POST /add - Add two numbers via JSON body {{\"a\": <number>, \"b\": <number>}}");
}

/// Serve `router` on `listener` until `cancel` fires, then drain in-flight requests.
///
/// # Errors
/// Returns an error if the server fails.
pub async fn serve(
    listener: TcpListener,
    router: Router,
    cancel: CancellationToken,
) -> anyhow::Result<()> {
    let shutdown = async move {
        cancel.cancelled().await;
        tracing::info!("HTTP server shutting down gracefully (cancellation)");
    };

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(|e| anyhow::anyhow!(e))
}
