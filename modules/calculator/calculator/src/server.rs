//! gRPC server lifecycle for the calculator backend.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use calculator_sdk::CalculatorServer;
use tokio::net::TcpListener;
use tokio_stream::wrappers::TcpListenerStream;
use tokio_util::sync::CancellationToken;
use tonic::transport::Server;

use crate::api::grpc::CalculatorServiceImpl;
use crate::domain::Service;

/// Bind the gRPC listener.
///
/// # Errors
/// Returns an error if `addr` is not a socket address or the port is taken.
pub async fn bind(addr: &str) -> anyhow::Result<TcpListener> {
    let addr: SocketAddr = addr
        .parse()
        .with_context(|| format!("invalid listen address '{addr}'"))?;
    TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind gRPC listener on {addr}"))
}

/// Serve the calculator service on `listener` until `cancel` fires.
///
/// # Errors
/// Returns an error if the transport fails.
pub async fn serve(
    listener: TcpListener,
    service: Arc<Service>,
    cancel: CancellationToken,
) -> anyhow::Result<()> {
    let bound_addr = listener.local_addr()?;
    tracing::info!(%bound_addr, transport = "tcp", "Server listening on {bound_addr}");

    let incoming = TcpListenerStream::new(listener);
    Server::builder()
        .add_service(CalculatorServer::new(CalculatorServiceImpl::new(service)))
        .serve_with_incoming_shutdown(incoming, async move {
            cancel.cancelled().await;
        })
        .await?;

    tracing::info!("gRPC server stopped");
    Ok(())
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[tokio::test]
    async fn bind_rejects_garbage_address() {
        let err = bind("not-an-address").await.unwrap_err();
        assert!(err.to_string().contains("invalid listen address"));
    }

    #[tokio::test]
    async fn serve_stops_on_cancel() {
        let listener = bind("127.0.0.1:0").await.unwrap();
        let cancel = CancellationToken::new();
        let handle = tokio::spawn(serve(listener, Arc::new(Service::new()), cancel.clone()));

        cancel.cancel();
        let result = tokio::time::timeout(std::time::Duration::from_secs(5), handle)
            .await
            .expect("server should stop after cancel")
            .unwrap();
        assert!(result.is_ok());
    }
}
