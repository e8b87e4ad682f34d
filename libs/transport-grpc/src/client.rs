//! gRPC client transport configuration and connection utilities.
//!
//! This module provides the client side of the calculator transport:
//! - Configurable connect and per-RPC timeouts
//! - HTTP/2 keepalive settings for connection health
//! - Lazy channels that connect on first use and reconnect on their own
//!
//! No retries: a failed call surfaces to the caller on the first attempt.

use std::time::Duration;
use tonic::transport::{Channel, Endpoint};
use tracing::Instrument;

fn duration_to_i64_ms(duration: Duration) -> i64 {
    i64::try_from(duration.as_millis()).unwrap_or(i64::MAX)
}

/// Configuration for the gRPC client transport stack.
#[derive(Debug, Clone)]
pub struct GrpcClientConfig {
    /// Timeout for establishing a connection.
    pub connect_timeout: Duration,

    /// Upper bound for a single RPC, applied at the transport level.
    pub rpc_timeout: Duration,

    /// Service name for tracing.
    pub service_name: &'static str,

    /// Emit connection events through `tracing`.
    pub enable_tracing: bool,
}

impl Default for GrpcClientConfig {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(2),
            rpc_timeout: Duration::from_secs(5),
            service_name: "grpc_client",
            enable_tracing: true,
        }
    }
}

impl GrpcClientConfig {
    /// Create a new configuration with the given service name.
    #[must_use]
    pub fn new(service_name: &'static str) -> Self {
        Self {
            service_name,
            ..Default::default()
        }
    }

    /// Set the connect timeout.
    #[must_use]
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Set the RPC timeout.
    #[must_use]
    pub fn with_rpc_timeout(mut self, timeout: Duration) -> Self {
        self.rpc_timeout = timeout;
        self
    }

    /// Disable tracing.
    #[must_use]
    pub fn without_tracing(mut self) -> Self {
        self.enable_tracing = false;
        self
    }
}

/// Build a tonic `Endpoint` with timeouts and keepalive settings.
///
/// Configures:
/// - Connect timeout
/// - Per-RPC timeout
/// - TCP keepalive (30 seconds)
/// - HTTP/2 keepalive interval (30 seconds)
/// - Keepalive timeout (10 seconds)
///
/// # Errors
/// Returns an error if `uri` is not a valid URI.
pub fn build_endpoint(
    uri: String,
    cfg: &GrpcClientConfig,
) -> Result<Endpoint, tonic::transport::Error> {
    let endpoint = Endpoint::from_shared(uri)?
        .connect_timeout(cfg.connect_timeout)
        .timeout(cfg.rpc_timeout)
        .tcp_keepalive(Some(Duration::from_secs(30)))
        .http2_keep_alive_interval(Duration::from_secs(30))
        .keep_alive_timeout(Duration::from_secs(10));

    Ok(endpoint)
}

/// Create a client over a lazily connected channel.
///
/// No network I/O happens here. The channel dials the backend on the first
/// RPC and transparently re-dials after the backend restarts, so a caller
/// can be constructed while the backend is still down.
///
/// # Errors
/// Returns an error only if the URI is invalid.
pub fn connect_lazy<TClient>(uri: impl Into<String>, cfg: &GrpcClientConfig) -> anyhow::Result<TClient>
where
    TClient: From<Channel>,
{
    let uri_string = uri.into();
    let endpoint = build_endpoint(uri_string.clone(), cfg)?;
    let channel = endpoint.connect_lazy();

    if cfg.enable_tracing {
        tracing::info!(
            service_name = cfg.service_name,
            uri = %uri_string,
            connect_timeout_ms = duration_to_i64_ms(cfg.connect_timeout),
            rpc_timeout_ms = duration_to_i64_ms(cfg.rpc_timeout),
            "gRPC client configured (lazy connect)"
        );
    }

    Ok(TClient::from(channel))
}

/// Connect to a gRPC service eagerly.
///
/// Fails fast when the backend cannot be reached within the connect timeout.
///
/// # Errors
/// Returns an error if the URI is invalid or the connection cannot be established.
pub async fn connect_with_stack<TClient>(
    uri: impl Into<String>,
    cfg: &GrpcClientConfig,
) -> anyhow::Result<TClient>
where
    TClient: From<Channel>,
{
    let uri_string = uri.into();
    let span = tracing::debug_span!(
        "grpc_connect",
        service = cfg.service_name,
        uri = %uri_string
    );

    async move {
        let endpoint = build_endpoint(uri_string, cfg)?;
        let channel = endpoint.connect().await?;

        if cfg.enable_tracing {
            tracing::info!(
                service_name = cfg.service_name,
                connect_timeout_ms = duration_to_i64_ms(cfg.connect_timeout),
                rpc_timeout_ms = duration_to_i64_ms(cfg.rpc_timeout),
                "gRPC client connected"
            );
        }

        Ok(TClient::from(channel))
    }
    .instrument(span)
    .await
}
