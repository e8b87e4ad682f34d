//! `calculator-gateway` configuration.

use std::net::{AddrParseError, SocketAddr};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use bootstrap::LoggingConfig;
use transport_grpc::GrpcClientConfig;

use crate::api::rest::middleware::HttpLimits;

/// Environment prefix, e.g. `CALC_GATEWAY__BACKEND_URI=http://calc:50051`.
pub const ENV_PREFIX: &str = "CALC_GATEWAY__";

/// Which backend call gates each `/add` request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LivenessProbe {
    /// Dedicated `Ping` RPC; never counts as an addition.
    #[default]
    Ping,
    /// `Add(0, 0)`, for backends that only expose `Add`.
    Add,
}

/// Rejected configuration values.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GatewayConfigError {
    #[error(
        "request_timeout_ms ({request_timeout_ms}) must exceed twice rpc_timeout_ms ({rpc_timeout_ms}) so backend failures surface as 503/500 rather than 504"
    )]
    RequestTimeoutTooShort {
        request_timeout_ms: u64,
        rpc_timeout_ms: u64,
    },
    #[error("{0} must be greater than zero")]
    Zero(&'static str),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GatewayConfig {
    /// HTTP listen address.
    pub listen_addr: String,
    /// Calculator backend URI, e.g. `http://127.0.0.1:50051`.
    pub backend_uri: String,
    pub connect_timeout_ms: u64,
    /// Deadline for each backend call, probe included.
    pub rpc_timeout_ms: u64,
    /// Deadline for the whole HTTP request; exceeding it yields `504`.
    pub request_timeout_ms: u64,
    pub body_limit_bytes: usize,
    pub liveness_probe: LivenessProbe,
    pub logging: LoggingConfig,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:3000".to_owned(),
            backend_uri: "http://127.0.0.1:50051".to_owned(),
            connect_timeout_ms: 2_000,
            rpc_timeout_ms: 5_000,
            request_timeout_ms: 30_000,
            body_limit_bytes: 64 * 1024,
            liveness_probe: LivenessProbe::Ping,
            logging: LoggingConfig::default(),
        }
    }
}

impl GatewayConfig {
    /// Apply `--port` and `--backend` on top of the layered configuration.
    ///
    /// # Errors
    /// Returns an error if a port override is given and `listen_addr` is not a socket address.
    pub fn apply_cli_overrides(
        &mut self,
        port: Option<u16>,
        backend: Option<String>,
    ) -> Result<(), AddrParseError> {
        if let Some(port) = port {
            let mut addr: SocketAddr = self.listen_addr.parse()?;
            addr.set_port(port);
            self.listen_addr = addr.to_string();
        }
        if let Some(backend) = backend {
            self.backend_uri = backend;
        }
        Ok(())
    }

    /// Check timeouts against each other.
    ///
    /// A gated `/add` makes two sequential backend calls (liveness check, then
    /// `Add`), each bounded by `rpc_timeout_ms`, so the whole-request deadline
    /// must be strictly larger than twice that.
    ///
    /// # Errors
    /// Returns the first offending setting.
    pub fn validate(&self) -> Result<(), GatewayConfigError> {
        for (name, value) in [
            ("connect_timeout_ms", self.connect_timeout_ms),
            ("rpc_timeout_ms", self.rpc_timeout_ms),
            ("request_timeout_ms", self.request_timeout_ms),
        ] {
            if value == 0 {
                return Err(GatewayConfigError::Zero(name));
            }
        }
        if self.request_timeout_ms <= self.rpc_timeout_ms.saturating_mul(2) {
            return Err(GatewayConfigError::RequestTimeoutTooShort {
                request_timeout_ms: self.request_timeout_ms,
                rpc_timeout_ms: self.rpc_timeout_ms,
            });
        }
        Ok(())
    }

    /// Client settings for the backend channel.
    #[must_use]
    pub fn grpc_client_config(&self) -> GrpcClientConfig {
        GrpcClientConfig::new("calculator")
            .with_connect_timeout(Duration::from_millis(self.connect_timeout_ms))
            .with_rpc_timeout(Duration::from_millis(self.rpc_timeout_ms))
    }

    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    #[must_use]
    pub fn http_limits(&self) -> HttpLimits {
        HttpLimits {
            request_timeout: self.request_timeout(),
            body_limit_bytes: self.body_limit_bytes,
        }
    }
}
