//! gRPC client implementation of `CalculatorClientV1`

use std::time::Duration;

use async_trait::async_trait;
use tonic::transport::Channel;
use transport_grpc::{GrpcClientConfig, connect_lazy, connect_with_stack};

use crate::api::{CalculatorClientV1, CalculatorError};
use crate::proto::calculator_client::CalculatorClient;
use crate::proto::{AddRequest, PingRequest};

/// gRPC client implementation of `CalculatorClientV1`.
///
/// Wraps a single long-lived channel; each call clones the generated client,
/// which shares the underlying connection.
#[derive(Clone)]
pub struct CalculatorGrpcClient {
    inner: CalculatorClient<Channel>,
    rpc_timeout: Duration,
}

impl CalculatorGrpcClient {
    /// Build a client whose channel connects on first use.
    ///
    /// # Errors
    /// Returns an error if `uri` is invalid.
    pub fn new_lazy(uri: impl Into<String>, cfg: &GrpcClientConfig) -> anyhow::Result<Self> {
        let inner = CalculatorClient::new(connect_lazy::<Channel>(uri, cfg)?);
        Ok(Self {
            inner,
            rpc_timeout: cfg.rpc_timeout,
        })
    }

    /// Connect eagerly, failing if the backend is not reachable.
    ///
    /// # Errors
    /// Returns an error if the URI is invalid or the connection fails.
    pub async fn connect(uri: impl Into<String>, cfg: &GrpcClientConfig) -> anyhow::Result<Self> {
        let inner = CalculatorClient::new(connect_with_stack::<Channel>(uri, cfg).await?);
        Ok(Self {
            inner,
            rpc_timeout: cfg.rpc_timeout,
        })
    }

    /// Run `fut` under the configured deadline.
    async fn bounded<T, F>(&self, op: &'static str, fut: F) -> Result<T, CalculatorError>
    where
        F: Future<Output = Result<tonic::Response<T>, tonic::Status>>,
    {
        match tokio::time::timeout(self.rpc_timeout, fut).await {
            Ok(Ok(response)) => Ok(response.into_inner()),
            Ok(Err(status)) => Err(CalculatorError::from(status)),
            Err(_elapsed) => Err(CalculatorError::DeadlineExceeded(format!(
                "{op} did not complete within {} ms",
                self.rpc_timeout.as_millis()
            ))),
        }
    }
}

#[async_trait]
impl CalculatorClientV1 for CalculatorGrpcClient {
    async fn add(&self, a: i64, b: i64) -> Result<i64, CalculatorError> {
        let mut client = self.inner.clone();
        let response = self
            .bounded("Add", client.add(AddRequest { a, b }))
            .await?;
        Ok(response.result)
    }

    async fn ping(&self) -> Result<(), CalculatorError> {
        let mut client = self.inner.clone();
        self.bounded("Ping", client.ping(PingRequest {})).await?;
        Ok(())
    }
}
