//! Wiring for Calculator SDK
//!
//! Provides `connect_client` to build the shared handle injected into callers.

use std::sync::Arc;

use anyhow::Result;
use transport_grpc::GrpcClientConfig;

use crate::SERVICE_NAME;
use crate::api::CalculatorClientV1;
use crate::client::CalculatorGrpcClient;

/// Build the process-wide calculator client.
///
/// The channel is lazy: the backend may be down at startup and come up later.
///
/// # Errors
/// Returns an error if `uri` is not a valid URI.
///
/// # Example
/// ```ignore
/// let client = connect_client("http://127.0.0.1:50051", &GrpcClientConfig::new("calculator"))?;
/// let state = AppState::new(client);
/// ```
pub fn connect_client(uri: &str, cfg: &GrpcClientConfig) -> Result<Arc<dyn CalculatorClientV1>> {
    let client = CalculatorGrpcClient::new_lazy(uri, cfg)?;
    tracing::info!(service = SERVICE_NAME, uri, "CalculatorClientV1 client wired");
    Ok(Arc::new(client))
}
