//! Calculator SDK
//!
//! This crate provides everything needed to consume the calculator service:
//! - API trait (`CalculatorClientV1`)
//! - Error types (`CalculatorError`)
//! - Client construction (`connect_client`)
//! - Proto stubs for server implementation
//!
//! ## Usage
//!
//! ```ignore
//! use calculator_sdk::{CalculatorClientV1, connect_client};
//! use transport_grpc::GrpcClientConfig;
//!
//! let client = connect_client("http://127.0.0.1:50051", &GrpcClientConfig::new("calculator"))?;
//! let sum = client.add(1, 2).await?;
//! ```

#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]

// === API TRAIT AND TYPES ===
mod api;
pub use api::{CalculatorClientV1, CalculatorError};

// === CLIENT ===
mod client;
mod wiring;
pub use client::CalculatorGrpcClient;
pub use wiring::connect_client;

// === GRPC PROTO STUBS (for server implementation) ===
/// Generated protobuf types for the `Calculator` service
#[allow(clippy::pedantic)]
pub mod proto {
    tonic::include_proto!("calculator.v1");
}

// Re-export proto types needed by server
pub use proto::calculator_server::{Calculator, CalculatorServer};
pub use proto::{AddRequest, AddResponse, PingRequest, PingResponse};

/// Fully qualified gRPC service name
pub const SERVICE_NAME: &str = "calculator.v1.Calculator";

/// Status string returned by a healthy `Ping`
pub const PING_STATUS_SERVING: &str = "SERVING";
