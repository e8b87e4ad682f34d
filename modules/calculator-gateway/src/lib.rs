//! Calculator Gateway
//!
//! An HTTP front end for the calculator gRPC backend. Every `/add` request is
//! gated by a liveness probe, validated, forwarded as an `Add` call and the
//! outcome translated back into an HTTP status and JSON body.
//!
//! ## Architecture
//!
//! - `domain/service.rs` - probe and addition logic over `CalculatorClientV1`
//! - `api/rest` - DTOs, extraction, error mapping, handlers, routes, middleware
//! - `server.rs` - listener binding and graceful serve loop
//! - `config.rs` - layered configuration for the `calculator-gateway` binary

#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]

pub mod config;
pub mod domain;
pub mod server;

#[doc(hidden)]
pub mod api;

pub use api::rest::middleware::HttpLimits;
pub use api::rest::{AppState, GatewayError, build_router};
pub use config::{ENV_PREFIX, GatewayConfig, GatewayConfigError, LivenessProbe};
pub use domain::Service;
