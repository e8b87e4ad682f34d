//! Calculator backend
//!
//! A gRPC service that adds two signed 64-bit integers.
//!
//! ## Architecture
//!
//! - `domain/service.rs` - Core business logic
//! - `api/grpc/server.rs` - gRPC server implementation
//! - `server.rs` - Listener binding and serve loop
//! - `config.rs` - Layered configuration for `calculator-server`
//!
//! External consumers should use the `calculator-sdk` crate which provides
//! the gRPC client and `connect_client()`.

#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]

pub mod config;
pub mod server;

#[doc(hidden)]
pub mod api;
#[doc(hidden)]
pub mod domain;

pub use config::{CalculatorConfig, ENV_PREFIX};
pub use server::{bind, serve};
