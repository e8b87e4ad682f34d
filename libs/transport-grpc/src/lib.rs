#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]
//! gRPC client transport for the calculator services.
//!
//! Owns the tonic `Endpoint` configuration (timeouts, keepalive) so that
//! every client in the workspace talks to the backend the same way.

pub mod client;

pub use client::{GrpcClientConfig, connect_lazy, connect_with_stack};
