//! Domain layer for calculator-gateway
//!
//! Liveness probing and addition over the injected calculator client.

pub mod service;

pub use service::Service;
