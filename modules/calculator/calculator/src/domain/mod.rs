//! Domain layer for calculator module
//!
//! Contains business logic for addition.

pub mod service;

pub use service::Service;
