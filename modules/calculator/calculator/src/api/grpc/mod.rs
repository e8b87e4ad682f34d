//! gRPC API for the calculator backend.

pub mod server;

pub use server::CalculatorServiceImpl;
