//! Domain service for calculator

use tracing::info;

/// Stateless addition service used by the gRPC server.
#[derive(Clone, Default)]
pub struct Service;

impl Service {
    /// Create a new service.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Add two numbers and return the sum.
    ///
    /// Overflow wraps around in two's complement.
    #[must_use]
    pub fn add(&self, a: i64, b: i64) -> i64 {
        info!(a, b, "Received request to add");
        a.wrapping_add(b)
    }
}
