//! Calculator API trait and types
//!
//! Contract trait and types for the calculator service.

use async_trait::async_trait;

/// Calculator API trait
///
/// One shared, thread-safe handle per process; callers hold it as
/// `Arc<dyn CalculatorClientV1>`.
#[async_trait]
pub trait CalculatorClientV1: Send + Sync {
    /// Add two numbers and return the sum.
    async fn add(&self, a: i64, b: i64) -> Result<i64, CalculatorError>;

    /// Lightweight liveness probe against the backend.
    async fn ping(&self) -> Result<(), CalculatorError>;
}

/// Error type for Calculator operations
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CalculatorError {
    /// The backend could not be reached (connection refused, reset, DNS...).
    #[error("calculator unavailable: {0}")]
    Unavailable(String),

    /// The bounded wait for the call elapsed.
    #[error("deadline exceeded: {0}")]
    DeadlineExceeded(String),

    /// The backend answered with a non-OK status.
    #[error("rpc failed with {code}: {message}")]
    Rpc { code: String, message: String },

    #[error("internal error: {0}")]
    Internal(String),
}

impl From<tonic::Status> for CalculatorError {
    fn from(status: tonic::Status) -> Self {
        match status.code() {
            tonic::Code::Unavailable => Self::Unavailable(status.message().to_owned()),
            tonic::Code::DeadlineExceeded => Self::DeadlineExceeded(status.message().to_owned()),
            code => Self::Rpc {
                code: format!("{code:?}"),
                message: status.message().to_owned(),
            },
        }
    }
}
