//! REST DTOs for calculator-gateway

use serde::{Deserialize, Serialize};

/// Raw `/add` query parameters; parsed strictly by [`super::extract`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AddQuery {
    pub a: Option<String>,
    pub b: Option<String>,
}

/// Response containing the sum.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AddResponse {
    pub result: i64,
}

/// `/health` payload.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HealthResponse {
    pub status: String,
}

/// Error payload shared by every failing `/add` response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorBody {
    pub error: String,
    pub details: String,
}
