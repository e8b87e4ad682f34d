//! REST API for calculator-gateway
//!
//! `GET /health`, `GET /add?a=&b=` and `POST /add` with a JSON body.

pub mod dto;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod middleware;
pub mod routes;

use std::sync::Arc;

use crate::domain::Service;

pub use error::GatewayError;
pub use routes::build_router;

/// Shared handler state. Cloned per request; the service is shared.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<Service>,
}

impl AppState {
    #[must_use]
    pub fn new(service: Arc<Service>) -> Self {
        Self { service }
    }
}
