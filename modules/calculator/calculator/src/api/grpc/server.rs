//! gRPC Server implementation for calculator
//!
//! The server implementation handles gRPC requests and delegates
//! to the domain Service for business logic.

use std::sync::Arc;

use tonic::{Request, Response, Status};

use calculator_sdk::{
    AddRequest, AddResponse, Calculator, PING_STATUS_SERVING, PingRequest, PingResponse,
};

use crate::domain::Service;

/// gRPC service implementation that wraps the domain Service.
#[derive(Clone)]
pub struct CalculatorServiceImpl {
    service: Arc<Service>,
}

impl CalculatorServiceImpl {
    /// Create a new `CalculatorServiceImpl` with the given Service.
    #[must_use]
    pub fn new(service: Arc<Service>) -> Self {
        Self { service }
    }
}

#[tonic::async_trait]
impl Calculator for CalculatorServiceImpl {
    async fn add(&self, request: Request<AddRequest>) -> Result<Response<AddResponse>, Status> {
        let req = request.into_inner();
        let result = self.service.add(req.a, req.b);
        Ok(Response::new(AddResponse { result }))
    }

    async fn ping(&self, _request: Request<PingRequest>) -> Result<Response<PingResponse>, Status> {
        tracing::debug!("liveness ping");
        Ok(Response::new(PingResponse {
            status: PING_STATUS_SERVING.to_owned(),
        }))
    }
}
