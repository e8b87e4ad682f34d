#![allow(dead_code, clippy::unwrap_used, clippy::expect_used)]

//! Shared fixtures: a call-counting calculator client and router helpers.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use calculator_gateway::HttpLimits;
use calculator_gateway::{AppState, LivenessProbe, Service, build_router};
use calculator_sdk::{CalculatorClientV1, CalculatorError};
use http::{Request, Response};
use tower::ServiceExt;

/// How the fake backend behaves.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Backend {
    Healthy,
    /// Every call fails as if the connection were refused.
    Down,
    /// Probe succeeds, real `Add` calls fail.
    AddFails,
    /// Calls stall for the given time before answering.
    Slow(Duration),
}

pub struct MockCalculator {
    pub backend: Backend,
    pub add_calls: AtomicUsize,
    pub ping_calls: AtomicUsize,
}

impl MockCalculator {
    pub fn new(backend: Backend) -> Arc<Self> {
        Arc::new(Self {
            backend,
            add_calls: AtomicUsize::new(0),
            ping_calls: AtomicUsize::new(0),
        })
    }

    pub fn adds(&self) -> usize {
        self.add_calls.load(Ordering::SeqCst)
    }

    pub fn pings(&self) -> usize {
        self.ping_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CalculatorClientV1 for MockCalculator {
    async fn add(&self, a: i64, b: i64) -> Result<i64, CalculatorError> {
        self.add_calls.fetch_add(1, Ordering::SeqCst);
        match self.backend {
            Backend::Healthy => Ok(a.wrapping_add(b)),
            Backend::Down => Err(CalculatorError::Unavailable(
                "tcp connect error: Connection refused".to_owned(),
            )),
            Backend::AddFails => Err(CalculatorError::Rpc {
                code: "Internal".to_owned(),
                message: "adder exploded".to_owned(),
            }),
            Backend::Slow(delay) => {
                tokio::time::sleep(delay).await;
                Ok(a.wrapping_add(b))
            }
        }
    }

    async fn ping(&self) -> Result<(), CalculatorError> {
        self.ping_calls.fetch_add(1, Ordering::SeqCst);
        match self.backend {
            Backend::Down => Err(CalculatorError::Unavailable(
                "tcp connect error: Connection refused".to_owned(),
            )),
            Backend::Slow(delay) => {
                tokio::time::sleep(delay).await;
                Ok(())
            }
            Backend::Healthy | Backend::AddFails => Ok(()),
        }
    }
}

pub fn default_limits() -> HttpLimits {
    HttpLimits {
        request_timeout: Duration::from_secs(5),
        body_limit_bytes: 64 * 1024,
    }
}

pub fn router_with(mock: Arc<MockCalculator>, probe: LivenessProbe, limits: HttpLimits) -> Router {
    let service = Arc::new(Service::new(mock, probe));
    build_router(AppState::new(service), limits)
}

pub fn router(mock: Arc<MockCalculator>) -> Router {
    router_with(mock, LivenessProbe::Ping, default_limits())
}

pub async fn send(router: Router, req: Request<Body>) -> Response<Body> {
    router.oneshot(req).await.unwrap()
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub fn post_json(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_owned()))
        .unwrap()
}

pub async fn json_body(resp: Response<Body>) -> serde_json::Value {
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
