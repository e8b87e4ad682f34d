#![allow(clippy::unwrap_used, clippy::expect_used)]

//! Backend calls that never answer, through the real gRPC client.
//!
//! A stall during the liveness check must surface as 503 and a stall during
//! `Add` as 500, both well before the whole-request deadline.

mod common;

use std::sync::Arc;
use std::time::{Duration, Instant};

use calculator_gateway::{AppState, GatewayConfig, LivenessProbe, Service, build_router};
use calculator_sdk::{
    AddRequest, AddResponse, Calculator, CalculatorServer, PingRequest, PingResponse,
};
use common::{get, json_body, post_json};
use http::StatusCode;
use tokio::net::TcpListener;
use tokio_stream::wrappers::TcpListenerStream;
use tokio_util::sync::CancellationToken;
use tonic::{Request, Response, Status};
use tower::ServiceExt;

const STALL: Duration = Duration::from_secs(60);
const BOUND: Duration = Duration::from_secs(5);

#[derive(Clone, Copy)]
enum Stall {
    Ping,
    Add,
}

struct StallingCalculator(Stall);

#[tonic::async_trait]
impl Calculator for StallingCalculator {
    async fn add(&self, request: Request<AddRequest>) -> Result<Response<AddResponse>, Status> {
        if matches!(self.0, Stall::Add) {
            tokio::time::sleep(STALL).await;
        }
        let req = request.into_inner();
        Ok(Response::new(AddResponse {
            result: req.a.wrapping_add(req.b),
        }))
    }

    async fn ping(&self, _request: Request<PingRequest>) -> Result<Response<PingResponse>, Status> {
        if matches!(self.0, Stall::Ping) {
            tokio::time::sleep(STALL).await;
        }
        Ok(Response::new(PingResponse {
            status: "SERVING".to_owned(),
        }))
    }
}

async fn start_stalling(stall: Stall) -> (String, CancellationToken) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let cancel = CancellationToken::new();
    let shutdown = cancel.clone();
    tokio::spawn(async move {
        tonic::transport::Server::builder()
            .add_service(CalculatorServer::new(StallingCalculator(stall)))
            .serve_with_incoming_shutdown(TcpListenerStream::new(listener), async move {
                shutdown.cancelled().await;
            })
            .await
            .unwrap();
    });
    (format!("http://{addr}"), cancel)
}

fn gateway(backend_uri: &str, probe: LivenessProbe) -> axum::Router {
    let config = GatewayConfig {
        backend_uri: backend_uri.to_owned(),
        connect_timeout_ms: 500,
        rpc_timeout_ms: 300,
        request_timeout_ms: 10_000,
        liveness_probe: probe,
        ..GatewayConfig::default()
    };
    config.validate().unwrap();
    let client =
        calculator_sdk::connect_client(&config.backend_uri, &config.grpc_client_config()).unwrap();
    let service = Arc::new(Service::new(client, config.liveness_probe));
    build_router(AppState::new(service), config.http_limits())
}

#[tokio::test]
async fn stalled_ping_answers_503() {
    let (uri, cancel) = start_stalling(Stall::Ping).await;
    let app = gateway(&uri, LivenessProbe::Ping);

    let started = Instant::now();
    let resp = app.oneshot(get("/add?a=5&b=3")).await.unwrap();
    assert!(started.elapsed() < BOUND, "took {:?}", started.elapsed());
    assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body = json_body(resp).await;
    assert_eq!(body["error"], "calculator backend is not available");
    assert!(body["details"].as_str().is_some_and(|d| !d.is_empty()), "{body}");

    cancel.cancel();
}

#[tokio::test]
async fn stalled_add_answers_500() {
    let (uri, cancel) = start_stalling(Stall::Add).await;
    let app = gateway(&uri, LivenessProbe::Ping);

    let started = Instant::now();
    let resp = app
        .oneshot(post_json("/add", r#"{"a": 10, "b": 20}"#))
        .await
        .unwrap();
    assert!(started.elapsed() < BOUND, "took {:?}", started.elapsed());
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = json_body(resp).await;
    assert_eq!(body["error"], "Failed to perform addition");

    cancel.cancel();
}

#[tokio::test]
async fn stalled_add_used_as_liveness_check_answers_503() {
    let (uri, cancel) = start_stalling(Stall::Add).await;
    let app = gateway(&uri, LivenessProbe::Add);

    let started = Instant::now();
    let resp = app.oneshot(get("/add?a=1&b=2")).await.unwrap();
    assert!(started.elapsed() < BOUND, "took {:?}", started.elapsed());
    assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);

    cancel.cancel();
}

#[tokio::test]
async fn health_ignores_stalled_backend() {
    let (uri, cancel) = start_stalling(Stall::Ping).await;
    let app = gateway(&uri, LivenessProbe::Ping);

    let resp = app.oneshot(get("/health")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    cancel.cancel();
}
