//! Middleware for calculator-gateway
//!
//! The liveness gate for `/add` and the tower-http stack wrapped around the
//! whole router. Requests flow outermost to innermost:
//! `SetRequestId` -> `PropagateRequestId` -> Trace -> Timeout -> `BodyLimit` -> router.

use std::time::Duration;

use axum::Router;
use axum::extract::{DefaultBodyLimit, Request, State};
use axum::middleware::Next;
use axum::response::Response;
use http::{HeaderName, HeaderValue, StatusCode};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::request_id::{
    MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer,
};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::field::Empty;

use super::AppState;
use super::error::GatewayError;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Probe the backend before the wrapped handler runs.
///
/// # Errors
/// [`GatewayError::BackendUnavailable`] carrying the probe failure.
pub async fn require_backend(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, GatewayError> {
    state
        .service
        .check_liveness()
        .await
        .map_err(|e| GatewayError::BackendUnavailable(e.to_string()))?;
    Ok(next.run(req).await)
}

/// Generates a UUID v4 request id when the client did not send one.
#[derive(Clone, Copy, Default)]
pub struct MakeReqId;

impl MakeRequestId for MakeReqId {
    fn make_request_id<B>(&mut self, _request: &http::Request<B>) -> Option<RequestId> {
        HeaderValue::from_str(&uuid::Uuid::new_v4().to_string())
            .ok()
            .map(RequestId::new)
    }
}

/// Limits applied by [`apply_middleware_stack`].
#[derive(Debug, Clone, Copy)]
pub struct HttpLimits {
    pub request_timeout: Duration,
    pub body_limit_bytes: usize,
}

fn apply_trace_layer(router: Router) -> Router {
    router.layer(
        TraceLayer::new_for_http()
            .make_span_with(|req: &Request| {
                let rid = req
                    .headers()
                    .get(REQUEST_ID_HEADER)
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or("n/a");
                tracing::info_span!(
                    "http_request",
                    method = %req.method(),
                    uri = %req.uri().path(),
                    request_id = %rid,
                    status = Empty,
                    latency_ms = Empty,
                )
            })
            .on_response(|res: &Response, latency: Duration, span: &tracing::Span| {
                span.record("status", res.status().as_u16());
                span.record("latency_ms", latency.as_millis());
                tracing::debug!(parent: span, "request completed");
            }),
    )
}

/// Wrap `router` in the request id, trace, timeout and body-limit layers.
///
/// Layers are registered innermost first; the last one added runs first.
pub fn apply_middleware_stack(mut router: Router, limits: HttpLimits) -> Router {
    // 4) Body limit
    router = router.layer(RequestBodyLimitLayer::new(limits.body_limit_bytes));
    router = router.layer(DefaultBodyLimit::max(limits.body_limit_bytes));

    // 3) Timeout
    router = router.layer(TimeoutLayer::with_status_code(
        StatusCode::GATEWAY_TIMEOUT,
        limits.request_timeout,
    ));

    // 2) Trace
    router = apply_trace_layer(router);

    // 1) Request id: set (outermost) then propagate to the response
    let header = HeaderName::from_static(REQUEST_ID_HEADER);
    router = router.layer(PropagateRequestIdLayer::new(header.clone()));
    router.layer(SetRequestIdLayer::new(header, MakeReqId))
}
