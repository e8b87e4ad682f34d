//! REST handlers for calculator-gateway

use axum::Json;
use axum::body::Bytes;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};

use super::AppState;
use super::dto::{AddQuery, AddResponse, HealthResponse};
use super::error::GatewayError;
use super::extract::{operands_from_body, operands_from_query};

pub const HEALTH_STATUS: &str = "HTTP server is running";

/// `GET /health`: reports the gateway listener only, never the backend.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: HEALTH_STATUS.to_owned(),
    })
}

/// `GET /add?a=&b=`
///
/// # Errors
/// [`GatewayError::Validation`] for bad operands, [`GatewayError::BackendCallFailed`] if `Add` fails.
pub async fn add_from_query(
    State(state): State<AppState>,
    query: Result<Query<AddQuery>, QueryRejection>,
) -> Result<Json<AddResponse>, GatewayError> {
    let Query(query) = query.map_err(|e| GatewayError::Validation(e.body_text()))?;
    let (a, b) = operands_from_query(&query)?;
    add(&state, a, b).await
}

/// `POST /add` with `{"a": <int>, "b": <int>}`
///
/// # Errors
/// Same as [`add_from_query`].
pub async fn add_from_body(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<AddResponse>, GatewayError> {
    let (a, b) = operands_from_body(&body)?;
    add(&state, a, b).await
}

async fn add(state: &AppState, a: i64, b: i64) -> Result<Json<AddResponse>, GatewayError> {
    let result = state
        .service
        .add(a, b)
        .await
        .map_err(|e| GatewayError::BackendCallFailed(e.to_string()))?;
    Ok(Json(AddResponse { result }))
}
