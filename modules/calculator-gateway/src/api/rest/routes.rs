//! Route registration for calculator-gateway

use axum::Router;
use axum::middleware::from_fn_with_state;
use axum::routing::get;

use super::AppState;
use super::handlers;
use super::middleware::{HttpLimits, apply_middleware_stack, require_backend};

/// Build the complete HTTP application.
///
/// Only matched `/add` routes pass through the liveness gate; `/health`,
/// unknown paths (404) and wrong methods (405) never probe the backend.
pub fn build_router(state: AppState, limits: HttpLimits) -> Router {
    let add = Router::new()
        .route(
            "/add",
            get(handlers::add_from_query).post(handlers::add_from_body),
        )
        .route_layer(from_fn_with_state(state.clone(), require_backend));

    let router = Router::new()
        .route("/health", get(handlers::health))
        .merge(add)
        .with_state(state);

    apply_middleware_stack(router, limits)
}
