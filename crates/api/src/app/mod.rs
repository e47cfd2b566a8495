//! HTTP application wiring (axum router + repository wiring).
//!
//! - `services.rs`: repositories over their stores
//! - `routes/`: handlers, one file per record area
//! - `dto.rs`: request/query shapes
//! - `errors.rs`: consistent JSON error responses

use std::sync::Arc;

use axum::{Extension, Router, routing::get};
use tower::ServiceBuilder;

use crate::config::ApiConfig;
use crate::middleware;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

/// Build the full HTTP router over fresh in-memory stores.
pub fn build_app(config: &ApiConfig) -> Router {
    build_app_with(config, Arc::new(services::AppServices::in_memory()))
}

/// Build the router over caller-provided services (tests seed them directly).
pub fn build_app_with(config: &ApiConfig, services: Arc<services::AppServices>) -> Router {
    let session = middleware::SessionState::from(config);

    // Every route below runs inside its own unit of work.
    let scoped = routes::router()
        .layer(Extension(services))
        .layer(axum::middleware::from_fn_with_state(
            session,
            middleware::session_middleware,
        ));

    Router::new()
        .route("/health", get(routes::system::health))
        .merge(scoped)
        .layer(ServiceBuilder::new())
}
