use axum::{Router, routing::get};

pub mod pantry;
pub mod recipes;
pub mod system;
pub mod units;

/// Router for every session-scoped endpoint.
pub fn router() -> Router {
    Router::new()
        .route("/whoami", get(system::whoami))
        .nest("/recipes", recipes::router())
        .nest("/pantry", pantry::router())
        .nest("/units", units::router())
}
