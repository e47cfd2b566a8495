use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{HeaderMap, HeaderName, StatusCode},
    middleware::Next,
    response::Response,
};

use tenantscope_auth::{context, session_context};

use crate::app::errors;
use crate::config::ApiConfig;

/// Request header asking for ownership bypass (admins only).
pub const BYPASS_HEADER: HeaderName = HeaderName::from_static("x-scope-bypass");

#[derive(Debug, Clone)]
pub struct SessionState {
    pub config: Arc<ApiConfig>,
}

impl From<&ApiConfig> for SessionState {
    fn from(config: &ApiConfig) -> Self {
        Self {
            config: Arc::new(config.clone()),
        }
    }
}

/// Run every request as its own unit of work, bound to the session identity.
///
/// A missing or blank identity header yields an empty context (never a stale
/// one). Bypass is granted only to configured admins.
pub async fn session_middleware(
    State(state): State<SessionState>,
    req: Request,
    next: Next,
) -> Response {
    let resolved = req
        .headers()
        .get(&state.config.identity_header)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    let mut ctx = session_context(&resolved);

    if wants_bypass(req.headers()) {
        match &ctx.identity {
            Some(identity) if state.config.is_admin(identity) => {
                tracing::info!(identity = %identity, "request runs with ownership bypass");
                ctx.bypass = true;
            }
            _ => {
                tracing::warn!(identity = ?ctx.identity, "bypass requested by non-admin");
                return errors::json_error(StatusCode::FORBIDDEN, "forbidden", "bypass not permitted");
            }
        }
    }

    context::scope(ctx, next.run(req)).await
}

fn wants_bypass(headers: &HeaderMap) -> bool {
    headers
        .get(BYPASS_HEADER)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == "1" || v.eq_ignore_ascii_case("true"))
}
