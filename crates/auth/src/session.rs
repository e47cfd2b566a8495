//! Session boundary: turn an already-resolved session into the acting context.
//!
//! Authentication happens elsewhere. The session store only hands over a raw
//! identity string (or nothing), and this module makes sure a unit of work
//! never starts with a stale identity left behind by a previous one.

use std::future::Future;

use tenantscope_core::Identity;

use crate::context::{self, ExecutionContext};

/// Anything able to report the identity resolved for the current session.
pub trait SessionSource {
    fn resolved_identity(&self) -> Option<String>;
}

impl SessionSource for Option<String> {
    fn resolved_identity(&self) -> Option<String> {
        self.clone()
    }
}

impl SessionSource for Option<&str> {
    fn resolved_identity(&self) -> Option<String> {
        self.map(str::to_string)
    }
}

impl SessionSource for str {
    fn resolved_identity(&self) -> Option<String> {
        Some(self.to_string())
    }
}

/// Context a unit of work starts with for `session`.
///
/// A blank identity counts as absent. Sessions never grant bypass.
pub fn session_context<S>(session: &S) -> ExecutionContext
where
    S: SessionSource + ?Sized,
{
    let identity = session
        .resolved_identity()
        .filter(|raw| !raw.trim().is_empty())
        .map(Identity::from);
    ExecutionContext::new(identity)
}

/// Set the current identity from the resolved session, clearing the context
/// when the session carries none.
pub fn bind_session<S>(session: &S)
where
    S: SessionSource + ?Sized,
{
    let ctx = session_context(session);
    match &ctx.identity {
        Some(identity) => tracing::debug!(identity = %identity, "bound session identity"),
        None => tracing::debug!("no resolved session identity; context cleared"),
    }
    context::install(ctx);
}

/// Run `future` as a fresh unit of work bound to `session`.
pub async fn run_session<S, F>(session: &S, future: F) -> F::Output
where
    S: SessionSource + ?Sized,
    F: Future,
{
    context::scope(session_context(session), future).await
}

/// Synchronous counterpart of [`run_session`].
pub fn run_session_sync<S, R>(session: &S, f: impl FnOnce() -> R) -> R
where
    S: SessionSource + ?Sized,
{
    context::sync_scope(session_context(session), f)
}
