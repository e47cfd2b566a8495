//! Save/install/restore scopes over the execution context.
//!
//! Both guards restore on `Drop`, so restoration runs on normal exit, `?` early
//! return and panic unwinding alike. Nested scopes of either kind unwind
//! strictly stack-wise.
//!
//! The guards are for synchronous blocks. Across `.await` use the async forms,
//! which open a nested unit of work instead of mutating the enclosing one.

use std::future::Future;

use tenantscope_core::Identity;

use crate::context::{self, ExecutionContext};

/// Installs an identity; restores the previous identity (never the bypass
/// flag) when dropped.
#[must_use = "the identity is restored as soon as the scope is dropped"]
#[derive(Debug)]
pub struct IdentityScope {
    previous: Option<Identity>,
}

impl IdentityScope {
    pub fn enter(identity: impl Into<Option<Identity>>) -> Self {
        let previous = context::identity();
        context::set_identity(identity.into());
        Self { previous }
    }
}

impl Drop for IdentityScope {
    fn drop(&mut self) {
        context::set_identity(self.previous.take());
    }
}

/// Switches bypass on; restores the captured flag (not necessarily `false`)
/// when dropped.
#[must_use = "bypass is restored as soon as the scope is dropped"]
#[derive(Debug)]
pub struct BypassScope {
    previous: bool,
}

impl BypassScope {
    pub fn enter() -> Self {
        let previous = context::is_bypassed();
        context::set_bypass(true);
        Self { previous }
    }
}

impl Drop for BypassScope {
    fn drop(&mut self) {
        context::set_bypass(self.previous);
    }
}

/// Run `f` with `identity` as the acting identity.
///
/// Whatever `f` returns (including an `Err`) is handed back unchanged after the
/// previous identity is restored.
pub fn with_identity<T>(identity: impl Into<Option<Identity>>, f: impl FnOnce() -> T) -> T {
    let _scope = IdentityScope::enter(identity);
    f()
}

/// Run `f` with ownership filtering and stamping suppressed.
pub fn with_bypass<T>(f: impl FnOnce() -> T) -> T {
    let _scope = BypassScope::enter();
    f()
}

/// Async form of [`with_identity`].
///
/// `future` runs in a nested unit of work seeded from the caller's context, so
/// the scoped identity is never written into a cell that sibling futures
/// share. The caller's context is untouched when `future` completes or is
/// dropped.
pub async fn with_identity_async<F>(identity: impl Into<Option<Identity>>, future: F) -> F::Output
where
    F: Future,
{
    let nested = ExecutionContext {
        identity: identity.into(),
        ..context::current()
    };
    context::scope(nested, future).await
}

/// Async form of [`with_bypass`]; see [`with_identity_async`].
pub async fn with_bypass_async<F>(future: F) -> F::Output
where
    F: Future,
{
    context::scope(context::current().bypassed(), future).await
}
