//! Call-site binding: wrap an operation so it consults the execution context.
//!
//! The identity-bearing parameter is a typed field of the operation's argument,
//! located through [`IdentityParam`] (the default slot) or an explicit
//! [`IdentitySelector`]. Both wrappers only add pre-invocation logic: return
//! values and errors of the wrapped operation pass through untouched.

use tenantscope_core::{AccessError, AccessResult, Identity};

use crate::context;

/// Argument types carrying the well-known identity parameter.
pub trait IdentityParam {
    fn identity_slot(&mut self) -> &mut Option<Identity>;
}

impl IdentityParam for Option<Identity> {
    fn identity_slot(&mut self) -> &mut Option<Identity> {
        self
    }
}

/// Locates a non-default identity parameter inside an argument.
pub type IdentitySelector<A> = fn(&mut A) -> &mut Option<Identity>;

/// Fill the default identity parameter from the context when the caller left it
/// absent. See [`inject_identity_with`].
pub fn inject_identity<A, R, F>(operation: F) -> impl Fn(A) -> R
where
    A: IdentityParam,
    F: Fn(A) -> R,
{
    inject_identity_with(operation, A::identity_slot)
}

/// Fill the selected identity parameter from the context.
///
/// - An explicitly supplied identity always wins, with or without bypass.
/// - An absent one is filled from the ambient identity only when bypass is off;
///   under bypass it is passed through absent.
pub fn inject_identity_with<A, R, F>(operation: F, slot: IdentitySelector<A>) -> impl Fn(A) -> R
where
    F: Fn(A) -> R,
{
    move |mut args: A| {
        let target = slot(&mut args);
        if target.is_none() {
            let ctx = context::current();
            if !ctx.bypass {
                *target = ctx.identity;
            }
        }
        operation(args)
    }
}

/// Fail unless an identity is bound or the context is bypassed.
pub fn ensure_identity() -> AccessResult<()> {
    let ctx = context::current();
    if ctx.identity.is_some() || ctx.bypass {
        return Ok(());
    }

    tracing::warn!("rejected call without an acting identity");
    Err(AccessError::permission_denied(
        "no acting identity bound to the current unit of work",
    ))
}

/// Refuse to run `operation` without an acting identity (or bypass).
pub fn require_identity<A, R, F>(operation: F) -> impl Fn(A) -> AccessResult<R>
where
    F: Fn(A) -> R,
{
    move |args: A| {
        ensure_identity()?;
        Ok(operation(args))
    }
}

/// [`require_identity`] for fallible operations whose error type can carry the
/// permission error.
pub fn try_require_identity<A, T, E, F>(operation: F) -> impl Fn(A) -> Result<T, E>
where
    F: Fn(A) -> Result<T, E>,
    E: From<AccessError>,
{
    move |args: A| {
        ensure_identity()?;
        operation(args)
    }
}
