//! `tenantscope-auth` — acting-identity boundary (ambient, execution-scoped).
//!
//! This crate is intentionally decoupled from HTTP and storage. It trusts an
//! already-resolved identity string and only answers "who is acting, and is
//! ownership filtering bypassed" for the current unit of work.

pub mod binding;
pub mod context;
pub mod guard;
pub mod session;

pub use binding::{
    IdentityParam, IdentitySelector, ensure_identity, inject_identity, inject_identity_with,
    require_identity, try_require_identity,
};
pub use context::ExecutionContext;
pub use guard::{
    BypassScope, IdentityScope, with_bypass, with_bypass_async, with_identity,
    with_identity_async,
};
pub use session::{SessionSource, bind_session, run_session, run_session_sync, session_context};
