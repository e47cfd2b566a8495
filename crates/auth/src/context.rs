//! Ambient execution context: acting identity + bypass flag.
//!
//! ## Carrier
//!
//! The live [`ExecutionContext`] is held in an execution-scoped carrier, never in
//! a process-wide cell:
//!
//! - **Unit of work**: [`scope`] (async) and [`sync_scope`] (sync) install a fresh
//!   task-local cell for the duration of one request/job/test. Concurrent tasks
//!   each see their own cell, even when they share a worker thread.
//! - **Fallback**: outside any unit of work, each OS thread has its own cell.
//!   This is for synchronous callers only. On a runtime worker thread that cell
//!   is shared by every unscoped task the worker polls, so writes there are
//!   logged with `warn!`; async code must enter [`scope`] first.
//!
//! Tasks spawned from inside a unit of work do not inherit it; wrap them with
//! [`propagate`] to carry a snapshot across.
//!
//! Every operation here is total: there are no error conditions.

use std::cell::RefCell;
use std::future::Future;

use serde::{Deserialize, Serialize};

use tenantscope_core::Identity;

/// Identity and bypass flag visible to the current unit of work.
///
/// The two fields are independent: entering bypass does not clear the identity
/// (an administrator is still someone, for audit purposes).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionContext {
    pub identity: Option<Identity>,
    pub bypass: bool,
}

impl ExecutionContext {
    pub fn new(identity: Option<Identity>) -> Self {
        Self {
            identity,
            bypass: false,
        }
    }

    pub fn for_identity(identity: impl Into<Identity>) -> Self {
        Self::new(Some(identity.into()))
    }

    /// Same context with bypass switched on.
    pub fn bypassed(mut self) -> Self {
        self.bypass = true;
        self
    }
}

tokio::task_local! {
    static UNIT_OF_WORK: RefCell<ExecutionContext>;
}

thread_local! {
    static THREAD_CONTEXT: RefCell<ExecutionContext> = RefCell::new(ExecutionContext::default());
}

fn with_cell<T>(f: impl FnOnce(&RefCell<ExecutionContext>) -> T) -> T {
    if in_unit_of_work() {
        UNIT_OF_WORK.with(f)
    } else {
        THREAD_CONTEXT.with(f)
    }
}

fn with_cell_mut(f: impl FnOnce(&mut ExecutionContext)) {
    if unscoped_runtime_write() {
        tracing::warn!("execution context written outside a unit of work on a runtime thread");
    }
    with_cell(|cell| f(&mut cell.borrow_mut()));
}

/// A write would land in a worker thread's cell shared by unrelated tasks.
fn unscoped_runtime_write() -> bool {
    !in_unit_of_work() && tokio::runtime::Handle::try_current().is_ok()
}

/// Whether the caller runs inside [`scope`] / [`sync_scope`].
pub fn in_unit_of_work() -> bool {
    UNIT_OF_WORK.try_with(|_| ()).is_ok()
}

/// Overwrite the acting identity. No validation of the token's shape.
pub fn set_identity(identity: Option<Identity>) {
    with_cell_mut(|ctx| ctx.identity = identity);
}

/// The acting identity, if any.
pub fn identity() -> Option<Identity> {
    with_cell(|cell| cell.borrow().identity.clone())
}

/// Reset identity to absent and bypass to `false` in one operation.
pub fn clear() {
    install(ExecutionContext::default());
}

pub fn set_bypass(bypass: bool) {
    with_cell_mut(|ctx| ctx.bypass = bypass);
}

pub fn is_bypassed() -> bool {
    with_cell(|cell| cell.borrow().bypass)
}

/// Snapshot of both fields, read together.
pub fn current() -> ExecutionContext {
    with_cell(|cell| cell.borrow().clone())
}

/// Replace both fields at once.
pub fn install(context: ExecutionContext) {
    with_cell_mut(|ctx| *ctx = context);
}

/// Run `future` as one unit of work with its own fresh context.
pub fn scope<F>(context: ExecutionContext, future: F) -> impl Future<Output = F::Output>
where
    F: Future,
{
    UNIT_OF_WORK.scope(RefCell::new(context), future)
}

/// Synchronous counterpart of [`scope`].
pub fn sync_scope<R>(context: ExecutionContext, f: impl FnOnce() -> R) -> R {
    UNIT_OF_WORK.sync_scope(RefCell::new(context), f)
}

/// Carry a snapshot of the current context into a future that will run
/// elsewhere (e.g. a spawned task).
pub fn propagate<F>(future: F) -> impl Future<Output = F::Output>
where
    F: Future,
{
    scope(current(), future)
}
