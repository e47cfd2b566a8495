//! Generic tenant-scoped data access for one record type.
//!
//! ## Guarantees
//!
//! - **Reads** (`get_all`, `get_by_id`, `count`) always carry the tenant filter
//!   for the current context.
//! - **Not found hides foreign records**: a record owned by someone else is
//!   reported exactly like a missing one (`None` / `false`), never as forbidden.
//! - **Create** stamps the ambient identity into an empty owner field unless
//!   bypassed; a caller-supplied owner is never overwritten.
//! - **Update/Delete** resolve through the scoped read first, so they can only
//!   touch records the caller can see. Ownership is immutable after create.
//!
//! Persistence errors are returned unchanged.

use tenantscope_auth::{ExecutionContext, context};
use tenantscope_core::{Identity, OwnerField, Record};

use crate::predicate::{apply_filter, resolve_filter};
use crate::store::{ChangeSet, Condition, FieldFilter, Query, Store, StoreError};

/// Scoped repository over store `S` for record type `R`.
///
/// The ownership capability of `R` is resolved once, in [`ScopedRepository::new`].
#[derive(Debug)]
pub struct ScopedRepository<R: Record, S> {
    store: S,
    owner: Option<OwnerField<R>>,
}

impl<R, S> ScopedRepository<R, S>
where
    R: Record,
    S: Store<R>,
{
    pub fn new(store: S) -> Self {
        Self {
            store,
            owner: R::ownership().field(),
        }
    }

    /// Whether `R` is tenant-scoped.
    pub fn is_owned(&self) -> bool {
        self.owner.is_some()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Every visible record matching `filters`.
    pub fn get_all(&self, filters: &[FieldFilter]) -> Result<Vec<R>, StoreError> {
        let ctx = context::current();
        let records = self.filtered(&ctx, filters).all()?;
        tracing::debug!(
            kind = R::KIND,
            identity = ?ctx.identity,
            bypassed = ctx.bypass,
            returned = records.len(),
            "scoped read"
        );
        Ok(records)
    }

    /// The record with `key`, if it exists **and** is visible.
    pub fn get_by_id(&self, key: &R::Key) -> Result<Option<R>, StoreError> {
        let ctx = context::current();
        self.find(&ctx, key)
    }

    /// Number of visible records matching `filters`.
    pub fn count(&self, filters: &[FieldFilter]) -> Result<usize, StoreError> {
        let ctx = context::current();
        self.filtered(&ctx, filters).count()
    }

    /// Persist a new record, stamping the owner when appropriate.
    pub fn create(&self, mut record: R) -> Result<R, StoreError> {
        let ctx = context::current();

        if let Some(field) = self.owner {
            if !ctx.bypass && field.owner_of(&record).is_none() {
                match &ctx.identity {
                    Some(identity) => field.set_owner_of(&mut record, Some(identity.clone())),
                    None => tracing::warn!(
                        kind = R::KIND,
                        "creating owned record without an acting identity; owner left empty"
                    ),
                }
            }
        }

        self.store.commit(ChangeSet::new().add(record.clone()))?;
        tracing::debug!(
            kind = R::KIND,
            key = ?record.key(),
            identity = ?ctx.identity,
            bypassed = ctx.bypass,
            "created record"
        );
        Ok(record)
    }

    /// Apply `changes` to a visible record. Returns `None` without side effects
    /// when the record is missing or out of scope.
    ///
    /// The primary key and the owner field are left as stored.
    pub fn update(&self, key: &R::Key, changes: R::Changes) -> Result<Option<R>, StoreError> {
        let ctx = context::current();
        let Some(mut record) = self.find(&ctx, key)? else {
            return Ok(None);
        };

        let owner: Option<(OwnerField<R>, Option<Identity>)> = self
            .owner
            .map(|field| (field, field.owner_of(&record).cloned()));

        record.apply_changes(changes);

        if record.key() != key {
            return Err(StoreError::Constraint(format!(
                "{} changes must not alter the primary key {key:?}",
                R::KIND
            )));
        }
        if let Some((field, stored_owner)) = owner {
            field.set_owner_of(&mut record, stored_owner);
        }

        self.store.commit(ChangeSet::new().update(record.clone()))?;
        tracing::debug!(kind = R::KIND, key = ?key, identity = ?ctx.identity, "updated record");
        Ok(Some(record))
    }

    /// Delete a visible record. Returns `false` when it is missing or out of
    /// scope.
    pub fn delete(&self, key: &R::Key) -> Result<bool, StoreError> {
        let ctx = context::current();
        if self.find(&ctx, key)?.is_none() {
            return Ok(false);
        }

        self.store.commit(ChangeSet::new().delete(key.clone()))?;
        tracing::debug!(kind = R::KIND, key = ?key, identity = ?ctx.identity, "deleted record");
        Ok(true)
    }

    fn scoped(&self, ctx: &ExecutionContext) -> Query<'_, R, S> {
        apply_filter(Query::new(&self.store), resolve_filter(self.is_owned(), None, ctx))
    }

    fn filtered(&self, ctx: &ExecutionContext, filters: &[FieldFilter]) -> Query<'_, R, S> {
        filters
            .iter()
            .cloned()
            .fold(self.scoped(ctx), |query, f| query.filter(Condition::Field(f)))
    }

    fn find(&self, ctx: &ExecutionContext, key: &R::Key) -> Result<Option<R>, StoreError> {
        self.scoped(ctx).filter(Condition::Key(key.clone())).first()
    }
}
