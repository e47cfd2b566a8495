use std::sync::Arc;

use serde_json::Value as JsonValue;
use thiserror::Error;

use tenantscope_core::Record;

use crate::predicate::Filter;

/// Persistence error.
///
/// These are **infrastructure errors** raised by a backend. The scoping layer
/// never catches or reinterprets them; they reach the caller unchanged.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("store unavailable: {0}")]
    Unavailable(String),

    #[error("constraint violated: {0}")]
    Constraint(String),

    #[error("serialization failed: {0}")]
    Serialization(String),

    #[error("lock poisoned")]
    LockPoisoned,
}

/// Equality on one serialized field of a record.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldFilter {
    pub field: String,
    pub value: JsonValue,
}

impl FieldFilter {
    pub fn equals(field: impl Into<String>, value: impl Into<JsonValue>) -> Self {
        Self {
            field: field.into(),
            value: value.into(),
        }
    }
}

/// One clause of a query. A record matches a query when it matches every clause.
#[derive(Debug, Clone)]
pub enum Condition<R: Record> {
    /// Tenant scope produced by the predicate builder.
    Scope(Filter),
    /// Primary key equality.
    Key(R::Key),
    /// Caller-supplied field equality.
    Field(FieldFilter),
}

impl<R: Record> Condition<R> {
    /// Evaluate the clause against a record held in process.
    pub fn matches(&self, record: &R) -> Result<bool, StoreError> {
        match self {
            Condition::Scope(filter) => Ok(filter.matches(record)),
            Condition::Key(key) => Ok(record.key() == key),
            Condition::Field(field) => {
                let doc = serde_json::to_value(record)
                    .map_err(|e| StoreError::Serialization(format!("{}: {e}", R::KIND)))?;
                Ok(doc.get(field.field.as_str()) == Some(&field.value))
            }
        }
    }
}

/// A query under construction against one store.
#[derive(Debug)]
pub struct Query<'s, R: Record, S: ?Sized> {
    store: &'s S,
    conditions: Vec<Condition<R>>,
}

impl<'s, R, S> Query<'s, R, S>
where
    R: Record,
    S: Store<R> + ?Sized,
{
    pub fn new(store: &'s S) -> Self {
        Self {
            store,
            conditions: Vec::new(),
        }
    }

    /// Append a clause.
    pub fn filter(mut self, condition: Condition<R>) -> Self {
        self.conditions.push(condition);
        self
    }

    pub fn conditions(&self) -> &[Condition<R>] {
        &self.conditions
    }

    pub fn all(self) -> Result<Vec<R>, StoreError> {
        self.store.select(&self.conditions)
    }

    pub fn first(self) -> Result<Option<R>, StoreError> {
        self.store.select_first(&self.conditions)
    }

    pub fn count(self) -> Result<usize, StoreError> {
        self.store.count(&self.conditions)
    }
}

/// A single write inside a [`ChangeSet`].
#[derive(Debug, Clone)]
pub enum Change<R: Record> {
    /// Persist a new record; its key must not exist yet.
    Add(R),
    /// Replace an existing record with the same key.
    Update(R),
    /// Remove the record with this key.
    Delete(R::Key),
}

/// Writes committed together: either all of them apply or none does.
#[derive(Debug, Clone)]
pub struct ChangeSet<R: Record> {
    changes: Vec<Change<R>>,
}

impl<R: Record> ChangeSet<R> {
    pub fn new() -> Self {
        Self {
            changes: Vec::new(),
        }
    }

    pub fn add(mut self, record: R) -> Self {
        self.changes.push(Change::Add(record));
        self
    }

    pub fn update(mut self, record: R) -> Self {
        self.changes.push(Change::Update(record));
        self
    }

    pub fn delete(mut self, key: R::Key) -> Self {
        self.changes.push(Change::Delete(key));
        self
    }

    pub fn into_changes(self) -> Vec<Change<R>> {
        self.changes
    }
}

impl<R: Record> Default for ChangeSet<R> {
    fn default() -> Self {
        Self::new()
    }
}

/// Storage backend for one record type.
///
/// Implementations must:
/// - return only records matching **every** condition
/// - apply a [`ChangeSet`] atomically
/// - reject `Add` of an existing key and `Update`/`Delete` of a missing one
///   with [`StoreError::Constraint`]
pub trait Store<R: Record>: Send + Sync {
    /// All records matching the conditions, in the backend's default order.
    fn select(&self, conditions: &[Condition<R>]) -> Result<Vec<R>, StoreError>;

    fn select_first(&self, conditions: &[Condition<R>]) -> Result<Option<R>, StoreError> {
        Ok(self.select(conditions)?.into_iter().next())
    }

    fn count(&self, conditions: &[Condition<R>]) -> Result<usize, StoreError> {
        Ok(self.select(conditions)?.len())
    }

    fn commit(&self, changes: ChangeSet<R>) -> Result<(), StoreError>;

    /// Start a query with no clauses.
    fn query(&self) -> Query<'_, R, Self> {
        Query::new(self)
    }
}

impl<R, S> Store<R> for Arc<S>
where
    R: Record,
    S: Store<R> + ?Sized,
{
    fn select(&self, conditions: &[Condition<R>]) -> Result<Vec<R>, StoreError> {
        (**self).select(conditions)
    }

    fn select_first(&self, conditions: &[Condition<R>]) -> Result<Option<R>, StoreError> {
        (**self).select_first(conditions)
    }

    fn count(&self, conditions: &[Condition<R>]) -> Result<usize, StoreError> {
        (**self).count(conditions)
    }

    fn commit(&self, changes: ChangeSet<R>) -> Result<(), StoreError> {
        (**self).commit(changes)
    }
}
