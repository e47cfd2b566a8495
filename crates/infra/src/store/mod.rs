//! Persistence boundary consumed by the scoping layer.
//!
//! The scoping layer never issues raw queries: it only composes [`Condition`]s
//! onto a [`Query`] and hands [`ChangeSet`]s to a [`Store`]. Backends decide how
//! to evaluate them.

pub mod in_memory;
pub mod r#trait;

pub use in_memory::InMemoryStore;
pub use r#trait::{Change, ChangeSet, Condition, FieldFilter, Query, Store, StoreError};
