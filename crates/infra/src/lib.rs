//! Infrastructure layer: persistence boundary and tenant-scoped data access.

pub mod predicate;
pub mod repository;
pub mod store;


pub use predicate::{Filter, is_visible, owner_filter, resolve_filter, scope_query};
pub use repository::ScopedRepository;
pub use store::{ChangeSet, Condition, FieldFilter, InMemoryStore, Query, Store, StoreError};
