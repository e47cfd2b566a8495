//! `tenantscope-core` — tenant-isolation building blocks.
//!
//! This crate contains the **pure** primitives shared by every layer: the
//! acting-identity token, record identifiers, the record/ownership capability
//! traits and the access error model. No context, storage or transport concerns.

pub mod error;
pub mod id;
pub mod record;

pub use error::{AccessError, AccessResult};
pub use id::{Identity, RecordId};
pub use record::{OwnerField, Owned, Ownership, Record};
