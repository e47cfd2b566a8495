//! Record capability traits: identity + optional tenant ownership.
//!
//! Whether a record type is tenant-scoped is a property of the *type*, decided
//! at compile time through [`Owned`] and surfaced once through
//! [`Record::ownership`]. Nothing in the scoping layer probes fields by name.

use serde::Serialize;

use crate::id::Identity;

/// A persisted record type.
///
/// `Changes` is the update payload for the type. It must not carry the primary
/// key; the owner field, if it carries one, is ignored on update.
pub trait Record: Clone + core::fmt::Debug + Serialize + Send + Sync + 'static {
    /// Strongly-typed primary key.
    type Key: Clone + Eq + core::hash::Hash + core::fmt::Debug + Send + Sync + 'static;

    /// Field changes accepted by an update.
    type Changes;

    /// Stable name of the record type (used in logs and storage adapters).
    const KIND: &'static str;

    /// Returns the primary key.
    fn key(&self) -> &Self::Key;

    /// Apply field changes in place.
    fn apply_changes(&mut self, changes: Self::Changes);

    /// Ownership capability of this record type.
    ///
    /// Tenant-scoped types implement [`Owned`] and return [`Ownership::owned`].
    fn ownership() -> Ownership<Self> {
        Ownership::Shared
    }
}

/// Capability: the record carries an owner-identifier field.
pub trait Owned: Record {
    fn owner(&self) -> Option<&Identity>;

    fn set_owner(&mut self, owner: Option<Identity>);
}

/// Accessors for a record type's owner field, captured once per type.
pub struct OwnerField<R> {
    get: for<'a> fn(&'a R) -> Option<&'a Identity>,
    set: fn(&mut R, Option<Identity>),
}

impl<R> OwnerField<R> {
    pub fn new(
        get: for<'a> fn(&'a R) -> Option<&'a Identity>,
        set: fn(&mut R, Option<Identity>),
    ) -> Self {
        Self { get, set }
    }

    pub fn owner_of<'a>(&self, record: &'a R) -> Option<&'a Identity> {
        (self.get)(record)
    }

    pub fn set_owner_of(&self, record: &mut R, owner: Option<Identity>) {
        (self.set)(record, owner)
    }
}

impl<R: Owned> OwnerField<R> {
    pub fn of() -> Self {
        Self::new(R::owner, R::set_owner)
    }
}

impl<R> Clone for OwnerField<R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<R> Copy for OwnerField<R> {}

impl<R> core::fmt::Debug for OwnerField<R> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("OwnerField").finish_non_exhaustive()
    }
}

/// Whether a record type is tied to a tenant.
pub enum Ownership<R> {
    /// Not tenant-scoped: visible to every identity, never stamped.
    Shared,
    /// Tenant-scoped through the given owner field.
    Owned(OwnerField<R>),
}

impl<R> Ownership<R> {
    pub fn is_owned(&self) -> bool {
        matches!(self, Ownership::Owned(_))
    }

    pub fn field(&self) -> Option<OwnerField<R>> {
        match self {
            Ownership::Shared => None,
            Ownership::Owned(field) => Some(*field),
        }
    }
}

impl<R: Owned> Ownership<R> {
    pub fn owned() -> Self {
        Ownership::Owned(OwnerField::of())
    }
}

impl<R> Clone for Ownership<R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<R> Copy for Ownership<R> {}

impl<R> core::fmt::Debug for Ownership<R> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Ownership::Shared => f.write_str("Shared"),
            Ownership::Owned(_) => f.write_str("Owned"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RecordId;

    #[derive(Debug, Clone, Serialize)]
    struct Note {
        id: RecordId,
        user_id: Option<Identity>,
        body: String,
    }

    impl Record for Note {
        type Key = RecordId;
        type Changes = String;
        const KIND: &'static str = "note";

        fn key(&self) -> &RecordId {
            &self.id
        }

        fn apply_changes(&mut self, changes: String) {
            self.body = changes;
        }

        fn ownership() -> Ownership<Self> {
            Ownership::owned()
        }
    }

    impl Owned for Note {
        fn owner(&self) -> Option<&Identity> {
            self.user_id.as_ref()
        }

        fn set_owner(&mut self, owner: Option<Identity>) {
            self.user_id = owner;
        }
    }

    #[derive(Debug, Clone, Serialize)]
    struct Tag {
        id: RecordId,
    }

    impl Record for Tag {
        type Key = RecordId;
        type Changes = ();
        const KIND: &'static str = "tag";

        fn key(&self) -> &RecordId {
            &self.id
        }

        fn apply_changes(&mut self, _changes: ()) {}
    }

    #[test]
    fn record_types_default_to_shared() {
        assert!(!Tag::ownership().is_owned());
        assert!(Tag::ownership().field().is_none());
    }

    #[test]
    fn owner_field_reads_and_writes_through_the_capability() {
        let ownership = Note::ownership();
        assert!(ownership.is_owned());

        let field = ownership.field().unwrap();
        let mut note = Note {
            id: RecordId::new(),
            user_id: None,
            body: "hello".to_string(),
        };
        assert_eq!(field.owner_of(&note), None);

        field.set_owner_of(&mut note, Some(Identity::from("alice")));
        assert_eq!(field.owner_of(&note), Some(&Identity::from("alice")));
        assert_eq!(note.user_id.as_ref().map(Identity::as_str), Some("alice"));
    }
}
