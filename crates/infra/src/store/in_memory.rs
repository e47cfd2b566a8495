use std::sync::RwLock;

use tenantscope_core::Record;

use super::r#trait::{Change, ChangeSet, Condition, Store, StoreError};

/// In-memory record store.
///
/// Intended for tests/dev. Records are kept in insertion order, which is the
/// order `select` returns them in. Not optimized for performance.
#[derive(Debug)]
pub struct InMemoryStore<R> {
    records: RwLock<Vec<R>>,
}

impl<R> InMemoryStore<R> {
    pub fn new() -> Self {
        Self {
            records: RwLock::new(Vec::new()),
        }
    }

    /// Pre-seeded store (bypasses scoping entirely; for fixtures).
    pub fn with_records(records: impl IntoIterator<Item = R>) -> Self {
        Self {
            records: RwLock::new(records.into_iter().collect()),
        }
    }
}

impl<R> Default for InMemoryStore<R> {
    fn default() -> Self {
        Self::new()
    }
}

fn matches_all<R: Record>(conditions: &[Condition<R>], record: &R) -> Result<bool, StoreError> {
    for condition in conditions {
        if !condition.matches(record)? {
            return Ok(false);
        }
    }
    Ok(true)
}

fn position<R: Record>(records: &[R], key: &R::Key) -> Option<usize> {
    records.iter().position(|r| r.key() == key)
}

impl<R: Record> Store<R> for InMemoryStore<R> {
    fn select(&self, conditions: &[Condition<R>]) -> Result<Vec<R>, StoreError> {
        let records = self.records.read().map_err(|_| StoreError::LockPoisoned)?;

        let mut out = Vec::new();
        for record in records.iter() {
            if matches_all(conditions, record)? {
                out.push(record.clone());
            }
        }
        Ok(out)
    }

    fn select_first(&self, conditions: &[Condition<R>]) -> Result<Option<R>, StoreError> {
        let records = self.records.read().map_err(|_| StoreError::LockPoisoned)?;

        for record in records.iter() {
            if matches_all(conditions, record)? {
                return Ok(Some(record.clone()));
            }
        }
        Ok(None)
    }

    fn count(&self, conditions: &[Condition<R>]) -> Result<usize, StoreError> {
        let records = self.records.read().map_err(|_| StoreError::LockPoisoned)?;

        let mut n = 0;
        for record in records.iter() {
            if matches_all(conditions, record)? {
                n += 1;
            }
        }
        Ok(n)
    }

    fn commit(&self, changes: ChangeSet<R>) -> Result<(), StoreError> {
        let mut records = self.records.write().map_err(|_| StoreError::LockPoisoned)?;

        // Apply to a working copy; publish only if every change succeeds.
        let mut staged = records.clone();
        for change in changes.into_changes() {
            match change {
                Change::Add(record) => {
                    if position(&staged, record.key()).is_some() {
                        return Err(StoreError::Constraint(format!(
                            "duplicate {} key {:?}",
                            R::KIND,
                            record.key()
                        )));
                    }
                    staged.push(record);
                }
                Change::Update(record) => {
                    let idx = position(&staged, record.key()).ok_or_else(|| {
                        StoreError::Constraint(format!("no {} with key {:?}", R::KIND, record.key()))
                    })?;
                    staged[idx] = record;
                }
                Change::Delete(key) => {
                    let idx = position(&staged, &key).ok_or_else(|| {
                        StoreError::Constraint(format!("no {} with key {key:?}", R::KIND))
                    })?;
                    staged.remove(idx);
                }
            }
        }

        *records = staged;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use tenantscope_pantry::{Recipe, Unit};

    use super::*;
    use crate::predicate::Filter;
    use crate::store::FieldFilter;
    use tenantscope_core::Identity;

    #[test]
    fn conditions_are_conjunctive() {
        let soup = Recipe::new("Soup", 4).owned_by("alice");
        let stew = Recipe::new("Stew", 4).owned_by("bob");
        let store = InMemoryStore::with_records([soup.clone(), stew]);

        let found = store
            .query()
            .filter(Condition::Scope(Filter::Owner(Identity::from("alice"))))
            .filter(Condition::Field(FieldFilter::equals("servings", 4)))
            .all()
            .unwrap();
        assert_eq!(found, vec![soup]);
    }

    #[test]
    fn select_preserves_insertion_order() {
        let units = [Unit::new("g", "gram"), Unit::new("ml", "millilitre"), Unit::new("pc", "piece")];
        let store = InMemoryStore::with_records(units.clone());
        assert_eq!(store.query().all().unwrap(), units.to_vec());
        assert_eq!(store.query().count().unwrap(), 3);
    }

    #[test]
    fn failed_change_set_leaves_store_untouched() {
        let soup = Recipe::new("Soup", 4);
        let store = InMemoryStore::with_records([soup.clone()]);

        let err = store
            .commit(
                ChangeSet::new()
                    .add(Recipe::new("Bread", 1))
                    .add(soup.clone()),
            )
            .unwrap_err();
        assert!(matches!(err, StoreError::Constraint(_)));
        assert_eq!(store.query().all().unwrap(), vec![soup]);
    }

    #[test]
    fn update_and_delete_require_an_existing_key() {
        let store: InMemoryStore<Recipe> = InMemoryStore::new();
        let ghost = Recipe::new("Ghost", 1);

        assert!(matches!(
            store.commit(ChangeSet::new().update(ghost.clone())),
            Err(StoreError::Constraint(_))
        ));
        assert!(matches!(
            store.commit(ChangeSet::new().delete(ghost.id)),
            Err(StoreError::Constraint(_))
        ));
    }

    #[test]
    fn missing_field_never_matches() {
        let store = InMemoryStore::with_records([Unit::new("g", "gram")]);
        let found = store
            .query()
            .filter(Condition::Field(FieldFilter::equals("colour", "red")))
            .first()
            .unwrap();
        assert_eq!(found, None);
    }
}
