//! Ownership predicates: the tenant filter applied to every scoped read.
//!
//! | bypassed | explicit identity | owned type | filter |
//! |---|---|---|---|
//! | yes | – | – | [`Filter::MatchAll`] |
//! | no | yes | yes | owner == explicit |
//! | no | no | yes | owner == ambient, or [`Filter::MatchNone`] without one |
//! | no | – | no | [`Filter::MatchAll`] |
//!
//! Filters are built per call and never cached across contexts.

use serde::Serialize;

use tenantscope_auth::{ExecutionContext, context};
use tenantscope_core::{Identity, Ownership, Record};

use crate::store::{Condition, Query, Store};

/// Tenant filter for one read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "match", content = "owner", rename_all = "snake_case")]
pub enum Filter {
    MatchAll,
    MatchNone,
    Owner(Identity),
}

impl Filter {
    /// Evaluate outside any query builder.
    pub fn matches<R: Record>(&self, record: &R) -> bool {
        match self {
            Filter::MatchAll => true,
            Filter::MatchNone => false,
            Filter::Owner(identity) => match R::ownership() {
                Ownership::Owned(field) => field.owner_of(record) == Some(identity),
                Ownership::Shared => true,
            },
        }
    }
}

/// The decision table, as a pure function of its inputs.
pub fn resolve_filter(
    owned: bool,
    explicit: Option<&Identity>,
    ctx: &ExecutionContext,
) -> Filter {
    if ctx.bypass || !owned {
        return Filter::MatchAll;
    }

    match explicit.or(ctx.identity.as_ref()) {
        Some(identity) => Filter::Owner(identity.clone()),
        None => Filter::MatchNone,
    }
}

/// Filter for record type `R` under the current context.
pub fn owner_filter<R: Record>(explicit: Option<&Identity>) -> Filter {
    resolve_filter(R::ownership().is_owned(), explicit, &context::current())
}

/// Boolean fast-path: would `record` be returned by a scoped read right now?
pub fn is_visible<R: Record>(record: &R, explicit: Option<&Identity>) -> bool {
    owner_filter::<R>(explicit).matches(record)
}

/// Append the tenant clause for `R` to `query`.
///
/// Returns the query unchanged when the filter is [`Filter::MatchAll`].
pub fn scope_query<'s, R, S>(query: Query<'s, R, S>, explicit: Option<&Identity>) -> Query<'s, R, S>
where
    R: Record,
    S: Store<R> + ?Sized,
{
    apply_filter(query, owner_filter::<R>(explicit))
}

pub(crate) fn apply_filter<'s, R, S>(query: Query<'s, R, S>, filter: Filter) -> Query<'s, R, S>
where
    R: Record,
    S: Store<R> + ?Sized,
{
    match filter {
        Filter::MatchAll => query,
        scoped => query.filter(Condition::Scope(scoped)),
    }
}

#[cfg(test)]
mod tests {
    use tenantscope_auth::{with_bypass, with_identity};
    use tenantscope_pantry::{Recipe, Unit};

    use super::*;
    use crate::store::InMemoryStore;

    fn id(value: &str) -> Identity {
        Identity::from(value)
    }

    #[test]
    fn decision_table() {
        let alice = ExecutionContext::for_identity("alice");
        let nobody = ExecutionContext::default();
        let bob = id("bob");

        assert_eq!(resolve_filter(true, Some(&bob), &alice.clone().bypassed()), Filter::MatchAll);
        assert_eq!(resolve_filter(true, Some(&bob), &alice), Filter::Owner(bob.clone()));
        assert_eq!(resolve_filter(true, None, &alice), Filter::Owner(id("alice")));
        assert_eq!(resolve_filter(true, None, &nobody), Filter::MatchNone);
        assert_eq!(resolve_filter(false, Some(&bob), &alice), Filter::MatchAll);
        assert_eq!(resolve_filter(false, None, &nobody), Filter::MatchAll);
    }

    #[test]
    fn missing_identity_never_widens_to_everything() {
        context::sync_scope(ExecutionContext::default(), || {
            assert_eq!(owner_filter::<Recipe>(None), Filter::MatchNone);
            assert!(!is_visible(&Recipe::new("Soup", 2).owned_by("alice"), None));
        });
    }

    #[test]
    fn unowned_records_are_invisible_to_owner_filters() {
        let orphan = Recipe::new("Orphan", 1);
        assert!(!Filter::Owner(id("alice")).matches(&orphan));
    }

    #[test]
    fn shared_types_are_not_filtered() {
        context::sync_scope(ExecutionContext::default(), || {
            assert_eq!(owner_filter::<Unit>(None), Filter::MatchAll);
            assert!(is_visible(&Unit::new("g", "gram"), None));
        });
    }

    #[test]
    fn fast_path_follows_the_ambient_identity() {
        let soup = Recipe::new("Soup", 2).owned_by("alice");
        context::sync_scope(ExecutionContext::for_identity("alice"), || {
            assert!(is_visible(&soup, None));
            with_identity(id("bob"), || {
                assert!(!is_visible(&soup, None));
                assert!(is_visible(&soup, Some(&id("alice"))));
                assert!(with_bypass(|| is_visible(&soup, None)));
            });
        });
    }

    #[test]
    fn scope_query_leaves_bypassed_queries_unchanged() {
        let store: InMemoryStore<Recipe> = InMemoryStore::new();
        context::sync_scope(ExecutionContext::for_identity("alice"), || {
            let scoped = scope_query(store.query(), None);
            assert_eq!(scoped.conditions().len(), 1);

            let bypassed = with_bypass(|| scope_query(store.query(), None));
            assert!(bypassed.conditions().is_empty());
        });
    }

    #[test]
    fn filter_serializes_for_logs() {
        let json = serde_json::to_value(Filter::Owner(id("alice"))).unwrap();
        assert_eq!(json, serde_json::json!({ "match": "owner", "owner": "alice" }));
    }
}
