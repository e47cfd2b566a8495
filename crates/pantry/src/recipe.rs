use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use tenantscope_core::{Identity, Owned, Ownership, Record, RecordId};

/// A recipe owned by one household member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipe {
    pub id: RecordId,
    pub user_id: Option<Identity>,
    pub title: String,
    pub servings: u32,
    #[serde(default)]
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl Recipe {
    /// New, not-yet-owned recipe. The owner is stamped on create.
    pub fn new(title: impl Into<String>, servings: u32) -> Self {
        Self {
            id: RecordId::new(),
            user_id: None,
            title: title.into(),
            servings,
            tags: Vec::new(),
            created_at: Utc::now(),
        }
    }

    pub fn owned_by(mut self, owner: impl Into<Identity>) -> Self {
        self.user_id = Some(owner.into());
        self
    }

    pub fn with_tags<I, T>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }
}

/// Partial update of a recipe.
///
/// `user_id` is accepted so callers can send whole documents back, but the
/// repository keeps the stored owner regardless.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeChanges {
    pub title: Option<String>,
    pub servings: Option<u32>,
    pub tags: Option<Vec<String>>,
    pub user_id: Option<Identity>,
}

impl Record for Recipe {
    type Key = RecordId;
    type Changes = RecipeChanges;
    const KIND: &'static str = "recipe";

    fn key(&self) -> &RecordId {
        &self.id
    }

    fn apply_changes(&mut self, changes: RecipeChanges) {
        if let Some(title) = changes.title {
            self.title = title;
        }
        if let Some(servings) = changes.servings {
            self.servings = servings;
        }
        if let Some(tags) = changes.tags {
            self.tags = tags;
        }
        if let Some(user_id) = changes.user_id {
            self.user_id = Some(user_id);
        }
    }

    fn ownership() -> Ownership<Self> {
        Ownership::owned()
    }
}

impl Owned for Recipe {
    fn owner(&self) -> Option<&Identity> {
        self.user_id.as_ref()
    }

    fn set_owner(&mut self, owner: Option<Identity>) {
        self.user_id = owner;
    }
}
