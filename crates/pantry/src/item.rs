use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

use tenantscope_core::{Identity, Owned, Ownership, Record, RecordId};

/// A stocked ingredient in one member's pantry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PantryItem {
    pub id: RecordId,
    pub user_id: Option<Identity>,
    pub name: String,
    pub quantity: i64,
    /// Code of a shared [`crate::Unit`].
    pub unit: String,
    pub expires_on: Option<NaiveDate>,
}

impl PantryItem {
    pub fn new(name: impl Into<String>, quantity: i64, unit: impl Into<String>) -> Self {
        Self {
            id: RecordId::new(),
            user_id: None,
            name: name.into(),
            quantity,
            unit: unit.into(),
            expires_on: None,
        }
    }

    pub fn owned_by(mut self, owner: impl Into<Identity>) -> Self {
        self.user_id = Some(owner.into());
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PantryItemChanges {
    pub name: Option<String>,
    pub quantity: Option<i64>,
    pub unit: Option<String>,
    /// Absent leaves the date alone; an explicit `null` clears it.
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub expires_on: Option<Option<NaiveDate>>,
}

fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

impl Record for PantryItem {
    type Key = RecordId;
    type Changes = PantryItemChanges;
    const KIND: &'static str = "pantry_item";

    fn key(&self) -> &RecordId {
        &self.id
    }

    fn apply_changes(&mut self, changes: PantryItemChanges) {
        if let Some(name) = changes.name {
            self.name = name;
        }
        if let Some(quantity) = changes.quantity {
            self.quantity = quantity;
        }
        if let Some(unit) = changes.unit {
            self.unit = unit;
        }
        if let Some(expires_on) = changes.expires_on {
            self.expires_on = expires_on;
        }
    }

    fn ownership() -> Ownership<Self> {
        Ownership::owned()
    }
}

impl Owned for PantryItem {
    fn owner(&self) -> Option<&Identity> {
        self.user_id.as_ref()
    }

    fn set_owner(&mut self, owner: Option<Identity>) {
        self.user_id = owner;
    }
}
