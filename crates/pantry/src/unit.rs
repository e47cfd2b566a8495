use serde::{Deserialize, Serialize};

use tenantscope_core::Record;

/// Measurement unit shared by every household member (not tenant-scoped).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Unit {
    pub code: String,
    pub name: String,
}

impl Unit {
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitChanges {
    pub name: Option<String>,
}

impl Record for Unit {
    type Key = String;
    type Changes = UnitChanges;
    const KIND: &'static str = "unit";

    fn key(&self) -> &String {
        &self.code
    }

    fn apply_changes(&mut self, changes: UnitChanges) {
        if let Some(name) = changes.name {
            self.name = name;
        }
    }
}
