//! Category records held by the catalog store.

use serde::{Deserialize, Serialize};

use super::CategoryId;

/// A menu section as stored in the `categories` collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    /// Join key matched against [`Product::category`](super::Product::category).
    pub name: String,
    /// Manual sort key. Not unique.
    pub position: i32,
}

/// Writeable category fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryInput {
    pub name: String,
    pub position: i32,
}

impl CategoryInput {
    /// Attach a store-assigned ID, producing the stored record.
    #[must_use]
    pub fn into_category(self, id: CategoryId) -> Category {
        Category {
            id,
            name: self.name,
            position: self.position,
        }
    }
}
