//! To-do item record.
//!
//! # Invariants
//! - `uuid` is generated once and never reused.
//! - An item belongs to at most one category.
//! - `completion_date.is_some()` is the source of truth for completion.

use super::category::CategoryId;
use super::{require_name, unix_now, ModelValidationError};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable item identity, shared with every boundary handle of the item.
pub type ItemId = Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub uuid: ItemId,
    pub name: String,
    /// Unix epoch seconds.
    pub created_at: i64,
    pub due_date: Option<i64>,
    pub completion_date: Option<i64>,
    pub category_id: Option<CategoryId>,
}

impl Item {
    /// Creates an uncategorized item with a fresh uuid, stamped with the
    /// current time.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            uuid: Uuid::new_v4(),
            name: name.into(),
            created_at: unix_now(),
            due_date: None,
            completion_date: None,
            category_id: None,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.completion_date.is_some()
    }

    pub fn validate(&self) -> Result<(), ModelValidationError> {
        require_name("item", &self.name)
    }
}
