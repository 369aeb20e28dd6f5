//! Category record: a named bucket of items.

use super::{require_name, ModelValidationError};
use serde::{Deserialize, Serialize};

/// Store-assigned category identity.
pub type CategoryId = i64;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
}

impl Category {
    /// Checks a candidate category name before it is persisted.
    pub fn validate_name(name: &str) -> Result<(), ModelValidationError> {
        require_name("category", name)
    }
}
