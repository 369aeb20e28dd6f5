//! Record models persisted by the Toodle store.
//!
//! # Responsibility
//! - Define the canonical records for categories, items, labels and logins.
//! - Validate user-supplied fields before they reach SQL.
//!
//! # Invariants
//! - Identity fields (`id`, `uuid`) never change after a record is created.
//! - Timestamps are Unix epoch seconds.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::{SystemTime, UNIX_EPOCH};

pub mod category;
pub mod item;
pub mod label;
pub mod login;

/// Validation failure for a record field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelValidationError {
    /// A required name field is empty or whitespace.
    EmptyName { entity: &'static str },
    /// A label color that is not a six digit hex triplet.
    InvalidColor(String),
    EmptyUsername,
    EmptyPassword,
}

impl Display for ModelValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyName { entity } => write!(f, "{entity} name cannot be empty"),
            Self::InvalidColor(value) => {
                write!(f, "label color `{value}` is not a #rrggbb hex value")
            }
            Self::EmptyUsername => write!(f, "login username cannot be empty"),
            Self::EmptyPassword => write!(f, "login password cannot be empty"),
        }
    }
}

impl Error for ModelValidationError {}

pub(crate) fn require_name(
    entity: &'static str,
    value: &str,
) -> Result<(), ModelValidationError> {
    if value.trim().is_empty() {
        return Err(ModelValidationError::EmptyName { entity });
    }
    Ok(())
}

/// Current time as Unix epoch seconds.
pub fn unix_now() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs() as i64)
        .unwrap_or_default()
}
