//! Login record and validation outcome.

use super::ModelValidationError;
use serde::{Deserialize, Serialize};

/// Store-assigned login identity.
pub type LoginId = i64;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Login {
    pub id: LoginId,
    pub username: String,
    #[serde(skip_serializing, default)]
    pub password: String,
    pub guid: String,
    pub time_created: i64,
    pub time_last_used: Option<i64>,
    pub time_password_changed: i64,
    pub times_used: i64,
}

impl Login {
    pub fn validate_credentials(
        username: &str,
        password: &str,
    ) -> Result<(), ModelValidationError> {
        if username.trim().is_empty() {
            return Err(ModelValidationError::EmptyUsername);
        }
        if password.is_empty() {
            return Err(ModelValidationError::EmptyPassword);
        }
        Ok(())
    }
}

/// Result of checking a username/password pair.
///
/// Discriminants are the wire codes returned across the C boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(i32)]
pub enum LoginStatus {
    Valid = 0,
    UnknownUsername = 1,
    IncorrectPassword = 2,
    Invalid = 3,
}

impl LoginStatus {
    pub fn code(self) -> i32 {
        self as i32
    }
}
