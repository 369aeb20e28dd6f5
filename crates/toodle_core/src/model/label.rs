//! Label record and color normalization.

use super::{require_name, ModelValidationError};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Store-assigned label identity.
pub type LabelId = i64;

static HEX_COLOR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^#?([0-9A-Fa-f]{6})$").expect("hex color pattern must compile")
});

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Label {
    pub id: LabelId,
    /// Unique, compared case-insensitively.
    pub name: String,
    /// Always `#rrggbb`, lowercase.
    pub color: String,
}

impl Label {
    pub fn validate_name(name: &str) -> Result<(), ModelValidationError> {
        require_name("label", name)
    }
}

/// Normalizes `RRGGBB` / `#RRGGBB` input into lowercase `#rrggbb`.
pub fn normalize_color(value: &str) -> Result<String, ModelValidationError> {
    let trimmed = value.trim();
    let captures = HEX_COLOR
        .captures(trimmed)
        .ok_or_else(|| ModelValidationError::InvalidColor(trimmed.to_string()))?;
    Ok(format!("#{}", captures[1].to_ascii_lowercase()))
}
