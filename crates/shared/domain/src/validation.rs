//! Field rules for the entity model.
//!
//! Every rule is a pure function from a candidate value to a `Result`. Entities call
//! these before they touch their own state, so a rejected value never becomes visible.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Deref;

/// Minimum number of characters in a power description.
pub const MIN_DESCRIPTION_CHARS: usize = 20;

/// The accepted strength literals, in their canonical spelling.
pub const STRENGTHS: [&str; 3] = ["Strong", "Weak", "Average"];

/// A field value violated an entity invariant.
#[hhub_derive::hhub_error]
#[derive(Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Description must be at least 20 characters long")]
    DescriptionTooShort { length: usize },

    #[error("Strength must be 'Strong', 'Weak', or 'Average'")]
    InvalidStrength { value: String },

    #[error("{field} must not be empty")]
    Blank { field: &'static str },
}

/// Checks a power description. Length counts characters, not bytes.
pub fn validate_description(value: &str) -> Result<(), ValidationError> {
    let length = value.chars().count();
    if length < MIN_DESCRIPTION_CHARS {
        return Err(ValidationError::DescriptionTooShort { length });
    }
    Ok(())
}

/// Checks a required text field (hero name, super name, power name).
///
/// Only ASCII whitespace counts as blank, matching the schema's `trim` CHECK.
pub fn validate_required(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.chars().all(|c| c.is_ascii_whitespace()) {
        return Err(ValidationError::Blank { field });
    }
    Ok(())
}

/// A power description that is known to satisfy [`validate_description`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Description(String);

impl Description {
    /// Validates `value` and wraps it.
    pub fn parse(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        validate_description(&value)?;
        Ok(Self(value))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Description {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<Description> for String {
    fn from(value: Description) -> Self {
        value.0
    }
}

impl Deref for Description {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl fmt::Display for Description {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
