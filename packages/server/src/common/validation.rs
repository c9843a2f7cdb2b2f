//! Request payload validation.
//!
//! Errors are reported in a flattened shape the frontend already understands:
//! `{ "formErrors": [...], "fieldErrors": { "name": ["..."] } }`.

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

use super::id::Id;

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationErrors {
    pub form_errors: Vec<String>,
    pub field_errors: BTreeMap<String, Vec<String>>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Error that is not tied to a single field (e.g. unparsable body).
    pub fn form(message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.form_errors.push(message.into());
        errors
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.field_errors
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.form_errors.is_empty() && self.field_errors.is_empty()
    }

    /// Records an error when `value` is empty after trimming.
    pub fn require(&mut self, field: &str, value: &str) {
        if value.trim().is_empty() {
            self.add(field, "String must contain at least 1 character(s)");
        }
    }

    /// Records an error when `value` is outside `[min, max]`.
    pub fn range(&mut self, field: &str, value: i64, min: i64, max: i64) {
        if value < min {
            self.add(
                field,
                format!("Number must be greater than or equal to {}", min),
            );
        } else if value > max {
            self.add(field, format!("Number must be less than or equal to {}", max));
        }
    }

    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

/// Implemented by request payloads that need checks beyond deserialization.
pub trait Validate {
    fn validate(&self) -> Result<(), ValidationErrors>;
}

/// Treats empty or whitespace-only optional strings as absent.
pub fn blank_to_none(value: Option<String>) -> Option<String> {
    value.and_then(|v| {
        let trimmed = v.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

/// Serde helper for optional id fields: accepts a UUID, `null`, or `""`.
pub fn optional_id<'de, D, T>(deserializer: D) -> Result<Option<Id<T>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => Id::parse(value).map(Some).map_err(serde::de::Error::custom),
    }
}
