//! Cross-cutting error types for Tasklist.
//!
//! Domain-specific errors (`DatabaseError`, `ClientError`, ...) are defined in
//! their respective crates and wrap `CoreError` where a validation or lookup
//! failure has to cross a crate boundary intact.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// A validation message attached to a single named input field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    #[must_use]
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

fn join_field_errors(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Errors that can be raised by any Tasklist crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Entity lookup returned no result.
    #[error("Entity not found: {entity_type} {id}")]
    NotFound { entity_type: String, id: String },

    /// A state machine transition was attempted that is not allowed.
    #[error("Invalid state transition: {entity_type} {id} from {from} to {to}")]
    InvalidTransition {
        entity_type: String,
        id: String,
        from: String,
        to: String,
    },

    /// Input failed validation. Never empty.
    #[error("Validation error: {}", join_field_errors(.0))]
    Validation(Vec<FieldError>),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CoreError {
    #[must_use]
    pub fn not_found(entity_type: impl Into<String>, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: entity_type.into(),
            id: id.into(),
        }
    }

    /// Single-field validation failure.
    #[must_use]
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation(vec![FieldError::new(field, message)])
    }

    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Field-level details for a validation failure; empty for other variants.
    #[must_use]
    pub fn field_errors(&self) -> &[FieldError] {
        match self {
            Self::Validation(errors) => errors,
            _ => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_message_lists_every_field() {
        let err = CoreError::Validation(vec![
            FieldError::new("title", "Title is required"),
            FieldError::new("due_date", "Invalid date"),
        ]);
        assert_eq!(
            err.to_string(),
            "Validation error: title: Title is required; due_date: Invalid date"
        );
        assert_eq!(err.field_errors().len(), 2);
        assert!(err.is_validation());
    }

    #[test]
    fn not_found_has_no_field_errors() {
        let err = CoreError::not_found("task", "tsk-deadbeef");
        assert!(err.is_not_found());
        assert!(err.field_errors().is_empty());
        assert_eq!(err.to_string(), "Entity not found: task tsk-deadbeef");
    }
}
