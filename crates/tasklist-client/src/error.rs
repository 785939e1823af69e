//! Client-side error type.

use tasklist_core::errors::FieldError;
use thiserror::Error;

/// Failure of a remote task procedure, as seen by a front-end.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ClientError {
    /// The input was rejected; one entry per offending field.
    #[error("validation failed: {}", format_fields(.0))]
    Validation(Vec<FieldError>),

    /// The targeted task does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// Connection failure, timeout, server error or undecodable response.
    #[error("transport error: {0}")]
    Transport(String),
}

impl ClientError {
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}

fn format_fields(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl From<reqwest::Error> for ClientError {
    fn from(error: reqwest::Error) -> Self {
        Self::Transport(error.to_string())
    }
}
