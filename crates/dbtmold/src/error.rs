//! Typed failures for tool dispatch and prompt assembly.
//!
//! Every caller-visible failure carries an [`ErrorKind`] so transports can map
//! it to a status without parsing messages. Missing reference artifacts are
//! not errors at all; see [`ReferenceArtifact`](crate::artifacts::ReferenceArtifact).

use serde::{Deserialize, Serialize};
use std::fmt;

/// Category of a caller-visible failure.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// A required parameter was empty, arguments did not match the declared
    /// parameter schema, or a value fell outside the operation's domain.
    Validation,
    /// The requested tool or prompt kind is not registered.
    UnknownOperation,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::Validation => write!(f, "validation error"),
            ErrorKind::UnknownOperation => write!(f, "unknown operation"),
        }
    }
}

/// Structured failure returned by a tool invocation.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct ToolError {
    pub kind: ErrorKind,
    pub message: String,
}

impl ToolError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::Validation,
            message: message.into(),
        }
    }

    pub fn unknown_operation(name: &str) -> Self {
        Self {
            kind: ErrorKind::UnknownOperation,
            message: format!("unknown tool '{name}'"),
        }
    }
}

/// Failure raised while assembling a prompt.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PromptError {
    #[error("missing required parameter '{parameter}' for the {kind} prompt")]
    MissingParameter {
        kind: &'static str,
        parameter: &'static str,
    },

    #[error("invalid parameters for the {kind} prompt: {reason}")]
    InvalidParameters { kind: &'static str, reason: String },

    #[error("unknown prompt kind '{0}'")]
    UnknownKind(String),
}

impl PromptError {
    /// The wire-level category of this failure.
    pub fn kind(&self) -> ErrorKind {
        match self {
            PromptError::MissingParameter { .. } | PromptError::InvalidParameters { .. } => {
                ErrorKind::Validation
            }
            PromptError::UnknownKind(_) => ErrorKind::UnknownOperation,
        }
    }
}

impl From<PromptError> for ToolError {
    fn from(err: PromptError) -> Self {
        Self {
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}
