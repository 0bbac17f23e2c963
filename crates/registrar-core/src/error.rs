//! # Error Hierarchy
//!
//! Structured error types for the registration gateway, built with
//! `thiserror`. Each failure class of the reconciler is a distinct variant
//! carrying enough context for a client-facing diagnostic.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::catalogue::CatalogueError;
use crate::fetch::FetchError;

/// A single schema violation: the JSON Pointer of the offending instance
/// location and a human-readable message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationIssue {
    /// JSON Pointer to the violating location (`""` is the document root).
    pub path: String,
    /// Human-readable description of the violation.
    pub message: String,
}

impl ValidationIssue {
    /// Build an issue from a pointer and a message.
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.path.is_empty() {
            write!(f, "/: {}", self.message)
        } else {
            write!(f, "{}: {}", self.path, self.message)
        }
    }
}

/// Top-level failure of a register or deregister invocation.
#[derive(Error, Debug)]
pub enum RegistrarError {
    /// The request failed schema validation. Never empty.
    #[error("{} validation error(s): {}", .0.len(), join_issues(.0))]
    Validation(Vec<ValidationIssue>),

    /// The resource source could not be dereferenced.
    #[error("fetch error: {0}")]
    Fetch(#[from] FetchError),

    /// The resolved resource document has no usable identifier.
    #[error("malformed resource document: {reason}")]
    MalformedDocument {
        /// Why the document was rejected.
        reason: String,
    },

    /// A catalogue lookup or write failed.
    #[error("catalogue error: {0}")]
    Catalogue(#[from] CatalogueError),

    /// A result body could not be encoded as JSON.
    #[error("failed to encode result: {0}")]
    Encode(#[source] serde_json::Error),
}

impl RegistrarError {
    /// The validation issues carried by this error, if it is a validation failure.
    pub fn issues(&self) -> Option<&[ValidationIssue]> {
        match self {
            Self::Validation(issues) => Some(issues),
            _ => None,
        }
    }
}

fn join_issues(issues: &[ValidationIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Errors raised when constructing identifier newtypes.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IdentifierError {
    /// Item identifiers must be non-empty strings.
    #[error("invalid item identifier: must be a non-empty string")]
    EmptyItemId,

    /// `.` and `..` cannot address an item.
    #[error("invalid item identifier \"{0}\": dot segments are reserved")]
    ReservedItemId(String),

    /// The catalogue endpoint is not a parseable URL.
    #[error("invalid catalogue endpoint \"{value}\": {reason}")]
    InvalidEndpoint {
        /// The rejected input.
        value: String,
        /// Parser or policy reason.
        reason: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_lists_every_issue() {
        let err = RegistrarError::Validation(vec![
            ValidationIssue::new("", "\"source\" is a required property"),
            ValidationIssue::new("/type", "42 is not of type \"string\""),
        ]);
        let msg = err.to_string();
        assert!(msg.starts_with("2 validation error(s)"), "got: {msg}");
        assert!(msg.contains("/: \"source\" is a required property"));
        assert!(msg.contains("/type: 42 is not of type"));
    }

    #[test]
    fn issues_only_for_validation_variant() {
        let err = RegistrarError::MalformedDocument {
            reason: "missing id".into(),
        };
        assert!(err.issues().is_none());

        let err = RegistrarError::Validation(vec![ValidationIssue::new("/id", "bad")]);
        assert_eq!(err.issues().map(<[_]>::len), Some(1));
    }

    #[test]
    fn issue_serializes_as_path_and_message() {
        let issue = ValidationIssue::new("/target", "\"x\" is not a \"uri\"");
        let json = serde_json::to_value(&issue).unwrap();
        assert_eq!(json["path"], "/target");
        assert_eq!(json["message"], "\"x\" is not a \"uri\"");
    }
}
