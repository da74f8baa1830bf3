// SPDX-License-Identifier: MIT OR Apache-2.0
//! Error types for lopper operations.

use crate::kind::NodeKind;
use thiserror::Error;

/// Result alias used across the lopper crates
pub type Result<T> = std::result::Result<T, LopperError>;

/// Errors raised while traversing or rewriting a document
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LopperError {
    /// A container-only operation was applied to the wrong kind of node
    #[error("{operation} requires {expected} target, found {found}")]
    UnsupportedTargetKind {
        /// The operation that was attempted
        operation: &'static str,
        /// The node kind the operation accepts
        expected: NodeKind,
        /// The node kind that was actually found
        found: NodeKind,
    },

    /// A match hook reported a failure
    #[error("match hook failed at '{breadcrumb}': {message}")]
    Hook {
        /// Rendered breadcrumb of the node being replaced
        breadcrumb: String,
        /// Failure description
        message: String,
    },

    /// The output sink received tokens in an invalid order
    #[error("sink protocol violation: {0}")]
    Sink(String),

    /// I/O failure while streaming output
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON parse or serialization failure
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// Serialized output was not valid UTF-8
    #[error(transparent)]
    Utf8(#[from] std::string::FromUtf8Error),
}

impl LopperError {
    /// Create an unsupported target kind error
    #[must_use]
    pub const fn unsupported_target(
        operation: &'static str,
        expected: NodeKind,
        found: NodeKind,
    ) -> Self {
        Self::UnsupportedTargetKind {
            operation,
            expected,
            found,
        }
    }

    /// Create a hook failure error
    pub fn hook(breadcrumb: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Hook {
            breadcrumb: breadcrumb.into(),
            message: message.into(),
        }
    }

    /// Create a sink protocol error
    pub fn sink(message: impl Into<String>) -> Self {
        Self::Sink(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_target_message() {
        let err = LopperError::unsupported_target("try_add_property", NodeKind::Object, NodeKind::Array);
        assert_eq!(
            err.to_string(),
            "try_add_property requires object target, found array"
        );
    }

    #[test]
    fn test_hook_error_message() {
        let err = LopperError::hook("B.[1]", "boom");
        assert!(matches!(err, LopperError::Hook { .. }));
        assert_eq!(err.to_string(), "match hook failed at 'B.[1]': boom");
    }

    #[test]
    fn test_from_serde_json() {
        let parse_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: LopperError = parse_err.into();
        assert!(matches!(err, LopperError::Json(_)));
    }
}
