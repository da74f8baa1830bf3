// SPDX-License-Identifier: MIT OR Apache-2.0
//! Node kind discrimination.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// The kind of a document node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    /// Ordered key/value container
    Object,
    /// Ordered value container
    Array,
    /// String scalar
    String,
    /// Number scalar
    Number,
    /// Boolean scalar
    Bool,
    /// Null scalar
    Null,
}

impl NodeKind {
    /// Kind of the given node
    #[must_use]
    pub const fn of(value: &Value) -> Self {
        match value {
            Value::Object(_) => Self::Object,
            Value::Array(_) => Self::Array,
            Value::String(_) => Self::String,
            Value::Number(_) => Self::Number,
            Value::Bool(_) => Self::Bool,
            Value::Null => Self::Null,
        }
    }

    /// Whether nodes of this kind have children
    #[must_use]
    pub const fn is_container(self) -> bool {
        matches!(self, Self::Object | Self::Array)
    }

    /// Lower-case name of the kind
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Object => "object",
            Self::Array => "array",
            Self::String => "string",
            Self::Number => "number",
            Self::Bool => "bool",
            Self::Null => "null",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
