// SPDX-License-Identifier: MIT OR Apache-2.0
//! Immutable document wrapper.

use crate::error::Result;
use crate::kind::NodeKind;
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use std::io;
use std::str::FromStr;
use std::sync::Arc;

/// An immutable, cheaply clonable JSON document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    root: Arc<Value>,
}

impl Document {
    /// Parse a document from JSON text
    ///
    /// # Errors
    ///
    /// Returns an error if the input is not valid JSON.
    pub fn parse(input: &str) -> Result<Self> {
        Ok(Self::from_value(serde_json::from_str(input)?))
    }

    /// Parse a document from JSON bytes
    ///
    /// # Errors
    ///
    /// Returns an error if the input is not valid JSON.
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        Ok(Self::from_value(serde_json::from_slice(bytes)?))
    }

    /// Wrap an existing value
    #[must_use]
    pub fn from_value(value: Value) -> Self {
        Self {
            root: Arc::new(value),
        }
    }

    /// The root node
    #[must_use]
    pub fn root(&self) -> &Value {
        &self.root
    }

    /// Kind of the root node
    #[must_use]
    pub fn kind(&self) -> NodeKind {
        NodeKind::of(&self.root)
    }

    /// Take the root value, cloning only if the document is shared
    #[must_use]
    pub fn into_value(self) -> Value {
        Arc::try_unwrap(self.root).unwrap_or_else(|shared| (*shared).clone())
    }

    /// Serialize with the given indentation width
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_pretty_string(&self, indent: usize) -> Result<String> {
        let mut buf = Vec::new();
        self.write_pretty_to(&mut buf, indent)?;
        Ok(String::from_utf8(buf)?)
    }

    /// Write compact JSON
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    pub fn write_to<W: io::Write>(&self, writer: W) -> Result<()> {
        serde_json::to_writer(writer, self.root.as_ref())?;
        Ok(())
    }

    /// Write indented JSON
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    pub fn write_pretty_to<W: io::Write>(&self, writer: W, indent: usize) -> Result<()> {
        let indent_str = " ".repeat(indent);
        let formatter = serde_json::ser::PrettyFormatter::with_indent(indent_str.as_bytes());
        let mut ser = serde_json::Serializer::with_formatter(writer, formatter);
        self.root.serialize(&mut ser)?;
        Ok(())
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.root)
    }
}

impl FromStr for Document {
    type Err = crate::error::LopperError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl From<Value> for Document {
    fn from(value: Value) -> Self {
        Self::from_value(value)
    }
}

impl From<Document> for Value {
    fn from(doc: Document) -> Self {
        doc.into_value()
    }
}

impl AsRef<Value> for Document {
    fn as_ref(&self) -> &Value {
        &self.root
    }
}

impl PartialEq<Value> for Document {
    fn eq(&self, other: &Value) -> bool {
        self.root.as_ref() == other
    }
}

impl Serialize for Document {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.root.serialize(serializer)
    }
}
