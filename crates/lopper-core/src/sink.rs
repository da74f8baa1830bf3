// SPDX-License-Identifier: MIT OR Apache-2.0
//! Output sinks for rewritten documents.
//!
//! The traversal engine never builds output directly: it emits a token stream
//! into a [`JsonSink`]. [`TreeSink`] turns the stream back into a
//! `serde_json::Value`; [`JsonWriter`] streams compact JSON bytes.

use crate::error::{LopperError, Result};
use serde_json::{Map, Value};
use std::io;

/// Streaming writer contract consumed by the traversal engine
pub trait JsonSink {
    /// Write `{`
    ///
    /// # Errors
    ///
    /// Returns an error if a value is not allowed at this position.
    fn begin_object(&mut self) -> Result<()>;

    /// Write `}`
    ///
    /// # Errors
    ///
    /// Returns an error if no object is open.
    fn end_object(&mut self) -> Result<()>;

    /// Write `[`
    ///
    /// # Errors
    ///
    /// Returns an error if a value is not allowed at this position.
    fn begin_array(&mut self) -> Result<()>;

    /// Write `]`
    ///
    /// # Errors
    ///
    /// Returns an error if no array is open.
    fn end_array(&mut self) -> Result<()>;

    /// Write a property name inside an open object
    ///
    /// # Errors
    ///
    /// Returns an error outside an object or when a key is already pending.
    fn write_key(&mut self, key: &str) -> Result<()>;

    /// Write a scalar or a whole subtree
    ///
    /// # Errors
    ///
    /// Returns an error if a value is not allowed at this position.
    fn write_value(&mut self, value: &Value) -> Result<()>;

    /// Write an owned value, avoiding a copy where the sink can
    ///
    /// # Errors
    ///
    /// Returns an error if a value is not allowed at this position.
    fn write_owned_value(&mut self, value: Value) -> Result<()> {
        self.write_value(&value)
    }
}

impl<S: JsonSink + ?Sized> JsonSink for &mut S {
    fn begin_object(&mut self) -> Result<()> {
        (**self).begin_object()
    }
    fn end_object(&mut self) -> Result<()> {
        (**self).end_object()
    }
    fn begin_array(&mut self) -> Result<()> {
        (**self).begin_array()
    }
    fn end_array(&mut self) -> Result<()> {
        (**self).end_array()
    }
    fn write_key(&mut self, key: &str) -> Result<()> {
        (**self).write_key(key)
    }
    fn write_value(&mut self, value: &Value) -> Result<()> {
        (**self).write_value(value)
    }
    fn write_owned_value(&mut self, value: Value) -> Result<()> {
        (**self).write_owned_value(value)
    }
}

// =============================================================================
// TreeSink
// =============================================================================

#[derive(Debug)]
enum Frame {
    Object {
        map: Map<String, Value>,
        key: Option<String>,
    },
    Array(Vec<Value>),
}

/// Builds a `Value` from a token stream
#[derive(Debug, Default)]
pub struct TreeSink {
    stack: Vec<Frame>,
    root: Option<Value>,
}

impl TreeSink {
    /// Create an empty sink
    #[must_use]
    pub const fn new() -> Self {
        Self {
            stack: Vec::new(),
            root: None,
        }
    }

    /// Current container depth
    #[must_use]
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// The completed value, `None` if nothing was written
    ///
    /// # Errors
    ///
    /// Returns an error if containers are still open.
    pub fn finish(self) -> Result<Option<Value>> {
        if !self.stack.is_empty() {
            return Err(LopperError::sink(format!(
                "{} container(s) left open",
                self.stack.len()
            )));
        }
        Ok(self.root)
    }

    fn place(&mut self, value: Value) -> Result<()> {
        match self.stack.last_mut() {
            None if self.root.is_some() => Err(LopperError::sink("more than one root value")),
            None => {
                self.root = Some(value);
                Ok(())
            }
            Some(Frame::Array(items)) => {
                items.push(value);
                Ok(())
            }
            Some(Frame::Object { map, key }) => {
                let name = key
                    .take()
                    .ok_or_else(|| LopperError::sink("object value without a key"))?;
                map.insert(name, value);
                Ok(())
            }
        }
    }

    fn check_value_position(&self) -> Result<()> {
        match self.stack.last() {
            None if self.root.is_some() => Err(LopperError::sink("more than one root value")),
            Some(Frame::Object { key: None, .. }) => {
                Err(LopperError::sink("object value without a key"))
            }
            _ => Ok(()),
        }
    }
}

impl JsonSink for TreeSink {
    fn begin_object(&mut self) -> Result<()> {
        self.check_value_position()?;
        self.stack.push(Frame::Object {
            map: Map::new(),
            key: None,
        });
        Ok(())
    }

    fn end_object(&mut self) -> Result<()> {
        match self.stack.pop() {
            Some(Frame::Object { map, key: None }) => self.place(Value::Object(map)),
            Some(Frame::Object { key: Some(k), .. }) => {
                Err(LopperError::sink(format!("key '{k}' has no value")))
            }
            _ => Err(LopperError::sink("end_object without open object")),
        }
    }

    fn begin_array(&mut self) -> Result<()> {
        self.check_value_position()?;
        self.stack.push(Frame::Array(Vec::new()));
        Ok(())
    }

    fn end_array(&mut self) -> Result<()> {
        match self.stack.pop() {
            Some(Frame::Array(items)) => self.place(Value::Array(items)),
            _ => Err(LopperError::sink("end_array without open array")),
        }
    }

    fn write_key(&mut self, name: &str) -> Result<()> {
        match self.stack.last_mut() {
            Some(Frame::Object { key: key @ None, .. }) => {
                *key = Some(name.to_owned());
                Ok(())
            }
            Some(Frame::Object { .. }) => Err(LopperError::sink("two keys in a row")),
            _ => Err(LopperError::sink("key outside of an object")),
        }
    }

    fn write_value(&mut self, value: &Value) -> Result<()> {
        self.place(value.clone())
    }

    fn write_owned_value(&mut self, value: Value) -> Result<()> {
        self.place(value)
    }
}

// =============================================================================
// JsonWriter
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Container {
    Object,
    Array,
}

#[derive(Debug)]
struct Level {
    container: Container,
    first: bool,
}

/// Streams compact JSON to an `io::Write`
#[derive(Debug)]
pub struct JsonWriter<W> {
    writer: W,
    stack: Vec<Level>,
    after_key: bool,
    wrote_root: bool,
}

impl<W: io::Write> JsonWriter<W> {
    /// Wrap a writer
    pub const fn new(writer: W) -> Self {
        Self {
            writer,
            stack: Vec::new(),
            after_key: false,
            wrote_root: false,
        }
    }

    /// Flush and return the inner writer
    ///
    /// # Errors
    ///
    /// Returns an error if containers are still open or flushing fails.
    pub fn finish(mut self) -> Result<W> {
        if !self.stack.is_empty() {
            return Err(LopperError::sink(format!(
                "{} container(s) left open",
                self.stack.len()
            )));
        }
        self.writer.flush()?;
        Ok(self.writer)
    }

    /// Whether a complete root value has been written
    #[must_use]
    pub const fn has_output(&self) -> bool {
        self.wrote_root
    }

    fn before_value(&mut self) -> Result<()> {
        if self.after_key {
            self.after_key = false;
            return Ok(());
        }
        match self.stack.last_mut() {
            None if self.wrote_root => Err(LopperError::sink("more than one root value")),
            None => Ok(()),
            Some(Level {
                container: Container::Object,
                ..
            }) => Err(LopperError::sink("object value without a key")),
            Some(level) => {
                if !level.first {
                    self.writer.write_all(b",")?;
                }
                level.first = false;
                Ok(())
            }
        }
    }

    fn after_value(&mut self) {
        if self.stack.is_empty() {
            self.wrote_root = true;
        }
    }

    fn open(&mut self, container: Container, token: &[u8]) -> Result<()> {
        self.before_value()?;
        self.writer.write_all(token)?;
        self.stack.push(Level {
            container,
            first: true,
        });
        Ok(())
    }

    fn close(&mut self, container: Container, token: &[u8]) -> Result<()> {
        if self.after_key {
            return Err(LopperError::sink("key has no value"));
        }
        match self.stack.pop() {
            Some(level) if level.container == container => {
                self.writer.write_all(token)?;
                self.after_value();
                Ok(())
            }
            _ => Err(LopperError::sink("close token does not match open container")),
        }
    }
}

impl<W: io::Write> JsonSink for JsonWriter<W> {
    fn begin_object(&mut self) -> Result<()> {
        self.open(Container::Object, b"{")
    }

    fn end_object(&mut self) -> Result<()> {
        self.close(Container::Object, b"}")
    }

    fn begin_array(&mut self) -> Result<()> {
        self.open(Container::Array, b"[")
    }

    fn end_array(&mut self) -> Result<()> {
        self.close(Container::Array, b"]")
    }

    fn write_key(&mut self, key: &str) -> Result<()> {
        match self.stack.last_mut() {
            Some(level) if level.container == Container::Object && !self.after_key => {
                if !level.first {
                    self.writer.write_all(b",")?;
                }
                level.first = false;
            }
            _ => return Err(LopperError::sink("key outside of an object")),
        }
        serde_json::to_writer(&mut self.writer, key)?;
        self.writer.write_all(b":")?;
        self.after_key = true;
        Ok(())
    }

    fn write_value(&mut self, value: &Value) -> Result<()> {
        self.before_value()?;
        serde_json::to_writer(&mut self.writer, value)?;
        self.after_value();
        Ok(())
    }
}
