// SPDX-License-Identifier: MIT OR Apache-2.0
//! Property and array glue: add a property, append into an array, wrap into
//! a property.

use crate::options::PropertyOptions;
use lopper_core::path::names_equal;
use lopper_core::{
    Breadcrumb, Document, LopperError, MarkSemantic, MatchHook, NodeKind, Result, compile,
};
use lopper_traverse::Rewriter;
use serde_json::{Map, Value};
use tracing::{debug, trace};

/// Add `name: value` to `object` unless a property of that name already holds
/// a value
///
/// Names compare by the options' case rule. An existing `null` is overwritten
/// in place (keeping its original spelling) when `ignore_null_existing` is
/// set; otherwise the existing property wins. Absent properties are appended.
///
/// # Errors
///
/// Returns [`LopperError::UnsupportedTargetKind`] if `object` is not an object.
pub fn add_property(
    object: &Value,
    name: &str,
    value: &Value,
    options: PropertyOptions,
) -> Result<Value> {
    let Value::Object(source) = object else {
        return Err(LopperError::unsupported_target(
            "try_add_property",
            NodeKind::Object,
            NodeKind::of(object),
        ));
    };

    let mut exists = false;
    let mut out = Map::with_capacity(source.len() + 1);
    for (key, current) in source {
        let same = names_equal(key, name, options.case_sensitive);
        exists |= same;
        if same && current.is_null() && options.ignore_null_existing {
            out.insert(key.clone(), value.clone());
        } else {
            out.insert(key.clone(), current.clone());
        }
    }
    if !exists {
        out.insert(name.to_owned(), value.clone());
    }
    Ok(Value::Object(out))
}

/// Match hook adding one property to every matched object
#[derive(Debug, Clone)]
pub struct AddPropertyHook<'v> {
    name: &'v str,
    value: &'v Value,
    options: PropertyOptions,
}

impl<'v> AddPropertyHook<'v> {
    /// Hook adding `name: value`
    #[must_use]
    pub const fn new(name: &'v str, value: &'v Value, options: PropertyOptions) -> Self {
        Self {
            name,
            value,
            options,
        }
    }
}

impl MatchHook for AddPropertyHook<'_> {
    fn on_match(&mut self, node: &Value, breadcrumb: &Breadcrumb<'_>) -> Result<Option<Value>> {
        trace!(breadcrumb = %breadcrumb, name = self.name, "add property");
        add_property(node, self.name, self.value, self.options).map(Some)
    }
}

/// Add `name: value` to the object at `path` (the root when `path` is empty)
///
/// Every object addressed by `path` is updated; the rest of the document is
/// left untouched.
///
/// # Errors
///
/// Returns [`LopperError::UnsupportedTargetKind`] if an addressed node is not
/// an object.
pub fn try_add_property(
    root: &Value,
    path: &str,
    name: &str,
    value: &Value,
    options: PropertyOptions,
) -> Result<Document> {
    debug!(path, name, case_sensitive = options.case_sensitive, "try add property");
    if path.is_empty() {
        return add_property(root, name, value, options).map(Document::from_value);
    }
    Rewriter::new(compile(path, options.case_sensitive, MarkSemantic::Replace))
        .semantic(MarkSemantic::Replace)
        .on_match(AddPropertyHook::new(name, value, options))
        .rewrite(root)
}

/// Append `addition` to the root array
///
/// When `deconstruct` is set and `addition` is itself an array, its items
/// are appended one by one.
///
/// # Errors
///
/// Returns [`LopperError::UnsupportedTargetKind`] if `root` is not an array.
pub fn add_into_array(root: &Value, addition: &Value, deconstruct: bool) -> Result<Document> {
    let Value::Array(items) = root else {
        return Err(LopperError::unsupported_target(
            "add_into_array",
            NodeKind::Array,
            NodeKind::of(root),
        ));
    };
    let mut out = items.clone();
    match addition {
        Value::Array(more) if deconstruct => out.extend(more.iter().cloned()),
        _ => out.push(addition.clone()),
    }
    Ok(Document::from_value(Value::Array(out)))
}

/// Wrap `root` as the single property of a new object
#[must_use]
pub fn into_property(root: &Value, name: &str) -> Document {
    let mut out = Map::with_capacity(1);
    out.insert(name.to_owned(), root.clone());
    Document::from_value(Value::Object(out))
}
