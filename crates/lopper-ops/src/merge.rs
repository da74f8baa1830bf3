// SPDX-License-Identifier: MIT OR Apache-2.0
//! Deep merge and merge-at-path.
//!
//! Merge rules, applied recursively:
//!
//! - object into object: left keys stay in place (merged when both sides
//!   have them), right-only keys follow in right order
//! - array into array: left items, then right items
//! - anything else: the right side wins

use crate::options::PathOptions;
use lopper_core::{Breadcrumb, Document, MarkSemantic, MatchHook, Result, compile};
use lopper_traverse::Rewriter;
use serde_json::{Map, Value};
use tracing::debug;

/// Merge `joined` into `base`
#[must_use]
pub fn merge(base: &Value, joined: &Value) -> Value {
    match (base, joined) {
        (Value::Object(left), Value::Object(right)) => Value::Object(merge_objects(left, right)),
        (Value::Array(left), Value::Array(right)) => {
            Value::Array(left.iter().chain(right).cloned().collect())
        }
        _ => joined.clone(),
    }
}

fn merge_objects(left: &Map<String, Value>, right: &Map<String, Value>) -> Map<String, Value> {
    let mut out = Map::with_capacity(left.len() + right.len());
    for (key, value) in left {
        let merged = right
            .get(key)
            .map_or_else(|| value.clone(), |incoming| merge(value, incoming));
        out.insert(key.clone(), merged);
    }
    for (key, value) in right {
        if !left.contains_key(key) {
            out.insert(key.clone(), value.clone());
        }
    }
    out
}

/// Fold every value of `joined` into `base`, left to right
#[must_use]
pub fn merge_many<'j, I>(base: &Value, joined: I) -> Value
where
    I: IntoIterator<Item = &'j Value>,
{
    joined
        .into_iter()
        .fold(base.clone(), |acc, next| merge(&acc, next))
}

/// Match hook merging a fixed list of values into every matched node
#[derive(Debug, Clone)]
pub struct MergeHook<'j> {
    joined: &'j [Value],
}

impl<'j> MergeHook<'j> {
    /// Hook merging `joined` in order
    #[must_use]
    pub const fn new(joined: &'j [Value]) -> Self {
        Self { joined }
    }
}

impl MatchHook for MergeHook<'_> {
    fn on_match(&mut self, node: &Value, _breadcrumb: &Breadcrumb<'_>) -> Result<Option<Value>> {
        Ok(Some(merge_many(node, self.joined)))
    }
}

/// Merge `joined` into every node addressed by `path`
///
/// The empty path addresses the root. The rest of the document is left
/// untouched; an unmatched path returns the document unchanged.
///
/// # Errors
///
/// Only fails on an internal sink protocol violation.
pub fn merge_into(root: &Value, path: &str, joined: &Value, options: PathOptions) -> Result<Document> {
    merge_many_into(root, path, std::slice::from_ref(joined), options)
}

/// Merge every value of `joined`, in order, into every node addressed by `path`
///
/// # Errors
///
/// Only fails on an internal sink protocol violation.
pub fn merge_many_into(
    root: &Value,
    path: &str,
    joined: &[Value],
    options: PathOptions,
) -> Result<Document> {
    debug!(path, count = joined.len(), "merge into");
    if path.is_empty() {
        return Ok(Document::from_value(merge_many(root, joined)));
    }
    Rewriter::new(compile(path, options.case_sensitive, MarkSemantic::Replace))
        .semantic(MarkSemantic::Replace)
        .on_match(MergeHook::new(joined))
        .rewrite(root)
}
