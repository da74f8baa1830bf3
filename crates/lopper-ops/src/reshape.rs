// SPDX-License-Identifier: MIT OR Apache-2.0
//! Keep, remove and replace by path.
//!
//! Each operation is a compiled path plus a [`MarkSemantic`]; none of them
//! walks the tree on its own.

use crate::options::PathOptions;
use lopper_core::{Document, Mark, MarkSemantic, MatchHook, PathPredicate, Result, compile};
use lopper_traverse::{Matches, Rewriter};
use serde_json::Value;
use tracing::debug;

fn predicate(path: &str, options: PathOptions, semantic: MarkSemantic) -> PathPredicate {
    compile(path, options.case_sensitive, semantic)
}

/// Keep only the nodes addressed by `path` (and the ancestors leading to them)
///
/// # Errors
///
/// Only fails on an internal sink protocol violation.
pub fn keep(root: &Value, path: &str, options: PathOptions) -> Result<Document> {
    debug!(path, case_sensitive = options.case_sensitive, "keep");
    Rewriter::new(predicate(path, options, MarkSemantic::Pick))
        .semantic(MarkSemantic::Pick)
        .rewrite(root)
}

/// Like [`keep`], but every addressed node passes through `hook`
///
/// A hook returning `None` drops the node.
///
/// # Errors
///
/// Returns the first hook failure.
pub fn keep_with<H: MatchHook>(
    root: &Value,
    path: &str,
    hook: H,
    options: PathOptions,
) -> Result<Document> {
    debug!(path, case_sensitive = options.case_sensitive, "keep with hook");
    Rewriter::new(predicate(path, options, MarkSemantic::Pick).with_terminal_mark(Mark::TakeOrReplace))
        .semantic(MarkSemantic::Pick)
        .on_match(hook)
        .rewrite(root)
}

/// Drop the nodes addressed by `path`, keeping everything else
///
/// # Errors
///
/// Only fails on an internal sink protocol violation.
pub fn remove(root: &Value, path: &str, options: PathOptions) -> Result<Document> {
    debug!(path, case_sensitive = options.case_sensitive, "remove");
    Rewriter::new(predicate(path, options, MarkSemantic::Ignore))
        .semantic(MarkSemantic::Ignore)
        .rewrite(root)
}

/// Pass the nodes addressed by `path` through `hook`, keeping everything else
///
/// # Errors
///
/// Returns the first hook failure.
pub fn replace<H: MatchHook>(
    root: &Value,
    path: &str,
    hook: H,
    options: PathOptions,
) -> Result<Document> {
    debug!(path, case_sensitive = options.case_sensitive, "replace");
    Rewriter::new(predicate(path, options, MarkSemantic::Replace))
        .semantic(MarkSemantic::Replace)
        .on_match(hook)
        .rewrite(root)
}

/// Lazily collect the nodes addressed by `path`
#[must_use]
pub fn collect<'a>(root: &'a Value, path: &str, options: PathOptions) -> Matches<'a, PathPredicate> {
    Matches::new(root, predicate(path, options, MarkSemantic::Pick))
}
