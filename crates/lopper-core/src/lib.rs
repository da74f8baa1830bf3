// SPDX-License-Identifier: MIT OR Apache-2.0
//! Core types, error handling, and foundational types for lopper
//!
//! This crate provides the vocabulary shared by the traversal engine and the
//! higher level operations:
//!
//! - [`error`] - Error types and Result alias
//! - [`kind`] - Node kind discrimination for `serde_json::Value`
//! - [`document`] - Immutable document wrapper returned by rewrites
//! - [`sink`] - Streaming output sinks (tree builder and JSON writer)
//! - [`instruction`] - Flow / mark vocabulary returned by decision functions
//! - [`breadcrumb`] - Structurally shared path from the root to a node
//! - [`decide`] - Decision function and match hook contracts
//! - [`path`] - Dotted path compiler producing decision functions

#![warn(missing_docs)]
#![deny(rust_2018_idioms)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
#![deny(clippy::cargo)]

/// Structurally shared breadcrumb trail
pub mod breadcrumb;
/// Decision function and match hook contracts
pub mod decide;
/// Immutable document wrapper
pub mod document;
/// Error types for lopper operations
pub mod error;
/// Traversal instruction vocabulary
pub mod instruction;
/// Node kind discrimination
pub mod kind;
/// Dotted path compilation into decision functions
pub mod path;
/// Output sinks for rewritten documents
pub mod sink;

// Re-exports for convenience
pub use breadcrumb::{Breadcrumb, Segment};
pub use decide::{Decide, MatchHook, TryHook, try_hook};
pub use document::Document;
pub use error::{LopperError, Result};
pub use instruction::{Flow, Instruction, Mark, MarkSemantic};
pub use kind::NodeKind;
pub use path::{PathComponent, PathPattern, PathPredicate, compile};
pub use sink::{JsonSink, JsonWriter, TreeSink};
