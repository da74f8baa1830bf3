// SPDX-License-Identifier: MIT OR Apache-2.0
//! # lopper
//!
//! Structural query and rewrite for JSON trees. A decision function looks at
//! each node and its breadcrumb and answers with an [`Instruction`]: where the
//! walk goes next and whether the node is marked. The traversal engine turns
//! those answers into either a rewritten document or a lazy stream of marked
//! nodes, and the path operations build on top of it.
//!
//! ```
//! use lopper::{PathOptions, keep, remove, merge_into};
//! use serde_json::json;
//!
//! let doc = json!({"A": 10, "B": [{"Val": 40}, {"Val": 20}, {"Factor": 20}]});
//!
//! let kept = keep(&doc, "b.*.val", PathOptions::new()).unwrap();
//! assert_eq!(kept, json!({"B": [{"Val": 40}, {"Val": 20}]}));
//!
//! let pruned = remove(&doc, "B", PathOptions::new()).unwrap();
//! assert_eq!(pruned, json!({"A": 10}));
//!
//! let merged = merge_into(&doc, "B.[2]", &json!({"Val": 0}), PathOptions::new()).unwrap();
//! assert_eq!(merged.root()["B"][2], json!({"Factor": 20, "Val": 0}));
//! ```
//!
//! ## Crates
//!
//! - [`core`] - document adapter, instruction model, breadcrumbs, path compiler, sinks
//! - [`traverse`] - rewrite and collection modes of the traversal engine
//! - [`ops`] - keep / remove / replace / merge / add-property and lookups

#![doc(html_root_url = "https://docs.rs/lopper/0.1.0")]
#![warn(missing_docs)]
#![deny(rust_2018_idioms)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
#![deny(clippy::cargo)]

/// Re-export of lopper-core for core types.
pub use lopper_core as core;

/// Re-export of lopper-traverse for the traversal engine.
pub use lopper_traverse as traverse;

/// Re-export of lopper-ops for the path operations.
pub use lopper_ops as ops;

pub use lopper_core::{
    Breadcrumb, Decide, Document, Flow, Instruction, LopperError, Mark, MarkSemantic, MatchHook,
    NodeKind, PathPattern, PathPredicate, Result, Segment, compile, try_hook,
};
pub use lopper_ops::{
    PathOptions, PropertyOptions, add_into_array, collect, get_bool, get_f64, get_i64, get_str,
    get_u64, get_value, into_property, keep, keep_with, merge, merge_into, merge_many,
    merge_many_into, remove, replace, try_add_property,
};
pub use lopper_traverse::{Matches, Rewriter, enumerate, filter};
