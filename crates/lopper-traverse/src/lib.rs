// SPDX-License-Identifier: MIT OR Apache-2.0
//! Traversal engine for lopper
//!
//! Two output modes share one decision vocabulary:
//!
//! - [`filter`] - rewrite mode, streaming surviving nodes into a sink
//! - [`enumerate`] - lazy collection of marked nodes from the source tree
//! - [`pending`] - deferred-open bookkeeping used by rewrite mode
//!
//! # Example
//!
//! ```
//! use lopper_core::{MarkSemantic, compile};
//! use lopper_traverse::{Rewriter, enumerate};
//! use serde_json::json;
//!
//! let doc = json!({"B": [{"Val": 40}, {"Val": 20}, {"Factor": 20}]});
//!
//! let kept = Rewriter::new(compile("B.*.val", false, MarkSemantic::Pick))
//!     .rewrite(&doc)
//!     .unwrap();
//! assert_eq!(kept, json!({"B": [{"Val": 40}, {"Val": 20}]}));
//!
//! let vals: Vec<_> = enumerate(&doc, compile("B.*.val", false, MarkSemantic::Pick)).collect();
//! assert_eq!(vals, [&json!(40), &json!(20)]);
//! ```

#![warn(missing_docs)]
#![deny(rust_2018_idioms)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
#![deny(clippy::cargo)]

/// Lazy collection mode
pub mod enumerate;
/// Rewrite mode
pub mod filter;
/// Deferred-open bookkeeping
pub mod pending;

pub use enumerate::{Located, Matches, enumerate};
pub use filter::{RewriteStats, Rewriter, filter};
pub use pending::{LevelId, LevelState, Opener, PendingWrites};
