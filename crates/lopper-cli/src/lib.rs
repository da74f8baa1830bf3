// SPDX-License-Identifier: MIT OR Apache-2.0
//! # lopper-cli
//!
//! Command-line interface for lopper: keep, remove, replace and merge JSON
//! subtrees by dotted path.
//!
//! ## Installation
//!
//! ```bash
//! cargo install lopper-cli
//! ```
//!
//! ## Usage
//!
//! ```bash
//! # Keep only the addressed nodes
//! lopper keep 'users.[].name' data.json
//!
//! # Drop the addressed nodes
//! lopper remove 'users.*.password' data.json
//!
//! # Substitute matches with a literal, or delete them
//! lopper replace 'users.[].role' --with '"guest"' data.json
//! lopper replace 'users.[].token' data.json
//!
//! # Deep merge whole files, or a file into a subtree
//! lopper merge base.json overlay.json
//! lopper merge-into settings overlay.json data.json
//!
//! # Add a property unless it already holds a value
//! lopper add-property --at 'users.[]' active true data.json
//!
//! # Print every match, or the first one
//! lopper query 'users.[].name' data.json
//! lopper get 'users.[0].name' data.json
//!
//! # Format JSON
//! lopper format data.json
//! lopper --compact format data.json
//! ```
//!
//! Paths are case-insensitive unless `--case-sensitive` is given. Logs go to
//! stderr; `-v` enables debug and `-vv` trace output, and `RUST_LOG`
//! overrides both.
//!
//! ## Subcommands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `keep` | Keep only the nodes a path addresses |
//! | `remove` | Drop the nodes a path addresses |
//! | `replace` | Substitute or delete the nodes a path addresses |
//! | `merge` | Deep merge JSON files left to right |
//! | `merge-into` | Deep merge a file into every node a path addresses |
//! | `add-property` | Add a property to the addressed objects |
//! | `query` | Print every match of a path, one per line |
//! | `get` | Print the first match of a path |
//! | `format` | Pretty-print or compact JSON |
//!
//! ## Library Usage
//!
//! This crate is primarily a CLI tool. For programmatic access use the
//! library crates directly:
//!
//! - [`lopper`](https://docs.rs/lopper) - Umbrella crate with all functionality
//! - [`lopper-ops`](https://docs.rs/lopper-ops) - Path operations and deep merge
//! - [`lopper-traverse`](https://docs.rs/lopper-traverse) - Traversal engine
//! - [`lopper-core`](https://docs.rs/lopper-core) - Core types and path compiler

#![doc(html_root_url = "https://docs.rs/lopper-cli/0.1.0")]
#![warn(missing_docs)]

/// Re-export of lopper-ops for the path operations.
pub use lopper_ops as ops;

/// Re-export of lopper-traverse for the traversal engine.
pub use lopper_traverse as traverse;

/// Re-export of lopper-core for core types.
pub use lopper_core as core;
