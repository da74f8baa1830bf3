// SPDX-License-Identifier: MIT OR Apache-2.0
//! # Path operations over JSON trees
//!
//! Every operation here is a decision function or match hook layered on the
//! [`lopper_traverse`] engine:
//!
//! ## Reshape
//! - `keep` / `keep_with`: only addressed nodes survive
//! - `remove`: addressed nodes are dropped, everything else survives
//! - `replace`: addressed nodes pass through a hook
//! - `collect`: lazy matches of a path
//!
//! ## Merge
//! - `merge` / `merge_many`: deep merge (objects unify, arrays concatenate,
//!   the incoming side wins otherwise)
//! - `merge_into`: deep merge at a path
//!
//! ## Properties and lookups
//! - `try_add_property`: add a property unless it already holds a value
//! - `add_into_array`, `into_property`: array and wrapper glue
//! - `get_value` and the typed `get_*` family

#![warn(missing_docs)]
#![deny(rust_2018_idioms)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
#![deny(clippy::cargo)]

mod lookup;
mod merge;
mod options;
mod property;
mod reshape;

pub use lookup::{get_bool, get_f64, get_i64, get_str, get_u64, get_value};
pub use merge::{MergeHook, merge, merge_into, merge_many, merge_many_into};
pub use options::{PathOptions, PropertyOptions};
pub use property::{
    AddPropertyHook, add_into_array, add_property, into_property, try_add_property,
};
pub use reshape::{collect, keep, keep_with, remove, replace};
