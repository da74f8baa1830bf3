// SPDX-License-Identifier: MIT OR Apache-2.0
//! Typed lookups of the first node addressed by a path.

use crate::options::PathOptions;
use crate::reshape::collect;
use serde_json::Value;

/// First node addressed by `path`
#[must_use]
pub fn get_value<'a>(root: &'a Value, path: &str, options: PathOptions) -> Option<&'a Value> {
    collect(root, path, options).next()
}

/// First node addressed by `path`, if it is a string
#[must_use]
pub fn get_str<'a>(root: &'a Value, path: &str, options: PathOptions) -> Option<&'a str> {
    get_value(root, path, options)?.as_str()
}

/// First node addressed by `path`, if it is an integer representable as `i64`
#[must_use]
pub fn get_i64(root: &Value, path: &str, options: PathOptions) -> Option<i64> {
    get_value(root, path, options)?.as_i64()
}

/// First node addressed by `path`, if it is an integer representable as `u64`
#[must_use]
pub fn get_u64(root: &Value, path: &str, options: PathOptions) -> Option<u64> {
    get_value(root, path, options)?.as_u64()
}

/// First node addressed by `path`, if it is a number
#[must_use]
pub fn get_f64(root: &Value, path: &str, options: PathOptions) -> Option<f64> {
    get_value(root, path, options)?.as_f64()
}

/// First node addressed by `path`, if it is a boolean
#[must_use]
pub fn get_bool(root: &Value, path: &str, options: PathOptions) -> Option<bool> {
    get_value(root, path, options)?.as_bool()
}
