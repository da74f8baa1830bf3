// SPDX-License-Identifier: MIT OR Apache-2.0
//! Decision function and match hook contracts.
//!
//! Any `FnMut(&Value, &Breadcrumb<'_>) -> Instruction` closure is a
//! [`Decide`], and any `FnMut(&Value, &Breadcrumb<'_>) -> Option<Value>`
//! closure is a [`MatchHook`]. Closures passed through a generic bound need
//! their parameter types spelled out so they stay higher-ranked:
//!
//! ```
//! use lopper_core::{Breadcrumb, Decide, Instruction};
//! use serde_json::{Value, json};
//!
//! let mut numbers = |node: &Value, _: &Breadcrumb<'_>| {
//!     if node.is_number() { Instruction::TAKE } else { Instruction::TO_CHILDREN }
//! };
//! assert_eq!(numbers.decide(&json!(1), &Breadcrumb::root()), Instruction::TAKE);
//! ```

use crate::breadcrumb::Breadcrumb;
use crate::error::Result;
use crate::instruction::Instruction;
use serde_json::Value;

/// Routes and marks every visited node
pub trait Decide {
    /// Decide what to do with `node`, reached through `breadcrumb`
    fn decide(&mut self, node: &Value, breadcrumb: &Breadcrumb<'_>) -> Instruction;
}

impl<F> Decide for F
where
    F: FnMut(&Value, &Breadcrumb<'_>) -> Instruction,
{
    fn decide(&mut self, node: &Value, breadcrumb: &Breadcrumb<'_>) -> Instruction {
        self(node, breadcrumb)
    }
}

/// Replaces or removes a node whose mark qualifies
pub trait MatchHook {
    /// Return `Some(replacement)` to emit it, `None` to drop the node
    ///
    /// # Errors
    ///
    /// Implementations may fail; the failure aborts the whole rewrite.
    fn on_match(&mut self, node: &Value, breadcrumb: &Breadcrumb<'_>) -> Result<Option<Value>>;
}

impl<F> MatchHook for F
where
    F: FnMut(&Value, &Breadcrumb<'_>) -> Option<Value>,
{
    fn on_match(&mut self, node: &Value, breadcrumb: &Breadcrumb<'_>) -> Result<Option<Value>> {
        Ok(self(node, breadcrumb))
    }
}

/// Adapter turning a fallible closure into a [`MatchHook`]
#[derive(Debug, Clone)]
pub struct TryHook<F>(pub F);

impl<F> MatchHook for TryHook<F>
where
    F: FnMut(&Value, &Breadcrumb<'_>) -> Result<Option<Value>>,
{
    fn on_match(&mut self, node: &Value, breadcrumb: &Breadcrumb<'_>) -> Result<Option<Value>> {
        (self.0)(node, breadcrumb)
    }
}

/// Wrap a fallible closure as a [`MatchHook`]
pub const fn try_hook<F>(f: F) -> TryHook<F>
where
    F: FnMut(&Value, &Breadcrumb<'_>) -> Result<Option<Value>>,
{
    TryHook(f)
}
