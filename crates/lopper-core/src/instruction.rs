// SPDX-License-Identifier: MIT OR Apache-2.0
//! Traversal instruction vocabulary.
//!
//! A decision function answers every visited node with an [`Instruction`]:
//! a [`Flow`] telling the engine where to go next and a [`Mark`] telling it
//! whether the node contributes to the output. How a mark is interpreted is
//! fixed per traversal by a [`MarkSemantic`].

use serde::{Deserialize, Serialize};
use std::fmt;

/// Where traversal continues after the current node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Flow {
    /// Descend into the node's children (terminal on scalars)
    #[default]
    Children,
    /// Continue with the next sibling
    Sibling,
    /// Abandon the remaining siblings of the current container
    Parent,
    /// Terminate the whole traversal
    Stop,
}

/// Whether and how the current node contributes to the output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mark {
    /// No mark
    #[default]
    None,
    /// Take the node as-is
    Take,
    /// Take the node through the match hook, if any
    TakeOrReplace,
}

/// Engine-wide interpretation of marks for one traversal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkSemantic {
    /// Only marked nodes survive
    #[default]
    Pick,
    /// Marked nodes are dropped, everything else survives
    Ignore,
    /// Marked nodes pass through the hook, everything else survives
    Replace,
}

/// A `(Flow, Mark)` pair returned by a decision function
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Instruction {
    /// Where to go next
    pub flow: Flow,
    /// How the current node is marked
    pub mark: Mark,
}

impl Instruction {
    /// Descend, unmarked
    pub const TO_CHILDREN: Self = Self::new(Flow::Children, Mark::None);
    /// Move on to the next sibling, unmarked
    pub const SKIP_TO_SIBLING: Self = Self::new(Flow::Sibling, Mark::None);
    /// Leave the current container, unmarked
    pub const SKIP_TO_PARENT: Self = Self::new(Flow::Parent, Mark::None);
    /// Terminate, unmarked
    pub const STOP: Self = Self::new(Flow::Stop, Mark::None);
    /// Take the node and move on to the next sibling
    pub const TAKE: Self = Self::new(Flow::Sibling, Mark::Take);
    /// Take or replace the node and move on to the next sibling
    pub const TAKE_OR_REPLACE: Self = Self::new(Flow::Sibling, Mark::TakeOrReplace);

    /// Create an instruction
    #[must_use]
    pub const fn new(flow: Flow, mark: Mark) -> Self {
        Self { flow, mark }
    }

    /// Same flow, different mark
    #[must_use]
    pub const fn with_mark(self, mark: Mark) -> Self {
        Self { mark, ..self }
    }

    /// Same mark, different flow
    #[must_use]
    pub const fn with_flow(self, flow: Flow) -> Self {
        Self { flow, ..self }
    }

    /// Whether the node carries any mark
    #[must_use]
    pub const fn is_marked(self) -> bool {
        !matches!(self.mark, Mark::None)
    }
}

impl From<Flow> for Instruction {
    fn from(flow: Flow) -> Self {
        Self::new(flow, Mark::None)
    }
}

impl fmt::Display for Flow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Children => "children",
            Self::Sibling => "sibling",
            Self::Parent => "parent",
            Self::Stop => "stop",
        })
    }
}

impl fmt::Display for MarkSemantic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Pick => "pick",
            Self::Ignore => "ignore",
            Self::Replace => "replace",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constants() {
        assert_eq!(Instruction::TO_CHILDREN.flow, Flow::Children);
        assert!(!Instruction::TO_CHILDREN.is_marked());
        assert_eq!(Instruction::TAKE.flow, Flow::Sibling);
        assert_eq!(Instruction::TAKE.mark, Mark::Take);
        assert_eq!(Instruction::TAKE_OR_REPLACE.mark, Mark::TakeOrReplace);
        assert_eq!(Instruction::STOP, Instruction::from(Flow::Stop));
    }

    #[test]
    fn test_default_is_to_children() {
        assert_eq!(Instruction::default(), Instruction::TO_CHILDREN);
        assert_eq!(MarkSemantic::default(), MarkSemantic::Pick);
    }

    #[test]
    fn test_with_mark_keeps_flow() {
        let i = Instruction::SKIP_TO_PARENT.with_mark(Mark::Take);
        assert_eq!(i.flow, Flow::Parent);
        assert!(i.is_marked());
        assert_eq!(i.with_flow(Flow::Stop).mark, Mark::Take);
    }

    #[test]
    fn test_semantic_serde_names() {
        let s = serde_json::to_string(&MarkSemantic::Replace).unwrap();
        assert_eq!(s, "\"replace\"");
        let m: Mark = serde_json::from_str("\"take_or_replace\"").unwrap();
        assert_eq!(m, Mark::TakeOrReplace);
    }
}
