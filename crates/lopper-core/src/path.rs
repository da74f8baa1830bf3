// SPDX-License-Identifier: MIT OR Apache-2.0
//! Dotted path compilation.
//!
//! Paths are `.` separated component lists:
//!
//! - `name` matches an object key (case rule applied)
//! - `*` matches any key or index
//! - `[]` matches any array index, never an object key
//! - `[N]` matches the synthesized index segment `[N]` by plain equality
//!
//! [`compile`] turns a path into a [`PathPredicate`], a [`Decide`]
//! implementation that drills along matching prefixes and marks nodes at the
//! final depth.

use crate::breadcrumb::{Breadcrumb, Segment};
use crate::decide::Decide;
use crate::instruction::{Flow, Instruction, Mark, MarkSemantic};
use serde_json::Value;
use smallvec::SmallVec;
use std::fmt;

/// A single component of a dotted path
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathComponent {
    /// `*`
    Wildcard,
    /// `[]`
    AnyIndex,
    /// Any other text, including `[N]`
    Name(String),
}

impl PathComponent {
    fn parse(text: &str) -> Self {
        match text {
            "*" => Self::Wildcard,
            "[]" => Self::AnyIndex,
            _ => Self::Name(text.to_owned()),
        }
    }

    /// Whether this component matches a breadcrumb segment
    #[must_use]
    pub fn matches(&self, segment: Segment<'_>, case_sensitive: bool) -> bool {
        match (self, segment) {
            (Self::Wildcard, _) | (Self::AnyIndex, Segment::Index(_)) => true,
            (Self::AnyIndex, Segment::Key(_)) => false,
            (Self::Name(name), Segment::Key(key)) => names_equal(name, key, case_sensitive),
            (Self::Name(name), Segment::Index(index)) => index_text_equal(name, index),
        }
    }
}

impl fmt::Display for PathComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Wildcard => f.write_str("*"),
            Self::AnyIndex => f.write_str("[]"),
            Self::Name(name) => f.write_str(name),
        }
    }
}

/// Key comparison honouring the case rule
#[must_use]
pub fn names_equal(a: &str, b: &str, case_sensitive: bool) -> bool {
    if case_sensitive {
        a == b
    } else {
        a == b
            || a.chars()
                .flat_map(char::to_lowercase)
                .eq(b.chars().flat_map(char::to_lowercase))
    }
}

fn index_text_equal(text: &str, index: usize) -> bool {
    text.strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'))
        .is_some_and(|digits| digits == itoa::Buffer::new().format(index))
}

/// A parsed dotted path
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PathPattern {
    components: SmallVec<[PathComponent; 8]>,
    case_sensitive: bool,
}

impl PathPattern {
    /// Split `path` on `.`; the empty string has no components
    #[must_use]
    pub fn parse(path: &str, case_sensitive: bool) -> Self {
        let components = if path.is_empty() {
            SmallVec::new()
        } else {
            path.split('.').map(PathComponent::parse).collect()
        };
        Self {
            components,
            case_sensitive,
        }
    }

    /// Parsed components
    #[must_use]
    pub fn components(&self) -> &[PathComponent] {
        &self.components
    }

    /// Number of components
    #[must_use]
    pub fn len(&self) -> usize {
        self.components.len()
    }

    /// Whether the path has no components
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Whether key comparison is case-sensitive
    #[must_use]
    pub const fn case_sensitive(&self) -> bool {
        self.case_sensitive
    }

    /// Whether `segment` at `depth` matches; depths past the end compare as `""`
    #[must_use]
    pub fn matches_at(&self, depth: usize, segment: Segment<'_>) -> bool {
        self.components.get(depth).map_or_else(
            || segment.as_key().is_some_and(str::is_empty),
            |component| component.matches(segment, self.case_sensitive),
        )
    }
}

impl fmt::Display for PathPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, component) in self.components.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            write!(f, "{component}")?;
        }
        Ok(())
    }
}

/// Decision function compiled from a [`PathPattern`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathPredicate {
    pattern: PathPattern,
    semantic: MarkSemantic,
    terminal_mark: Mark,
}

impl PathPredicate {
    /// Predicate for `pattern` marking terminal matches per `semantic`
    #[must_use]
    pub const fn new(pattern: PathPattern, semantic: MarkSemantic) -> Self {
        let terminal_mark = match semantic {
            MarkSemantic::Pick | MarkSemantic::Ignore => Mark::Take,
            MarkSemantic::Replace => Mark::TakeOrReplace,
        };
        Self {
            pattern,
            semantic,
            terminal_mark,
        }
    }

    /// Override the mark returned for terminal matches
    #[must_use]
    pub const fn with_terminal_mark(mut self, mark: Mark) -> Self {
        self.terminal_mark = mark;
        self
    }

    /// The compiled path
    #[must_use]
    pub const fn pattern(&self) -> &PathPattern {
        &self.pattern
    }

    /// Semantic the predicate was compiled for
    #[must_use]
    pub const fn semantic(&self) -> MarkSemantic {
        self.semantic
    }

    /// Whether no segment above `depth` matched its component
    fn unmatched_above(&self, breadcrumb: &Breadcrumb<'_>, depth: usize) -> bool {
        breadcrumb
            .iter_rev()
            .skip(1)
            .zip((0..depth).rev())
            .all(|(segment, d)| !self.pattern.matches_at(d, segment))
    }
}

impl Decide for PathPredicate {
    fn decide(&mut self, _node: &Value, breadcrumb: &Breadcrumb<'_>) -> Instruction {
        let Some(segment) = breadcrumb.last() else {
            return Instruction::TO_CHILDREN;
        };
        let depth = breadcrumb.len() - 1;

        if !self.pattern.matches_at(depth, segment) {
            // Under Ignore a branch that left the path at the top is searched
            // for the remaining segments; one that left it deeper is kept whole
            let searched = self.semantic == MarkSemantic::Ignore
                && depth + 1 < self.pattern.len()
                && self.unmatched_above(breadcrumb, depth);
            return if searched {
                Instruction::TO_CHILDREN
            } else {
                Instruction::SKIP_TO_SIBLING
            };
        }
        if depth + 1 == self.pattern.len() {
            Instruction::new(Flow::Sibling, self.terminal_mark)
        } else {
            Instruction::TO_CHILDREN
        }
    }
}

/// Compile `path` into a decision function
#[must_use]
pub fn compile(path: &str, case_sensitive: bool, semantic: MarkSemantic) -> PathPredicate {
    PathPredicate::new(PathPattern::parse(path, case_sensitive), semantic)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn decide_at(pred: &mut PathPredicate, crumb: &Breadcrumb<'_>) -> Instruction {
        pred.decide(&json!(null), crumb)
    }

    #[test]
    fn test_parse_components() {
        let p = PathPattern::parse("B.*.[].[2].val", false);
        assert_eq!(
            p.components(),
            &[
                PathComponent::Name("B".into()),
                PathComponent::Wildcard,
                PathComponent::AnyIndex,
                PathComponent::Name("[2]".into()),
                PathComponent::Name("val".into()),
            ]
        );
        assert_eq!(p.to_string(), "B.*.[].[2].val");
    }

    #[test]
    fn test_empty_path_has_no_components() {
        let p = PathPattern::parse("", true);
        assert!(p.is_empty());
        assert!(p.case_sensitive());
    }

    #[test]
    fn test_case_rule() {
        assert!(names_equal("val", "Val", false));
        assert!(!names_equal("val", "Val", true));
        assert!(names_equal("STRASSE", "strasse", false));
        assert!(!names_equal("val", "value", false));
    }

    #[test]
    fn test_any_index_never_matches_keys() {
        assert!(PathComponent::AnyIndex.matches(Segment::Index(7), true));
        assert!(!PathComponent::AnyIndex.matches(Segment::Key("[7]"), true));
        assert!(PathComponent::Wildcard.matches(Segment::Key("x"), true));
        assert!(PathComponent::Wildcard.matches(Segment::Index(0), true));
    }

    #[test]
    fn test_literal_index_is_text_equality() {
        let one = PathComponent::Name("[1]".into());
        assert!(one.matches(Segment::Index(1), true));
        assert!(!one.matches(Segment::Index(10), true));
        assert!(!PathComponent::Name("[01]".into()).matches(Segment::Index(1), true));
        // A key spelled like an index still matches by name
        assert!(one.matches(Segment::Key("[1]"), true));
    }

    #[test]
    fn test_decide_drills_then_marks() {
        let mut pred = compile("B.*.val", false, MarkSemantic::Pick);
        let b = Breadcrumb::root().key("B");
        let b0 = b.index(0);
        assert_eq!(decide_at(&mut pred, &Breadcrumb::root()), Instruction::TO_CHILDREN);
        assert_eq!(decide_at(&mut pred, &b), Instruction::TO_CHILDREN);
        assert_eq!(decide_at(&mut pred, &b0), Instruction::TO_CHILDREN);
        assert_eq!(decide_at(&mut pred, &b0.key("Val")), Instruction::TAKE);
        assert_eq!(
            decide_at(&mut pred, &b0.key("Factor")),
            Instruction::SKIP_TO_SIBLING
        );
        assert_eq!(
            decide_at(&mut pred, &Breadcrumb::root().key("A")),
            Instruction::SKIP_TO_SIBLING
        );
    }

    #[test]
    fn test_ignore_searches_branches_left_at_the_top() {
        let mut pred = compile("B.[1].val", false, MarkSemantic::Ignore);
        let b = Breadcrumb::root().key("B");
        let c = Breadcrumb::root().key("C");
        // C never matched: look further down
        assert_eq!(decide_at(&mut pred, &c), Instruction::TO_CHILDREN);
        assert_eq!(decide_at(&mut pred, &c.index(0)), Instruction::TO_CHILDREN);
        // B.[0] left the path after B matched: kept whole
        assert_eq!(decide_at(&mut pred, &b.index(0)), Instruction::SKIP_TO_SIBLING);
        assert_eq!(decide_at(&mut pred, &b.index(1)), Instruction::TO_CHILDREN);
        assert_eq!(decide_at(&mut pred, &b.index(1).key("Val")), Instruction::TAKE);
        // A miss at the last component keeps the node
        assert_eq!(
            decide_at(&mut pred, &b.index(1).key("Factor")),
            Instruction::SKIP_TO_SIBLING
        );

        // Pick never searches a branch that left the path
        let mut pick = compile("B.[1].val", false, MarkSemantic::Pick);
        assert_eq!(decide_at(&mut pick, &c), Instruction::SKIP_TO_SIBLING);
    }

    #[test]
    fn test_terminal_mark_per_semantic() {
        let crumb = Breadcrumb::root().key("a");
        let mut pick = compile("a", false, MarkSemantic::Pick);
        let mut ignore = compile("a", false, MarkSemantic::Ignore);
        let mut replace = compile("a", false, MarkSemantic::Replace);
        assert_eq!(decide_at(&mut pick, &crumb).mark, Mark::Take);
        assert_eq!(decide_at(&mut ignore, &crumb).mark, Mark::Take);
        assert_eq!(decide_at(&mut replace, &crumb), Instruction::TAKE_OR_REPLACE);

        let mut hooked = compile("a", false, MarkSemantic::Pick).with_terminal_mark(Mark::TakeOrReplace);
        assert_eq!(decide_at(&mut hooked, &crumb).mark, Mark::TakeOrReplace);
        assert_eq!(hooked.semantic(), MarkSemantic::Pick);
    }

    #[test]
    fn test_past_end_compares_as_empty() {
        let pattern = PathPattern::parse("", false);
        assert!(pattern.matches_at(0, Segment::Key("")));
        assert!(!pattern.matches_at(0, Segment::Key("A")));
        assert!(!pattern.matches_at(0, Segment::Index(0)));
    }
}
