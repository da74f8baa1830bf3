// SPDX-License-Identifier: MIT OR Apache-2.0
//! Property-based tests for path compilation and breadcrumbs

use lopper_core::path::names_equal;
use lopper_core::{Breadcrumb, Decide, Instruction, MarkSemantic, PathPattern, Segment, compile};
use proptest::prelude::*;
use serde_json::Value;

fn key_strategy() -> impl Strategy<Value = String> {
    "[A-Za-z][A-Za-z0-9_]{0,8}"
}

proptest! {
    /// Display of a parsed path reproduces the input
    #[test]
    fn parse_display_roundtrip(keys in prop::collection::vec(key_strategy(), 1..6)) {
        let path = keys.join(".");
        let pattern = PathPattern::parse(&path, true);
        prop_assert_eq!(pattern.len(), keys.len());
        prop_assert_eq!(pattern.to_string(), path);
    }

    /// Case-insensitive comparison ignores ASCII case, case-sensitive does not
    #[test]
    fn case_rule_ascii(key in key_strategy()) {
        let upper = key.to_uppercase();
        prop_assert!(names_equal(&key, &upper, false));
        prop_assert_eq!(names_equal(&key, &upper, true), key == upper);
    }

    /// A path made of the breadcrumb's own keys marks exactly that node
    #[test]
    fn exact_path_marks_terminal(keys in prop::collection::vec(key_strategy(), 1..6)) {
        let path = keys.join(".");
        let mut predicate = compile(&path, true, MarkSemantic::Pick);
        let mut crumb = Breadcrumb::root();
        for (depth, key) in keys.iter().enumerate() {
            crumb = crumb.key(key);
            let instruction = predicate.decide(&Value::Null, &crumb);
            if depth + 1 == keys.len() {
                prop_assert_eq!(instruction, Instruction::TAKE);
            } else {
                prop_assert_eq!(instruction, Instruction::TO_CHILDREN);
            }
        }
    }

    /// Wildcards match every index segment at their depth
    #[test]
    fn wildcard_matches_any_index(index in 0usize..10_000) {
        let mut predicate = compile("items.*", false, MarkSemantic::Replace);
        let crumb = Breadcrumb::root().key("items").index(index);
        prop_assert_eq!(predicate.decide(&Value::Null, &crumb), Instruction::TAKE_OR_REPLACE);
    }

    /// Extending a breadcrumb never changes the prefix seen by siblings
    #[test]
    fn breadcrumb_prefix_is_shared(keys in prop::collection::vec(key_strategy(), 0..6), a in 0usize..100, b in 0usize..100) {
        let mut base = Breadcrumb::root();
        for key in &keys {
            base = base.key(key);
        }
        let left = base.index(a);
        let right = base.index(b);
        prop_assert_eq!(left.len(), keys.len() + 1);
        prop_assert_eq!(left.parent(), Some(base.clone()));
        prop_assert_eq!(right.parent(), Some(base.clone()));
        prop_assert_eq!(left.last(), Some(Segment::Index(a)));
        prop_assert_eq!(base.segments().len(), keys.len());
    }
}
