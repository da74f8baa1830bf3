// SPDX-License-Identifier: MIT OR Apache-2.0
//! Keep, remove and replace against the reference document

use lopper_core::Breadcrumb;
use lopper_ops::{PathOptions, keep, keep_with, remove, replace};
use serde_json::{Value, json};

fn source() -> Value {
    json!({
        "A": 10,
        "B": [{"Val": 40}, {"Val": 20}, {"Factor": 20}],
        "C": [0, 25, 50, 100],
        "Note": "Re-shape json"
    })
}

fn insensitive() -> PathOptions {
    PathOptions::new()
}

fn sensitive() -> PathOptions {
    PathOptions::new().case_sensitive()
}

fn add_ten(node: &Value, _: &Breadcrumb<'_>) -> Option<Value> {
    Some(node.as_i64().map_or_else(|| node.clone(), |n| json!(n + 10)))
}

#[test]
fn keep_cases() {
    let cases = [
        ("B.[1]", insensitive(), json!({"B": [{"Val": 20}]})),
        ("B.*.val", insensitive(), json!({"B": [{"Val": 40}, {"Val": 20}]})),
        (
            "B.[]",
            insensitive(),
            json!({"B": [{"Val": 40}, {"Val": 20}, {"Factor": 20}]}),
        ),
        ("B.[].val", sensitive(), json!({})),
        ("B.[].Factor", sensitive(), json!({"B": [{"Factor": 20}]})),
        ("C.[2]", insensitive(), json!({"C": [50]})),
        ("note", insensitive(), json!({"Note": "Re-shape json"})),
    ];
    for (path, options, expected) in cases {
        let actual = keep(&source(), path, options).unwrap();
        assert_eq!(actual, expected, "keep {path}");
    }
}

#[test]
fn keep_with_hook() {
    let actual = keep_with(&source(), "B.*.val", add_ten, insensitive()).unwrap();
    assert_eq!(actual, json!({"B": [{"Val": 50}, {"Val": 30}]}));
}

#[test]
fn keep_is_idempotent_on_reference() {
    let once = keep(&source(), "B.*.val", insensitive()).unwrap();
    let twice = keep(once.root(), "B.*.val", insensitive()).unwrap();
    assert_eq!(once, twice);
}

#[test]
fn remove_cases() {
    let cases = [
        (
            "B.[]",
            json!({"A": 10, "B": [], "C": [], "Note": "Re-shape json"}),
        ),
        (
            "B.*.val",
            json!({"A": 10, "B": [{"Factor": 20}], "C": [0, 25, 50, 100], "Note": "Re-shape json"}),
        ),
        (
            "B.[1]",
            json!({"A": 10, "B": [{"Val": 40}, {"Factor": 20}], "C": [0, 50, 100], "Note": "Re-shape json"}),
        ),
        (
            "B",
            json!({"A": 10, "C": [0, 25, 50, 100], "Note": "Re-shape json"}),
        ),
        (
            "B.[1].val",
            json!({"A": 10, "B": [{"Val": 40}, {"Factor": 20}], "C": [0, 25, 50, 100], "Note": "Re-shape json"}),
        ),
        ("Missing", source()),
    ];
    for (path, expected) in cases {
        let actual = remove(&source(), path, insensitive()).unwrap();
        assert_eq!(actual, expected, "remove {path}");
    }
}

#[test]
fn replace_cases() {
    let cases = [
        (
            "B.[1].*",
            insensitive(),
            json!({"A": 10, "B": [{"Val": 40}, {"Val": 30}, {"Factor": 20}], "C": [0, 25, 50, 100], "Note": "Re-shape json"}),
        ),
        (
            "B.*.val",
            insensitive(),
            json!({"A": 10, "B": [{"Val": 50}, {"Val": 30}, {"Factor": 20}], "C": [0, 25, 50, 100], "Note": "Re-shape json"}),
        ),
        (
            "B.[].Factor",
            sensitive(),
            json!({"A": 10, "B": [{"Val": 40}, {"Val": 20}, {"Factor": 30}], "C": [0, 25, 50, 100], "Note": "Re-shape json"}),
        ),
        ("B.[].factor", sensitive(), source()),
        ("Note", insensitive(), source()),
    ];
    for (path, options, expected) in cases {
        let actual = replace(&source(), path, add_ten, options).unwrap();
        assert_eq!(actual, expected, "replace {path}");
    }
}

#[test]
fn replace_with_identity_hook_is_noop() {
    let identity = |node: &Value, _: &Breadcrumb<'_>| Some(node.clone());
    let actual = replace(&source(), "B.[1].*", identity, insensitive()).unwrap();
    assert_eq!(actual, source());
}

#[test]
fn replace_with_none_removes() {
    let drop_all = |_: &Value, _: &Breadcrumb<'_>| -> Option<Value> { None };
    let actual = replace(&source(), "C.[]", drop_all, insensitive()).unwrap();
    assert_eq!(
        actual,
        json!({"A": 10, "B": [{"Val": 40}, {"Val": 20}, {"Factor": 20}], "C": [], "Note": "Re-shape json"})
    );
}
