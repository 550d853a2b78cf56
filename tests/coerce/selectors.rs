//! Integration tests for structural selector coercion
//!
//! A `select()` is coerced without being evaluated: every branch is
//! type-checked against the attribute's declared type and every
//! non-default key is resolved to a target label.

use std::sync::Arc;

use quarry_coerce::{AttrCoercer, DefaultCellResolver};
use quarry_foundation::{AttrType, ErrorKind, PackagePath, TargetLabel};
use quarry_model::selector::DEFAULT_KEY;
use quarry_model::{CoercedValue, RawSelector, RawSelectorEntry, RawSelectorList, RawValue};

fn coercer() -> AttrCoercer {
    AttrCoercer::new(Arc::new(DefaultCellResolver::new()))
}

fn pkg() -> PackagePath {
    PackagePath::new("lib").unwrap()
}

fn select(entries: Vec<(&str, RawValue)>) -> RawValue {
    RawValue::Select(RawSelectorList::select(RawSelector::new(
        entries
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect(),
    )))
}

// =============================================================================
// Structure
// =============================================================================

#[test]
fn keys_resolve_and_default_is_split_out() {
    let raw = select(vec![
        ("//config:linux", RawValue::from("x")),
        (":local-config", RawValue::from("y")),
        (DEFAULT_KEY, RawValue::from("z")),
    ]);
    let coerced = coercer().coerce(&pkg(), &AttrType::String, &raw).unwrap();

    let CoercedValue::Select(list) = coerced else {
        panic!("expected select");
    };
    assert_eq!(list.len(), 1);
    let sel = &list.selectors()[0];
    assert_eq!(sel.entries().len(), 2);
    assert_eq!(
        sel.entries()[0].0,
        TargetLabel::parse("//config:linux").unwrap()
    );
    // Short-form keys resolve against the declaring package
    assert_eq!(
        sel.entries()[1].0,
        TargetLabel::parse("//lib:local-config").unwrap()
    );
    assert!(sel.default_value().is_some());
}

#[test]
fn no_match_message_is_carried() {
    let raw = RawValue::Select(RawSelectorList::select(
        RawSelector::new(vec![("//config:linux".to_string(), RawValue::from("x"))])
            .with_no_match_message("linux only"),
    ));
    let coerced = coercer().coerce(&pkg(), &AttrType::String, &raw).unwrap();

    let CoercedValue::Select(list) = coerced else {
        panic!("expected select");
    };
    assert_eq!(list.selectors()[0].no_match_message(), Some("linux only"));
}

#[test]
fn literal_operands_become_default_only_selectors() {
    let raw = RawValue::Select(RawSelectorList::new(vec![
        RawSelectorEntry::Literal(RawValue::from(vec!["x"])),
        RawSelectorEntry::Selector(RawSelector::new(vec![(
            "//config:linux".to_string(),
            RawValue::from(vec!["y"]),
        )])),
    ]));
    let coerced = coercer()
        .coerce(&pkg(), &AttrType::list(AttrType::String), &raw)
        .unwrap();

    let CoercedValue::Select(list) = coerced else {
        panic!("expected select");
    };
    assert_eq!(list.len(), 2);
    assert!(list.selectors()[0].entries().is_empty());
    assert!(list.selectors()[0].default_value().is_some());
}

// =============================================================================
// Branch typing
// =============================================================================

#[test]
fn every_branch_is_checked_against_the_attribute_type() {
    let raw = select(vec![
        ("//config:linux", RawValue::from(vec!["ok.c"])),
        (DEFAULT_KEY, RawValue::from("not a list")),
    ]);
    let err = coercer()
        .coerce(&pkg(), &AttrType::list(AttrType::Path), &raw)
        .unwrap_err();
    assert!(matches!(err.kind, ErrorKind::Coercion { .. }));
}

#[test]
fn branch_paths_resolve_against_the_declaring_package() {
    let raw = select(vec![(DEFAULT_KEY, RawValue::from(vec!["a.c"]))]);
    let coerced = coercer()
        .coerce(&pkg(), &AttrType::list(AttrType::Path), &raw)
        .unwrap();

    let CoercedValue::Select(list) = coerced else {
        panic!("expected select");
    };
    let default = list.selectors()[0].default_value().unwrap();
    let CoercedValue::List(items) = default else {
        panic!("expected list branch");
    };
    match items.first().unwrap() {
        CoercedValue::Path(p) => assert_eq!(p.as_str(), "lib/a.c"),
        other => panic!("expected path, got {other:?}"),
    }
}

// =============================================================================
// Rejections
// =============================================================================

#[test]
fn duplicate_selector_keys_rejected() {
    let raw = select(vec![
        ("//config:linux", RawValue::from("x")),
        ("//config:linux", RawValue::from("y")),
    ]);
    let err = coercer().coerce(&pkg(), &AttrType::String, &raw).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::DuplicateKey(_)));
}

#[test]
fn select_nested_in_a_list_rejected() {
    let inner = select(vec![(DEFAULT_KEY, RawValue::from("x"))]);
    let raw = RawValue::List(vec![inner]);
    let err = coercer()
        .coerce(&pkg(), &AttrType::list(AttrType::String), &raw)
        .unwrap_err();
    assert!(matches!(err.kind, ErrorKind::NestedSelect));
}

#[test]
fn select_nested_in_a_branch_rejected() {
    let inner = select(vec![(DEFAULT_KEY, RawValue::from("x"))]);
    let raw = select(vec![("//config:linux", inner)]);
    let err = coercer().coerce(&pkg(), &AttrType::String, &raw).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::NestedSelect));
}

#[test]
fn malformed_selector_key_rejected() {
    let raw = select(vec![("not a label", RawValue::from("x"))]);
    let err = coercer().coerce(&pkg(), &AttrType::String, &raw).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::Label { .. }));
}
