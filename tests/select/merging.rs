//! Integration tests for merging concatenated selector entries
//!
//! Lists concatenate in declaration order, dicts merge with later keys
//! winning, and scalars refuse to merge at all.

use std::sync::Arc;

use quarry_foundation::{ErrorKind, MergePolicy, TargetLabel};
use quarry_model::{CoercedValue, ResolvedValue, Selector, SelectorList};
use quarry_select::{ConfigurationContext, PlatformId, SelectorResolver, TestOracle};

fn label(s: &str) -> TargetLabel {
    TargetLabel::parse(s).unwrap()
}

fn linux_ctx() -> ConfigurationContext {
    let oracle = TestOracle::new()
        .with_platform("linux", &["os:linux"])
        .with_key("//config:linux", &["os:linux"]);
    ConfigurationContext::new(PlatformId::new("linux"), Arc::new(oracle))
}

fn string_list(items: &[&str]) -> CoercedValue {
    CoercedValue::List(
        items
            .iter()
            .map(|s| CoercedValue::String((*s).into()))
            .collect(),
    )
}

fn string_dict(pairs: &[(&str, &str)]) -> CoercedValue {
    CoercedValue::Dict(
        pairs
            .iter()
            .map(|(k, v)| ((*k).into(), CoercedValue::String((*v).into())))
            .collect(),
    )
}

fn resolve(list: SelectorList, merge: MergePolicy) -> quarry_foundation::Result<ResolvedValue> {
    SelectorResolver::new().resolve(&linux_ctx(), &label("//lib:foo"), "srcs", &list, merge)
}

// =============================================================================
// Lists
// =============================================================================

#[test]
fn literal_then_select_concatenates_in_order() {
    // ["x"] + select({"//config:linux": ["y"]}) == ["x", "y"]
    let list = SelectorList::new(vec![
        Selector::literal(string_list(&["x"])),
        Selector::new(vec![(label("//config:linux"), string_list(&["y"]))]),
    ]);

    let value = resolve(list, MergePolicy::Combine).unwrap();
    let items: Vec<&str> = value
        .as_list()
        .unwrap()
        .iter()
        .map(|v| v.as_str().unwrap())
        .collect();
    assert_eq!(items, ["x", "y"]);
}

#[test]
fn select_then_literal_reverses_the_result() {
    let list = SelectorList::new(vec![
        Selector::new(vec![(label("//config:linux"), string_list(&["y"]))]),
        Selector::literal(string_list(&["x"])),
    ]);

    let value = resolve(list, MergePolicy::Combine).unwrap();
    let items: Vec<&str> = value
        .as_list()
        .unwrap()
        .iter()
        .map(|v| v.as_str().unwrap())
        .collect();
    assert_eq!(items, ["y", "x"]);
}

#[test]
fn every_entry_resolves_before_merging() {
    // The select entry falls back to its default, then concatenates.
    let list = SelectorList::new(vec![
        Selector::literal(string_list(&["a"])),
        Selector::new(vec![(label("//config:windows"), string_list(&["w"]))])
            .with_default(string_list(&["d"])),
    ]);

    let value = resolve(list, MergePolicy::Combine).unwrap();
    let items: Vec<&str> = value
        .as_list()
        .unwrap()
        .iter()
        .map(|v| v.as_str().unwrap())
        .collect();
    assert_eq!(items, ["a", "d"]);
}

// =============================================================================
// Dicts
// =============================================================================

#[test]
fn dict_merge_later_entries_win() {
    let list = SelectorList::new(vec![
        Selector::literal(string_dict(&[("CC", "gcc"), ("LD", "ld")])),
        Selector::new(vec![(
            label("//config:linux"),
            string_dict(&[("CC", "clang")]),
        )]),
    ]);

    let value = resolve(list, MergePolicy::Combine).unwrap();
    let merged = value.as_dict().unwrap();
    assert_eq!(merged.len(), 2);
    assert_eq!(merged.get(&"CC".into()).unwrap().as_str(), Some("clang"));
    assert_eq!(merged.get(&"LD".into()).unwrap().as_str(), Some("ld"));
}

// =============================================================================
// Scalars
// =============================================================================

#[test]
fn single_entry_scalar_is_fine() {
    let list = SelectorList::new(vec![Selector::literal(CoercedValue::String("x".into()))]);
    let value = resolve(list, MergePolicy::Single).unwrap();
    assert_eq!(value.as_str(), Some("x"));
}

#[test]
fn multi_entry_scalar_refuses_to_merge() {
    let list = SelectorList::new(vec![
        Selector::literal(CoercedValue::String("x".into())),
        Selector::literal(CoercedValue::String("y".into())),
    ]);
    let err = resolve(list, MergePolicy::Single).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::ScalarMerge { entries: 2 }));
}

#[test]
fn mismatched_shapes_refuse_to_merge() {
    let list = SelectorList::new(vec![
        Selector::literal(string_list(&["x"])),
        Selector::literal(string_dict(&[("k", "v")])),
    ]);
    let err = resolve(list, MergePolicy::Combine).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::ConstructionInvariant(_)));
}
