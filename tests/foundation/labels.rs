//! Integration tests for labels and paths
//!
//! Tests TargetLabel parsing, display, and the forward-relative path
//! operations the package-boundary check is built on.

use proptest::prelude::*;
use quarry_foundation::{CellName, ForwardRelPath, PackagePath, TargetLabel};

// =============================================================================
// TargetLabel
// =============================================================================

#[test]
fn fully_qualified_label() {
    let label = TargetLabel::parse("toolchains//cxx/gcc:compiler").unwrap();
    assert_eq!(label.cell().as_str(), "toolchains");
    assert_eq!(label.package().as_str(), "cxx/gcc");
    assert_eq!(label.name(), "compiler");
    assert_eq!(format!("{label}"), "toolchains//cxx/gcc:compiler");
}

#[test]
fn current_cell_label() {
    let label = TargetLabel::parse("//lib:foo").unwrap();
    assert!(label.cell().is_current());
    assert_eq!(format!("{label}"), "//lib:foo");
}

#[test]
fn label_from_parts_matches_parsed() {
    let built = TargetLabel::new(
        CellName::current(),
        PackagePath::new("lib/sub").unwrap(),
        "foo",
    )
    .unwrap();
    assert_eq!(built, TargetLabel::parse("//lib/sub:foo").unwrap());
}

#[test]
fn malformed_labels_rejected() {
    for input in ["", "foo", "lib:foo", "//lib", "//lib:", "//a/../b:foo", "//lib:a:b"] {
        assert!(TargetLabel::parse(input).is_err(), "accepted {input:?}");
    }
}

// =============================================================================
// ForwardRelPath
// =============================================================================

#[test]
fn build_file_parent_is_the_package_directory() {
    let build_file = ForwardRelPath::new("lib/sub/BUILD").unwrap();
    assert_eq!(build_file.parent().unwrap().as_str(), "lib/sub");

    let root_build_file = ForwardRelPath::new("BUILD").unwrap();
    assert_eq!(root_build_file.parent().unwrap(), ForwardRelPath::root());
}

#[test]
fn containment_respects_segment_boundaries() {
    let pkg = ForwardRelPath::new("lib").unwrap();
    assert!(ForwardRelPath::new("lib/a.c").unwrap().starts_with(&pkg));
    assert!(!ForwardRelPath::new("libx/a.c").unwrap().starts_with(&pkg));
    assert!(!ForwardRelPath::new("other/a.c").unwrap().starts_with(&pkg));
}

#[test]
fn root_contains_everything() {
    let root = ForwardRelPath::root();
    assert!(ForwardRelPath::new("any/depth/of/path").unwrap().starts_with(&root));
    assert!(root.starts_with(&root));
}

#[test]
fn traversal_segments_rejected() {
    for input in ["/abs", "a/../b", "./a", "a//b", "a:b"] {
        assert!(ForwardRelPath::new(input).is_err(), "accepted {input:?}");
    }
}

// =============================================================================
// Properties
// =============================================================================

fn segment() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_-]{0,8}".prop_map(|s| s)
}

proptest! {
    #[test]
    fn prefixing_then_containment_holds(
        base in prop::collection::vec(segment(), 0..3),
        rel in prop::collection::vec(segment(), 1..3),
    ) {
        let base = ForwardRelPath::new(&base.join("/")).unwrap();
        let rel = ForwardRelPath::new(&rel.join("/")).unwrap();
        prop_assert!(rel.prefixed_with(&base).starts_with(&base));
    }
}
