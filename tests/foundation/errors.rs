//! Integration tests for error attribution
//!
//! Every pipeline failure names its target (and attribute, when one
//! applies) in the rendered message.

use quarry_foundation::{AttrType, Error, ErrorKind, ForwardRelPath, TargetLabel};

#[test]
fn message_leads_with_target_then_attribute() {
    let err = Error::coercion(AttrType::list(AttrType::Path), "int 7")
        .with_target(TargetLabel::parse("//lib:foo").unwrap())
        .with_attribute("srcs");
    assert_eq!(
        format!("{err}"),
        "//lib:foo: attribute 'srcs': cannot coerce int 7 to list<path>"
    );
}

#[test]
fn innermost_attribution_wins() {
    // Once an error is attributed, outer layers may not overwrite it.
    let err = Error::configurability()
        .with_attribute("deps")
        .with_attribute("srcs")
        .with_target(TargetLabel::parse("//lib:inner").unwrap())
        .with_target(TargetLabel::parse("//lib:outer").unwrap());
    assert_eq!(err.attribute.as_deref(), Some("deps"));
    assert_eq!(err.target.unwrap().name(), "inner");
}

#[test]
fn observer_source_is_preserved() {
    let cause: Box<dyn std::error::Error + Send + Sync> = "disk full".into();
    let err = Error::observer(cause);
    assert!(matches!(err.kind, ErrorKind::Observer(_)));
    assert!(std::error::Error::source(&err).is_some());
}

#[test]
fn package_boundary_names_both_paths() {
    let err = Error::package_boundary(
        ForwardRelPath::new("other/a.c").unwrap(),
        ForwardRelPath::new("lib").unwrap(),
    );
    let msg = format!("{err}");
    assert!(msg.contains("'other/a.c'"));
    assert!(msg.contains("'lib'"));
}

#[test]
fn errors_are_plain_values() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Error>();
}
