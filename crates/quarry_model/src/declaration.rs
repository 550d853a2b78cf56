//! Raw declarations: one rule's unresolved entry in a build file.

use std::collections::BTreeMap;
use std::sync::Arc;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::value::RawValue;

/// One rule's raw, unresolved entry in a build description file.
///
/// Produced by the upstream parser; immutable; scoped to one build file
/// and one declared rule. Visibility and within-view patterns are carried
/// verbatim onto the finished node (pattern evaluation belongs to the
/// graph, not to materialization).
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RawDeclaration {
    rule_type: Arc<str>,
    attrs: BTreeMap<String, RawValue>,
    visibility: Vec<String>,
    within_view: Vec<String>,
}

impl RawDeclaration {
    /// Creates a declaration of the given rule type with no attributes.
    #[must_use]
    pub fn new(rule_type: &str) -> Self {
        Self {
            rule_type: rule_type.into(),
            attrs: BTreeMap::new(),
            visibility: Vec::new(),
            within_view: Vec::new(),
        }
    }

    /// Adds a raw attribute.
    #[must_use]
    pub fn with_attr(mut self, name: &str, value: impl Into<RawValue>) -> Self {
        self.attrs.insert(name.to_string(), value.into());
        self
    }

    /// Adds a visibility pattern.
    #[must_use]
    pub fn with_visibility(mut self, pattern: &str) -> Self {
        self.visibility.push(pattern.to_string());
        self
    }

    /// Adds a within-view pattern.
    #[must_use]
    pub fn with_within_view(mut self, pattern: &str) -> Self {
        self.within_view.push(pattern.to_string());
        self
    }

    /// The declared rule type name.
    #[must_use]
    pub fn rule_type(&self) -> &str {
        &self.rule_type
    }

    /// Looks up a raw attribute by name.
    #[must_use]
    pub fn attr(&self, name: &str) -> Option<&RawValue> {
        self.attrs.get(name)
    }

    /// Iterates the raw attributes in name order.
    pub fn attrs(&self) -> impl Iterator<Item = (&str, &RawValue)> {
        self.attrs.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// The declared visibility patterns.
    #[must_use]
    pub fn visibility(&self) -> &[String] {
        &self.visibility
    }

    /// The declared within-view patterns.
    #[must_use]
    pub fn within_view(&self) -> &[String] {
        &self.within_view
    }
}
