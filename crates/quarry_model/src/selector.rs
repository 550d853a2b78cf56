//! Selector lists: configuration-conditioned attribute values.
//!
//! A `select()` in a build file maps configuration-setting targets to
//! candidate values. Raw selector lists come out of the parser with
//! string keys; coercion turns them into [`SelectorList`]s with parsed
//! keys and typed branch values. Evaluation happens later, in the
//! selector resolution engine.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use quarry_foundation::TargetLabel;

use crate::value::{CoercedValue, RawValue};

/// The reserved key naming a selector's fallback branch.
pub const DEFAULT_KEY: &str = "DEFAULT";

/// One raw `select()` expression: string keys to raw values.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RawSelector {
    entries: Vec<(String, RawValue)>,
    no_match_message: Option<String>,
}

impl RawSelector {
    /// Creates a raw selector from its keyed entries, in declaration
    /// order. The reserved `DEFAULT` key may appear among them.
    #[must_use]
    pub fn new(entries: Vec<(String, RawValue)>) -> Self {
        Self {
            entries,
            no_match_message: None,
        }
    }

    /// Sets the custom message reported when no key matches.
    #[must_use]
    pub fn with_no_match_message(mut self, message: impl Into<String>) -> Self {
        self.no_match_message = Some(message.into());
        self
    }

    /// The keyed entries, in declaration order.
    #[must_use]
    pub fn entries(&self) -> &[(String, RawValue)] {
        &self.entries
    }

    /// The custom no-match message, if one was declared.
    #[must_use]
    pub fn no_match_message(&self) -> Option<&str> {
        self.no_match_message.as_deref()
    }
}

/// One entry of a raw selector list: a literal value or a `select()`.
///
/// `["x"] + select({...})` parses to a literal entry followed by a
/// selector entry.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum RawSelectorEntry {
    /// A literal (unconditional) value.
    Literal(RawValue),
    /// A `select()` expression.
    Selector(RawSelector),
}

/// An ordered concatenation of literals and `select()` expressions.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RawSelectorList {
    entries: Vec<RawSelectorEntry>,
}

impl RawSelectorList {
    /// Creates a raw selector list from its entries, in declaration order.
    #[must_use]
    pub fn new(entries: Vec<RawSelectorEntry>) -> Self {
        Self { entries }
    }

    /// Creates a list holding a single `select()`.
    #[must_use]
    pub fn select(selector: RawSelector) -> Self {
        Self::new(vec![RawSelectorEntry::Selector(selector)])
    }

    /// The entries, in declaration order.
    #[must_use]
    pub fn entries(&self) -> &[RawSelectorEntry] {
        &self.entries
    }
}

/// One coerced selector: parsed keys, typed branch values.
///
/// The `DEFAULT` branch is held separately so the satisfaction test never
/// sees it. A literal entry of the surrounding list is represented as a
/// default-only selector, which makes ordered concatenation uniform.
#[derive(Clone, Debug, PartialEq)]
pub struct Selector {
    entries: Vec<(TargetLabel, CoercedValue)>,
    default: Option<CoercedValue>,
    no_match_message: Option<String>,
}

impl Selector {
    /// Creates a selector from its conditional entries, in declaration
    /// order.
    #[must_use]
    pub fn new(entries: Vec<(TargetLabel, CoercedValue)>) -> Self {
        Self {
            entries,
            default: None,
            no_match_message: None,
        }
    }

    /// Creates a selector that always yields `value` (a literal entry).
    #[must_use]
    pub fn literal(value: CoercedValue) -> Self {
        Self {
            entries: Vec::new(),
            default: Some(value),
            no_match_message: None,
        }
    }

    /// Sets the fallback value for when no key is satisfied.
    #[must_use]
    pub fn with_default(mut self, value: CoercedValue) -> Self {
        self.default = Some(value);
        self
    }

    /// Sets the custom message reported when no key matches.
    #[must_use]
    pub fn with_no_match_message(mut self, message: impl Into<String>) -> Self {
        self.no_match_message = Some(message.into());
        self
    }

    /// The conditional entries, in declaration order.
    #[must_use]
    pub fn entries(&self) -> &[(TargetLabel, CoercedValue)] {
        &self.entries
    }

    /// The fallback value, if one was declared.
    #[must_use]
    pub fn default_value(&self) -> Option<&CoercedValue> {
        self.default.as_ref()
    }

    /// The custom no-match message, if one was declared.
    #[must_use]
    pub fn no_match_message(&self) -> Option<&str> {
        self.no_match_message.as_deref()
    }
}

/// An ordered list of coerced selectors, resolved entry by entry and then
/// combined per the attribute's merge policy.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SelectorList {
    selectors: Vec<Selector>,
}

impl SelectorList {
    /// Creates a selector list from its selectors, in declaration order.
    #[must_use]
    pub fn new(selectors: Vec<Selector>) -> Self {
        Self { selectors }
    }

    /// The selectors, in declaration order.
    #[must_use]
    pub fn selectors(&self) -> &[Selector] {
        &self.selectors
    }

    /// Number of selectors in the list.
    #[must_use]
    pub fn len(&self) -> usize {
        self.selectors.len()
    }

    /// Returns true if the list holds no selectors.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.selectors.is_empty()
    }
}
