//! Rule schemas and the rule-type registry.
//!
//! A [`RuleSchema`] describes the attributes a rule type accepts; the
//! [`RuleRegistry`] maps rule-type names to schemas. Schemas are
//! immutable and shared read-only across many materializations.

use std::collections::HashMap;
use std::sync::Arc;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use quarry_foundation::{AttrType, Error, MergePolicy, Result};

use crate::value::RawValue;

/// Declaration of a single attribute in a rule schema.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AttrSpec {
    /// Attribute name.
    pub name: String,
    /// Declared attribute type.
    pub ty: AttrType,
    /// Default raw value used when the declaration omits the attribute.
    /// An attribute without a default is required.
    pub default: Option<RawValue>,
    /// How selector-resolved entries combine for this attribute.
    pub merge: MergePolicy,
}

impl AttrSpec {
    /// Creates a required attribute (no default).
    #[must_use]
    pub fn required(name: &str, ty: AttrType) -> Self {
        let merge = ty.default_merge_policy();
        Self {
            name: name.to_string(),
            ty,
            default: None,
            merge,
        }
    }

    /// Creates an optional attribute with a default value.
    #[must_use]
    pub fn optional(name: &str, ty: AttrType, default: impl Into<RawValue>) -> Self {
        let merge = ty.default_merge_policy();
        Self {
            name: name.to_string(),
            ty,
            default: Some(default.into()),
            merge,
        }
    }

    /// Overrides the merge policy for this attribute.
    #[must_use]
    pub fn with_merge_policy(mut self, merge: MergePolicy) -> Self {
        self.merge = merge;
        self
    }
}

/// Schema for one rule type: its name and declared attributes.
#[derive(Clone, Debug, PartialEq)]
pub struct RuleSchema {
    rule_type: Arc<str>,
    attrs: Vec<AttrSpec>,
    configuration_rule: bool,
}

impl RuleSchema {
    /// Creates an empty schema for the given rule type.
    #[must_use]
    pub fn new(rule_type: &str) -> Self {
        Self {
            rule_type: rule_type.into(),
            attrs: Vec::new(),
            configuration_rule: false,
        }
    }

    /// Adds an attribute declaration.
    #[must_use]
    pub fn with_attr(mut self, attr: AttrSpec) -> Self {
        self.attrs.push(attr);
        self
    }

    /// Marks this rule type as configuration-defining (platforms,
    /// constraints). Such rules take the non-resolving materialization
    /// path and may not use `select()`.
    #[must_use]
    pub fn configuration_rule(mut self) -> Self {
        self.configuration_rule = true;
        self
    }

    /// The rule type name.
    #[must_use]
    pub fn rule_type(&self) -> &str {
        &self.rule_type
    }

    /// The declared attributes, in declaration order.
    #[must_use]
    pub fn attrs(&self) -> &[AttrSpec] {
        &self.attrs
    }

    /// Looks up an attribute declaration by name.
    #[must_use]
    pub fn attr(&self, name: &str) -> Option<&AttrSpec> {
        self.attrs.iter().find(|a| a.name == name)
    }

    /// Returns true if this rule type defines configuration.
    #[must_use]
    pub fn is_configuration_rule(&self) -> bool {
        self.configuration_rule
    }
}

/// Lookup service mapping rule-type names to schemas.
///
/// An injected, read-only collaborator; the pipeline performs no caching
/// of its own.
pub trait RuleRegistry: Send + Sync {
    /// Returns the schema for a rule type, or an unknown-rule-type error.
    fn schema(&self, rule_type: &str) -> Result<Arc<RuleSchema>>;
}

/// In-memory rule registry backed by a hash map.
#[derive(Default)]
pub struct StaticRuleRegistry {
    schemas: HashMap<String, Arc<RuleSchema>>,
}

impl StaticRuleRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a schema, replacing any existing one for the same type.
    #[must_use]
    pub fn with_schema(mut self, schema: RuleSchema) -> Self {
        self.schemas
            .insert(schema.rule_type().to_string(), Arc::new(schema));
        self
    }
}

impl RuleRegistry for StaticRuleRegistry {
    fn schema(&self, rule_type: &str) -> Result<Arc<RuleSchema>> {
        self.schemas
            .get(rule_type)
            .cloned()
            .ok_or_else(|| Error::unknown_rule_type(rule_type))
    }
}
