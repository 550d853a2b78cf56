//! Error types for node materialization.
//!
//! Uses `thiserror` for the error kinds. Every failure surfaced from the
//! pipeline names the owning target (and the attribute when one applies)
//! so a failure in a large graph is attributable without log
//! cross-referencing.

use std::fmt;

use thiserror::Error as ThisError;

use crate::label::{ForwardRelPath, TargetLabel};
use crate::types::AttrType;

/// Result alias used throughout Quarry.
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for materialization.
///
/// Carries the kind plus the target and attribute it is attributable to.
/// Errors are plain values; one declaration's failure cannot poison
/// sibling materializations.
#[derive(Debug)]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// The target being materialized when the error occurred.
    pub target: Option<TargetLabel>,
    /// The attribute being processed when the error occurred.
    pub attribute: Option<String>,
}

impl Error {
    /// Creates a new error with the given kind.
    #[must_use]
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            target: None,
            attribute: None,
        }
    }

    /// Attributes this error to a target, keeping any existing one.
    #[must_use]
    pub fn with_target(mut self, target: TargetLabel) -> Self {
        self.target.get_or_insert(target);
        self
    }

    /// Attributes this error to an attribute, keeping any existing one.
    #[must_use]
    pub fn with_attribute(mut self, attribute: impl Into<String>) -> Self {
        self.attribute.get_or_insert(attribute.into());
        self
    }

    /// Creates a coercion error.
    #[must_use]
    pub fn coercion(expected: AttrType, found: impl Into<String>) -> Self {
        Self::new(ErrorKind::Coercion {
            expected,
            found: found.into(),
        })
    }

    /// Creates a duplicate-key error.
    #[must_use]
    pub fn duplicate_key(key: impl Into<String>) -> Self {
        Self::new(ErrorKind::DuplicateKey(key.into()))
    }

    /// Creates a no-matching-configuration error.
    #[must_use]
    pub fn no_match(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NoMatch(message.into()))
    }

    /// Creates an ambiguous-match error from the competing keys.
    #[must_use]
    pub fn ambiguous_match(keys: Vec<String>) -> Self {
        Self::new(ErrorKind::AmbiguousMatch { keys })
    }

    /// Creates a scalar-merge error for the given entry count.
    #[must_use]
    pub fn scalar_merge(entries: usize) -> Self {
        Self::new(ErrorKind::ScalarMerge { entries })
    }

    /// Creates a configurability violation.
    #[must_use]
    pub fn configurability() -> Self {
        Self::new(ErrorKind::Configurability)
    }

    /// Creates a construction-invariant violation.
    #[must_use]
    pub fn construction(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ConstructionInvariant(message.into()))
    }

    /// Creates a package-boundary violation.
    #[must_use]
    pub fn package_boundary(path: ForwardRelPath, package: ForwardRelPath) -> Self {
        Self::new(ErrorKind::PackageBoundary { path, package })
    }

    /// Wraps a failure raised by the node observer.
    #[must_use]
    pub fn observer(source: Box<dyn std::error::Error + Send + Sync>) -> Self {
        Self::new(ErrorKind::Observer(source))
    }

    /// Creates an unknown-rule-type error.
    #[must_use]
    pub fn unknown_rule_type(name: impl Into<String>) -> Self {
        Self::new(ErrorKind::UnknownRuleType(name.into()))
    }

    /// Creates a missing-required-attribute error.
    #[must_use]
    pub fn missing_attribute(attribute: impl Into<String>) -> Self {
        Self::new(ErrorKind::MissingAttribute).with_attribute(attribute)
    }

    /// Creates an unknown-attribute error.
    #[must_use]
    pub fn unknown_attribute(attribute: impl Into<String>) -> Self {
        Self::new(ErrorKind::UnknownAttribute).with_attribute(attribute)
    }

    /// Creates an invalid-label error.
    #[must_use]
    pub fn label(input: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::new(ErrorKind::Label {
            input: input.into(),
            reason: reason.into(),
        })
    }

    /// Creates an invalid-path error.
    #[must_use]
    pub fn path(input: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::new(ErrorKind::Path {
            input: input.into(),
            reason: reason.into(),
        })
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(target) = &self.target {
            write!(f, "{target}: ")?;
        }
        if let Some(attribute) = &self.attribute {
            write!(f, "attribute '{attribute}': ")?;
        }
        write!(f, "{}", self.kind)
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.kind.source()
    }
}

/// Categorized error kinds for pattern matching.
#[derive(Debug, ThisError)]
pub enum ErrorKind {
    /// Raw value does not match the declared attribute shape.
    #[error("cannot coerce {found} to {expected}")]
    Coercion {
        /// The type the schema declares.
        expected: AttrType,
        /// Short description of the raw value encountered.
        found: String,
    },

    /// Duplicate key in a dict literal or a selector entry.
    #[error("duplicate key: {0}")]
    DuplicateKey(String),

    /// A `select()` appeared somewhere other than a full attribute value
    /// or a concatenation operand.
    #[error("select() may only appear as an attribute value or concatenation operand")]
    NestedSelect,

    /// No selector key satisfied and no default was provided.
    #[error("{0}")]
    NoMatch(String),

    /// Multiple selector keys satisfied with no single dominant one.
    #[error("ambiguous select: multiple conditions match and none dominates: [{}]", keys.join(", "))]
    AmbiguousMatch {
        /// The competing keys, in declaration order.
        keys: Vec<String>,
    },

    /// A scalar attribute resolved from more than one select entry.
    #[error("scalar attribute resolved from {entries} select() entries, expected exactly one")]
    ScalarMerge {
        /// Number of contributing entries.
        entries: usize,
    },

    /// A conditional attribute appeared where configuration resolution
    /// is disallowed.
    #[error("attribute cannot be configurable here")]
    Configurability,

    /// A node-level structural rule was broken at construction.
    #[error("{0}")]
    ConstructionInvariant(String),

    /// A file input lies outside its owning package.
    #[error("file '{path}' lies outside package '{package}'")]
    PackageBoundary {
        /// The offending input path.
        path: ForwardRelPath,
        /// The owning package directory.
        package: ForwardRelPath,
    },

    /// The node observer failed after construction.
    #[error("observer failed: {0}")]
    Observer(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// No schema is registered for the declared rule type.
    #[error("unknown rule type: {0}")]
    UnknownRuleType(String),

    /// A required attribute without a default was not declared.
    #[error("missing required attribute")]
    MissingAttribute,

    /// The declaration names an attribute the schema does not declare.
    #[error("unknown attribute")]
    UnknownAttribute,

    /// A label failed to parse.
    #[error("invalid label '{input}': {reason}")]
    Label {
        /// The input that failed to parse.
        input: String,
        /// What was wrong with it.
        reason: String,
    },

    /// A file path failed to parse.
    #[error("invalid path '{input}': {reason}")]
    Path {
        /// The input that failed to parse.
        input: String,
        /// What was wrong with it.
        reason: String,
    },
}
