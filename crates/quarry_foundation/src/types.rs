//! Attribute type descriptors for rule schemas.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Type descriptor for a rule attribute.
///
/// Declared by rule schemas and used by the coercer to type-check raw
/// build-file values. Dict keys are always strings, matching build-file
/// semantics.
#[derive(Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum AttrType {
    /// Boolean attribute.
    Bool,
    /// 64-bit signed integer attribute.
    Int,
    /// String attribute.
    String,
    /// File path attribute, resolved relative to the declaring package.
    Path,
    /// Reference to another build target.
    Target,
    /// Ordered homogeneous list.
    List(Box<AttrType>),
    /// String-keyed homogeneous dict.
    Dict(Box<AttrType>),
}

impl AttrType {
    /// Creates a list type with the given element type.
    #[must_use]
    pub fn list(element: AttrType) -> Self {
        Self::List(Box::new(element))
    }

    /// Creates a dict type with the given value type.
    #[must_use]
    pub fn dict(value: AttrType) -> Self {
        Self::Dict(Box::new(value))
    }

    /// Returns true for scalar (non-composite) types.
    #[must_use]
    pub const fn is_scalar(&self) -> bool {
        !matches!(self, Self::List(_) | Self::Dict(_))
    }

    /// The default merge policy for selector-resolved values of this type.
    ///
    /// Scalars must come from exactly one contributing entry; lists and
    /// dicts combine in list order.
    #[must_use]
    pub const fn default_merge_policy(&self) -> MergePolicy {
        if self.is_scalar() {
            MergePolicy::Single
        } else {
            MergePolicy::Combine
        }
    }
}

/// How multiple selector-resolved entries for one attribute combine.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum MergePolicy {
    /// Exactly one contributing entry; more than one is an error.
    Single,
    /// Entries combine in declaration order: lists concatenate, dict
    /// entries merge with later keys overriding.
    Combine,
}

impl fmt::Debug for AttrType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool => write!(f, "bool"),
            Self::Int => write!(f, "int"),
            Self::String => write!(f, "string"),
            Self::Path => write!(f, "path"),
            Self::Target => write!(f, "target"),
            Self::List(t) => write!(f, "list<{t:?}>"),
            Self::Dict(t) => write!(f, "dict<{t:?}>"),
        }
    }
}

impl fmt::Display for AttrType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}
