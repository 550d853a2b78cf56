//! Attribute values in their three phases.

use std::fmt;
use std::sync::Arc;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use quarry_foundation::{Error, ForwardRelPath, QMap, QVec, Result, TargetLabel};

use crate::selector::{RawSelectorList, SelectorList};

/// A raw attribute value as produced by the build-file parser.
///
/// Dynamically shaped; nothing has been type-checked yet. Dict entries
/// keep declaration order so duplicate keys can be reported and selector
/// merge order is stable.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum RawValue {
    /// Boolean literal.
    Bool(bool),
    /// Integer literal.
    Int(i64),
    /// String literal. Also the raw form of paths and target labels.
    String(String),
    /// Ordered sequence literal.
    List(Vec<RawValue>),
    /// Mapping literal, in declaration order.
    Dict(Vec<(String, RawValue)>),
    /// An unresolved `select()` expression (possibly concatenated with
    /// literals).
    Select(RawSelectorList),
}

impl RawValue {
    /// Short description of this value's shape, for coercion errors.
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            Self::Bool(b) => format!("bool {b}"),
            Self::Int(n) => format!("int {n}"),
            Self::String(s) => format!("string \"{s}\""),
            Self::List(items) => format!("list of {} elements", items.len()),
            Self::Dict(entries) => format!("dict of {} entries", entries.len()),
            Self::Select(_) => "select()".to_string(),
        }
    }
}

impl From<bool> for RawValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i64> for RawValue {
    fn from(n: i64) -> Self {
        Self::Int(n)
    }
}

impl From<&str> for RawValue {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for RawValue {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl<T: Into<RawValue>> From<Vec<T>> for RawValue {
    fn from(items: Vec<T>) -> Self {
        Self::List(items.into_iter().map(Into::into).collect())
    }
}

/// A schema-typed attribute value.
///
/// Paths and targets are resolved; `select()` expressions survive
/// structurally (each branch coerced against the attribute's element
/// type) but are not yet evaluated.
#[derive(Clone, Debug, PartialEq)]
pub enum CoercedValue {
    /// Boolean value.
    Bool(bool),
    /// Integer value.
    Int(i64),
    /// String value.
    String(Arc<str>),
    /// Resolved package-relative file path.
    Path(ForwardRelPath),
    /// Resolved target reference.
    Target(TargetLabel),
    /// Typed sequence.
    List(QVec<CoercedValue>),
    /// Typed mapping.
    Dict(QMap<Arc<str>, CoercedValue>),
    /// A structurally coerced, still unevaluated selector list.
    Select(SelectorList),
}

impl CoercedValue {
    /// Converts into a resolved value, failing with a configurability
    /// violation if any selector remains.
    ///
    /// Used by the non-resolving materialization path; the resolving path
    /// goes through the selector resolution engine instead.
    pub fn into_resolved(self) -> Result<ResolvedValue> {
        match self {
            Self::Bool(b) => Ok(ResolvedValue::Bool(b)),
            Self::Int(n) => Ok(ResolvedValue::Int(n)),
            Self::String(s) => Ok(ResolvedValue::String(s)),
            Self::Path(p) => Ok(ResolvedValue::Path(p)),
            Self::Target(t) => Ok(ResolvedValue::Target(t)),
            Self::List(items) => Ok(ResolvedValue::List(
                items
                    .into_iter()
                    .map(CoercedValue::into_resolved)
                    .collect::<Result<_>>()?,
            )),
            Self::Dict(entries) => Ok(ResolvedValue::Dict(
                entries
                    .iter()
                    .map(|(k, v)| Ok((k.clone(), v.clone().into_resolved()?)))
                    .collect::<Result<_>>()?,
            )),
            Self::Select(_) => Err(Error::configurability()),
        }
    }
}

impl From<ResolvedValue> for CoercedValue {
    fn from(value: ResolvedValue) -> Self {
        match value {
            ResolvedValue::Bool(b) => Self::Bool(b),
            ResolvedValue::Int(n) => Self::Int(n),
            ResolvedValue::String(s) => Self::String(s),
            ResolvedValue::Path(p) => Self::Path(p),
            ResolvedValue::Target(t) => Self::Target(t),
            ResolvedValue::List(items) => {
                Self::List(items.into_iter().map(Into::into).collect())
            }
            ResolvedValue::Dict(entries) => Self::Dict(
                entries
                    .iter()
                    .map(|(k, v)| (k.clone(), v.clone().into()))
                    .collect(),
            ),
        }
    }
}

/// A fully resolved attribute value: selector-free by construction.
///
/// This is the only phase that reaches a finished graph node; dependency
/// extraction and the package-boundary check walk these values.
#[derive(Clone, PartialEq, Eq)]
pub enum ResolvedValue {
    /// Boolean value.
    Bool(bool),
    /// Integer value.
    Int(i64),
    /// String value.
    String(Arc<str>),
    /// Resolved package-relative file path.
    Path(ForwardRelPath),
    /// Resolved target reference.
    Target(TargetLabel),
    /// Resolved sequence.
    List(QVec<ResolvedValue>),
    /// Resolved mapping.
    Dict(QMap<Arc<str>, ResolvedValue>),
}

impl ResolvedValue {
    /// Attempts to extract a boolean.
    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Attempts to extract an integer.
    #[must_use]
    pub const fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Attempts to extract a string reference.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Attempts to extract a file path.
    #[must_use]
    pub const fn as_path(&self) -> Option<&ForwardRelPath> {
        match self {
            Self::Path(p) => Some(p),
            _ => None,
        }
    }

    /// Attempts to extract a target reference.
    #[must_use]
    pub const fn as_target(&self) -> Option<&TargetLabel> {
        match self {
            Self::Target(t) => Some(t),
            _ => None,
        }
    }

    /// Attempts to extract a list reference.
    #[must_use]
    pub const fn as_list(&self) -> Option<&QVec<ResolvedValue>> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    /// Attempts to extract a dict reference.
    #[must_use]
    pub const fn as_dict(&self) -> Option<&QMap<Arc<str>, ResolvedValue>> {
        match self {
            Self::Dict(entries) => Some(entries),
            _ => None,
        }
    }
}

impl fmt::Debug for ResolvedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(n) => write!(f, "{n}"),
            Self::String(s) => write!(f, "{s:?}"),
            Self::Path(p) => write!(f, "path({p})"),
            Self::Target(t) => write!(f, "{t}"),
            Self::List(items) => f.debug_list().entries(items.iter()).finish(),
            Self::Dict(entries) => f.debug_map().entries(entries.iter()).finish(),
        }
    }
}

impl From<bool> for ResolvedValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i64> for ResolvedValue {
    fn from(n: i64) -> Self {
        Self::Int(n)
    }
}

impl From<&str> for ResolvedValue {
    fn from(s: &str) -> Self {
        Self::String(s.into())
    }
}

impl From<TargetLabel> for ResolvedValue {
    fn from(t: TargetLabel) -> Self {
        Self::Target(t)
    }
}

impl<T: Into<ResolvedValue>> From<Vec<T>> for ResolvedValue {
    fn from(items: Vec<T>) -> Self {
        Self::List(items.into_iter().map(Into::into).collect())
    }
}
