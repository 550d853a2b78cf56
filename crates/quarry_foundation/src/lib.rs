//! Labels, attribute types, errors, and persistent collections for Quarry.
//!
//! This crate provides:
//! - [`TargetLabel`] - Fully qualified build target identifiers
//! - [`ForwardRelPath`] - Normalized forward-relative file paths
//! - [`AttrType`] - Attribute type descriptors for rule schemas
//! - [`Error`] - Structured errors attributable to a target and attribute
//! - Persistent collections ([`QVec`], [`QSet`], [`QMap`])

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod collections;
pub mod error;
pub mod label;
pub mod types;

pub use collections::{QMap, QSet, QVec};
pub use error::{Error, ErrorKind, Result};
pub use label::{CellName, ForwardRelPath, PackagePath, TargetLabel};
pub use types::{AttrType, MergePolicy};
