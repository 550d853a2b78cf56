//! Raw and typed attribute values, selectors, declarations, and rule
//! schemas for Quarry.
//!
//! Attribute values pass through three explicit phases:
//!
//! ```text
//! RawValue  ──coerce──▶  CoercedValue  ──resolve──▶  ResolvedValue
//! (parser output)        (schema-typed,              (selector-free,
//!                         selects intact)             node-ready)
//! ```
//!
//! Each phase is its own type so an unresolved value can never be used
//! where a resolved one is required.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod declaration;
pub mod schema;
pub mod selector;
pub mod value;

pub use declaration::RawDeclaration;
pub use schema::{AttrSpec, RuleRegistry, RuleSchema, StaticRuleRegistry};
pub use selector::{RawSelector, RawSelectorEntry, RawSelectorList, Selector, SelectorList};
pub use value::{CoercedValue, RawValue, ResolvedValue};
