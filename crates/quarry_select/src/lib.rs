//! Selector resolution engine.
//!
//! Evaluates coerced `select()` expressions against a configuration
//! context (target platform plus a constraint-satisfaction oracle) and
//! combines the per-entry results per the attribute's merge policy.
//! Resolution is a pure function of its inputs; errors are deterministic
//! and always name the target and attribute.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod context;
pub mod resolver;

pub use context::{ConfigurationContext, ConstraintOracle, PlatformId, TestOracle};
pub use resolver::SelectorResolver;
