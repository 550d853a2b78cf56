//! Schema-driven attribute coercion and dependency extraction.
//!
//! The coercer turns raw, dynamically-shaped build-file values into the
//! typed values a rule schema declares. `select()` expressions are
//! coerced structurally (every branch type-checked) but never evaluated
//! here; that is the selector resolution engine's job. The split lets a
//! declaration be partially processed before any configuration is known.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod coercer;
pub mod deps;
pub mod resolver;

pub use coercer::AttrCoercer;
pub use deps::DepAccumulator;
pub use resolver::{CellResolver, DefaultCellResolver};
