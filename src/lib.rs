//! Quarry - Build-graph node materialization
//!
//! This crate re-exports all layers of the Quarry system for convenient access.
//! For detailed documentation, see the individual layer crates.
//!
//! # Architecture
//!
//! ```text
//! Layer 4: quarry_node       — Pipelines, node construction, boundary, observers
//! Layer 3: quarry_select     — select() resolution against a configuration
//! Layer 2: quarry_coerce     — Schema-driven coercion, dependency extraction
//! Layer 1: quarry_model      — Raw/coerced/resolved values, schemas, declarations
//! Layer 0: quarry_foundation — Core types (labels, paths, errors, collections)
//! ```

pub use quarry_coerce as coerce;
pub use quarry_foundation as foundation;
pub use quarry_model as model;
pub use quarry_node as node;
pub use quarry_select as select;
