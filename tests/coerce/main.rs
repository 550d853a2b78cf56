//! Integration tests for Layer 2: Coercion
//!
//! Tests schema-driven attribute coercion, selector structure, and
//! dependency extraction.

mod selectors;
