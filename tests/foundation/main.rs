//! Integration tests for Layer 0: Foundation
//!
//! Tests for labels, paths, errors, and persistent collections.

mod collections;
mod errors;
mod labels;
