//! Integration tests for Layer 4: Node materialization
//!
//! End-to-end pipeline runs, package-boundary enforcement, and observer
//! behavior.
