//! Package boundary enforcement.

use quarry_foundation::{Error, ForwardRelPath, Result};

use crate::node::GraphNode;

/// Verifies that a node's file inputs all live inside its owning package.
///
/// The owning package directory is the declaring build file's parent. A
/// package's build file is the sole authority over its directory
/// subtree, so claiming a file outside it is a hard failure.
#[derive(Clone, Copy, Debug, Default)]
pub struct PackageBoundaryChecker;

impl PackageBoundaryChecker {
    /// Creates a checker.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Checks every input of `node` against the package that owns
    /// `build_file`.
    pub fn check(&self, node: &GraphNode, build_file: &ForwardRelPath) -> Result<()> {
        let package_dir = build_file.parent().unwrap_or_else(ForwardRelPath::root);
        for input in node.inputs() {
            if !input.starts_with(&package_dir) {
                return Err(Error::package_boundary(input.clone(), package_dir)
                    .with_target(node.label().clone()));
            }
        }
        Ok(())
    }
}
