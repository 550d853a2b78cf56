//! Cell and path resolution seam.
//!
//! Path- and target-typed raw attributes arrive as strings relative to
//! the declaring package. Resolution to canonical identifiers is an
//! injected, read-only service so the coercer stays independent of the
//! workspace layout.

use quarry_foundation::{CellName, Error, ForwardRelPath, PackagePath, Result, TargetLabel};

/// Resolves raw path and target strings relative to a declaring package.
pub trait CellResolver: Send + Sync {
    /// Resolves a raw path string to a cell-root-relative file path.
    fn resolve_path(&self, package: &PackagePath, raw: &str) -> Result<ForwardRelPath>;

    /// Resolves a raw target string to a fully qualified label.
    fn resolve_target(&self, package: &PackagePath, raw: &str) -> Result<TargetLabel>;
}

/// Single-cell resolver.
///
/// Paths are package-relative; targets accept the fully qualified form
/// (`cell//pkg:name`, `//pkg:name`) and the package-relative short form
/// (`:name`).
#[derive(Clone, Copy, Debug, Default)]
pub struct DefaultCellResolver;

impl DefaultCellResolver {
    /// Creates the resolver.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl CellResolver for DefaultCellResolver {
    fn resolve_path(&self, package: &PackagePath, raw: &str) -> Result<ForwardRelPath> {
        if raw.is_empty() {
            return Err(Error::path(raw, "file path may not be empty"));
        }
        let rel = ForwardRelPath::new(raw)?;
        Ok(rel.prefixed_with(&package.as_dir()))
    }

    fn resolve_target(&self, package: &PackagePath, raw: &str) -> Result<TargetLabel> {
        if let Some(name) = raw.strip_prefix(':') {
            return TargetLabel::new(CellName::current(), package.clone(), name);
        }
        TargetLabel::parse(raw)
    }
}
