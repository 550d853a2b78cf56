//! Build target labels, package paths, and forward-relative file paths.
//!
//! A fully qualified label has the form `cell//package/path:name`. The
//! cell part may be empty (`//pkg:name`), meaning the current cell.
//! Relative forms (`:name`) require a declaring package and are handled
//! by the cell resolver, not here.

use std::fmt;
use std::sync::Arc;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Name of a workspace root ("cell").
///
/// The empty cell name refers to the current cell.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CellName(Arc<str>);

impl CellName {
    /// Creates a cell name, validating it contains no separators.
    pub fn new(name: &str) -> Result<Self> {
        if name.contains('/') || name.contains(':') {
            return Err(Error::label(name, "cell name may not contain '/' or ':'"));
        }
        Ok(Self(name.into()))
    }

    /// The current (unnamed) cell.
    #[must_use]
    pub fn current() -> Self {
        Self("".into())
    }

    /// Returns the cell name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if this is the current (unnamed) cell.
    #[must_use]
    pub fn is_current(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for CellName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CellName({})", self.0)
    }
}

impl fmt::Display for CellName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Forward-relative path of a package inside a cell.
///
/// Never absolute, never containing `.` or `..`. The empty path is the
/// cell's root package.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PackagePath(Arc<str>);

impl PackagePath {
    /// Creates a package path, validating every segment.
    pub fn new(path: &str) -> Result<Self> {
        validate_forward_rel(path).map_err(|reason| Error::label(path, reason))?;
        Ok(Self(path.into()))
    }

    /// The cell root package.
    #[must_use]
    pub fn root() -> Self {
        Self("".into())
    }

    /// Returns the package path as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns this package's directory as a file path.
    #[must_use]
    pub fn as_dir(&self) -> ForwardRelPath {
        ForwardRelPath(self.0.clone())
    }
}

impl fmt::Debug for PackagePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PackagePath({})", self.0)
    }
}

impl fmt::Display for PackagePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Fully qualified build target label: `cell//package:name`.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TargetLabel {
    cell: CellName,
    package: PackagePath,
    name: Arc<str>,
}

impl TargetLabel {
    /// Creates a label from parts, validating the target name.
    pub fn new(cell: CellName, package: PackagePath, name: &str) -> Result<Self> {
        if name.is_empty() {
            return Err(Error::label(name, "target name may not be empty"));
        }
        if name.contains('/') || name.contains(':') {
            return Err(Error::label(name, "target name may not contain '/' or ':'"));
        }
        Ok(Self {
            cell,
            package,
            name: name.into(),
        })
    }

    /// Parses a fully qualified label of the form `cell//package:name`.
    ///
    /// The cell part may be empty: `//package:name`.
    pub fn parse(input: &str) -> Result<Self> {
        let Some(sep) = input.find("//") else {
            return Err(Error::label(input, "expected 'cell//package:name'"));
        };
        let cell = CellName::new(&input[..sep])?;
        let rest = &input[sep + 2..];
        let Some(colon) = rest.rfind(':') else {
            return Err(Error::label(input, "missing ':name' part"));
        };
        let package = PackagePath::new(&rest[..colon])
            .map_err(|_| Error::label(input, "invalid package path"))?;
        Self::new(cell, package, &rest[colon + 1..])
            .map_err(|_| Error::label(input, "invalid target name"))
    }

    /// The cell this target lives in.
    #[must_use]
    pub fn cell(&self) -> &CellName {
        &self.cell
    }

    /// The package this target lives in.
    #[must_use]
    pub fn package(&self) -> &PackagePath {
        &self.package
    }

    /// The short target name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Debug for TargetLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TargetLabel({self})")
    }
}

impl fmt::Display for TargetLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}//{}:{}", self.cell, self.package, self.name)
    }
}

/// A normalized forward-relative file path, `/`-separated.
///
/// The empty path is the cell root directory. Used for build file
/// locations and resolved file inputs; the package-boundary check is
/// [`ForwardRelPath::starts_with`].
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ForwardRelPath(Arc<str>);

impl ForwardRelPath {
    /// Creates a path, validating every segment.
    pub fn new(path: &str) -> Result<Self> {
        validate_forward_rel(path).map_err(|reason| Error::path(path, reason))?;
        Ok(Self(path.into()))
    }

    /// The empty (root) path.
    #[must_use]
    pub fn root() -> Self {
        Self("".into())
    }

    /// Returns the path as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the parent directory, or `None` for the root path.
    #[must_use]
    pub fn parent(&self) -> Option<Self> {
        if self.0.is_empty() {
            return None;
        }
        match self.0.rfind('/') {
            Some(idx) => Some(Self(self.0[..idx].into())),
            None => Some(Self("".into())),
        }
    }

    /// Returns true if this path is `base` or lies underneath it.
    ///
    /// The root path contains every path.
    #[must_use]
    pub fn starts_with(&self, base: &Self) -> bool {
        if base.0.is_empty() {
            return true;
        }
        match self.0.strip_prefix(base.0.as_ref()) {
            Some("") => true,
            Some(rest) => rest.starts_with('/'),
            None => false,
        }
    }

    /// Returns `base/self`, or `self` unchanged when `base` is the root.
    #[must_use]
    pub fn prefixed_with(&self, base: &Self) -> Self {
        if base.0.is_empty() {
            self.clone()
        } else if self.0.is_empty() {
            base.clone()
        } else {
            Self(format!("{}/{}", base.0, self.0).into())
        }
    }
}

impl fmt::Debug for ForwardRelPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ForwardRelPath({})", self.0)
    }
}

impl fmt::Display for ForwardRelPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Shared validation for package paths and file paths.
fn validate_forward_rel(path: &str) -> std::result::Result<(), &'static str> {
    if path.is_empty() {
        return Ok(());
    }
    if path.starts_with('/') {
        return Err("path may not be absolute");
    }
    if path.contains(':') {
        return Err("path may not contain ':'");
    }
    for segment in path.split('/') {
        match segment {
            "" => return Err("path may not contain empty segments"),
            "." | ".." => return Err("path may not contain '.' or '..' segments"),
            _ => {}
        }
    }
    Ok(())
}
