//! Configuration contexts and the constraint-satisfaction oracle seam.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::Arc;

use quarry_foundation::TargetLabel;

/// Identifier of a target platform.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct PlatformId(Arc<str>);

impl PlatformId {
    /// Creates a platform identifier.
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self(name.into())
    }

    /// Returns the platform name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for PlatformId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PlatformId({})", self.0)
    }
}

impl fmt::Display for PlatformId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Decides whether a configuration setting is satisfied by a platform.
///
/// Both queries are pure and side-effect free. `dominates` is derived
/// from constraint-set containment: a key dominates another when its
/// constraint set is a strict superset.
pub trait ConstraintOracle: Send + Sync {
    /// Returns true if `key`'s configuration setting is satisfied by
    /// `platform`.
    fn satisfies(&self, key: &TargetLabel, platform: &PlatformId) -> bool;

    /// Returns true if `a`'s constraint set strictly contains `b`'s.
    fn dominates(&self, a: &TargetLabel, b: &TargetLabel) -> bool;
}

/// The active configuration a selector list is resolved against.
///
/// Constructed by the caller and shared read-only; cloning shares the
/// oracle.
#[derive(Clone)]
pub struct ConfigurationContext {
    platform: PlatformId,
    oracle: Arc<dyn ConstraintOracle>,
}

impl ConfigurationContext {
    /// Creates a context from the active platform and oracle.
    #[must_use]
    pub fn new(platform: PlatformId, oracle: Arc<dyn ConstraintOracle>) -> Self {
        Self { platform, oracle }
    }

    /// The active target platform.
    #[must_use]
    pub fn platform(&self) -> &PlatformId {
        &self.platform
    }

    /// The constraint-satisfaction oracle.
    #[must_use]
    pub fn oracle(&self) -> &dyn ConstraintOracle {
        self.oracle.as_ref()
    }
}

/// Constraint oracle backed by explicit constraint sets.
///
/// Each platform declares the constraint values it provides; each
/// selector key declares the constraint values it requires. A key is
/// satisfied when its requirements are a subset of the platform's
/// values, and dominates another when its requirements are a strict
/// superset of the other's. Intended for tests, usable anywhere a
/// table-driven oracle suffices.
#[derive(Clone, Debug, Default)]
pub struct TestOracle {
    platforms: HashMap<PlatformId, HashSet<String>>,
    keys: HashMap<TargetLabel, HashSet<String>>,
}

impl TestOracle {
    /// Creates an empty oracle: nothing satisfies, nothing dominates.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares a platform and the constraint values it provides.
    #[must_use]
    pub fn with_platform(mut self, platform: &str, values: &[&str]) -> Self {
        self.platforms.insert(
            PlatformId::new(platform),
            values.iter().map(ToString::to_string).collect(),
        );
        self
    }

    /// Declares a selector key and the constraint values it requires.
    ///
    /// # Panics
    /// Panics if `key` is not a parseable target label (test helper).
    #[must_use]
    pub fn with_key(mut self, key: &str, values: &[&str]) -> Self {
        self.keys.insert(
            TargetLabel::parse(key).expect("test oracle key must be a valid label"),
            values.iter().map(ToString::to_string).collect(),
        );
        self
    }
}

impl ConstraintOracle for TestOracle {
    fn satisfies(&self, key: &TargetLabel, platform: &PlatformId) -> bool {
        let (Some(required), Some(provided)) =
            (self.keys.get(key), self.platforms.get(platform))
        else {
            return false;
        };
        required.is_subset(provided)
    }

    fn dominates(&self, a: &TargetLabel, b: &TargetLabel) -> bool {
        let (Some(a_set), Some(b_set)) = (self.keys.get(a), self.keys.get(b)) else {
            return false;
        };
        a_set.is_superset(b_set) && a_set.len() > b_set.len()
    }
}
