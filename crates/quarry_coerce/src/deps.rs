//! Dependency and input extraction from resolved attribute values.

use quarry_foundation::{ForwardRelPath, QSet, TargetLabel};
use quarry_model::ResolvedValue;

/// Accumulates the target references and file inputs reachable from a
/// declaration's resolved attributes.
///
/// An explicit value threaded through the walk, so extraction stays a
/// pure function of the resolved values and is testable in isolation.
#[derive(Clone, Debug, Default)]
pub struct DepAccumulator {
    deps: QSet<TargetLabel>,
    inputs: QSet<ForwardRelPath>,
}

impl DepAccumulator {
    /// Creates an empty accumulator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records every target reference and file input reachable from a
    /// resolved value, including those nested in lists and dicts.
    pub fn record(&mut self, value: &ResolvedValue) {
        match value {
            ResolvedValue::Target(label) => {
                self.deps = self.deps.insert(label.clone());
            }
            ResolvedValue::Path(path) => {
                self.inputs = self.inputs.insert(path.clone());
            }
            ResolvedValue::List(items) => {
                for item in items {
                    self.record(item);
                }
            }
            ResolvedValue::Dict(entries) => {
                for (_, entry) in entries {
                    self.record(entry);
                }
            }
            ResolvedValue::Bool(_) | ResolvedValue::Int(_) | ResolvedValue::String(_) => {}
        }
    }

    /// The accumulated target references.
    #[must_use]
    pub fn deps(&self) -> &QSet<TargetLabel> {
        &self.deps
    }

    /// The accumulated file inputs.
    #[must_use]
    pub fn inputs(&self) -> &QSet<ForwardRelPath> {
        &self.inputs
    }

    /// Consumes the accumulator, returning (deps, inputs).
    #[must_use]
    pub fn into_parts(self) -> (QSet<TargetLabel>, QSet<ForwardRelPath>) {
        (self.deps, self.inputs)
    }
}
