//! The finished graph node and its construction collaborator.

use std::fmt;
use std::sync::Arc;

use quarry_foundation::{Error, ForwardRelPath, QMap, QSet, Result, TargetLabel};
use quarry_model::{ResolvedValue, RuleSchema};

/// The fully materialized, immutable unit handed to the build graph.
///
/// Invariants, enforced by [`NodeBuilder`]: every schema attribute has a
/// value; no attribute holds an unresolved selector (guaranteed by the
/// [`ResolvedValue`] phase); the dependency set holds exactly the target
/// references reachable from the attribute values; the node never
/// depends on itself. Never mutated after construction.
#[derive(Clone, PartialEq)]
pub struct GraphNode {
    label: TargetLabel,
    schema: Arc<RuleSchema>,
    attrs: QMap<Arc<str>, ResolvedValue>,
    deps: QSet<TargetLabel>,
    inputs: QSet<ForwardRelPath>,
    visibility: Vec<String>,
    within_view: Vec<String>,
    package_root: ForwardRelPath,
}

impl GraphNode {
    /// The target this node was materialized for.
    #[must_use]
    pub fn label(&self) -> &TargetLabel {
        &self.label
    }

    /// The rule schema this node was typed against.
    #[must_use]
    pub fn schema(&self) -> &Arc<RuleSchema> {
        &self.schema
    }

    /// Looks up a resolved attribute value by name.
    #[must_use]
    pub fn attr(&self, name: &str) -> Option<&ResolvedValue> {
        self.attrs.get(&Arc::from(name))
    }

    /// The resolved attribute values.
    #[must_use]
    pub fn attrs(&self) -> &QMap<Arc<str>, ResolvedValue> {
        &self.attrs
    }

    /// The declared target dependencies. Unordered.
    #[must_use]
    pub fn deps(&self) -> &QSet<TargetLabel> {
        &self.deps
    }

    /// The resolved file inputs. Unordered.
    #[must_use]
    pub fn inputs(&self) -> &QSet<ForwardRelPath> {
        &self.inputs
    }

    /// The declared visibility patterns.
    #[must_use]
    pub fn visibility(&self) -> &[String] {
        &self.visibility
    }

    /// The declared within-view patterns.
    #[must_use]
    pub fn within_view(&self) -> &[String] {
        &self.within_view
    }

    /// The owning package's directory, relative to the cell root.
    #[must_use]
    pub fn package_root(&self) -> &ForwardRelPath {
        &self.package_root
    }
}

impl fmt::Debug for GraphNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GraphNode")
            .field("label", &self.label)
            .field("rule_type", &self.schema.rule_type())
            .field("attrs", &self.attrs)
            .field("deps", &self.deps)
            .finish_non_exhaustive()
    }
}

/// Arguments to one node construction.
///
/// Gathered by the pipeline; the builder validates and freezes them.
pub struct NodeParts {
    /// The target being materialized.
    pub label: TargetLabel,
    /// The schema the attributes were typed against.
    pub schema: Arc<RuleSchema>,
    /// Fully resolved attribute values, one per schema attribute.
    pub attrs: QMap<Arc<str>, ResolvedValue>,
    /// Extracted target dependencies.
    pub deps: QSet<TargetLabel>,
    /// Extracted file inputs.
    pub inputs: QSet<ForwardRelPath>,
    /// Visibility patterns carried from the declaration.
    pub visibility: Vec<String>,
    /// Within-view patterns carried from the declaration.
    pub within_view: Vec<String>,
    /// The owning package's directory.
    pub package_root: ForwardRelPath,
}

/// Node-construction collaborator: validates construction-time
/// invariants and produces the immutable [`GraphNode`].
#[derive(Clone, Copy, Debug, Default)]
pub struct NodeBuilder;

impl NodeBuilder {
    /// Creates a builder.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Builds a node, rejecting invariant violations.
    ///
    /// Rejected: a self-referential dependency, and an attribute set
    /// that does not cover the schema exactly. Duplicate dependency
    /// declarations collapse in the set representation and are not an
    /// error.
    pub fn build(&self, parts: NodeParts) -> Result<GraphNode> {
        if parts.deps.contains(&parts.label) {
            return Err(Error::construction("target depends on itself")
                .with_target(parts.label.clone()));
        }
        for spec in parts.schema.attrs() {
            if !parts.attrs.contains_key(&Arc::from(spec.name.as_str())) {
                return Err(Error::construction(format!(
                    "attribute '{}' missing from constructed node",
                    spec.name
                ))
                .with_target(parts.label.clone()));
            }
        }
        if parts.attrs.len() != parts.schema.attrs().len() {
            return Err(Error::construction(
                "constructed node carries attributes the schema does not declare",
            )
            .with_target(parts.label.clone()));
        }
        Ok(GraphNode {
            label: parts.label,
            schema: parts.schema,
            attrs: parts.attrs,
            deps: parts.deps,
            inputs: parts.inputs,
            visibility: parts.visibility,
            within_view: parts.within_view,
            package_root: parts.package_root,
        })
    }
}
