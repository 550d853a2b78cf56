//! The two materialization pipelines.
//!
//! Both variants share one core: look up the schema, coerce the
//! declared attributes under the coercion scope, turn every coerced
//! value into a resolved one, extract dependencies, build the node,
//! enforce the package boundary, and notify the observer. They differ
//! only in how a `select()` attribute becomes resolved: the resolving
//! variant evaluates it against the active configuration, the
//! non-resolving variant rejects it outright.

use std::sync::Arc;

use quarry_coerce::{AttrCoercer, CellResolver, DepAccumulator};
use quarry_foundation::{Error, ForwardRelPath, QMap, Result, TargetLabel};
use quarry_model::{AttrSpec, CoercedValue, RawDeclaration, ResolvedValue, RuleRegistry, RuleSchema};
use quarry_select::{ConfigurationContext, SelectorResolver};

use crate::boundary::PackageBoundaryChecker;
use crate::node::{GraphNode, NodeBuilder, NodeParts};
use crate::observe::{COERCE_ATTRIBUTES_SCOPE, NodeObserver, NoopScopes, OperationScope, ScopeHandler};

/// One declaration in, one finished node out.
///
/// Stateless across calls: the same inputs produce the same node (or
/// the same error), and concurrent calls for different targets never
/// interfere.
pub trait NodePipeline: Send + Sync {
    /// Materializes `declaration` into a finished node.
    ///
    /// `build_file` is the declaring build description file, relative to
    /// the cell root; it anchors the package boundary and is passed to
    /// the observer.
    ///
    /// # Errors
    /// Any failure in coercion, resolution, construction, boundary
    /// enforcement, or observer notification, attributed to `target`.
    fn materialize(
        &self,
        build_file: &ForwardRelPath,
        target: &TargetLabel,
        declaration: &RawDeclaration,
    ) -> Result<GraphNode>;
}

/// The collaborators both pipeline variants share.
struct PipelineCore {
    registry: Arc<dyn RuleRegistry>,
    coercer: AttrCoercer,
    builder: NodeBuilder,
    boundary: PackageBoundaryChecker,
    observer: Arc<dyn NodeObserver>,
    scopes: Arc<dyn ScopeHandler>,
}

impl PipelineCore {
    fn new(
        registry: Arc<dyn RuleRegistry>,
        cells: Arc<dyn CellResolver>,
        observer: Arc<dyn NodeObserver>,
    ) -> Self {
        Self {
            registry,
            coercer: AttrCoercer::new(cells),
            builder: NodeBuilder::new(),
            boundary: PackageBoundaryChecker::new(),
            observer,
            scopes: Arc::new(NoopScopes),
        }
    }

    fn schema(&self, target: &TargetLabel, declaration: &RawDeclaration) -> Result<Arc<RuleSchema>> {
        self.registry
            .schema(declaration.rule_type())
            .map_err(|e| e.with_target(target.clone()))
    }

    /// Coerces every schema attribute, filling defaults for omitted
    /// optional ones. Bracketed by the coercion scope so the whole
    /// step is attributable in traces.
    fn coerce_attributes<'s>(
        &self,
        target: &TargetLabel,
        schema: &'s RuleSchema,
        declaration: &RawDeclaration,
    ) -> Result<Vec<(&'s AttrSpec, CoercedValue)>> {
        let _scope = OperationScope::enter(self.scopes.as_ref(), COERCE_ATTRIBUTES_SCOPE);

        for (name, _) in declaration.attrs() {
            if schema.attr(name).is_none() {
                return Err(Error::unknown_attribute(name).with_target(target.clone()));
            }
        }

        let package = target.package();
        let mut coerced = Vec::with_capacity(schema.attrs().len());
        for spec in schema.attrs() {
            let raw = match (declaration.attr(&spec.name), &spec.default) {
                (Some(raw), _) => raw,
                (None, Some(default)) => default,
                (None, None) => {
                    return Err(Error::missing_attribute(&spec.name).with_target(target.clone()));
                }
            };
            let value = self
                .coercer
                .coerce(package, &spec.ty, raw)
                .map_err(|e| e.with_target(target.clone()).with_attribute(&spec.name))?;
            coerced.push((spec, value));
        }
        Ok(coerced)
    }

    /// The steps after every attribute is resolved: dependency
    /// extraction, construction, boundary enforcement, notification.
    fn finish(
        &self,
        build_file: &ForwardRelPath,
        target: &TargetLabel,
        declaration: &RawDeclaration,
        schema: Arc<RuleSchema>,
        attrs: QMap<Arc<str>, ResolvedValue>,
    ) -> Result<GraphNode> {
        let mut acc = DepAccumulator::new();
        for (_, value) in attrs.iter() {
            acc.record(value);
        }
        let (deps, inputs) = acc.into_parts();

        let package_root = build_file.parent().unwrap_or_else(ForwardRelPath::root);
        let node = self.builder.build(NodeParts {
            label: target.clone(),
            schema,
            attrs,
            deps,
            inputs,
            visibility: declaration.visibility().to_vec(),
            within_view: declaration.within_view().to_vec(),
            package_root,
        })?;

        self.boundary.check(&node, build_file)?;

        self.observer
            .on_create(build_file, &node)
            .map_err(|e| Error::observer(e).with_target(target.clone()))?;

        Ok(node)
    }
}

/// Requires a coerced value to already be selector-free.
fn require_resolved(
    target: &TargetLabel,
    attribute: &str,
    value: CoercedValue,
) -> Result<ResolvedValue> {
    value
        .into_resolved()
        .map_err(|e| e.with_target(target.clone()).with_attribute(attribute))
}

/// Pipeline for ordinary build rules: `select()` attributes are
/// evaluated against the configured platform.
///
/// Declarations of configuration-defining rules still go through the
/// non-resolving conversion, since the rules that define configurations
/// must not themselves depend on one.
pub struct ResolvingMaterializer {
    core: PipelineCore,
    resolver: SelectorResolver,
    context: ConfigurationContext,
}

impl ResolvingMaterializer {
    /// Creates a resolving pipeline for the given configuration.
    #[must_use]
    pub fn new(
        registry: Arc<dyn RuleRegistry>,
        cells: Arc<dyn CellResolver>,
        context: ConfigurationContext,
        observer: Arc<dyn NodeObserver>,
    ) -> Self {
        Self {
            core: PipelineCore::new(registry, cells, observer),
            resolver: SelectorResolver::new(),
            context,
        }
    }

    /// Installs an instrumentation handler for the pipeline's scopes.
    #[must_use]
    pub fn with_scope_handler(mut self, scopes: Arc<dyn ScopeHandler>) -> Self {
        self.core.scopes = scopes;
        self
    }
}

impl NodePipeline for ResolvingMaterializer {
    fn materialize(
        &self,
        build_file: &ForwardRelPath,
        target: &TargetLabel,
        declaration: &RawDeclaration,
    ) -> Result<GraphNode> {
        let schema = self.core.schema(target, declaration)?;
        let coerced = self.core.coerce_attributes(target, &schema, declaration)?;

        let mut attrs = QMap::new();
        for (spec, value) in coerced {
            let resolved = if schema.is_configuration_rule() {
                require_resolved(target, &spec.name, value)?
            } else {
                match value {
                    CoercedValue::Select(list) => self.resolver.resolve(
                        &self.context,
                        target,
                        &spec.name,
                        &list,
                        spec.merge,
                    )?,
                    plain => require_resolved(target, &spec.name, plain)?,
                }
            };
            attrs = attrs.insert(spec.name.as_str().into(), resolved);
        }

        self.core.finish(build_file, target, declaration, schema, attrs)
    }
}

/// Pipeline for contexts where no configuration exists yet: any
/// `select()` attribute is a declaration error.
pub struct NonResolvingMaterializer {
    core: PipelineCore,
}

impl NonResolvingMaterializer {
    /// Creates a non-resolving pipeline.
    #[must_use]
    pub fn new(
        registry: Arc<dyn RuleRegistry>,
        cells: Arc<dyn CellResolver>,
        observer: Arc<dyn NodeObserver>,
    ) -> Self {
        Self {
            core: PipelineCore::new(registry, cells, observer),
        }
    }

    /// Installs an instrumentation handler for the pipeline's scopes.
    #[must_use]
    pub fn with_scope_handler(mut self, scopes: Arc<dyn ScopeHandler>) -> Self {
        self.core.scopes = scopes;
        self
    }
}

impl NodePipeline for NonResolvingMaterializer {
    fn materialize(
        &self,
        build_file: &ForwardRelPath,
        target: &TargetLabel,
        declaration: &RawDeclaration,
    ) -> Result<GraphNode> {
        let schema = self.core.schema(target, declaration)?;
        let coerced = self.core.coerce_attributes(target, &schema, declaration)?;

        let mut attrs = QMap::new();
        for (spec, value) in coerced {
            let resolved = require_resolved(target, &spec.name, value)?;
            attrs = attrs.insert(spec.name.as_str().into(), resolved);
        }

        self.core.finish(build_file, target, declaration, schema, attrs)
    }
}
