//! Observer and instrumentation hooks.

use std::sync::Mutex;

use quarry_foundation::{ForwardRelPath, TargetLabel};

use crate::node::GraphNode;

/// Scope name bracketing the attribute-coercion step.
pub const COERCE_ATTRIBUTES_SCOPE: &str = "coerce-attributes";

/// Downstream notification target for finished nodes.
///
/// Called once per successful construction, before the node is returned
/// to the caller. Implementations must tolerate concurrent invocation;
/// the pipeline provides no locking around them. A failure here is
/// surfaced on the pipeline's error channel, not dropped.
pub trait NodeObserver: Send + Sync {
    /// Called with the declaring build file and the finished node.
    ///
    /// # Errors
    /// Any error is wrapped and attributed to the node's target.
    fn on_create(
        &self,
        build_file: &ForwardRelPath,
        node: &GraphNode,
    ) -> std::result::Result<(), Box<dyn std::error::Error + Send + Sync>>;
}

/// Observer that ignores every notification.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopObserver;

impl NodeObserver for NoopObserver {
    fn on_create(
        &self,
        _build_file: &ForwardRelPath,
        _node: &GraphNode,
    ) -> std::result::Result<(), Box<dyn std::error::Error + Send + Sync>> {
        Ok(())
    }
}

/// Observer that records every notification, for tests and tooling.
///
/// Internally serialized, so it satisfies the concurrent-invocation
/// contract.
#[derive(Debug, Default)]
pub struct CollectingObserver {
    seen: Mutex<Vec<(ForwardRelPath, TargetLabel)>>,
}

impl CollectingObserver {
    /// Creates an empty collector.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The (build file, target) pairs observed so far.
    ///
    /// # Panics
    /// Panics if a previous holder of the lock panicked.
    #[must_use]
    pub fn seen(&self) -> Vec<(ForwardRelPath, TargetLabel)> {
        self.seen.lock().expect("observer lock poisoned").clone()
    }
}

impl NodeObserver for CollectingObserver {
    fn on_create(
        &self,
        build_file: &ForwardRelPath,
        node: &GraphNode,
    ) -> std::result::Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.seen
            .lock()
            .expect("observer lock poisoned")
            .push((build_file.clone(), node.label().clone()));
        Ok(())
    }
}

/// Named begin/end instrumentation seam.
///
/// `enter` and `exit` are called exactly once per bracketed operation,
/// on success and on failure alike, via the RAII [`OperationScope`].
/// Implementations must not fail.
pub trait ScopeHandler: Send + Sync {
    /// Called when the named operation begins.
    fn enter(&self, name: &str);

    /// Called when the named operation ends.
    fn exit(&self, name: &str);
}

/// Scope handler that does nothing.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopScopes;

impl ScopeHandler for NoopScopes {
    fn enter(&self, _name: &str) {}
    fn exit(&self, _name: &str) {}
}

/// RAII guard pairing a [`ScopeHandler::enter`] with its `exit`.
pub struct OperationScope<'a> {
    handler: &'a dyn ScopeHandler,
    name: &'static str,
}

impl<'a> OperationScope<'a> {
    /// Enters the named scope; exiting happens on drop.
    #[must_use]
    pub fn enter(handler: &'a dyn ScopeHandler, name: &'static str) -> Self {
        handler.enter(name);
        Self { handler, name }
    }
}

impl Drop for OperationScope<'_> {
    fn drop(&mut self) {
        self.handler.exit(self.name);
    }
}
