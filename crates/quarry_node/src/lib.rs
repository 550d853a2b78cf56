//! Graph node construction and the materialization pipelines.
//!
//! The two public entry points are [`ResolvingMaterializer`] (ordinary
//! build rules; `select()` attributes are resolved against the active
//! configuration) and [`NonResolvingMaterializer`] (configuration-defining
//! rules; any `select()` attribute is a declaration error). Both run:
//!
//! ```text
//! coerce attributes → resolve / assert non-configurable
//!   → extract deps → build node → boundary check → notify observer
//! ```
//!
//! A node is published only on full success; failures never leave a
//! partially built node observable.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod boundary;
pub mod node;
pub mod observe;
pub mod pipeline;

pub use boundary::PackageBoundaryChecker;
pub use node::{GraphNode, NodeBuilder, NodeParts};
pub use observe::{
    COERCE_ATTRIBUTES_SCOPE, CollectingObserver, NodeObserver, NoopObserver, NoopScopes,
    OperationScope, ScopeHandler,
};
pub use pipeline::{NodePipeline, NonResolvingMaterializer, ResolvingMaterializer};
