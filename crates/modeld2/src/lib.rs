//! modeld2 - Render ORM model declarations as D2 schema diagrams.
//!
//! The pipeline has three stages, run in order on every invocation:
//!
//! 1. [`ModelSelector`] decides which apps and entities are exported.
//! 2. [`GraphBuilder`] collapses abstract ancestors into their own nodes and
//!    classifies association fields into relations, producing a
//!    [`ModelGraph`].
//! 3. [`D2Renderer`] serializes the graph into D2 text.
//!
//! The registry is always passed in as a value; see
//! [`modeld2_core::registry`] for its shape and [`modeld2_loader`] for
//! reading it from a snapshot document.

pub mod config;
pub mod export;
pub mod graph;

mod error;
mod select;
mod structure;

pub use modeld2_core::{field, label, origin, registry};

pub use error::ModelD2Error;
pub use export::{Renderer, d2::D2Renderer};
pub use graph::{EntityView, InheritanceEdge, ModelGraph, Relation, RelationKind};
pub use select::ModelSelector;
pub use structure::GraphBuilder;

use log::{info, warn};

use config::AppConfig;
use origin::OriginPredicate;
use registry::Registry;

/// Builder for loading snapshots and rendering model diagrams.
///
/// # Examples
///
/// ```rust
/// use modeld2::{DiagramBuilder, config::AppConfig};
///
/// let source = r#"{
///     "apps": {
///         "chat": {
///             "module": {"path": "/srv/project/apps/chat/__init__.py"},
///             "models": {
///                 "Chat": {"fields": [{"name": "id", "type": "AutoField"}]}
///             }
///         }
///     }
/// }"#;
///
/// let builder = DiagramBuilder::new(AppConfig::default());
/// let registry = builder.load(source).expect("Failed to load snapshot");
/// let graph = builder.build(&registry);
/// let d2 = builder.render_d2(&graph);
///
/// assert!(d2.contains("\"chat.Chat\": {"));
/// ```
#[derive(Debug, Default)]
pub struct DiagramBuilder {
    config: AppConfig,
}

impl DiagramBuilder {
    /// Create a new diagram builder with the given configuration.
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// Load a registry snapshot from JSON source text.
    ///
    /// Warnings found while validating the snapshot are logged and do not
    /// fail the load.
    ///
    /// # Errors
    ///
    /// Returns [`ModelD2Error::Load`] when the snapshot is malformed.
    pub fn load(&self, source: &str) -> Result<Registry, ModelD2Error> {
        info!("Loading registry snapshot");

        let loaded = modeld2_loader::load(source)
            .map_err(|err| ModelD2Error::new_load_error(err, source))?;
        let (registry, warnings) = loaded.into_parts();

        for warning in &warnings {
            warn!(code:? = warning.code(); "{}", warning.message());
        }

        Ok(registry)
    }

    /// Build the model graph using the configured origin markers.
    pub fn build(&self, registry: &Registry) -> ModelGraph {
        let origin = self.config.origin().predicate();
        self.build_with_origin(registry, &origin)
    }

    /// Build the model graph with a custom origin predicate.
    pub fn build_with_origin(
        &self,
        registry: &Registry,
        origin: &dyn OriginPredicate,
    ) -> ModelGraph {
        GraphBuilder::new(self.config.export(), origin).build_graph(registry)
    }

    /// Render a model graph as D2 source.
    pub fn render_d2(&self, graph: &ModelGraph) -> String {
        D2Renderer::new().render(graph)
    }

    /// Load, build and render in one step.
    ///
    /// # Errors
    ///
    /// Returns [`ModelD2Error::Load`] when the snapshot is malformed.
    pub fn generate(&self, source: &str) -> Result<String, ModelD2Error> {
        let registry = self.load(source)?;
        let graph = self.build(&registry);
        info!(nodes = graph.nodes().len(); "Rendering D2 diagram");
        Ok(self.render_d2(&graph))
    }
}
