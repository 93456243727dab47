//! Building the [`ModelGraph`] from a registry snapshot.
//!
//! # Architecture
//!
//! 1. [`ModelSelector`] picks the concrete entities of exported apps.
//! 2. [`InheritanceWalk`] visits each of them and splits fields declared on
//!    abstract ancestors onto separate ancestor nodes, down to the
//!    configured depth.
//! 3. Association fields of every produced node are classified and turned
//!    into [`Relation`]s.

use std::collections::HashSet;

use indexmap::{IndexMap, IndexSet};
use log::{debug, info, trace};

use modeld2_core::{
    field::FieldDecl,
    label::EntityLabel,
    origin::OriginPredicate,
    registry::{Entity, Registry},
};

use crate::{
    config::ExportConfig,
    graph::{EntityView, InheritanceEdge, ModelGraph, Relation},
    select::ModelSelector,
};

/// Builds a [`ModelGraph`] from a registry snapshot.
///
/// The builder holds no state between calls; building the same registry
/// twice yields equal graphs.
pub struct GraphBuilder<'a> {
    config: &'a ExportConfig,
    origin: &'a dyn OriginPredicate,
}

impl<'a> GraphBuilder<'a> {
    pub fn new(config: &'a ExportConfig, origin: &'a dyn OriginPredicate) -> Self {
        Self { config, origin }
    }

    /// Build the graph for `registry`.
    ///
    /// Never fails: references that cannot be resolved only drop or degrade
    /// the affected relation.
    pub fn build_graph(&self, registry: &Registry) -> ModelGraph {
        let selector = ModelSelector::new(self.config, self.origin, registry);
        let roots = selector.selected_entities();
        info!(entities = roots.len(); "Building model graph");

        let mut walk = InheritanceWalk::new(registry, self.config);
        for root in roots {
            walk.visit(root, 0);
        }
        let (nodes, inheritance) = walk.finish();

        let known: HashSet<&EntityLabel> = nodes.iter().map(EntityView::label).collect();
        let relations: Vec<Relation> = nodes
            .iter()
            .flat_map(|node| self.node_relations(node, &known))
            .collect();

        debug!(
            nodes = nodes.len(),
            inheritance = inheritance.len(),
            relations = relations.len();
            "Model graph built"
        );

        ModelGraph::new(nodes, inheritance, relations)
    }

    /// Relations for the association fields shown on `node`.
    fn node_relations(&self, node: &EntityView, known: &HashSet<&EntityLabel>) -> Vec<Relation> {
        let mut relations = Vec::new();

        for field in node.fields() {
            let Some(kind) = field.kind().relation_kind() else {
                continue;
            };

            let Some(target) = field.target_label(node.label()) else {
                trace!(
                    entity = node.label().to_string(),
                    field = field.name();
                    "Association has no resolvable target"
                );
                continue;
            };

            if !known.contains(&target) && !self.config.show_ref() {
                trace!(
                    entity = node.label().to_string(),
                    field = field.name(),
                    target = target.to_string();
                    "Suppressing relation to entity outside the diagram"
                );
                continue;
            }

            relations.push(Relation::new(
                node.label().clone(),
                field.name(),
                target,
                kind,
                field.is_nullable(),
            ));
        }

        relations
    }
}

/// Depth-limited walk over entities and their abstract ancestors.
///
/// Each label is visited at most once, which also keeps the walk finite
/// when declared bases form a cycle. Ancestors from excluded apps are never
/// split off; their fields stay on the descendant.
struct InheritanceWalk<'r> {
    registry: &'r Registry,
    config: &'r ExportConfig,
    visited: HashSet<EntityLabel>,
    views: IndexMap<EntityLabel, EntityView>,
    edges: IndexSet<InheritanceEdge>,
}

impl<'r> InheritanceWalk<'r> {
    fn new(registry: &'r Registry, config: &'r ExportConfig) -> Self {
        Self {
            registry,
            config,
            visited: HashSet::new(),
            views: IndexMap::new(),
            edges: IndexSet::new(),
        }
    }

    fn visit(&mut self, entity: Entity<'r>, depth: usize) {
        if !self.visited.insert(entity.label().clone()) {
            return;
        }

        if depth >= self.config.abstract_models_depth() {
            self.push_view(&entity, entity.fields().to_vec());
            return;
        }

        let mut ancestors = entity.abstract_bases(self.registry);
        ancestors.retain(|ancestor| !self.config.is_excluded(ancestor.label().app()));
        let inherited: HashSet<&str> = ancestors
            .iter()
            .flat_map(|ancestor| ancestor.fields())
            .map(|field| field.name())
            .collect();

        let local = entity
            .fields()
            .iter()
            .filter(|field| !inherited.contains(field.name()))
            .cloned()
            .collect();
        self.push_view(&entity, local);

        for ancestor in ancestors {
            trace!(
                child = entity.label().to_string(),
                parent = ancestor.label().to_string(),
                depth = depth + 1;
                "Splitting abstract ancestor"
            );
            self.edges.insert(InheritanceEdge::new(
                entity.label().clone(),
                ancestor.label().clone(),
            ));
            self.visit(ancestor, depth + 1);
        }
    }

    fn push_view(&mut self, entity: &Entity<'r>, fields: Vec<FieldDecl>) {
        let label = entity.label().clone();
        self.views
            .entry(label.clone())
            .or_insert_with(|| EntityView::new(label, fields));
    }

    fn finish(self) -> (Vec<EntityView>, Vec<InheritanceEdge>) {
        (
            self.views.into_values().collect(),
            self.edges.into_iter().collect(),
        )
    }
}
