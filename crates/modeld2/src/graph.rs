//! The immutable model graph handed from the builder to the renderer.
//!
//! A [`ModelGraph`] is built once by [`GraphBuilder`](crate::GraphBuilder)
//! and only read afterwards. Nodes, inheritance edges and relations keep the
//! order in which the builder produced them, which makes rendering
//! deterministic.

use modeld2_core::{field::FieldDecl, label::EntityLabel};

pub use modeld2_core::field::RelationKind;

/// Field every relation points at on its target entity.
pub const TARGET_FIELD: &str = "id";

/// An entity as it appears in the diagram.
///
/// Holds only the fields that are not shown on a collapsed ancestor node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityView {
    label: EntityLabel,
    fields: Vec<FieldDecl>,
}

impl EntityView {
    pub(crate) fn new(label: EntityLabel, fields: Vec<FieldDecl>) -> Self {
        Self { label, fields }
    }

    pub fn label(&self) -> &EntityLabel {
        &self.label
    }

    pub fn fields(&self) -> &[FieldDecl] {
        &self.fields
    }

    /// Returns the names of the fields in this view.
    pub fn field_names(&self) -> Vec<&str> {
        self.fields.iter().map(FieldDecl::name).collect()
    }
}

/// Link from an entity to an abstract ancestor split off as its own node.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct InheritanceEdge {
    child: EntityLabel,
    parent: EntityLabel,
}

impl InheritanceEdge {
    pub(crate) fn new(child: EntityLabel, parent: EntityLabel) -> Self {
        Self { child, parent }
    }

    pub fn child(&self) -> &EntityLabel {
        &self.child
    }

    pub fn parent(&self) -> &EntityLabel {
        &self.parent
    }
}

/// An association arrow between two entities.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relation {
    source: EntityLabel,
    source_field: String,
    target: EntityLabel,
    target_field: String,
    kind: RelationKind,
    nullable: bool,
}

impl Relation {
    pub(crate) fn new(
        source: EntityLabel,
        source_field: impl Into<String>,
        target: EntityLabel,
        kind: RelationKind,
        nullable: bool,
    ) -> Self {
        Self {
            source,
            source_field: source_field.into(),
            target,
            target_field: TARGET_FIELD.to_string(),
            kind,
            nullable,
        }
    }

    pub fn source(&self) -> &EntityLabel {
        &self.source
    }

    pub fn source_field(&self) -> &str {
        &self.source_field
    }

    pub fn target(&self) -> &EntityLabel {
        &self.target
    }

    pub fn target_field(&self) -> &str {
        &self.target_field
    }

    pub fn kind(&self) -> RelationKind {
        self.kind
    }

    pub fn is_nullable(&self) -> bool {
        self.nullable
    }
}

/// Nodes, inheritance edges and relations of one diagram.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModelGraph {
    nodes: Vec<EntityView>,
    inheritance: Vec<InheritanceEdge>,
    relations: Vec<Relation>,
}

impl ModelGraph {
    pub(crate) fn new(
        nodes: Vec<EntityView>,
        inheritance: Vec<InheritanceEdge>,
        relations: Vec<Relation>,
    ) -> Self {
        Self {
            nodes,
            inheritance,
            relations,
        }
    }

    pub fn nodes(&self) -> &[EntityView] {
        &self.nodes
    }

    pub fn inheritance(&self) -> &[InheritanceEdge] {
        &self.inheritance
    }

    pub fn relations(&self) -> &[Relation] {
        &self.relations
    }

    /// Finds the node with the given label.
    pub fn node(&self, label: &EntityLabel) -> Option<&EntityView> {
        self.nodes.iter().find(|node| node.label() == label)
    }
}
