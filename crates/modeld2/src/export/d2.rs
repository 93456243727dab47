//! D2 output for model graphs.
//!
//! Entities become `sql_table` shapes, relations become crow's-foot
//! connections between columns, and inheritance edges become plain arrows:
//!
//! ```text
//! # Models:
//!
//! "chat.Message": {
//!     shape: sql_table
//!     "id": "id" {constraint: primary_key}
//!     "chat": "chat" {constraint: foreign_key}
//! }
//!
//! # Relations:
//!
//! "chat.Message"."chat" <-> "chat.Chat"."id" {source-arrowhead.shape: cf-many; target-arrowhead.shape: cf-one}
//! ```
//!
//! The `# Inheritance:` section is only written when the graph has
//! inheritance edges.

use std::fmt;

use modeld2_core::field::{FieldDecl, FieldKind};

use super::Renderer;
use crate::graph::{EntityView, InheritanceEdge, ModelGraph, Relation, RelationKind};

const TABLE_SHAPE: &str = "sql_table";
const PRIMARY_KEY_FIELD: &str = "id";
const INDENT: &str = "\t";

/// Crow's-foot arrowhead shapes.
const MANY: &str = "cf-many";
const ONE: &str = "cf-one";

/// Renders model graphs as D2 source.
#[derive(Debug, Default, Clone, Copy)]
pub struct D2Renderer;

impl D2Renderer {
    pub fn new() -> Self {
        Self
    }
}

impl Renderer for D2Renderer {
    fn render(&self, graph: &ModelGraph) -> String {
        D2Document(graph).to_string()
    }
}

/// Source and target arrowheads for a relation kind.
fn arrowheads(kind: RelationKind) -> (&'static str, &'static str) {
    match kind {
        RelationKind::ForeignKey => (MANY, ONE),
        RelationKind::ManyToMany => (MANY, MANY),
        RelationKind::OneToOne => (ONE, ONE),
    }
}

/// Column constraint shown next to a field, if any.
fn constraint(field: &FieldDecl) -> Option<&'static str> {
    if field.name() == PRIMARY_KEY_FIELD {
        Some("primary_key")
    } else if field.kind() == FieldKind::ForeignKey {
        Some("foreign_key")
    } else {
        None
    }
}

/// A double-quoted D2 key.
struct Quoted<'a>(&'a str);

impl fmt::Display for Quoted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"")?;
        for ch in self.0.chars() {
            match ch {
                '"' => write!(f, "\\\"")?,
                '\\' => write!(f, "\\\\")?,
                _ => write!(f, "{ch}")?,
            }
        }
        write!(f, "\"")
    }
}

struct D2Document<'a>(&'a ModelGraph);

impl D2Document<'_> {
    fn write_node(f: &mut fmt::Formatter<'_>, node: &EntityView) -> fmt::Result {
        let label = node.label().to_string();
        writeln!(f, "{}: {{", Quoted(&label))?;
        writeln!(f, "{INDENT}shape: {TABLE_SHAPE}")?;
        for field in node.fields() {
            write!(f, "{INDENT}{0}: {0}", Quoted(field.name()))?;
            if let Some(constraint) = constraint(field) {
                write!(f, " {{constraint: {constraint}}}")?;
            }
            writeln!(f)?;
        }
        writeln!(f, "}}")
    }

    fn write_relation(f: &mut fmt::Formatter<'_>, relation: &Relation) -> fmt::Result {
        let source = relation.source().to_string();
        let target = relation.target().to_string();
        let (source_head, target_head) = arrowheads(relation.kind());
        writeln!(
            f,
            "{}.{} <-> {}.{} {{source-arrowhead.shape: {source_head}; target-arrowhead.shape: {target_head}}}",
            Quoted(&source),
            Quoted(relation.source_field()),
            Quoted(&target),
            Quoted(relation.target_field()),
        )
    }

    fn write_inheritance(f: &mut fmt::Formatter<'_>, edge: &InheritanceEdge) -> fmt::Result {
        let child = edge.child().to_string();
        let parent = edge.parent().to_string();
        writeln!(f, "{} -> {}", Quoted(&child), Quoted(&parent))
    }
}

impl fmt::Display for D2Document<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let graph = self.0;

        writeln!(f, "# Models:")?;
        writeln!(f)?;
        for node in graph.nodes() {
            Self::write_node(f, node)?;
            writeln!(f)?;
        }

        writeln!(f, "# Relations:")?;
        writeln!(f)?;
        for relation in graph.relations() {
            Self::write_relation(f, relation)?;
        }

        if !graph.inheritance().is_empty() {
            writeln!(f)?;
            writeln!(f, "# Inheritance:")?;
            writeln!(f)?;
            for edge in graph.inheritance() {
                Self::write_inheritance(f, edge)?;
            }
        }

        Ok(())
    }
}
