//! Serializing a [`ModelGraph`] into diagram-language text.

pub mod d2;

use crate::graph::ModelGraph;

/// Turns a model graph into the text of a diagram language.
pub trait Renderer {
    fn render(&self, graph: &ModelGraph) -> String;
}
