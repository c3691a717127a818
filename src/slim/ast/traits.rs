//! AST traits
//!
//! Uniform access to nodes, and the visitor used by serializers.

use super::document::Document;
use super::node::{Element, ForBlock, IfBlock, Node};
use crate::slim::value::Value;

/// Visitor trait for traversing the AST
///
/// Default implementations are empty, so a visitor only overrides what it needs.
/// Visiting a container does not descend on its own; call [`visit_children`].
///
/// ```ignore
/// struct ElementCounter(usize);
///
/// impl<N> Visitor<N> for ElementCounter {
///     fn visit_element(&mut self, element: &Element<N>) {
///         self.0 += 1;
///         visit_children(self, &element.children);
///     }
/// }
/// ```
pub trait Visitor<N> {
    fn visit_document(&mut self, document: &Document<N>) {
        visit_children(self, &document.children);
    }

    fn visit_element(&mut self, _element: &Element<N>) {}
    fn visit_text(&mut self, _text: &str) {}
    fn visit_new_line(&mut self) {}
    fn visit_interpolated_text(&mut self, _value: &Value<N>) {}
    fn visit_if(&mut self, _block: &IfBlock<N>) {}
    fn visit_for(&mut self, _block: &ForBlock<N>) {}
}

/// Visit every node in `nodes`, in order
pub fn visit_children<N, V: Visitor<N> + ?Sized>(visitor: &mut V, nodes: &[Node<N>]) {
    for node in nodes {
        node.accept(visitor);
    }
}

/// Common interface for all AST nodes
pub trait AstNode<N> {
    fn node_type(&self) -> &'static str;

    fn accept<V: Visitor<N> + ?Sized>(&self, visitor: &mut V);
}
