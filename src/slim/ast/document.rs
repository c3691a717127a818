//! Document root
//!
//! A parsed document can be evaluated any number of times; each evaluation gets
//! its own context, so results do not leak between runs.

use super::node::Node;
use super::traits::{AstNode, Visitor};

#[derive(Debug, Clone, PartialEq)]
pub struct Document<N> {
    pub children: Vec<Node<N>>,
}

impl<N> Document<N> {
    pub fn new(children: Vec<Node<N>>) -> Self {
        Self { children }
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

impl<N> Default for Document<N> {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl<N> AstNode<N> for Document<N> {
    fn node_type(&self) -> &'static str {
        "Document"
    }

    fn accept<V: Visitor<N> + ?Sized>(&self, visitor: &mut V) {
        visitor.visit_document(self);
    }
}
