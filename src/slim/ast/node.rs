//! Node variants

use super::attribute::Attribute;
use super::traits::{AstNode, Visitor};
use crate::slim::value::Value;

#[derive(Debug, Clone, PartialEq)]
pub enum Node<N> {
    Element(Element<N>),
    Text(String),
    NewLine,
    InterpolatedText(Value<N>),
    If(IfBlock<N>),
    For(ForBlock<N>),
}

impl<N> Node<N> {
    pub fn text(text: impl Into<String>) -> Self {
        Node::Text(text.into())
    }

    pub fn is_new_line(&self) -> bool {
        matches!(self, Node::NewLine)
    }

    pub fn as_element(&self) -> Option<&Element<N>> {
        match self {
            Node::Element(element) => Some(element),
            _ => None,
        }
    }
}

impl<N> AstNode<N> for Node<N> {
    fn node_type(&self) -> &'static str {
        match self {
            Node::Element(e) => e.node_type(),
            Node::Text(_) => "Text",
            Node::NewLine => "NewLine",
            Node::InterpolatedText(_) => "InterpolatedText",
            Node::If(b) => b.node_type(),
            Node::For(b) => b.node_type(),
        }
    }

    fn accept<V: Visitor<N> + ?Sized>(&self, visitor: &mut V) {
        match self {
            Node::Element(e) => e.accept(visitor),
            Node::Text(text) => visitor.visit_text(text),
            Node::NewLine => visitor.visit_new_line(),
            Node::InterpolatedText(value) => visitor.visit_interpolated_text(value),
            Node::If(b) => b.accept(visitor),
            Node::For(b) => b.accept(visitor),
        }
    }
}

/// What an element is built from: a literal tag name, or a slot value resolved
/// at evaluation time (tag name, pre-built node, or a list of either).
#[derive(Debug, Clone, PartialEq)]
pub enum ElementBase<N> {
    Tag(String),
    Slot(Value<N>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Element<N> {
    pub base: ElementBase<N>,
    /// Shorthand-derived pairs first, then the written attributes in order
    pub attributes: Vec<Attribute<N>>,
    pub ref_name: Option<Value<N>>,
    pub children: Vec<Node<N>>,
}

impl<N> Element<N> {
    pub fn new(base: ElementBase<N>) -> Self {
        Self {
            base,
            attributes: Vec::new(),
            ref_name: None,
            children: Vec::new(),
        }
    }

    pub fn tag(name: impl Into<String>) -> Self {
        Self::new(ElementBase::Tag(name.into()))
    }

    pub fn with_attributes(mut self, attributes: Vec<Attribute<N>>) -> Self {
        self.attributes = attributes;
        self
    }

    pub fn with_ref_name(mut self, ref_name: Option<Value<N>>) -> Self {
        self.ref_name = ref_name;
        self
    }

    pub fn with_children(mut self, children: Vec<Node<N>>) -> Self {
        self.children = children;
        self
    }

    /// The literal tag name, if the base is not a slot
    pub fn tag_name(&self) -> Option<&str> {
        match &self.base {
            ElementBase::Tag(name) => Some(name),
            ElementBase::Slot(_) => None,
        }
    }
}

impl<N> AstNode<N> for Element<N> {
    fn node_type(&self) -> &'static str {
        "Element"
    }

    fn accept<V: Visitor<N> + ?Sized>(&self, visitor: &mut V) {
        visitor.visit_element(self);
    }
}

/// `- if` with an optional `- else`
#[derive(Debug, Clone, PartialEq)]
pub struct IfBlock<N> {
    pub condition: Value<N>,
    pub then_branch: Vec<Node<N>>,
    pub else_branch: Vec<Node<N>>,
}

impl<N> AstNode<N> for IfBlock<N> {
    fn node_type(&self) -> &'static str {
        "If"
    }

    fn accept<V: Visitor<N> + ?Sized>(&self, visitor: &mut V) {
        visitor.visit_if(self);
    }
}

/// `- for variable of ${iterable}`
#[derive(Debug, Clone, PartialEq)]
pub struct ForBlock<N> {
    pub variable: String,
    pub iterable: Value<N>,
    pub children: Vec<Node<N>>,
}

impl<N> AstNode<N> for ForBlock<N> {
    fn node_type(&self) -> &'static str {
        "For"
    }

    fn accept<V: Visitor<N> + ?Sized>(&self, visitor: &mut V) {
        visitor.visit_for(self);
    }
}
