//! AST for slim markup
//!
//! The parser produces a [`Document`] whose children are [`Node`]s. Nodes never own
//! output nodes; interpolated values are kept as [`Value`](crate::slim::value::Value)s
//! and only classified when the document is evaluated.
//!
//! Structure:
//!
//! - [`Document`]: the root; concatenates its children's output
//! - [`Node::Element`]: tag or slot base, attributes, optional `@ref`, children
//! - [`Node::Text`] / [`Node::NewLine`]: literal text
//! - [`Node::InterpolatedText`]: a slot in text position
//! - [`Node::If`] / [`Node::For`]: control flow
//!
//! All nodes accept a [`Visitor`] (see [`traits`]).

pub mod attribute;
pub mod document;
pub mod node;
pub mod traits;

pub use attribute::Attribute;
pub use document::Document;
pub use node::{Element, ElementBase, ForBlock, IfBlock, Node};
pub use traits::{visit_children, AstNode, Visitor};
