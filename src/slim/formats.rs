//! Output formats
//!
//! - [`html`]: serializes [`Dom`](crate::slim::dom::Dom) nodes to html text
//! - [`tag`]: prints a parsed document as an XML-like tree, for inspecting the AST

pub mod html;
pub mod tag;

pub use html::to_html;
pub use tag::serialize_document as serialize_ast_tag;
