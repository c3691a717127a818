//! Parsing module
//!
//! A backtracking recursive-descent parser that recovers block structure purely
//! from indentation. There are no block delimiters: every production receives the
//! indent string of the block it belongs to and compares line indents against it
//! (see [`indent`] for the partial order used).
//!
//! Productions, tried in this order for each block item:
//!
//! - comment: `/ ...` plus every deeper or blank line below it
//! - text block: `| ...` or `' ...` (the latter adds a trailing space)
//! - element: `tag.class#id<> (attrs) @ref: nested` or `tag text`
//! - control flow: `- if ${cond}`, `- else`, `- for x of ${items}`
//! - blank line
//!
//! The parser never recovers: the first structural violation is returned as a
//! [`SyntaxError`] carrying the remaining input of the current segment.

mod control_flow;
mod element;
pub mod error;
pub mod indent;
mod parser;
mod patterns;
mod text;

pub use error::SyntaxError;
pub use indent::{compare_indent, trim_indent, IndentOrdering};
pub use parser::Parser;

use crate::slim::ast::Document;
use crate::slim::input::Source;
use crate::slim::value::Value;

/// Parse a source into a document.
///
/// ```rust,ignore
/// let document = parse("ul\n  li one\n  li two")?;
/// ```
pub fn parse<N: Clone>(source: impl Into<Source<Value<N>>>) -> Result<Document<N>, SyntaxError> {
    Parser::new(source.into()).parse()
}
