//! Main module for slim library functionality
//!
//! The pipeline is `Source → InterpolatedStream → Parser → Document → evaluate(builder)`.
//!
//! ```rust,ignore
//! use slimtree::slim::{dom::Dom, evaluation::EvaluateOptions, input::Source, value::Value};
//!
//! let source = Source::new().text("div.greeting Hello, ").slot(Value::from("World"));
//! let document = slimtree::parse(source)?;
//! let mut dom = Dom::new();
//! let result = document.evaluate(&mut dom, &EvaluateOptions::default())?;
//! ```

pub mod ast;
pub mod builder;
pub mod dom;
pub mod evaluation;
pub mod formats;
pub mod input;
pub mod parsing;
pub mod testing;
pub mod value;

use std::fmt;

use self::dom::Dom;
use self::evaluation::{EvaluateOptions, EvaluationError};
use self::input::{Source, SourceError};
use self::parsing::SyntaxError;
use self::value::Value;

pub use self::parsing::parse;

/// Errors that can occur anywhere between source construction and evaluation
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    Source(SourceError),
    Syntax(SyntaxError),
    Evaluation(EvaluationError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Source(e) => write!(f, "Source error: {}", e),
            Error::Syntax(e) => write!(f, "Syntax error: {}", e),
            Error::Evaluation(e) => write!(f, "Evaluation error: {}", e),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Source(e) => Some(e),
            Error::Syntax(e) => Some(e),
            Error::Evaluation(e) => Some(e),
        }
    }
}

impl From<SourceError> for Error {
    fn from(err: SourceError) -> Self {
        Error::Source(err)
    }
}

impl From<SyntaxError> for Error {
    fn from(err: SyntaxError) -> Self {
        Error::Syntax(err)
    }
}

impl From<EvaluationError> for Error {
    fn from(err: EvaluationError) -> Self {
        Error::Evaluation(err)
    }
}

/// Parse, evaluate into a fresh [`Dom`] and serialize the result as html.
///
/// This is the shortest path from markup to text.
pub fn render_html(
    source: impl Into<Source<Value<dom::NodeId>>>,
    options: &EvaluateOptions,
) -> Result<String, Error> {
    let document = parse(source)?;
    let mut dom = Dom::new();
    let evaluation = document.evaluate(&mut dom, options)?;
    Ok(formats::html::to_html(&dom, evaluation.nodes()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_html_plain_markup() {
        let html = render_html("p Hello", &EvaluateOptions::default()).unwrap();
        assert_eq!(html, "<p>Hello</p>");
    }

    #[test]
    fn test_error_wraps_syntax_error() {
        let err = render_html("p\n    a\n  b", &EvaluateOptions::default()).unwrap_err();
        assert!(matches!(err, Error::Syntax(_)));
        assert!(err.to_string().starts_with("Syntax error: "));
    }

    #[test]
    fn test_error_wraps_evaluation_error() {
        let source = Source::<Value<dom::NodeId>>::new()
            .text("| ")
            .slot(Value::Bool(true));
        let err = render_html(source, &EvaluateOptions::default()).unwrap_err();
        assert!(matches!(
            err,
            Error::Evaluation(EvaluationError::InvalidTextValue(_))
        ));
    }
}
