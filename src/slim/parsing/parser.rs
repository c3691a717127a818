//! Parser core
//!
//! Block structure, line helpers and indentation helpers. The productions for
//! comments and text blocks, elements, and control flow live in sibling modules as
//! further `impl` blocks on [`Parser`].
//!
//! Productions return `ParseResult<Option<_>>`: `Ok(None)` means "does not apply
//! here, nothing consumed", `Err` is a hard syntax error.

use log::{debug, trace};

use super::error::SyntaxError;
use super::indent::{compare_indent, IndentOrdering};
use super::patterns::{
    BLANKS, BLANKS_NONEMPTY, BLANK_LINE, EMPTY_LINE, IDENTIFIER, NEWLINE, OPTIONAL_SPACE,
    REST_OF_LINE, SPACES,
};
use crate::slim::ast::{Document, Node};
use crate::slim::input::{InterpolatedStream, Source};
use crate::slim::value::Value;

pub(super) type ParseResult<T> = Result<T, SyntaxError>;

pub struct Parser<N> {
    pub(super) input: InterpolatedStream<Value<N>>,
}

impl<N: Clone> Parser<N> {
    pub fn new(source: Source<Value<N>>) -> Self {
        Self::from_stream(InterpolatedStream::new(source))
    }

    pub fn from_stream(input: InterpolatedStream<Value<N>>) -> Self {
        Self { input }
    }

    /// Parse the whole input as one block at the indent of its first non-blank line
    pub fn parse(mut self) -> ParseResult<Document<N>> {
        self.skip_empty_lines();
        let base_indent = self.parse_indent();
        debug!("parsing document, base indent {:?}", base_indent);

        let children = self.parse_block(&base_indent)?.unwrap_or_default();

        if !self.input.is_eof() {
            let trailing_indent = self.parse_indent();
            return Err(match compare_indent(&trailing_indent, &base_indent) {
                IndentOrdering::Lt | IndentOrdering::Incomparable => {
                    self.syntax_error("malformed indent")
                }
                IndentOrdering::Gt | IndentOrdering::Eq => {
                    self.syntax_error("incomparable indent found")
                }
            });
        }

        debug!("parsed document with {} top-level nodes", children.len());
        Ok(Document::new(children))
    }

    /// One block item, then every following sibling at exactly `indent`.
    /// Assumes the indent of the first item has been consumed.
    pub(super) fn parse_block(&mut self, indent: &str) -> ParseResult<Option<Vec<Node<N>>>> {
        let Some(mut nodes) = self.parse_block_alternative(indent)? else {
            return Ok(None);
        };

        loop {
            let saved = self.input.snapshot();
            if !self.parse_indent_eq(indent) {
                break;
            }
            if self.input.peek(&BLANKS_NONEMPTY).is_some() {
                return Err(self.syntax_error("malformed indent"));
            }
            match self.parse_block_alternative(indent)? {
                Some(more) => nodes.extend(more),
                None => {
                    self.input.restore(saved);
                    break;
                }
            }
        }

        Ok(Some(nodes))
    }

    fn parse_block_alternative(&mut self, indent: &str) -> ParseResult<Option<Vec<Node<N>>>> {
        trace!(
            "block item at segment {} line {}",
            self.input.segment_index(),
            self.input.line()
        );

        if let Some(nodes) = self.parse_comment(indent)? {
            return Ok(Some(nodes));
        }
        if let Some(nodes) = self.parse_text_block(indent)? {
            return Ok(Some(nodes));
        }
        if let Some(nodes) = self.parse_element(indent)? {
            return Ok(Some(nodes));
        }
        if let Some(nodes) = self.parse_control_flow(indent)? {
            return Ok(Some(nodes));
        }
        if self.parse_empty_line().is_some() {
            return Ok(Some(Vec::new()));
        }

        if !self.input.is_eof() {
            return Err(self.syntax_error("unknown indicator"));
        }
        Ok(None)
    }

    /// The block nested under a line at `parent_indent`, if the next non-blank
    /// line is deeper
    pub(super) fn parse_child_block(&mut self, parent_indent: &str) -> ParseResult<Vec<Node<N>>> {
        self.skip_empty_lines();
        match self.parse_indent_gt(parent_indent) {
            Some((child_indent, _)) => Ok(self.parse_block(&child_indent)?.unwrap_or_default()),
            None => Ok(Vec::new()),
        }
    }

    // Lines

    /// Text and slots up to and including the newline
    pub(super) fn parse_text_line(&mut self) -> Vec<Node<N>> {
        let mut nodes = Vec::new();
        loop {
            if self.parse_newline() {
                nodes.push(Node::NewLine);
                break;
            }
            if self.input.is_eof() {
                break;
            }
            if let Some(value) = self.input.consume_interpolate() {
                nodes.push(Node::InterpolatedText(value));
                continue;
            }
            match self.input.consume_matched(&REST_OF_LINE) {
                Some(text) if !text.is_empty() => nodes.push(Node::Text(text)),
                _ => break,
            }
        }
        nodes
    }

    /// Consume the rest of the line, slots included, and drop it
    pub(super) fn skip_line(&mut self) {
        while !self.parse_newline() && !self.input.is_eof() {
            if self.input.consume_interpolate().is_none()
                && self.input.consume(&REST_OF_LINE).map_or(true, |m| m.is_empty())
            {
                break;
            }
        }
    }

    pub(super) fn parse_newline(&mut self) -> bool {
        self.input.consume(&NEWLINE).is_some()
    }

    /// A blank line ahead, either newline terminated or running to the end of input.
    /// Never matches an empty string.
    pub(super) fn peek_empty_line(&self) -> bool {
        self.input
            .peek(&BLANK_LINE)
            .or_else(|| self.input.peek_to_eof(&BLANKS))
            .is_some_and(|m| !m.is_empty())
    }

    pub(super) fn parse_empty_line(&mut self) -> Option<String> {
        if self.peek_empty_line() {
            self.input.consume_matched(&EMPTY_LINE)
        } else {
            None
        }
    }

    pub(super) fn skip_empty_lines(&mut self) {
        while self.parse_empty_line().is_some() {}
    }

    /// Blank line or end of input
    pub(super) fn expect_end_of_line(&mut self, message: &str) -> ParseResult<()> {
        if self.parse_empty_line().is_some() || self.input.is_eof() {
            Ok(())
        } else {
            Err(self.syntax_error(message))
        }
    }

    // Indentation

    pub(super) fn parse_indent(&mut self) -> String {
        self.input.consume_matched(&BLANKS).unwrap_or_default()
    }

    pub(super) fn parse_indent_eq(&mut self, indent: &str) -> bool {
        self.input.consume_string(indent)
    }

    /// `indent` followed by at least one more blank; returns the whole indent and
    /// the extra part
    pub(super) fn parse_indent_gt(&mut self, indent: &str) -> Option<(String, String)> {
        self.input.try_parse(|input| {
            if !input.consume_string(indent) {
                return None;
            }
            let extra = input.consume_matched(&BLANKS_NONEMPTY)?;
            Some((format!("{indent}{extra}"), extra))
        })
    }

    // Tokens

    pub(super) fn parse_optional_single_space(&mut self) {
        self.input.consume(&OPTIONAL_SPACE);
    }

    pub(super) fn skip_spaces(&mut self, allow_newline: bool) {
        self.input
            .consume(if allow_newline { &SPACES } else { &BLANKS });
    }

    pub(super) fn parse_interpolate_or_match(
        &mut self,
        pattern: &regex::Regex,
    ) -> Option<Value<N>> {
        self.input
            .consume_interpolate()
            .or_else(|| self.input.consume_matched(pattern).map(Value::Str))
    }

    pub(super) fn parse_identifier(&mut self) -> Option<Value<N>> {
        self.parse_interpolate_or_match(&IDENTIFIER)
    }

    /// Run `f`, rewinding the input if it returns `None`
    pub(super) fn try_parse<T>(&mut self, f: impl FnOnce(&mut Self) -> Option<T>) -> Option<T> {
        let saved = self.input.snapshot();
        let result = f(self);
        if result.is_none() {
            self.input.restore(saved);
        }
        result
    }

    pub(super) fn syntax_error(&self, message: impl Into<String>) -> SyntaxError {
        let err = SyntaxError::new(
            message,
            self.input.current_segment(),
            self.input.segment_index(),
            self.input.line(),
        );
        debug!("syntax error: {}", err);
        err
    }
}

pub(super) fn strip_trailing_newlines<N>(nodes: &mut Vec<Node<N>>) {
    while nodes.last().is_some_and(Node::is_new_line) {
        nodes.pop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::slim::ast::{Attribute, Element};
    use proptest::prelude::*;

    type N = u32;

    fn parse(text: &str) -> ParseResult<Document<N>> {
        Parser::new(Source::from(text)).parse()
    }

    fn parser(text: &str) -> Parser<N> {
        Parser::new(Source::from(text))
    }

    #[test]
    fn test_sibling_blocks() {
        let document = parse("p a\np b").unwrap();
        assert_eq!(
            document.children,
            vec![
                Node::Element(Element::tag("p").with_children(vec![Node::text("a")])),
                Node::Element(Element::tag("p").with_children(vec![Node::text("b")])),
            ]
        );
    }

    #[test]
    fn test_leading_blank_lines_set_base_indent() {
        let document = parse("\n\n    p a\n    p b\n").unwrap();
        assert_eq!(document.children.len(), 2);
    }

    #[test]
    fn test_deeper_sibling_is_malformed() {
        let err = parse("p\n    a\n  b").unwrap_err();
        assert_eq!(err.message(), "malformed indent");
        assert_eq!(err.remaining(), "  b");
        assert_eq!(err.line(), 3);
    }

    #[test]
    fn test_shallower_trailing_line_is_malformed() {
        let err = parse("  p\nq").unwrap_err();
        assert_eq!(err.message(), "malformed indent");
    }

    #[test]
    fn test_unknown_indicator() {
        let err = parse("p\n%x").unwrap_err();
        assert_eq!(err.message(), "unknown indicator");
        assert_eq!(err.remaining(), "%x");
    }

    #[test]
    fn test_empty_document() {
        assert!(parse("").unwrap().is_empty());
        assert!(parse("\n  \n").unwrap().is_empty());
    }

    #[test]
    fn test_indent_gt_returns_whole_and_extra() {
        let mut p = parser("    x");
        assert_eq!(
            p.parse_indent_gt("  "),
            Some(("    ".to_string(), "  ".to_string()))
        );
        assert_eq!(p.input.current_segment(), "x");

        let mut p = parser("  x");
        assert_eq!(p.parse_indent_gt("  "), None);
        assert_eq!(p.input.current_segment(), "  x");
    }

    #[test]
    fn test_peek_empty_line_rejects_empty_match() {
        assert!(parser("  \nx").peek_empty_line());
        assert!(parser("\n").peek_empty_line());
        assert!(parser("  ").peek_empty_line());
        assert!(!parser("").peek_empty_line());
        assert!(!parser("x").peek_empty_line());
    }

    #[test]
    fn test_text_line_splits_slots() {
        let mut p: Parser<N> =
            Parser::new(Source::new().text("a ").slot(Value::from(1)).text(" b\nc"));
        assert_eq!(
            p.parse_text_line(),
            vec![
                Node::text("a "),
                Node::InterpolatedText(Value::from(1)),
                Node::text(" b"),
                Node::NewLine,
            ]
        );
        assert_eq!(p.input.current_segment(), "c");
    }

    #[test]
    fn test_attribute_order_in_parsed_element() {
        let document = parse("a.nav#top href=x").unwrap();
        let element = document.children[0].as_element().unwrap();
        let names: Vec<_> = element
            .attributes
            .iter()
            .filter_map(Attribute::literal_name)
            .collect();
        assert_eq!(names, ["class", "id", "href"]);
    }

    proptest! {
        #[test]
        fn prop_failed_try_parse_restores_input(text in "[a-z \n|]{0,24}") {
            let mut p = parser(&text);
            let before = p.input.snapshot();
            let result: Option<()> = p.try_parse(|p| {
                p.skip_empty_lines();
                p.parse_text_line();
                None
            });
            prop_assert!(result.is_none());
            prop_assert_eq!(p.input.snapshot(), before);
        }
    }
}
