//! Elements and attributes
//!
//! ```text
//! tag.class#id<>(name=value bare *${splat}) @ref: nested
//! tag.class name=value *${splat} @ref text
//! ```

use log::trace;

use super::parser::{strip_trailing_newlines, ParseResult, Parser};
use super::patterns::{
    ATTR_NAME, ATTR_WRAPPER_OPEN, BLOCK_EXPANSION, DOUBLE_QUOTED_REST, REF_MARKER,
    SHORTHAND_OP, SINGLE_QUOTED_REST, SPACER, SPACES, SPLAT_INLINE, SPLAT_WRAPPED, TAG_NAME,
    UNQUOTED_VALUE,
};
use crate::slim::ast::{Attribute, Element, ElementBase, Node};
use crate::slim::value::Value;

const DEFAULT_TAG: &str = "div";

impl<N: Clone> Parser<N> {
    /// An element with the spacer text nodes around it, if any
    pub(super) fn parse_element(&mut self, indent: &str) -> ParseResult<Option<Vec<Node<N>>>> {
        let base = match self.input.consume_interpolate() {
            Some(value) => Some(ElementBase::Slot(value)),
            None => self.parse_tag_name().map(ElementBase::Tag),
        };
        let shorthand = self.parse_shorthand()?;
        if base.is_none() && shorthand.is_empty() {
            return Ok(None);
        }
        trace!("element at line {}", self.input.line());

        let (space_before, space_after) = self.parse_spacer();
        let mut attributes = shorthand;
        attributes.extend(self.parse_attributes()?);
        let ref_name = self.parse_ref_name()?;

        self.parse_optional_single_space();

        let children = if self.input.consume(&BLOCK_EXPANSION).is_some() {
            self.skip_spaces(false);
            match self.parse_element(indent)? {
                Some(nested) => nested,
                None => return Err(self.syntax_error("element expected after ':'")),
            }
        } else {
            let mut texts = self.parse_text_line();
            self.skip_empty_lines();
            if texts.iter().all(Node::is_new_line) {
                self.parse_child_block(indent)?
            } else {
                if let Some((next_indent, _)) = self.parse_indent_gt(indent) {
                    texts.extend(self.parse_text_line());
                    texts.extend(self.parse_continued_text(indent, &next_indent));
                }
                strip_trailing_newlines(&mut texts);
                texts
            }
        };

        let element = Element {
            base: base.unwrap_or_else(|| ElementBase::Tag(DEFAULT_TAG.to_string())),
            attributes,
            ref_name,
            children,
        };

        let mut nodes = Vec::with_capacity(3);
        if space_before {
            nodes.push(Node::text(" "));
        }
        nodes.push(Node::Element(element));
        if space_after {
            nodes.push(Node::text(" "));
        }
        Ok(Some(nodes))
    }

    fn parse_tag_name(&mut self) -> Option<String> {
        if self.input.peek_string("-") {
            return None;
        }
        self.input.consume_matched(&TAG_NAME)
    }

    /// `.class` and `#id` shorthands, as attribute pairs
    fn parse_shorthand(&mut self) -> ParseResult<Vec<Attribute<N>>> {
        let mut pairs = Vec::new();
        while let Some(op) = self.input.consume_matched(&SHORTHAND_OP) {
            let Some(ident) = self.parse_identifier() else {
                return Err(self.syntax_error(format!("ident expected after {op}")));
            };
            let name = if op == "." { "class" } else { "id" };
            pairs.push(Attribute::Pair {
                name: Value::from(name),
                value: ident,
            });
        }
        Ok(pairs)
    }

    /// Any run of `<` and `>`
    fn parse_spacer(&mut self) -> (bool, bool) {
        let (mut before, mut after) = (false, false);
        while let Some(marker) = self.input.consume_matched(&SPACER) {
            match marker.as_str() {
                "<" => before = true,
                _ => after = true,
            }
        }
        (before, after)
    }

    fn parse_attributes(&mut self) -> ParseResult<Vec<Attribute<N>>> {
        match self.input.consume_captured(&ATTR_WRAPPER_OPEN, 1).as_deref() {
            Some("(") => self.parse_wrapped_attributes(")"),
            Some("[") => self.parse_wrapped_attributes("]"),
            Some(_) => self.parse_wrapped_attributes("}"),
            None => self.parse_inline_attributes(),
        }
    }

    fn parse_wrapped_attributes(&mut self, close: &str) -> ParseResult<Vec<Attribute<N>>> {
        let mut attributes = Vec::new();
        loop {
            if self.input.is_eof() {
                return Err(self.syntax_error("unclosed attr list"));
            }
            let closed = self.input.try_parse(|input| {
                input.consume(&SPACES);
                input.consume_string(close).then_some(())
            });
            if closed.is_some() {
                return Ok(attributes);
            }
            if let Some(splat) = self.parse_splat(true)? {
                attributes.push(splat);
            } else if let Some(pair) = self.parse_attribute_pair(true, Some(close))? {
                attributes.push(pair);
            } else if let Some(name) = self.parse_bare_attribute_name() {
                attributes.push(Attribute::Pair {
                    name,
                    value: Value::Bool(true),
                });
            } else {
                return Err(self.syntax_error("attr name expected"));
            }
        }
    }

    fn parse_inline_attributes(&mut self) -> ParseResult<Vec<Attribute<N>>> {
        let mut attributes = Vec::new();
        loop {
            if let Some(splat) = self.parse_splat(false)? {
                attributes.push(splat);
            } else if let Some(pair) = self.parse_attribute_pair(false, None)? {
                attributes.push(pair);
            } else {
                return Ok(attributes);
            }
        }
    }

    fn parse_splat(&mut self, allow_newline: bool) -> ParseResult<Option<Attribute<N>>> {
        let marker = if allow_newline {
            &SPLAT_WRAPPED
        } else {
            &SPLAT_INLINE
        };
        if self.input.consume(marker).is_none() {
            return Ok(None);
        }
        self.skip_spaces(allow_newline);
        match self.input.consume_interpolate() {
            Some(value) => Ok(Some(Attribute::Splat(value))),
            None => Err(self.syntax_error("object expected after splat attribute *")),
        }
    }

    fn parse_attribute_pair(
        &mut self,
        allow_newline: bool,
        close: Option<&str>,
    ) -> ParseResult<Option<Attribute<N>>> {
        let Some(name) = self.parse_attribute_name_and_equals(allow_newline) else {
            return Ok(None);
        };
        let value = self.parse_attribute_value(close)?;
        Ok(Some(Attribute::Pair { name, value }))
    }

    /// `name =`, with optional blanks (or any whitespace inside a wrapper) around `=`
    fn parse_attribute_name_and_equals(&mut self, allow_newline: bool) -> Option<Value<N>> {
        self.try_parse(|p| {
            p.skip_spaces(allow_newline);
            let name = p.parse_interpolate_or_match(&ATTR_NAME)?;
            p.skip_spaces(allow_newline);
            if !p.input.consume_string("=") {
                return None;
            }
            p.skip_spaces(allow_newline);
            Some(name)
        })
    }

    /// `contenteditable` in `div(contenteditable)`
    fn parse_bare_attribute_name(&mut self) -> Option<Value<N>> {
        self.try_parse(|p| {
            p.skip_spaces(true);
            p.parse_interpolate_or_match(&ATTR_NAME)
        })
    }

    fn parse_attribute_value(&mut self, close: Option<&str>) -> ParseResult<Value<N>> {
        if let Some(value) = self.input.consume_interpolate() {
            return Ok(value);
        }
        if self.input.consume_string("\"") {
            return self.parse_quoted_rest(&DOUBLE_QUOTED_REST);
        }
        if self.input.consume_string("'") {
            return self.parse_quoted_rest(&SINGLE_QUOTED_REST);
        }

        let candidate = self
            .input
            .peek(&UNQUOTED_VALUE)
            .map(|m| m.as_str().to_string())
            .unwrap_or_default();
        let value = match close.and_then(|c| candidate.find(c)) {
            Some(end) => &candidate[..end],
            None => candidate.as_str(),
        };
        // An empty run gives an empty value; `/` after `=` starts the text.
        self.input.consume_string(value);
        Ok(Value::from(value))
    }

    fn parse_quoted_rest(&mut self, pattern: &regex::Regex) -> ParseResult<Value<N>> {
        match self.input.consume_captured(pattern, 1) {
            Some(text) => Ok(Value::Str(text)),
            None => Err(self.syntax_error("unclosed quotation")),
        }
    }

    /// `@name` or `@${slot}`
    fn parse_ref_name(&mut self) -> ParseResult<Option<Value<N>>> {
        if self.input.consume(&REF_MARKER).is_none() {
            return Ok(None);
        }
        match self.parse_identifier() {
            Some(name) => Ok(Some(name)),
            None => Err(self.syntax_error("ident expected after @")),
        }
    }
}
