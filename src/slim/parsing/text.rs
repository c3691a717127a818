//! Comments and text blocks

use log::trace;

use super::indent::trim_indent;
use super::parser::{strip_trailing_newlines, ParseResult, Parser};
use super::patterns::{COMMENT_MARKER, TEXT_MARKER};
use crate::slim::ast::Node;

impl<N: Clone> Parser<N> {
    /// `/ ...` with every deeper or blank line after it. Produces nothing.
    pub(super) fn parse_comment(&mut self, indent: &str) -> ParseResult<Option<Vec<Node<N>>>> {
        if self.input.consume(&COMMENT_MARKER).is_none() {
            return Ok(None);
        }
        trace!("comment at line {}", self.input.line());

        self.skip_line();
        while self.parse_indent_gt(indent).is_some() || self.peek_empty_line() {
            self.skip_line();
        }
        Ok(Some(Vec::new()))
    }

    /// `| text` or `' text`. The latter appends a single space after the block.
    pub(super) fn parse_text_block(&mut self, indent: &str) -> ParseResult<Option<Vec<Node<N>>>> {
        let Some(marker) = self.input.consume_matched(&TEXT_MARKER) else {
            return Ok(None);
        };
        trace!("text block {:?} at line {}", marker, self.input.line());
        let trailing_space = marker == "'";

        // continuation lines line up with where the first line's text starts
        let first_line_indent = if self.input.consume_string(" ") {
            format!("{indent}  ")
        } else {
            format!("{indent} ")
        };

        let first_line = self.parse_text_line();
        let mut nodes = if first_line.len() == 1 && first_line[0].is_new_line() {
            self.skip_empty_lines();
            match self.parse_indent_gt(indent) {
                Some((base_indent, _)) => {
                    let mut nodes = self.parse_text_line();
                    nodes.extend(self.parse_continued_text(indent, &base_indent));
                    nodes
                }
                None => return Ok(Some(Vec::new())),
            }
        } else {
            let mut nodes = first_line;
            nodes.extend(self.parse_continued_text(indent, &first_line_indent));
            nodes
        };

        strip_trailing_newlines(&mut nodes);
        if trailing_space {
            nodes.push(Node::text(" "));
        }
        Ok(Some(nodes))
    }

    /// Lines deeper than `indent`, with `indent_to_trim` removed from their front.
    /// Blank lines are taken whatever their indent. The last newline is kept.
    pub(super) fn parse_continued_text(&mut self, indent: &str, indent_to_trim: &str) -> Vec<Node<N>> {
        let mut nodes = Vec::new();
        loop {
            if let Some(empty) = self.parse_empty_text_line() {
                nodes.extend(empty);
                continue;
            }
            let Some((line_indent, _)) = self.parse_indent_gt(indent) else {
                break;
            };
            let kept = trim_indent(&line_indent, indent_to_trim);
            if !kept.is_empty() {
                nodes.push(Node::text(kept));
            }
            nodes.extend(self.parse_text_line());
        }
        nodes
    }

    /// A blank line as text: a newline, or nothing for trailing blanks at the end
    fn parse_empty_text_line(&mut self) -> Option<Vec<Node<N>>> {
        let line = self.parse_empty_line()?;
        Some(if line.ends_with('\n') {
            vec![Node::NewLine]
        } else {
            Vec::new()
        })
    }
}
