//! Control flow instructions
//!
//! `- <word> ...` lines dispatch through [`instruction_handler`]. `else` is only
//! valid directly after an `if` block, so it is not in the table.

use log::trace;

use super::parser::{ParseResult, Parser};
use super::patterns::{BLANKS, FOR_OF, IDENTIFIER, INSTRUCTION_MARKER, WORD};
use crate::slim::ast::{ForBlock, IfBlock, Node};

type InstructionHandler<N> = fn(&mut Parser<N>, &str) -> ParseResult<Vec<Node<N>>>;

fn instruction_handler<N: Clone>(word: &str) -> Option<InstructionHandler<N>> {
    match word {
        "if" => Some(Parser::<N>::parse_if as InstructionHandler<N>),
        "for" => Some(Parser::<N>::parse_for as InstructionHandler<N>),
        _ => None,
    }
}

impl<N: Clone> Parser<N> {
    pub(super) fn parse_control_flow(&mut self, indent: &str) -> ParseResult<Option<Vec<Node<N>>>> {
        if !self.input.peek_string("-") {
            return Ok(None);
        }
        let Some(word) = self.parse_instruction() else {
            return Err(self.syntax_error("instruction expected after -"));
        };
        trace!("instruction {:?} at line {}", word, self.input.line());

        let Some(handler) = instruction_handler::<N>(&word) else {
            return Err(self.syntax_error(format!("invalid instruction: {word}")));
        };
        self.skip_spaces(false);
        handler(self, indent).map(Some)
    }

    /// `-`, optional blanks, then the instruction word
    fn parse_instruction(&mut self) -> Option<String> {
        self.input.try_parse(|input| {
            input.consume(&INSTRUCTION_MARKER)?;
            input.consume(&BLANKS);
            input.consume_matched(&WORD)
        })
    }

    fn parse_if(&mut self, indent: &str) -> ParseResult<Vec<Node<N>>> {
        let Some(condition) = self.input.consume_interpolate() else {
            return Err(self.syntax_error("condition expected after 'if'"));
        };
        self.expect_end_of_line("newline expected after if condition")?;
        let then_branch = self.parse_child_block(indent)?;

        let has_else = self
            .try_parse(|p| {
                (p.parse_indent_eq(indent) && p.parse_instruction().as_deref() == Some("else"))
                    .then_some(())
            })
            .is_some();
        let else_branch = if has_else {
            self.expect_end_of_line("newline expected after else")?;
            self.parse_child_block(indent)?
        } else {
            Vec::new()
        };

        Ok(vec![Node::If(IfBlock {
            condition,
            then_branch,
            else_branch,
        })])
    }

    fn parse_for(&mut self, indent: &str) -> ParseResult<Vec<Node<N>>> {
        let Some(variable) = self.input.consume_matched(&IDENTIFIER) else {
            return Err(self.syntax_error("variable name expected after 'for'"));
        };
        if self.input.consume(&FOR_OF).is_none() {
            return Err(self.syntax_error("'of' expected after for variable"));
        }
        let Some(iterable) = self.input.consume_interpolate() else {
            return Err(self.syntax_error("iterated value expected after 'of'"));
        };
        self.expect_end_of_line("newline expected after iterated value")?;
        let children = self.parse_child_block(indent)?;

        Ok(vec![Node::For(ForBlock {
            variable,
            iterable,
            children,
        })])
    }
}

#[cfg(test)]
mod tests {
    use crate::slim::ast::{ForBlock, IfBlock, Node};
    use crate::slim::input::Source;
    use crate::slim::parsing::parse;
    use crate::slim::value::Value;

    type V = Value<u32>;

    #[test]
    fn test_if_else() {
        let source = Source::<V>::new()
            .text("- if ")
            .slot(V::from(true))
            .text("\n  | yes\n- else\n  | no\n");
        let nodes = parse::<u32>(source).unwrap().children;
        assert_eq!(
            nodes,
            vec![Node::If(IfBlock {
                condition: V::from(true),
                then_branch: vec![Node::text("yes")],
                else_branch: vec![Node::text("no")],
            })]
        );
    }

    #[test]
    fn test_if_without_else_keeps_following_sibling() {
        let source = Source::<V>::new()
            .text("- if ")
            .slot(V::from(false))
            .text("\n  | yes\np after");
        let nodes = parse::<u32>(source).unwrap().children;
        assert_eq!(nodes.len(), 2);
        assert!(matches!(&nodes[0], Node::If(block) if block.else_branch.is_empty()));
    }

    #[test]
    fn test_for() {
        let source = Source::<V>::new()
            .text("ul\n  - for item of ")
            .slot(V::list([1, 2]))
            .text("\n    li x");
        let nodes = parse::<u32>(source).unwrap().children;
        let ul = nodes[0].as_element().unwrap();
        match &ul.children[0] {
            Node::For(ForBlock {
                variable, children, ..
            }) => {
                assert_eq!(variable, "item");
                assert_eq!(children.len(), 1);
            }
            other => panic!("Expected for block, got {:?}", other),
        }
    }

    #[test]
    fn test_control_flow_errors() {
        let message = |source: Source<V>| parse::<u32>(source).unwrap_err().message().to_string();

        assert_eq!(message(Source::from("- while x")), "invalid instruction: while");
        assert_eq!(message(Source::from("- else")), "invalid instruction: else");
        assert_eq!(message(Source::from("-")), "instruction expected after -");
        assert_eq!(
            message(Source::from("- if x")),
            "condition expected after 'if'"
        );
        assert_eq!(
            message(Source::<V>::new().text("- if ").slot(V::from(1)).text(" p")),
            "newline expected after if condition"
        );
        assert_eq!(
            message(Source::from("- for ")),
            "variable name expected after 'for'"
        );
        assert_eq!(
            message(Source::from("- for x in y")),
            "'of' expected after for variable"
        );
        assert_eq!(
            message(Source::from("- for x of y")),
            "iterated value expected after 'of'"
        );
        assert_eq!(
            message(Source::<V>::new().text("- for x of ").slot(V::list([1])).text(" z")),
            "newline expected after iterated value"
        );
    }
}
