//! XML-like AST tag serialization
//!
//! Serializes a parsed document to a format that directly reflects the AST.
//!
//! ## Format
//!
//! - Node type → tag name
//! - Element tag name (or `${value}` for slot bases) → text content
//! - Attributes, ref and children → nested tags
//! - Slot values → their display form
//!
//! ## Example
//!
//! ```text
//! <document>
//!   <element>a
//!     <attr>class="nav"</attr>
//!     <ref>"link"</ref>
//!     <text>Next</text>
//!   </element>
//! </document>
//! ```

use crate::slim::ast::{
    visit_children, Attribute, AstNode, Document, Element, ElementBase, ForBlock, IfBlock, Node,
    Visitor,
};
use crate::slim::value::Value;

/// Tag serializer using the Visitor pattern
struct TagSerializer {
    output: String,
    indent_level: usize,
}

impl TagSerializer {
    fn indent(&self) -> String {
        "  ".repeat(self.indent_level)
    }

    fn push_indent(&mut self, s: &str) {
        self.output.push_str(&self.indent());
        self.output.push_str(s);
    }

    fn tag_with_text(&mut self, tag: &str, text: &str) {
        self.push_indent(&format!("<{tag}>{}</{tag}>\n", escape_xml(text)));
    }

    /// `<tag>label`, nested content, `</tag>`; closes inline when `body` writes nothing
    fn container(&mut self, tag: &str, label: &str, body: impl FnOnce(&mut Self)) {
        self.push_indent(&format!("<{tag}>{}", escape_xml(label)));
        let start = self.output.len();
        self.output.push('\n');
        self.indent_level += 1;
        body(self);
        self.indent_level -= 1;
        if self.output.len() == start + 1 {
            self.output.truncate(start);
        } else {
            self.push_indent("");
        }
        self.output.push_str(&format!("</{tag}>\n"));
    }
}

impl<N> Visitor<N> for TagSerializer {
    fn visit_element(&mut self, element: &Element<N>) {
        let label = match &element.base {
            ElementBase::Tag(name) => name.clone(),
            ElementBase::Slot(value) => format!("${{{value}}}"),
        };
        self.container("element", &label, |s| {
            for attribute in &element.attributes {
                match attribute {
                    Attribute::Pair { name, value } => {
                        s.tag_with_text("attr", &format!("{}={}", attribute_name(name), value))
                    }
                    Attribute::Splat(value) => s.tag_with_text("splat", &value.to_string()),
                }
            }
            if let Some(ref_name) = &element.ref_name {
                s.tag_with_text("ref", &ref_name.to_string());
            }
            visit_children(s, &element.children);
        });
    }

    fn visit_text(&mut self, text: &str) {
        self.tag_with_text("text", text);
    }

    fn visit_new_line(&mut self) {
        self.push_indent("<newline/>\n");
    }

    fn visit_interpolated_text(&mut self, value: &Value<N>) {
        self.tag_with_text("slot", &value.to_string());
    }

    fn visit_if(&mut self, block: &IfBlock<N>) {
        self.container("if", &block.condition.to_string(), |s| {
            s.branch("then", &block.then_branch);
            s.branch("else", &block.else_branch);
        });
    }

    fn visit_for(&mut self, block: &ForBlock<N>) {
        let label = format!("{} of {}", block.variable, block.iterable);
        self.container("for", &label, |s| visit_children(s, &block.children));
    }
}

impl TagSerializer {
    fn branch<N>(&mut self, tag: &str, nodes: &[Node<N>]) {
        if !nodes.is_empty() {
            self.container(tag, "", |s| visit_children(s, nodes));
        }
    }
}

/// Literal names print bare; slot names print in their value form
fn attribute_name<N>(name: &Value<N>) -> String {
    match name {
        Value::Str(name) => name.clone(),
        other => format!("${{{other}}}"),
    }
}

/// Serialize a document to AST tag format
pub fn serialize_document<N>(doc: &Document<N>) -> String {
    let mut serializer = TagSerializer {
        output: String::new(),
        indent_level: 1,
    };
    for node in &doc.children {
        node.accept(&mut serializer);
    }

    let mut result = String::from("<document>\n");
    result.push_str(&serializer.output);
    result.push_str("</document>");
    result
}

/// Escape XML special characters
fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
