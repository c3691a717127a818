//! Html serialization of [`Dom`] nodes
//!
//! Attributes are written in insertion order, text is escaped, void elements get
//! no closing tag and fragments contribute their children.

use crate::slim::dom::{Dom, NodeId, NodeKind};

const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

pub fn is_void_element(tag_name: &str) -> bool {
    VOID_ELEMENTS.contains(&tag_name.to_ascii_lowercase().as_str())
}

/// Serialize `nodes` one after another
pub fn to_html(dom: &Dom, nodes: &[NodeId]) -> String {
    let mut out = String::new();
    for node in nodes {
        write_node(dom, *node, &mut out);
    }
    out
}

fn write_node(dom: &Dom, id: NodeId, out: &mut String) {
    match dom.kind(id) {
        None => {}
        Some(NodeKind::Text(content)) => out.push_str(&escape_text(content)),
        Some(NodeKind::Fragment) => write_children(dom, id, out),
        Some(NodeKind::Element {
            tag_name,
            attributes,
        }) => {
            out.push('<');
            out.push_str(tag_name);
            for (name, value) in attributes {
                out.push(' ');
                out.push_str(name);
                out.push_str("=\"");
                out.push_str(&escape_attribute(value));
                out.push('"');
            }
            out.push('>');
            if is_void_element(tag_name) {
                return;
            }
            write_children(dom, id, out);
            out.push_str("</");
            out.push_str(tag_name);
            out.push('>');
        }
    }
}

fn write_children(dom: &Dom, id: NodeId, out: &mut String) {
    for child in dom.children(id) {
        write_node(dom, *child, out);
    }
}

fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn escape_attribute(value: &str) -> String {
    value.replace('&', "&amp;").replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::slim::builder::TreeBuilder;

    #[test]
    fn test_nested_elements_and_attributes() {
        let mut dom = Dom::new();
        let div = dom.create_element("div");
        dom.set_attribute(&div, "id", "main");
        dom.set_attribute(&div, "title", "a \"b\" & c");
        let p = dom.create_element("p");
        let text = dom.create_text("1 < 2 & 3");
        dom.append_child(&p, &text);
        dom.append_child(&div, &p);

        assert_eq!(
            to_html(&dom, &[div]),
            r#"<div id="main" title="a &quot;b&quot; &amp; c"><p>1 &lt; 2 &amp; 3</p></div>"#
        );
    }

    #[test]
    fn test_void_elements_have_no_closing_tag() {
        let mut dom = Dom::new();
        let br = dom.create_element("br");
        let img = dom.create_element("IMG");
        dom.set_attribute(&img, "src", "a.png");
        assert_eq!(to_html(&dom, &[br, img]), r#"<br><IMG src="a.png">"#);
    }

    #[test]
    fn test_fragment_serializes_children() {
        let mut dom = Dom::new();
        let a = dom.create_text("a");
        let b = dom.create_element("b");
        let fragment = dom.create_fragment(&[a, b]);
        assert_eq!(to_html(&dom, &[fragment]), "a<b></b>");
    }
}
