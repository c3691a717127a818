//! Testing utilities
//!
//! Two ways to look at what an evaluation did:
//!
//! 1. **Rendered output**: [`render`] parses, evaluates into a fresh
//!    [`Dom`] and serializes to html. This is what most tests compare against,
//!    since html strings are easy to read and to write by hand.
//!
//! 2. **Builder calls**: [`CallLog`] is a [`TreeBuilder`] that records every call
//!    it receives. Use it when the order of operations matters (attributes before
//!    children, clearing before appending) rather than the final tree.
//!
//! ```rust,ignore
//! use slimtree::slim::testing::render;
//!
//! assert_eq!(render("ul\n  li a\n  li b"), "<ul><li>a</li><li>b</li></ul>");
//! ```
//!
//! [`render`] sets `attrForRefName` to [`REF_ATTRIBUTE`], so `@name` bindings are
//! visible in the html.

mod call_log;

pub use call_log::{Call, CallLog};

use crate::slim::builder::TreeBuilder;
use crate::slim::dom::{Dom, NodeId};
use crate::slim::evaluation::{EvaluateOptions, Evaluation};
use crate::slim::formats::html::to_html;
use crate::slim::input::Source;
use crate::slim::parse;
use crate::slim::value::Value;
use crate::slim::Error;

/// Attribute name [`render`] uses for `@name` bindings
pub const REF_ATTRIBUTE: &str = "data-refname";

pub fn test_options() -> EvaluateOptions {
    EvaluateOptions::new().with_attr_for_ref_name(REF_ATTRIBUTE)
}

/// Parse and evaluate into a fresh dom
pub fn evaluate_dom(
    source: impl Into<Source<Value<NodeId>>>,
    options: &EvaluateOptions,
) -> Result<(Dom, Evaluation<NodeId>), Error> {
    let document = parse(source)?;
    let mut dom = Dom::new();
    let evaluation = document.evaluate(&mut dom, options)?;
    Ok((dom, evaluation))
}

/// Render to html with [`test_options`]. Panics on any error.
pub fn render(source: impl Into<Source<Value<NodeId>>>) -> String {
    match try_render(source) {
        Ok(html) => html,
        Err(err) => panic!("render failed: {err}"),
    }
}

pub fn try_render(source: impl Into<Source<Value<NodeId>>>) -> Result<String, Error> {
    let (dom, evaluation) = evaluate_dom(source, &test_options())?;
    Ok(to_html(&dom, evaluation.nodes()))
}

/// Html of the first output node only
pub fn render_first(source: impl Into<Source<Value<NodeId>>>) -> String {
    let (dom, evaluation) = match evaluate_dom(source, &test_options()) {
        Ok(result) => result,
        Err(err) => panic!("render failed: {err}"),
    };
    match evaluation.first_node() {
        Some(node) => to_html(&dom, &[*node]),
        None => String::new(),
    }
}

/// Render the whole output wrapped in a fragment
pub fn render_fragment(source: impl Into<Source<Value<NodeId>>>) -> String {
    let (mut dom, evaluation) = match evaluate_dom(source, &test_options()) {
        Ok(result) => result,
        Err(err) => panic!("render failed: {err}"),
    };
    let fragment = evaluation.fragment(&mut dom);
    to_html(&dom, &[fragment])
}

/// Build an element in `dom` ahead of evaluation, for slots that take pre-built nodes
pub fn prebuilt(dom: &mut Dom, tag_name: &str, text: &str) -> NodeId {
    let element = dom.create_element(tag_name);
    let content = dom.create_text(text);
    dom.append_child(&element, &content);
    element
}
