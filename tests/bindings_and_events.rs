//! `@name` bindings, evaluation results and `!event` attributes

use std::cell::Cell;
use std::rc::Rc;

use slimtree::slim::dom::{handler, Dom, NodeId};
use slimtree::slim::evaluation::EvaluateOptions;
use slimtree::slim::formats::html::to_html;
use slimtree::slim::input::Source;
use slimtree::slim::testing::{
    evaluate_dom, render_first, render_fragment, test_options, CallLog,
};
use slimtree::slim::value::{Ref, Value};
use slimtree::render_html;

type V = Value<NodeId>;

const LAYOUT: &str = "
    header#my-header @header
    .main @main
      | This is the main content
    footer#footer
";

#[test]
fn test_bindings_name_nodes() {
    let (dom, evaluation) = evaluate_dom(LAYOUT, &EvaluateOptions::default()).unwrap();

    let main = *evaluation.binding("main").unwrap();
    assert_eq!(dom.tag_name(main), Some("div"));
    assert_eq!(dom.text_content(main), "This is the main content");

    let header = *evaluation.binding("header").unwrap();
    assert_eq!(dom.attribute(header, "id"), Some("my-header"));
    assert_eq!(evaluation.binding("footer"), None);

    let names: Vec<&str> = evaluation.bindings().into_iter().map(|(name, _)| name).collect();
    assert_eq!(names, ["header", "main"]);
}

#[test]
fn test_ref_attribute_only_with_option() {
    let (dom, evaluation) = evaluate_dom(LAYOUT, &EvaluateOptions::default()).unwrap();
    let header = *evaluation.binding("header").unwrap();
    assert_eq!(dom.attribute(header, "data-refname"), None);

    let (dom, evaluation) = evaluate_dom(LAYOUT, &test_options()).unwrap();
    let header = *evaluation.binding("header").unwrap();
    assert_eq!(dom.attribute(header, "data-refname"), Some("header"));
}

#[test]
fn test_repeated_binding_keeps_every_node() {
    let source = "ul\n  li.a @item\n  li.b @item";
    let (dom, evaluation) = evaluate_dom(source, &EvaluateOptions::default()).unwrap();

    let all = evaluation.binding_map().get("item").unwrap();
    assert_eq!(all.len(), 2);
    let first = *evaluation.binding("item").unwrap();
    assert_eq!(dom.attribute(first, "class"), Some("a"));
}

#[test]
fn test_result_accessors() {
    assert_eq!(render_first("p one\np two"), "<p>one</p>");
    assert_eq!(render_fragment("p one\n| two"), "<p>one</p>two");
    assert_eq!(render_first("/ nothing but a comment"), "");
}

#[test]
fn test_options_from_json() {
    let options = EvaluateOptions::from_json(r#"{"attrForRefName": "data-ref"}"#).unwrap();
    assert_eq!(
        render_html("span @x", &options).unwrap(),
        r#"<span data-ref="x"></span>"#
    );
}

#[test]
fn test_event_attribute_registers_listener() {
    let fired = Rc::new(Cell::new(false));
    let flag = Rc::clone(&fired);
    let source = Source::<V>::new()
        .text("div !myevent=")
        .slot(handler(move |_| flag.set(true)))
        .text(" Click!");

    let (dom, evaluation) = evaluate_dom(source, &test_options()).unwrap();
    let div = *evaluation.first_node().unwrap();
    assert_eq!(to_html(&dom, &[div]), "<div>Click!</div>");
    assert_eq!(dom.dispatch(div, "myevent"), 1);
    assert!(fired.get());
}

#[test]
fn test_event_attribute_with_options() {
    let fired = Rc::new(Cell::new(0));
    let counter = Rc::clone(&fired);
    let source = Source::<V>::new()
        .text("div !myevent=")
        .slot(V::List(vec![
            handler(move |_| counter.set(counter.get() + 1)),
            V::from(true),
        ]))
        .text(" Click!");

    let (dom, evaluation) = evaluate_dom(source, &test_options()).unwrap();
    let div = *evaluation.first_node().unwrap();
    let listeners = dom.listeners(div);
    assert_eq!(listeners.len(), 1);
    assert_eq!(listeners[0].event, "myevent");
    assert_eq!(listeners[0].options, Some(V::from(true)));

    dom.dispatch(div, "myevent");
    assert_eq!(fired.get(), 1);
}

#[test]
fn test_event_attributes_apply_to_every_slot_element() {
    let mut dom = Dom::new();
    let source = Source::<V>::new()
        .slot(V::list(["a", "b"]))
        .text(" !click=")
        .slot(handler(|_| {}));
    let evaluation = slimtree::parse(source)
        .unwrap()
        .evaluate(&mut dom, &EvaluateOptions::default())
        .unwrap();
    for node in evaluation.nodes() {
        assert_eq!(dom.listeners(*node).len(), 1);
    }
}

#[test]
fn test_document_evaluates_the_same_twice() {
    let source = Source::<Value<usize>>::new()
        .text("ul @list\n  - for x of ")
        .slot(Value::list(["a", "b"]))
        .text("\n    li ")
        .slot(Value::Ref(Ref::var("x")));
    let document = slimtree::parse(source).unwrap();
    let options = test_options();

    let mut first = CallLog::new();
    let first_result = document.evaluate(&mut first, &options).unwrap();
    let mut second = CallLog::new();
    let second_result = document.evaluate(&mut second, &options).unwrap();

    assert_eq!(first.calls(), second.calls());
    assert_eq!(first_result, second_result);
    assert_eq!(second_result.binding_map().get("list").unwrap().len(), 1);
}

#[test]
fn test_document_renders_the_same_html_twice() {
    let document = slimtree::parse(LAYOUT).unwrap();
    let render_once = || {
        let mut dom = Dom::new();
        let evaluation = document.evaluate(&mut dom, &test_options()).unwrap();
        to_html(&dom, evaluation.nodes())
    };
    let first = render_once();
    assert_eq!(first, render_once());
    assert!(first.starts_with(r#"<header id="my-header" data-refname="header">"#));
}
