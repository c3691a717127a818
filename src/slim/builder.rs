//! Tree builder interface
//!
//! Evaluation never creates output nodes itself; it calls into a [`TreeBuilder`].
//! The builder owns whatever representation it produces (an arena, a live DOM,
//! a call log) and hands back cheap node handles.
//!
//! Pre-built nodes passed in through slots are returned as-is and never inspected.

use crate::slim::value::Value;

pub trait TreeBuilder {
    /// Handle to an output node
    type Node: Clone;

    fn create_element(&mut self, tag_name: &str) -> Self::Node;

    fn create_text(&mut self, content: &str) -> Self::Node;

    fn set_attribute(&mut self, element: &Self::Node, name: &str, value: &str);

    /// Register `callback` for `event`. The callback and options are passed
    /// through from the markup untouched.
    fn add_event_listener(
        &mut self,
        element: &Self::Node,
        event: &str,
        callback: &Value<Self::Node>,
        options: Option<&Value<Self::Node>>,
    );

    fn append_child(&mut self, parent: &Self::Node, child: &Self::Node);

    fn remove_all_children(&mut self, parent: &Self::Node);

    /// Wrap a sequence of nodes into a single fragment node
    fn create_fragment(&mut self, nodes: &[Self::Node]) -> Self::Node;
}
