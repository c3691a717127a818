//! Reference DOM
//!
//! An arena tree implementing [`TreeBuilder`], used by the cli, the html
//! serializer and the tests. It follows browser DOM semantics where the evaluator
//! can observe them:
//!
//! - appending a node that already has a parent moves it
//! - appending a fragment moves the fragment's children and leaves it empty
//! - `set_attribute` on an existing name replaces the value in place
//! - appending a node to itself or to one of its descendants is refused
//!
//! Node ids are tied to the `Dom` that created them. Ids from another `Dom` read
//! as empty and are ignored by every mutation.
//!
//! Event callbacks are stored as given. Callbacks made with [`handler`] can be
//! fired with [`Dom::dispatch`].

use std::fmt;
use std::rc::Rc;
use std::sync::atomic::{AtomicUsize, Ordering};

use log::warn;

use crate::slim::builder::TreeBuilder;
use crate::slim::value::Value;

static NEXT_DOM_ID: AtomicUsize = AtomicUsize::new(0);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId {
    dom: usize,
    index: usize,
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.index)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    Element {
        tag_name: String,
        attributes: Vec<(String, String)>,
    },
    Text(String),
    Fragment,
}

#[derive(Debug, Clone)]
pub struct Listener {
    pub event: String,
    pub callback: Value<NodeId>,
    pub options: Option<Value<NodeId>>,
}

#[derive(Debug)]
struct NodeData {
    kind: NodeKind,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    listeners: Vec<Listener>,
}

/// A callback [`Dom::dispatch`] knows how to call
#[derive(Clone)]
pub struct EventHandler(Rc<dyn Fn(&str)>);

impl EventHandler {
    pub fn call(&self, event: &str) {
        (self.0)(event)
    }
}

/// Wrap a closure as an event callback value for `!event=${...}` attributes
pub fn handler(f: impl Fn(&str) + 'static) -> Value<NodeId> {
    Value::opaque(EventHandler(Rc::new(f)))
}

#[derive(Debug)]
pub struct Dom {
    id: usize,
    nodes: Vec<NodeData>,
}

impl Default for Dom {
    fn default() -> Self {
        Self {
            id: NEXT_DOM_ID.fetch_add(1, Ordering::Relaxed),
            nodes: Vec::new(),
        }
    }
}

impl Dom {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Whether `id` was created by this `Dom`
    pub fn contains(&self, id: NodeId) -> bool {
        id.dom == self.id && id.index < self.nodes.len()
    }

    fn insert(&mut self, kind: NodeKind) -> NodeId {
        let id = NodeId {
            dom: self.id,
            index: self.nodes.len(),
        };
        self.nodes.push(NodeData {
            kind,
            parent: None,
            children: Vec::new(),
            listeners: Vec::new(),
        });
        id
    }

    fn data(&self, id: NodeId) -> Option<&NodeData> {
        if id.dom != self.id {
            return None;
        }
        self.nodes.get(id.index)
    }

    fn data_mut(&mut self, id: NodeId) -> Option<&mut NodeData> {
        if id.dom != self.id {
            return None;
        }
        self.nodes.get_mut(id.index)
    }

    /// `None` for ids from another `Dom`
    pub fn kind(&self, id: NodeId) -> Option<&NodeKind> {
        self.data(id).map(|data| &data.kind)
    }

    pub fn tag_name(&self, id: NodeId) -> Option<&str> {
        match self.kind(id)? {
            NodeKind::Element { tag_name, .. } => Some(tag_name),
            _ => None,
        }
    }

    pub fn attributes(&self, id: NodeId) -> &[(String, String)] {
        match self.kind(id) {
            Some(NodeKind::Element { attributes, .. }) => attributes,
            _ => &[],
        }
    }

    pub fn attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        self.attributes(id)
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.data(id)
            .map(|data| data.children.as_slice())
            .unwrap_or_default()
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.data(id)?.parent
    }

    pub fn listeners(&self, id: NodeId) -> &[Listener] {
        self.data(id)
            .map(|data| data.listeners.as_slice())
            .unwrap_or_default()
    }

    /// Concatenated text of the node and its descendants
    pub fn text_content(&self, id: NodeId) -> String {
        let mut text = String::new();
        self.collect_text(id, &mut text);
        text
    }

    fn collect_text(&self, id: NodeId, out: &mut String) {
        match self.kind(id) {
            Some(NodeKind::Text(content)) => out.push_str(content),
            _ => {
                for child in self.children(id) {
                    self.collect_text(*child, out);
                }
            }
        }
    }

    /// Call every [`handler`] registered for `event` on `id`. Returns how many ran.
    pub fn dispatch(&self, id: NodeId, event: &str) -> usize {
        let mut called = 0;
        for listener in self.listeners(id).iter().filter(|l| l.event == event) {
            if let Value::Opaque(callback) = &listener.callback {
                if let Some(handler) = callback.downcast_ref::<EventHandler>() {
                    handler.call(event);
                    called += 1;
                }
            }
        }
        called
    }

    fn detach(&mut self, child: NodeId) {
        let Some(parent) = self.data_mut(child).and_then(|data| data.parent.take()) else {
            return;
        };
        if let Some(data) = self.data_mut(parent) {
            data.children.retain(|c| *c != child);
        }
    }

    /// Whether `node` is `descendant` or one of its ancestors
    fn is_inclusive_ancestor(&self, node: NodeId, descendant: NodeId) -> bool {
        let mut current = Some(descendant);
        while let Some(id) = current {
            if id == node {
                return true;
            }
            current = self.parent(id);
        }
        false
    }

    fn attach(&mut self, parent: NodeId, child: NodeId) {
        if self.is_inclusive_ancestor(child, parent) {
            warn!("refusing to append {} into its own subtree at {}", child, parent);
            return;
        }
        self.detach(child);
        if let Some(data) = self.data_mut(child) {
            data.parent = Some(parent);
        }
        if let Some(data) = self.data_mut(parent) {
            data.children.push(child);
        }
    }
}

impl TreeBuilder for Dom {
    type Node = NodeId;

    fn create_element(&mut self, tag_name: &str) -> NodeId {
        self.insert(NodeKind::Element {
            tag_name: tag_name.to_string(),
            attributes: Vec::new(),
        })
    }

    fn create_text(&mut self, content: &str) -> NodeId {
        self.insert(NodeKind::Text(content.to_string()))
    }

    fn set_attribute(&mut self, element: &NodeId, name: &str, value: &str) {
        let Some(data) = self.data_mut(*element) else {
            return;
        };
        if let NodeKind::Element { attributes, .. } = &mut data.kind {
            match attributes.iter_mut().find(|(n, _)| n == name) {
                Some((_, existing)) => *existing = value.to_string(),
                None => attributes.push((name.to_string(), value.to_string())),
            }
        }
    }

    fn add_event_listener(
        &mut self,
        element: &NodeId,
        event: &str,
        callback: &Value<NodeId>,
        options: Option<&Value<NodeId>>,
    ) {
        if let Some(data) = self.data_mut(*element) {
            data.listeners.push(Listener {
                event: event.to_string(),
                callback: callback.clone(),
                options: options.cloned(),
            });
        }
    }

    fn append_child(&mut self, parent: &NodeId, child: &NodeId) {
        if !self.contains(*parent) || !self.contains(*child) {
            warn!("ignoring append of {} to {}: node from another dom", child, parent);
            return;
        }
        if matches!(self.kind(*child), Some(NodeKind::Fragment)) {
            for node in self.children(*child).to_vec() {
                self.attach(*parent, node);
            }
            return;
        }
        self.attach(*parent, *child);
    }

    fn remove_all_children(&mut self, parent: &NodeId) {
        let removed = match self.data_mut(*parent) {
            Some(data) => std::mem::take(&mut data.children),
            None => return,
        };
        for node in removed {
            if let Some(data) = self.data_mut(node) {
                data.parent = None;
            }
        }
    }

    fn create_fragment(&mut self, nodes: &[NodeId]) -> NodeId {
        let fragment = self.insert(NodeKind::Fragment);
        for node in nodes {
            self.append_child(&fragment, node);
        }
        fragment
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_append_moves_attached_child() {
        let mut dom = Dom::new();
        let a = dom.create_element("a");
        let b = dom.create_element("b");
        let text = dom.create_text("x");
        dom.append_child(&a, &text);
        dom.append_child(&b, &text);
        assert!(dom.children(a).is_empty());
        assert_eq!(dom.children(b), [text]);
        assert_eq!(dom.parent(text), Some(b));
    }

    #[test]
    fn test_fragment_children_move_on_append() {
        let mut dom = Dom::new();
        let one = dom.create_text("1");
        let two = dom.create_text("2");
        let fragment = dom.create_fragment(&[one, two]);
        assert_eq!(dom.text_content(fragment), "12");

        let p = dom.create_element("p");
        dom.append_child(&p, &fragment);
        assert!(dom.children(fragment).is_empty());
        assert_eq!(dom.children(p), [one, two]);
    }

    #[test]
    fn test_append_into_own_subtree_is_refused() {
        let mut dom = Dom::new();
        let outer = dom.create_element("div");
        let inner = dom.create_element("p");
        dom.append_child(&outer, &inner);

        dom.append_child(&outer, &outer);
        dom.append_child(&inner, &outer);
        assert_eq!(dom.children(outer), [inner]);
        assert!(dom.children(inner).is_empty());
        assert_eq!(dom.parent(outer), None);
        assert_eq!(dom.text_content(outer), "");
    }

    #[test]
    fn test_ids_from_another_dom_are_ignored() {
        let mut other = Dom::new();
        let foreign = other.create_text("elsewhere");

        let mut dom = Dom::new();
        let p = dom.create_element("p");
        assert!(!dom.contains(foreign));
        assert_eq!(dom.kind(foreign), None);

        dom.append_child(&p, &foreign);
        dom.set_attribute(&foreign, "id", "x");
        dom.remove_all_children(&foreign);
        assert!(dom.children(p).is_empty());
        assert_eq!(dom.len(), 1);
        assert_eq!(dom.text_content(foreign), "");
        assert_eq!(other.text_content(foreign), "elsewhere");
    }

    #[test]
    fn test_set_attribute_replaces() {
        let mut dom = Dom::new();
        let p = dom.create_element("p");
        dom.set_attribute(&p, "id", "a");
        dom.set_attribute(&p, "class", "x");
        dom.set_attribute(&p, "id", "b");
        assert_eq!(
            dom.attributes(p),
            [
                ("id".to_string(), "b".to_string()),
                ("class".to_string(), "x".to_string())
            ]
        );
    }

    #[test]
    fn test_dispatch_calls_handlers() {
        let mut dom = Dom::new();
        let button = dom.create_element("button");
        let clicks = Rc::new(Cell::new(0));
        let counter = Rc::clone(&clicks);
        dom.add_event_listener(
            &button,
            "click",
            &handler(move |_| counter.set(counter.get() + 1)),
            None,
        );
        dom.add_event_listener(&button, "click", &Value::from("not callable"), None);

        assert_eq!(dom.dispatch(button, "click"), 1);
        assert_eq!(dom.dispatch(button, "keyup"), 0);
        assert_eq!(clicks.get(), 1);
    }
}
