//! Recording tree builder

use crate::slim::builder::TreeBuilder;
use crate::slim::value::Value;

/// One builder call. Node handles are the sequential ids the log hands out;
/// callback and options values are recorded in their display form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    CreateElement(usize, String),
    CreateText(usize, String),
    SetAttribute(usize, String, String),
    AddEventListener(usize, String, String, Option<String>),
    AppendChild(usize, usize),
    RemoveAllChildren(usize),
    CreateFragment(usize, Vec<usize>),
}

#[derive(Debug, Default)]
pub struct CallLog {
    next_id: usize,
    calls: Vec<Call>,
}

impl CallLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> &[Call] {
        &self.calls
    }

    pub fn into_calls(self) -> Vec<Call> {
        self.calls
    }

    fn next(&mut self) -> usize {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

impl TreeBuilder for CallLog {
    type Node = usize;

    fn create_element(&mut self, tag_name: &str) -> usize {
        let id = self.next();
        self.calls.push(Call::CreateElement(id, tag_name.to_string()));
        id
    }

    fn create_text(&mut self, content: &str) -> usize {
        let id = self.next();
        self.calls.push(Call::CreateText(id, content.to_string()));
        id
    }

    fn set_attribute(&mut self, element: &usize, name: &str, value: &str) {
        self.calls.push(Call::SetAttribute(
            *element,
            name.to_string(),
            value.to_string(),
        ));
    }

    fn add_event_listener(
        &mut self,
        element: &usize,
        event: &str,
        callback: &Value<usize>,
        options: Option<&Value<usize>>,
    ) {
        self.calls.push(Call::AddEventListener(
            *element,
            event.to_string(),
            callback.to_string(),
            options.map(ToString::to_string),
        ));
    }

    fn append_child(&mut self, parent: &usize, child: &usize) {
        self.calls.push(Call::AppendChild(*parent, *child));
    }

    fn remove_all_children(&mut self, parent: &usize) {
        self.calls.push(Call::RemoveAllChildren(*parent));
    }

    fn create_fragment(&mut self, nodes: &[usize]) -> usize {
        let id = self.next();
        self.calls.push(Call::CreateFragment(id, nodes.to_vec()));
        id
    }
}
