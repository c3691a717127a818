//! Named bindings
//!
//! `@name` on an element appends that element under `name`. Names keep the order
//! in which they were first bound, and each name keeps every element bound to it.

#[derive(Debug, Clone, PartialEq)]
pub struct Bindings<N> {
    entries: Vec<(String, Vec<N>)>,
}

impl<N> Bindings<N> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn add(&mut self, name: &str, node: N) {
        match self.entries.iter_mut().find(|(n, _)| n == name) {
            Some((_, nodes)) => nodes.push(node),
            None => self.entries.push((name.to_string(), vec![node])),
        }
    }

    /// Every node bound under `name`, in binding order
    pub fn get(&self, name: &str) -> Option<&[N]> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, nodes)| nodes.as_slice())
    }

    pub fn first(&self, name: &str) -> Option<&N> {
        self.get(name).and_then(|nodes| nodes.first())
    }

    pub fn last(&self, name: &str) -> Option<&N> {
        self.get(name).and_then(|nodes| nodes.last())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[N])> {
        self.entries
            .iter()
            .map(|(name, nodes)| (name.as_str(), nodes.as_slice()))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<N> Default for Bindings<N> {
    fn default() -> Self {
        Self::new()
    }
}
