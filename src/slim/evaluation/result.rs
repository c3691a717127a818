use super::bindings::Bindings;
use crate::slim::builder::TreeBuilder;

/// Output nodes and bindings of one evaluation
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation<N> {
    nodes: Vec<N>,
    bindings: Bindings<N>,
}

impl<N: Clone> Evaluation<N> {
    pub fn new(nodes: Vec<N>, bindings: Bindings<N>) -> Self {
        Self { nodes, bindings }
    }

    /// Top-level output nodes, in document order
    pub fn nodes(&self) -> &[N] {
        &self.nodes
    }

    pub fn first_node(&self) -> Option<&N> {
        self.nodes.first()
    }

    /// Wrap every top-level node into one fragment
    pub fn fragment<B: TreeBuilder<Node = N>>(&self, builder: &mut B) -> N {
        builder.create_fragment(&self.nodes)
    }

    /// Every node bound under each name
    pub fn binding_map(&self) -> &Bindings<N> {
        &self.bindings
    }

    /// The first node bound under each name
    pub fn bindings(&self) -> Vec<(&str, &N)> {
        self.bindings
            .iter()
            .filter_map(|(name, nodes)| nodes.first().map(|node| (name, node)))
            .collect()
    }

    pub fn binding(&self, name: &str) -> Option<&N> {
        self.bindings.first(name)
    }
}
