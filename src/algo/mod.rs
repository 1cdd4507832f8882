use alloc::vec::Vec;

use crate::error::Error;
use crate::network::CapacityMatrix;

pub mod edmonds_karp;
pub mod residual;

pub use edmonds_karp::EdmondsKarp;
pub use residual::{DenseResidual, ResidualGraph, SparseResidual};

pub trait FlowPath {
    type Node;
    type Flow;
    type Iter: IntoIterator<Item = Self::Node>;

    fn nodes(&self) -> Self::Iter;
    fn flow(&self) -> Self::Flow;
}

/// A source-to-sink path of node indexes together with the flow pushed along it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AugmentingPath<Amt> {
    nodes: Vec<usize>,
    flow: Amt,
}

impl<Amt: Copy> AugmentingPath<Amt> {
    pub fn new(nodes: Vec<usize>, flow: Amt) -> Self {
        Self { nodes, flow }
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.nodes
    }

    /// The node right after the source, i.e. the paying debtor.
    pub fn first_interior(&self) -> Option<usize> {
        (self.nodes.len() >= 3).then(|| self.nodes[1])
    }

    /// The node right before the sink, i.e. the receiving creditor.
    pub fn last_interior(&self) -> Option<usize> {
        (self.nodes.len() >= 3).then(|| self.nodes[self.nodes.len() - 2])
    }
}

impl<Amt: Copy> FlowPath for AugmentingPath<Amt> {
    type Node = usize;
    type Flow = Amt;
    type Iter = Vec<usize>;

    fn nodes(&self) -> Self::Iter {
        self.nodes.clone()
    }

    fn flow(&self) -> Self::Flow {
        self.flow
    }
}

/// Outcome of a max-flow run: every augmenting path in discovery order and the total flow.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MaxFlowResult<Amt> {
    pub paths: Vec<AugmentingPath<Amt>>,
    pub total: Amt,
}

/// The maximum flow algorithm.
pub trait MaxFlow {
    type Amount;

    /// Run the algorithm over the given capacities and return the total flow along with the
    /// augmenting paths that carried it.
    fn max_flow(
        &mut self,
        network: &CapacityMatrix<Self::Amount>,
        source: usize,
        sink: usize,
    ) -> Result<MaxFlowResult<Self::Amount>, Error>;
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use super::*;

    #[test]
    fn interior_nodes_of_long_path() {
        let short = AugmentingPath::new(vec![0, 2, 1, 4], 5);
        assert_eq!(short.first_interior(), Some(2));
        assert_eq!(short.last_interior(), Some(1));

        let long = AugmentingPath::new(vec![0, 2, 3, 1, 4, 5], 1);
        assert_eq!(long.first_interior(), Some(2));
        assert_eq!(long.last_interior(), Some(4));
        assert_eq!(long.nodes(), vec![0, 2, 3, 1, 4, 5]);

        let direct = AugmentingPath::new(vec![0, 1], 1);
        assert_eq!(direct.first_interior(), None);
        assert_eq!(direct.last_interior(), None);
    }
}
