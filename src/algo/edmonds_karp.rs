use alloc::collections::VecDeque;
use alloc::format;
use alloc::vec;
use alloc::vec::Vec;
use core::marker::PhantomData;

use crate::algo::residual::{DenseResidual, ResidualGraph};
use crate::algo::{AugmentingPath, MaxFlow, MaxFlowResult};
use crate::amount::Amount;
use crate::error::Error;
use crate::network::CapacityMatrix;

/// Edmonds–Karp max flow: repeated breadth-first search for the shortest augmenting path.
#[derive(Clone, Debug)]
pub struct EdmondsKarp<Amt, R = DenseResidual<Amt>>(PhantomData<(Amt, R)>);

impl<Amt, R> Default for EdmondsKarp<Amt, R> {
    fn default() -> Self {
        Self(PhantomData)
    }
}

impl<Amt, R> EdmondsKarp<Amt, R> {
    pub fn new() -> Self {
        Self::default()
    }
}

// Fills `parent` with the BFS tree and stops as soon as the sink is discovered.
fn bfs<Amt, R>(graph: &R, source: usize, sink: usize, parent: &mut [Option<usize>]) -> bool
where
    R: ResidualGraph<Amt>,
{
    let mut visited = vec![false; graph.node_count()];
    let mut queue = VecDeque::new();

    parent.iter_mut().for_each(|p| *p = None);
    queue.push_back(source);
    visited[source] = true;

    while let Some(u) = queue.pop_front() {
        for v in graph.neighbors(u) {
            if visited[v] {
                continue;
            }
            parent[v] = Some(u);
            if v == sink {
                return true;
            }
            visited[v] = true;
            queue.push_back(v);
        }
    }

    false
}

impl<Amt, R> MaxFlow for EdmondsKarp<Amt, R>
where
    Amt: Amount,
    R: ResidualGraph<Amt>,
{
    type Amount = Amt;

    fn max_flow(
        &mut self,
        network: &CapacityMatrix<Amt>,
        source: usize,
        sink: usize,
    ) -> Result<MaxFlowResult<Amt>, Error> {
        let size = network.size();
        if source >= size || sink >= size || source == sink {
            return Err(Error::Inconsistent(format!(
                "invalid terminals {source} -> {sink} for a network of {size} nodes"
            )));
        }

        let mut residual = R::from_capacities(network);
        let mut parent = vec![None; size];
        let mut paths = Vec::new();
        let mut total = Amt::zero();

        while bfs::<Amt, R>(&residual, source, sink, &mut parent) {
            // walk back from the sink to recover the path in forward order
            let mut nodes = vec![sink];
            let mut v = sink;
            while v != source {
                v = parent[v].ok_or(Error::UnmappedNode(v))?;
                nodes.push(v);
            }
            nodes.reverse();

            let flow = nodes
                .windows(2)
                .map(|w| residual.residual(w[0], w[1]))
                .min()
                .ok_or(Error::UnmappedNode(sink))?;

            for w in nodes.windows(2) {
                residual.push(w[0], w[1], flow)?;
            }

            total = total.checked_add(&flow).ok_or(Error::Overflow)?;
            log::trace!("augmenting path {:?} carries {}", nodes, flow);
            paths.push(AugmentingPath::new(nodes, flow));
        }

        Ok(MaxFlowResult { paths, total })
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use super::*;
    use crate::algo::residual::SparseResidual;
    use crate::algo::FlowPath;

    // s=0, A=1, B=2, C=3, t=4 with B owing 20 and C owing 10 to A
    fn group_of_three() -> CapacityMatrix<i64> {
        let mut m = CapacityMatrix::new(5);
        m.set(0, 2, 20);
        m.set(0, 3, 10);
        m.set(2, 1, 20);
        m.set(3, 1, 10);
        m.set(1, 4, 30);
        m
    }

    // The first shortest path takes 1 -> 3, which has to be undone through the reverse edge
    // 3 -> 1 so that node 2 can reach the sink.
    fn needs_rerouting() -> CapacityMatrix<i64> {
        let mut m = CapacityMatrix::new(6);
        m.set(0, 1, 1);
        m.set(0, 2, 1);
        m.set(1, 3, 1);
        m.set(1, 4, 1);
        m.set(2, 3, 1);
        m.set(3, 5, 1);
        m.set(4, 5, 1);
        m
    }

    #[test]
    fn paths_follow_bfs_order() {
        let result = EdmondsKarp::<i64>::new()
            .max_flow(&group_of_three(), 0, 4)
            .unwrap();

        assert_eq!(result.total, 30);
        assert_eq!(
            result.paths,
            vec![
                AugmentingPath::new(vec![0, 2, 1, 4], 20),
                AugmentingPath::new(vec![0, 3, 1, 4], 10),
            ]
        );
    }

    #[test]
    fn reverse_edges_yield_longer_paths() {
        let result = EdmondsKarp::<i64>::new()
            .max_flow(&needs_rerouting(), 0, 5)
            .unwrap();

        assert_eq!(result.total, 2);
        assert_eq!(result.paths[0].nodes(), vec![0, 1, 3, 5]);
        assert_eq!(result.paths[1].nodes(), vec![0, 2, 3, 1, 4, 5]);
        assert_eq!(result.paths[1].flow(), 1);
    }

    #[test]
    fn empty_network_has_no_flow() {
        let result = EdmondsKarp::<i64>::new()
            .max_flow(&CapacityMatrix::new(4), 0, 3)
            .unwrap();
        assert_eq!(result.total, 0);
        assert!(result.paths.is_empty());
    }

    #[test]
    fn sparse_and_dense_agree() {
        for (network, sink) in [(group_of_three(), 4), (needs_rerouting(), 5)] {
            let dense = EdmondsKarp::<i64>::new()
                .max_flow(&network, 0, sink)
                .unwrap();
            let sparse = EdmondsKarp::<i64, SparseResidual<i64>>::new()
                .max_flow(&network, 0, sink)
                .unwrap();
            assert_eq!(dense, sparse);
        }
    }

    #[test]
    fn rejects_bad_terminals() {
        let err = EdmondsKarp::<i64>::new()
            .max_flow(&group_of_three(), 0, 0)
            .unwrap_err();
        assert!(matches!(err, Error::Inconsistent(_)));
    }
}
