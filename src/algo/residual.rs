use alloc::format;
use alloc::vec::Vec;

use petgraph::graphmap::DiGraphMap;
use petgraph::Direction;

use crate::amount::Amount;
use crate::error::Error;
use crate::network::CapacityMatrix;

/// Remaining capacity of a flow network while flow is being pushed through it.
///
/// Pushing `x` along `u -> v` takes `x` off that edge and adds `x` to the reverse edge `v -> u`.
pub trait ResidualGraph<Amt> {
    fn from_capacities(capacities: &CapacityMatrix<Amt>) -> Self;

    fn node_count(&self) -> usize;

    fn residual(&self, u: usize, v: usize) -> Amt;

    /// Nodes reachable from `u` over an edge with positive residual capacity, in ascending order.
    fn neighbors(&self, u: usize) -> Vec<usize>;

    fn push(&mut self, u: usize, v: usize, amount: Amt) -> Result<(), Error>;
}

fn over_capacity<Amt: Amount>(u: usize, v: usize, amount: Amt, residual: Amt) -> Error {
    Error::Inconsistent(format!(
        "pushing {amount} over {u} -> {v} exceeds residual capacity {residual}"
    ))
}

/// Residual graph over a dense copy of the capacity matrix.
#[derive(Clone, Debug)]
pub struct DenseResidual<Amt> {
    matrix: CapacityMatrix<Amt>,
}

impl<Amt: Amount> ResidualGraph<Amt> for DenseResidual<Amt> {
    fn from_capacities(capacities: &CapacityMatrix<Amt>) -> Self {
        Self {
            matrix: capacities.clone(),
        }
    }

    fn node_count(&self) -> usize {
        self.matrix.size()
    }

    fn residual(&self, u: usize, v: usize) -> Amt {
        self.matrix.get(u, v)
    }

    fn neighbors(&self, u: usize) -> Vec<usize> {
        self.matrix
            .row(u)
            .iter()
            .enumerate()
            .filter(|(_, c)| **c > Amt::zero())
            .map(|(v, _)| v)
            .collect()
    }

    fn push(&mut self, u: usize, v: usize, amount: Amt) -> Result<(), Error> {
        let forward = self.matrix.get(u, v);
        if amount > forward {
            return Err(over_capacity(u, v, amount, forward));
        }
        let backward = self
            .matrix
            .get(v, u)
            .checked_add(&amount)
            .ok_or(Error::Overflow)?;

        self.matrix.set(u, v, forward - amount);
        self.matrix.set(v, u, backward);
        Ok(())
    }
}

/// Residual graph kept as an adjacency map `(node, neighbor) -> capacity`.
///
/// Behaves exactly like [`DenseResidual`] but only stores edges that exist, which suits groups
/// with many members and few balances.
#[derive(Clone, Debug)]
pub struct SparseResidual<Amt> {
    graph: DiGraphMap<usize, Amt>,
    size: usize,
}

impl<Amt: Amount> ResidualGraph<Amt> for SparseResidual<Amt> {
    fn from_capacities(capacities: &CapacityMatrix<Amt>) -> Self {
        let mut graph = DiGraphMap::new();
        for n in 0..capacities.size() {
            graph.add_node(n);
        }
        for (u, v, capacity) in capacities.edges() {
            graph.add_edge(u, v, capacity);
        }

        Self {
            graph,
            size: capacities.size(),
        }
    }

    fn node_count(&self) -> usize {
        self.size
    }

    fn residual(&self, u: usize, v: usize) -> Amt {
        self.graph
            .edge_weight(u, v)
            .copied()
            .unwrap_or_else(Amt::zero)
    }

    fn neighbors(&self, u: usize) -> Vec<usize> {
        let mut nbrs: Vec<_> = self
            .graph
            .neighbors_directed(u, Direction::Outgoing)
            .filter(|v| self.residual(u, *v) > Amt::zero())
            .collect();
        nbrs.sort_unstable();
        nbrs
    }

    fn push(&mut self, u: usize, v: usize, amount: Amt) -> Result<(), Error> {
        let forward = self.residual(u, v);
        if amount > forward {
            return Err(over_capacity(u, v, amount, forward));
        }
        let backward = self
            .residual(v, u)
            .checked_add(&amount)
            .ok_or(Error::Overflow)?;

        self.graph.add_edge(u, v, forward - amount);
        self.graph.add_edge(v, u, backward);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use super::*;

    fn triangle() -> CapacityMatrix<i64> {
        let mut m = CapacityMatrix::new(3);
        m.set(0, 1, 4);
        m.set(1, 2, 3);
        m.set(0, 2, 1);
        m
    }

    fn exercise<R: ResidualGraph<i64>>() {
        let mut r = R::from_capacities(&triangle());
        assert_eq!(r.node_count(), 3);
        assert_eq!(r.neighbors(0), vec![1, 2]);
        assert_eq!(r.neighbors(1), vec![2]);

        r.push(0, 1, 3).unwrap();
        assert_eq!(r.residual(0, 1), 1);
        assert_eq!(r.residual(1, 0), 3);
        assert_eq!(r.neighbors(1), vec![0, 2]);

        r.push(0, 1, 1).unwrap();
        assert_eq!(r.neighbors(0), vec![2]);
        assert!(matches!(r.push(0, 1, 1), Err(Error::Inconsistent(_))));
    }

    #[test]
    fn dense_residual() {
        exercise::<DenseResidual<i64>>();
    }

    #[test]
    fn sparse_residual() {
        exercise::<SparseResidual<i64>>();
    }
}
