use alloc::vec;
use alloc::vec::Vec;
use core::cmp::min;

use itertools::Itertools;
use num_traits::{CheckedAdd, Zero};

use crate::amount::Amount;
use crate::error::Error;
use crate::participants::SOURCE;
use crate::partition::Partition;

/// Dense `(n + 2) x (n + 2)` matrix of edge capacities, `C[u][v]` being the capacity of `u -> v`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CapacityMatrix<Amt> {
    size: usize,
    cells: Vec<Amt>,
}

impl<Amt: Amount> CapacityMatrix<Amt> {
    pub fn new(size: usize) -> Self {
        Self {
            size,
            cells: vec![Amt::zero(); size * size],
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn get(&self, u: usize, v: usize) -> Amt {
        self.cells[u * self.size + v]
    }

    pub fn set(&mut self, u: usize, v: usize, capacity: Amt) {
        self.cells[u * self.size + v] = capacity;
    }

    pub fn row(&self, u: usize) -> &[Amt] {
        &self.cells[u * self.size..(u + 1) * self.size]
    }

    pub fn source(&self) -> usize {
        SOURCE
    }

    pub fn sink(&self) -> usize {
        self.size - 1
    }

    /// Edges with non-zero capacity as `(u, v, capacity)`, in row-major order.
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize, Amt)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, c)| **c > Amt::zero())
            .map(move |(i, c)| (i / self.size, i % self.size, *c))
    }

    pub fn outgoing_total(&self, u: usize) -> Result<Amt, Error> {
        self.row(u)
            .iter()
            .try_fold(Amt::zero(), |acc, c| acc.checked_add(c).ok_or(Error::Overflow))
    }

    pub fn incoming_total(&self, v: usize) -> Result<Amt, Error> {
        (0..self.size).try_fold(Amt::zero(), |acc, u| {
            acc.checked_add(&self.get(u, v)).ok_or(Error::Overflow)
        })
    }
}

/// Builds the three-layer settlement network.
///
/// The source feeds each debtor with the debtor's owed amount, every debtor is connected to every
/// creditor with `min(debt, credit)`, and each creditor feeds the sink with its credit.
pub fn build<AccountId, Amt: Amount>(
    node_count: usize,
    partition: &Partition<AccountId, Amt>,
) -> CapacityMatrix<Amt> {
    let mut matrix = CapacityMatrix::new(node_count);
    let sink = matrix.sink();

    for debtor in &partition.debtors {
        matrix.set(SOURCE, debtor.node, debtor.amount);
    }

    for (debtor, creditor) in partition
        .debtors
        .iter()
        .cartesian_product(partition.creditors.iter())
    {
        matrix.set(
            debtor.node,
            creditor.node,
            min(debtor.amount, creditor.amount),
        );
    }

    for creditor in &partition.creditors {
        matrix.set(creditor.node, sink, creditor.amount);
    }

    matrix
}
