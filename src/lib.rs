#![no_std]
#![deny(
    trivial_casts,
    trivial_numeric_casts,
    unused_import_braces,
    rust_2018_idioms
)]
#![forbid(unsafe_code)]

extern crate alloc;

pub mod algo;
pub mod amount;
pub mod balance;
pub mod config;
pub mod error;
pub mod id;
pub mod impls;
pub mod money;
pub mod network;
pub mod node;
pub mod participants;
pub mod partition;
pub mod settlement;
pub mod transaction;

use alloc::vec::Vec;

pub use rust_decimal::Decimal;

pub use crate::algo::{EdmondsKarp, MaxFlow};
pub use crate::balance::Balances;
pub use crate::config::Config;
pub use crate::error::{Error, ErrorKind};
pub use crate::impls::{decimal::DecimalEngine, default::DefaultEngine};
pub use crate::settlement::{Settlement, SettlementTransaction};
pub use crate::transaction::{RawTransaction, SimpleTransaction, Transaction};

use crate::id::Id;

/// Computes net balances and a settlement plan for one group.
pub trait SettlementEngine {
    type AccountId;
    type Amount;
    type Transactions;
    type Algo;
    type Error;

    /// Settings the engine was built with.
    fn config(&self) -> &Config;

    /// Run the pipeline: aggregate balances, split creditors from debtors, build the flow network,
    /// solve max flow and turn every augmenting path into a payment.
    fn run(
        &mut self,
        participants: Vec<Self::AccountId>,
        transactions: Self::Transactions,
    ) -> Result<Settlement<Self::AccountId, Self::Amount>, Self::Error>;

    /// Verify that a settlement conserves balances, saturates the network and clears every debt.
    fn check(
        &self,
        settlement: &Settlement<Self::AccountId, Self::Amount>,
    ) -> Result<(), Self::Error>;
}

/// Settles a group with decimal amounts using the dense Edmonds–Karp solver.
pub fn settle<AccountId: Id>(
    participants: Vec<AccountId>,
    transactions: Vec<RawTransaction<AccountId, Decimal>>,
    config: &Config,
) -> Result<Settlement<AccountId, Decimal>, Error> {
    engine(config)?.run(participants, transactions)
}

/// Runs [`SettlementEngine::check`] on a settlement produced by [`settle`].
pub fn check<AccountId: Id>(
    settlement: &Settlement<AccountId, Decimal>,
    config: &Config,
) -> Result<(), Error> {
    engine(config)?.check(settlement)
}

type DecimalDefault<AccountId> = DecimalEngine<
    AccountId,
    DefaultEngine<SimpleTransaction<AccountId, i64>, EdmondsKarp<i64>>,
>;

fn engine<AccountId: Id>(config: &Config) -> Result<DecimalDefault<AccountId>, Error> {
    DecimalEngine::wrapping(DefaultEngine::new(EdmondsKarp::new(), config.clone()))
}
