use alloc::format;
use alloc::vec::Vec;
use core::marker::PhantomData;

use itertools::Itertools;
use num_traits::{CheckedAdd, Zero};

use crate::algo::{FlowPath, MaxFlow, MaxFlowResult};
use crate::amount::Amount;
use crate::balance;
use crate::config::Config;
use crate::error::Error;
use crate::id::Id;
use crate::network;
use crate::participants::Participants;
use crate::partition::partition;
use crate::settlement::{self, Settlement};
use crate::transaction::Transaction;
use crate::SettlementEngine;

#[derive(Clone, Debug)]
pub struct DefaultEngine<T, Algo> {
    algo: Algo,
    config: Config,
    _phantom: PhantomData<T>,
}

impl<T, Algo> DefaultEngine<T, Algo> {
    pub fn new(algo: Algo, config: Config) -> Self {
        Self {
            algo,
            config,
            _phantom: Default::default(),
        }
    }
}

impl<T, Algo> SettlementEngine for DefaultEngine<T, Algo>
where
    T: Transaction,
    T::AccountId: Id,
    T::Amount: Amount,
    Algo: MaxFlow<Amount = T::Amount>,
{
    type AccountId = T::AccountId;
    type Amount = T::Amount;
    type Transactions = Vec<T>;
    type Algo = Algo;
    type Error = Error;

    fn config(&self) -> &Config {
        &self.config
    }

    fn run(
        &mut self,
        participants: Vec<Self::AccountId>,
        transactions: Self::Transactions,
    ) -> Result<Settlement<Self::AccountId, Self::Amount>, Self::Error> {
        if transactions.is_empty() {
            return Err(Error::NoTransactions);
        }
        if transactions.iter().any(|t| t.amount() <= T::Amount::zero()) {
            return Err(Error::NonPositiveAmount);
        }
        let participants = Participants::new(participants)?;

        // the b vector
        let balances = balance::aggregate(&participants, &transactions)?;

        let positions = partition(&balances)?;
        if positions.is_settled() {
            log::debug!("all balances are zero, nothing to settle");
        }
        let network = network::build(participants.node_count(), &positions);

        let MaxFlowResult { paths, total } = self.algo.max_flow(
            &network,
            participants.source(),
            participants.sink(),
        )?;

        paths.iter().for_each(|path| {
            log::trace!(
                "{} : {}",
                path.nodes()
                    .into_iter()
                    .map(|n| participants.label(n, &self.config))
                    .join(" --> "),
                path.flow()
            );
        });

        let plan = settlement::plan(&paths, &participants)?;

        log::info!("----------------------------------");
        log::info!("   Participants = {}", participants.len());
        log::info!("      Creditors = {}", positions.creditors.len());
        log::info!("        Debtors = {}", positions.debtors.len());
        log::info!("            NID = {}", balances.credit_total()?);
        log::info!("     Total flow = {total}");
        log::info!("       Payments = {}", plan.len());

        Ok(Settlement {
            balances,
            plan,
            total_flow: total,
        })
    }

    fn check(
        &self,
        settlement: &Settlement<Self::AccountId, Self::Amount>,
    ) -> Result<(), Self::Error> {
        let Settlement {
            balances,
            plan,
            total_flow,
        } = settlement;

        // SUM(b) == 0
        let sum = balances.total()?;
        if !sum.is_zero() {
            return Err(Error::Inconsistent(format!(
                "balances sum to {sum} instead of zero"
            )));
        }

        // SUM(+b) == SUM(-b) == max flow
        let positions = partition(balances)?;
        let credit = positions.credit_total()?;
        let debt = positions.debt_total()?;
        if credit != debt || *total_flow != credit {
            return Err(Error::Inconsistent(format!(
                "flow {total_flow} does not saturate credit {credit} and debt {debt}"
            )));
        }

        // executing the plan clears every balance
        let participants =
            Participants::new(balances.iter().map(|(id, _)| id.clone()).collect())?;
        let paid = balance::aggregate(&participants, plan)?;
        let remaining = balances
            .iter()
            .zip(paid.iter())
            .map(|((id, owed), (_, paid))| {
                owed.checked_add(&paid)
                    .map(|left| (id, left))
                    .ok_or(Error::Overflow)
            })
            .collect::<Result<Vec<_>, _>>()?;
        if let Some((id, left)) = remaining.iter().find(|(_, left)| !left.is_zero()) {
            return Err(Error::Inconsistent(format!(
                "{id:?} keeps a balance of {left} after the plan is executed"
            )));
        }

        // one payment per saturated edge at most
        let parties = positions.creditors.len() + positions.debtors.len();
        if !plan.is_empty() && plan.len() >= parties {
            return Err(Error::Inconsistent(format!(
                "{} payments exceed the bound of {} for {} parties",
                plan.len(),
                parties.saturating_sub(1),
                parties
            )));
        }

        let paid_total = plan.iter().try_fold(T::Amount::zero(), |acc, p| {
            acc.checked_add(&p.amount()).ok_or(Error::Overflow)
        })?;
        log::debug!("num of participants: {}", balances.len());
        log::debug!("          creditors: {}", positions.creditors.len());
        log::debug!("            debtors: {}", positions.debtors.len());
        log::debug!("         NID before: {credit}");
        log::debug!("         total flow: {total_flow}");
        log::debug!("           payments: {}", plan.len());
        log::debug!("         total paid: {paid_total}");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use super::*;
    use crate::algo::{EdmondsKarp, SparseResidual};
    use crate::balance::Balances;
    use crate::error::ErrorKind;
    use crate::settlement::SettlementTransaction;
    use crate::transaction::SimpleTransaction;

    type Tx = SimpleTransaction<&'static str, i64>;

    fn engine() -> DefaultEngine<Tx, EdmondsKarp<i64>> {
        DefaultEngine::new(EdmondsKarp::new(), Config::default())
    }

    fn tx(payer: &'static str, payee: &'static str, amount: i64) -> Tx {
        SimpleTransaction::new(payer, payee, amount).unwrap()
    }

    #[test]
    fn two_debtors_pay_one_creditor() {
        let mut engine = engine();
        let s = engine
            .run(
                vec!["A", "B", "C"],
                vec![tx("A", "B", 30), tx("B", "C", 10)],
            )
            .unwrap();

        assert_eq!(
            s.balances.clone().into_entries(),
            vec![("A", 30), ("B", -20), ("C", -10)]
        );
        assert_eq!(
            s.plan,
            vec![
                SettlementTransaction::new("B", "A", 20),
                SettlementTransaction::new("C", "A", 10),
            ]
        );
        assert_eq!(s.total_flow, 30);
        assert_eq!(engine.check(&s), Ok(()));
    }

    #[test]
    fn cancelling_transactions_need_no_payments() {
        let mut engine = engine();
        let s = engine
            .run(vec!["A", "B"], vec![tx("A", "B", 25), tx("B", "A", 25)])
            .unwrap();

        assert!(s.plan.is_empty());
        assert_eq!(s.total_flow, 0);
        assert_eq!(s.balances.into_entries(), vec![("A", 0), ("B", 0)]);
    }

    #[test]
    fn input_errors_surface_before_solving() {
        let mut engine = engine();

        let err = engine.run(vec!["A"], vec![]).unwrap_err();
        assert_eq!(err, Error::NoTransactions);

        let err = engine.run(vec![], vec![tx("A", "B", 1)]).unwrap_err();
        assert_eq!(err, Error::NoParticipants);

        let err = engine
            .run(vec!["A", "B"], vec![tx("A", "Z", 1)])
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownParticipant);
    }

    #[test]
    fn raw_amounts_are_validated() {
        let mut engine: DefaultEngine<crate::transaction::RawTransaction<&str, i64>, _> =
            DefaultEngine::new(EdmondsKarp::<i64>::new(), Config::default());
        let err = engine
            .run(
                vec!["A", "B"],
                vec![crate::transaction::RawTransaction::new("A", "B", -4)],
            )
            .unwrap_err();
        assert_eq!(err, Error::NonPositiveAmount);
    }

    #[test]
    fn sparse_solver_gives_same_settlement() {
        let txs = vec![
            tx("A", "B", 40),
            tx("C", "D", 15),
            tx("E", "A", 5),
            tx("B", "C", 12),
            tx("D", "E", 30),
        ];
        let roster = vec!["A", "B", "C", "D", "E"];

        let dense = engine().run(roster.clone(), txs.clone()).unwrap();
        let sparse = DefaultEngine::<Tx, EdmondsKarp<i64, SparseResidual<i64>>>::new(
            EdmondsKarp::new(),
            Config::default(),
        )
        .run(roster, txs)
        .unwrap();

        assert_eq!(dense, sparse);
    }

    #[test]
    fn check_rejects_tampered_plans() {
        let mut engine = engine();
        let mut s = engine
            .run(
                vec!["A", "B", "C"],
                vec![tx("A", "B", 30), tx("B", "C", 10)],
            )
            .unwrap();

        s.plan.pop();
        let err = engine.check(&s).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InternalConsistency);

        s.plan.push(SettlementTransaction::new("C", "A", 10));
        s.total_flow = 25;
        assert!(matches!(engine.check(&s), Err(Error::Inconsistent(_))));
    }

    #[test]
    fn check_enforces_payment_bound() {
        let engine = engine();
        let s = Settlement {
            balances: Balances::from_entries(vec![("A", 10i64), ("B", -10)]),
            plan: vec![
                SettlementTransaction::new("B", "A", 5),
                SettlementTransaction::new("B", "A", 5),
            ],
            total_flow: 10,
        };
        assert!(matches!(engine.check(&s), Err(Error::Inconsistent(_))));
    }
}
