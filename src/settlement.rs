use alloc::vec::Vec;

use serde::{Deserialize, Serialize};

use crate::algo::{AugmentingPath, FlowPath};
use crate::amount::Amount;
use crate::balance::Balances;
use crate::error::Error;
use crate::id::Id;
use crate::participants::Participants;
use crate::transaction::Transaction;

/// A single payment of the settlement plan: the debtor `from` pays the creditor `to`.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SettlementTransaction<AccountId, Amount> {
    from: AccountId,
    to: AccountId,
    amount: Amount,
}

impl<AccountId, Amount> SettlementTransaction<AccountId, Amount> {
    pub fn new(from: AccountId, to: AccountId, amount: Amount) -> Self {
        Self { from, to, amount }
    }

    pub fn from(&self) -> &AccountId {
        &self.from
    }

    pub fn to(&self) -> &AccountId {
        &self.to
    }

    pub fn map_amount<B, E>(
        self,
        f: impl FnOnce(Amount) -> Result<B, E>,
    ) -> Result<SettlementTransaction<AccountId, B>, E> {
        Ok(SettlementTransaction {
            from: self.from,
            to: self.to,
            amount: f(self.amount)?,
        })
    }
}

impl<AccountId, Amount: Copy> SettlementTransaction<AccountId, Amount> {
    pub fn amount(&self) -> Amount {
        self.amount
    }
}

// Executing a payment is itself a transfer, which lets a plan be replayed through the balance
// aggregator.
impl<AccountId, Amount: Copy> Transaction for SettlementTransaction<AccountId, Amount> {
    type AccountId = AccountId;
    type Amount = Amount;

    fn payer(&self) -> &Self::AccountId {
        &self.from
    }

    fn payee(&self) -> &Self::AccountId {
        &self.to
    }

    fn amount(&self) -> Self::Amount {
        self.amount
    }
}

/// Result of a settlement run, handed to the caller by value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Settlement<AccountId, Amount> {
    pub balances: Balances<AccountId, Amount>,
    pub plan: Vec<SettlementTransaction<AccountId, Amount>>,
    pub total_flow: Amount,
}

/// Translates every augmenting path into a payment from its first interior node (the debtor fed by
/// the source) to its last interior node (the creditor draining into the sink).
pub fn plan<AccountId, Amt>(
    paths: &[AugmentingPath<Amt>],
    participants: &Participants<AccountId>,
) -> Result<Vec<SettlementTransaction<AccountId, Amt>>, Error>
where
    AccountId: Id,
    Amt: Amount,
{
    paths
        .iter()
        .map(|path| {
            let from = path
                .first_interior()
                .ok_or(Error::UnmappedNode(participants.source()))?;
            let to = path
                .last_interior()
                .ok_or(Error::UnmappedNode(participants.sink()))?;

            Ok(SettlementTransaction::new(
                participants.participant(from)?.clone(),
                participants.participant(to)?.clone(),
                path.flow(),
            ))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use super::*;

    #[test]
    fn resolves_debtor_and_creditor() {
        let participants = Participants::new(vec!["A", "B", "C"]).unwrap();
        let paths = vec![
            AugmentingPath::new(vec![0, 2, 1, 4], 20i64),
            AugmentingPath::new(vec![0, 3, 1, 4], 10),
        ];

        assert_eq!(
            plan(&paths, &participants).unwrap(),
            vec![
                SettlementTransaction::new("B", "A", 20),
                SettlementTransaction::new("C", "A", 10),
            ]
        );
    }

    #[test]
    fn long_path_uses_outer_interior_nodes() {
        let participants = Participants::new(vec!["A", "B", "C", "D"]).unwrap();
        let paths = vec![AugmentingPath::new(vec![0, 2, 3, 1, 4, 5], 3i64)];

        assert_eq!(
            plan(&paths, &participants).unwrap(),
            vec![SettlementTransaction::new("B", "D", 3)]
        );
    }

    #[test]
    fn unmapped_nodes_are_reported() {
        let participants = Participants::new(vec!["A", "B"]).unwrap();

        let through_sentinel = vec![AugmentingPath::new(vec![0, 3, 1, 3], 1i64)];
        assert_eq!(
            plan(&through_sentinel, &participants).unwrap_err(),
            Error::UnmappedNode(3)
        );

        let out_of_range = vec![AugmentingPath::new(vec![0, 1, 9, 3], 1i64)];
        assert_eq!(
            plan(&out_of_range, &participants).unwrap_err(),
            Error::UnmappedNode(9)
        );

        let too_short = vec![AugmentingPath::new(vec![0, 3], 1i64)];
        assert_eq!(
            plan(&too_short, &participants).unwrap_err(),
            Error::UnmappedNode(0)
        );
    }
}
