use alloc::vec;
use alloc::vec::Vec;

use num_traits::{CheckedAdd, CheckedSub, Zero};

use crate::amount::Amount;
use crate::error::Error;
use crate::id::Id;
use crate::participants::Participants;
use crate::transaction::Transaction;

/// Signed net balance of every participant.
///
/// Values are indexed by flow network node, so the source and sink slots are present and always
/// zero. A positive balance means the group owes that participant money.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Balances<AccountId, Amt> {
    ids: Vec<AccountId>,
    values: Vec<Amt>,
}

impl<AccountId, Amt: Copy> Balances<AccountId, Amt> {
    /// Balance of the node at `idx`, sentinels included.
    pub fn at(&self, idx: usize) -> Option<Amt> {
        self.values.get(idx).copied()
    }

    pub fn get(&self, id: &AccountId) -> Option<Amt>
    where
        AccountId: PartialEq,
    {
        self.ids
            .iter()
            .position(|i| i == id)
            .map(|pos| self.values[pos + 1])
    }

    /// Participants and their balances in roster order, zero balances included.
    pub fn iter(&self) -> impl Iterator<Item = (&AccountId, Amt)> + '_ {
        self.ids.iter().zip(self.values[1..].iter().copied())
    }

    /// Node indexed view, `[source, participants.., sink]`.
    pub fn by_node(&self) -> &[Amt] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn into_entries(self) -> Vec<(AccountId, Amt)> {
        self.ids
            .into_iter()
            .zip(self.values.into_iter().skip(1))
            .collect()
    }

    pub fn map_amounts<B, E, F>(self, mut f: F) -> Result<Balances<AccountId, B>, E>
    where
        F: FnMut(Amt) -> Result<B, E>,
    {
        let values = self
            .values
            .into_iter()
            .map(&mut f)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Balances {
            ids: self.ids,
            values,
        })
    }
}

impl<AccountId, Amt: Amount> Balances<AccountId, Amt> {
    /// Builds a report from `(participant, balance)` pairs in roster order.
    pub fn from_entries(entries: Vec<(AccountId, Amt)>) -> Self {
        let (ids, inner): (Vec<_>, Vec<_>) = entries.into_iter().unzip();
        let mut values = Vec::with_capacity(inner.len() + 2);
        values.push(Amt::zero());
        values.extend(inner);
        values.push(Amt::zero());
        Self { ids, values }
    }

    /// Sum of all balances; zero for any balance set produced from transactions.
    pub fn total(&self) -> Result<Amt, Error> {
        self.values
            .iter()
            .try_fold(Amt::zero(), |acc, v| acc.checked_add(v).ok_or(Error::Overflow))
    }

    /// Net Internal Debt, i.e. the sum of the positive balances.
    pub fn credit_total(&self) -> Result<Amt, Error> {
        self.values
            .iter()
            .filter(|v| **v > Amt::zero())
            .try_fold(Amt::zero(), |acc, v| acc.checked_add(v).ok_or(Error::Overflow))
    }
}

/// Reduces raw transactions to one net balance per participant.
///
/// For each transaction the payer's balance grows by `amount` and the payee's shrinks by the same.
pub fn aggregate<'a, T, I>(
    participants: &Participants<T::AccountId>,
    transactions: I,
) -> Result<Balances<T::AccountId, T::Amount>, Error>
where
    T: 'a + Transaction,
    T::AccountId: Id,
    T::Amount: Amount,
    I: IntoIterator<Item = &'a T>,
{
    let mut values = vec![T::Amount::zero(); participants.node_count()];

    for t in transactions {
        let amount = t.amount();
        if amount <= T::Amount::zero() {
            return Err(Error::NonPositiveAmount);
        }

        let payer = participants.index_of(t.payer())?;
        let payee = participants.index_of(t.payee())?;

        values[payer] = values[payer]
            .checked_add(&amount)
            .ok_or(Error::Overflow)?; // paying for others increases the net balance
        values[payee] = values[payee]
            .checked_sub(&amount)
            .ok_or(Error::Overflow)?; // being paid for decreases it
    }

    Ok(Balances {
        ids: participants.ids().to_vec(),
        values,
    })
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use super::*;
    use crate::transaction::SimpleTransaction;

    fn roster() -> Participants<&'static str> {
        Participants::new(vec!["A", "B", "C"]).unwrap()
    }

    #[test]
    fn payer_gains_payee_loses() {
        let txs = vec![
            SimpleTransaction::new("A", "B", 30).unwrap(),
            SimpleTransaction::new("B", "C", 10).unwrap(),
        ];
        let balances = aggregate(&roster(), &txs).unwrap();

        assert_eq!(balances.by_node(), &[0, 30, -20, -10, 0]);
        assert_eq!(balances.get(&"B"), Some(-20));
        assert_eq!(balances.total(), Ok(0));
        assert_eq!(balances.credit_total(), Ok(30));
    }

    #[test]
    fn report_keeps_zero_balances_in_roster_order() {
        let txs = vec![SimpleTransaction::new("C", "A", 5).unwrap()];
        let entries = aggregate(&roster(), &txs).unwrap().into_entries();
        assert_eq!(entries, vec![("A", -5), ("B", 0), ("C", 5)]);
    }

    #[test]
    fn unknown_participant_is_rejected() {
        let txs = vec![SimpleTransaction::new("A", "Z", 5).unwrap()];
        assert_eq!(
            aggregate(&roster(), &txs).unwrap_err(),
            Error::UnknownParticipant("\"Z\"".into())
        );
    }

    #[test]
    fn overflow_is_reported() {
        let txs = vec![
            SimpleTransaction::new("A", "B", i32::MAX).unwrap(),
            SimpleTransaction::new("A", "C", 1).unwrap(),
        ];
        assert_eq!(aggregate(&roster(), &txs).unwrap_err(), Error::Overflow);
    }

    #[test]
    fn aggregation_is_repeatable() {
        let txs = vec![
            SimpleTransaction::new("A", "B", 7).unwrap(),
            SimpleTransaction::new("C", "A", 3).unwrap(),
        ];
        let p = roster();
        assert_eq!(aggregate(&p, &txs), aggregate(&p, &txs));
    }
}
