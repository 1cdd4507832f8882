use alloc::vec::Vec;
use core::cmp::Ordering;

use num_traits::{CheckedAdd, CheckedNeg, Zero};

use crate::amount::Amount;
use crate::balance::Balances;
use crate::error::Error;
use crate::id::Id;

/// A participant with a non-zero position and the magnitude of that position.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Position<AccountId, Amt> {
    pub node: usize,
    pub participant: AccountId,
    pub amount: Amt,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Partition<AccountId, Amt> {
    pub creditors: Vec<Position<AccountId, Amt>>,
    pub debtors: Vec<Position<AccountId, Amt>>,
}

impl<AccountId, Amt: Amount> Partition<AccountId, Amt> {
    pub fn credit_total(&self) -> Result<Amt, Error> {
        checked_total(&self.creditors)
    }

    pub fn debt_total(&self) -> Result<Amt, Error> {
        checked_total(&self.debtors)
    }

    pub fn is_settled(&self) -> bool {
        self.creditors.is_empty() && self.debtors.is_empty()
    }
}

fn checked_total<AccountId, Amt: Amount>(
    positions: &[Position<AccountId, Amt>],
) -> Result<Amt, Error> {
    positions.iter().try_fold(Amt::zero(), |acc, p| {
        acc.checked_add(&p.amount).ok_or(Error::Overflow)
    })
}

/// Splits participants into creditors (positive balance) and debtors (negative balance, reported
/// as a magnitude), both in roster order. Zero balances are dropped.
pub fn partition<AccountId, Amt>(
    balances: &Balances<AccountId, Amt>,
) -> Result<Partition<AccountId, Amt>, Error>
where
    AccountId: Id,
    Amt: Amount,
{
    balances.iter().enumerate().try_fold(
        Partition {
            creditors: Vec::new(),
            debtors: Vec::new(),
        },
        |mut acc, (pos, (id, balance))| {
            let position = |amount| Position {
                node: pos + 1,
                participant: id.clone(),
                amount,
            };
            match balance.cmp(&Amt::zero()) {
                Ordering::Greater => acc.creditors.push(position(balance)),
                Ordering::Less => {
                    let owed = balance.checked_neg().ok_or(Error::Overflow)?;
                    acc.debtors.push(position(owed));
                }
                Ordering::Equal => {}
            }
            Ok(acc)
        },
    )
}
