use num_traits::Zero;
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// A pairwise transfer between two group members.
///
/// The payer advanced `amount` on the payee's behalf, so the payee owes the payer that amount.
pub trait Transaction {
    type AccountId;
    type Amount;

    fn payer(&self) -> &Self::AccountId;
    fn payee(&self) -> &Self::AccountId;
    fn amount(&self) -> Self::Amount;
}

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Deserialize, Serialize)]
#[serde(
    try_from = "RawTransaction<AccountId, Amount>",
    bound(deserialize = "AccountId: Deserialize<'de>, \
                    Amount: Zero + PartialOrd + Deserialize<'de>")
)]
pub struct SimpleTransaction<AccountId, Amount> {
    payer: AccountId,
    payee: AccountId,
    amount: Amount,
}

impl<AccountId, Amount> SimpleTransaction<AccountId, Amount>
where
    Amount: Zero + PartialOrd,
{
    pub fn new(payer: AccountId, payee: AccountId, amount: Amount) -> Result<Self, Error> {
        if amount <= Amount::zero() {
            Err(Error::NonPositiveAmount)
        } else {
            Ok(Self {
                payer,
                payee,
                amount,
            })
        }
    }
}

impl<AccountId, Amount> Transaction for SimpleTransaction<AccountId, Amount>
where
    Amount: Copy,
{
    type AccountId = AccountId;
    type Amount = Amount;

    fn payer(&self) -> &Self::AccountId {
        &self.payer
    }

    fn payee(&self) -> &Self::AccountId {
        &self.payee
    }

    fn amount(&self) -> Self::Amount {
        self.amount
    }
}

/// Unvalidated transaction record as it arrives from storage.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Deserialize, Serialize)]
pub struct RawTransaction<AccountId, Amount> {
    pub payer: AccountId,
    pub payee: AccountId,
    pub amount: Amount,
}

impl<AccountId, Amount> RawTransaction<AccountId, Amount> {
    pub fn new(payer: AccountId, payee: AccountId, amount: Amount) -> Self {
        Self {
            payer,
            payee,
            amount,
        }
    }
}

impl<AccountId, Amount> Transaction for RawTransaction<AccountId, Amount>
where
    Amount: Copy,
{
    type AccountId = AccountId;
    type Amount = Amount;

    fn payer(&self) -> &Self::AccountId {
        &self.payer
    }

    fn payee(&self) -> &Self::AccountId {
        &self.payee
    }

    fn amount(&self) -> Self::Amount {
        self.amount
    }
}

impl<AccountId, Amount> TryFrom<RawTransaction<AccountId, Amount>>
    for SimpleTransaction<AccountId, Amount>
where
    Amount: Zero + PartialOrd,
{
    type Error = Error;

    fn try_from(t: RawTransaction<AccountId, Amount>) -> Result<Self, Self::Error> {
        Self::new(t.payer, t.payee, t.amount)
    }
}

impl<AccountId, Amount> From<SimpleTransaction<AccountId, Amount>>
    for RawTransaction<AccountId, Amount>
{
    fn from(t: SimpleTransaction<AccountId, Amount>) -> Self {
        Self {
            payer: t.payer,
            payee: t.payee,
            amount: t.amount,
        }
    }
}
