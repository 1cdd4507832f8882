use alloc::vec::Vec;
use core::marker::PhantomData;

use rust_decimal::Decimal;

use crate::config::Config;
use crate::error::Error;
use crate::id::Id;
use crate::money::{check_scale, from_minor_units, to_minor_units};
use crate::settlement::Settlement;
use crate::transaction::{RawTransaction, SimpleTransaction};
use crate::SettlementEngine;

/// Wraps an integer engine so that callers can work with decimal amounts.
///
/// Amounts are converted to minor units at a fixed scale on the way in and back to decimals on
/// the way out, so no rounding happens anywhere in between. The scale is the one in the inner
/// engine's [`Config`].
#[derive(Clone, Debug)]
pub struct DecimalEngine<AccountId, M> {
    inner: M,
    scale: u32,
    _phantom: PhantomData<AccountId>,
}

impl<AccountId, M: SettlementEngine> DecimalEngine<AccountId, M> {
    pub fn wrapping(inner: M) -> Result<Self, Error> {
        let scale = check_scale(inner.config().scale)?;
        Ok(Self {
            inner,
            scale,
            _phantom: Default::default(),
        })
    }

    pub fn scale(&self) -> u32 {
        self.scale
    }

    fn to_decimal(
        &self,
        settlement: Settlement<AccountId, i64>,
    ) -> Result<Settlement<AccountId, Decimal>, Error>
    where
        AccountId: Id,
    {
        let Settlement {
            balances,
            plan,
            total_flow,
        } = settlement;

        Ok(Settlement {
            balances: balances.map_amounts(|b| from_minor_units(b, self.scale))?,
            plan: plan
                .into_iter()
                .map(|p| p.map_amount(|a| from_minor_units(a, self.scale)))
                .collect::<Result<Vec<_>, _>>()?,
            total_flow: from_minor_units(total_flow, self.scale)?,
        })
    }

    fn to_minor(
        &self,
        settlement: &Settlement<AccountId, Decimal>,
    ) -> Result<Settlement<AccountId, i64>, Error>
    where
        AccountId: Id,
    {
        Ok(Settlement {
            balances: settlement
                .balances
                .clone()
                .map_amounts(|b| to_minor_units(b, self.scale))?,
            plan: settlement
                .plan
                .iter()
                .cloned()
                .map(|p| p.map_amount(|a| to_minor_units(a, self.scale)))
                .collect::<Result<Vec<_>, _>>()?,
            total_flow: to_minor_units(settlement.total_flow, self.scale)?,
        })
    }
}

impl<AccountId, M> SettlementEngine for DecimalEngine<AccountId, M>
where
    AccountId: Id,
    M: SettlementEngine<
        AccountId = AccountId,
        Amount = i64,
        Transactions = Vec<SimpleTransaction<AccountId, i64>>,
        Error = Error,
    >,
{
    type AccountId = AccountId;
    type Amount = Decimal;
    type Transactions = Vec<RawTransaction<AccountId, Decimal>>;
    type Algo = M::Algo;
    type Error = Error;

    fn config(&self) -> &Config {
        self.inner.config()
    }

    fn run(
        &mut self,
        participants: Vec<Self::AccountId>,
        transactions: Self::Transactions,
    ) -> Result<Settlement<Self::AccountId, Self::Amount>, Self::Error> {
        let transactions = transactions
            .into_iter()
            .map(|t| {
                let amount = to_minor_units(t.amount, self.scale)?;
                SimpleTransaction::new(t.payer, t.payee, amount)
            })
            .collect::<Result<Vec<_>, _>>()?;

        let settlement = self.inner.run(participants, transactions)?;
        self.to_decimal(settlement)
    }

    fn check(
        &self,
        settlement: &Settlement<Self::AccountId, Self::Amount>,
    ) -> Result<(), Self::Error> {
        let settlement = self.to_minor(settlement)?;
        self.inner.check(&settlement)
    }
}
