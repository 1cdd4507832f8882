//! Conversion between decimal amounts and the scaled integers the engine computes with.

use alloc::string::ToString;

use rust_decimal::Decimal;

use crate::error::Error;

/// Largest scale a [`Decimal`] can carry.
pub const MAX_SCALE: u32 = 28;

/// Converts `amount` to minor units at `scale` fractional digits, e.g. `12.5` at scale 2 is `1250`.
///
/// Amounts needing more digits than `scale` are rejected rather than rounded.
pub fn to_minor_units(amount: Decimal, scale: u32) -> Result<i64, Error> {
    check_scale(scale)?;
    if amount.normalize().scale() > scale {
        return Err(Error::ExcessPrecision(amount.to_string(), scale));
    }

    let mut scaled = amount;
    scaled.rescale(scale);
    if scaled.scale() != scale {
        // rescale gives up when the mantissa would not fit
        return Err(Error::Overflow);
    }
    i64::try_from(scaled.mantissa()).map_err(|_| Error::Overflow)
}

/// Rejects scales a [`Decimal`] cannot represent.
pub fn check_scale(scale: u32) -> Result<u32, Error> {
    if scale > MAX_SCALE {
        Err(Error::InvalidScale(scale))
    } else {
        Ok(scale)
    }
}

/// Converts minor units back to a decimal with exactly `scale` fractional digits.
pub fn from_minor_units(units: i64, scale: u32) -> Result<Decimal, Error> {
    check_scale(scale)?;
    Decimal::try_from_i128_with_scale(i128::from(units), scale).map_err(|_| Error::Overflow)
}
