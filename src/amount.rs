//! Validated monetary values.
//!
//! Every amount entering the ledger is an exact [`Decimal`] with at most
//! [`MAX_FRACTION_DIGITS`] fraction digits and [`MAX_INTEGER_DIGITS`] integer digits.
//! Trailing zeros do not count as fraction digits, so `"10.500"` is accepted and keeps its scale.

use rust_decimal::Decimal;

pub const MAX_INTEGER_DIGITS: u32 = 17;
pub const MAX_FRACTION_DIGITS: u32 = 2;

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum AmountError {
    #[error("amount must be positive value={value}")]
    NotPositive { value: Decimal },
    #[error("balance must not be negative value={value}")]
    Negative { value: Decimal },
    #[error("too many fraction digits, at most {max} allowed value={value}", max = MAX_FRACTION_DIGITS)]
    TooManyFractionDigits { value: Decimal },
    #[error("too many integer digits, at most {max} allowed value={value}", max = MAX_INTEGER_DIGITS)]
    TooManyIntegerDigits { value: Decimal },
}

/// Amount of a debit, credit or transfer: strictly greater than zero.
#[derive(Debug, Copy, Clone, PartialEq, Eq, parse_display::Display)]
pub struct PositiveAmount(Decimal);

impl PositiveAmount {
    pub const fn as_inner(&self) -> Decimal {
        self.0
    }
}

impl TryFrom<Decimal> for PositiveAmount {
    type Error = AmountError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        if value <= Decimal::ZERO {
            return Err(AmountError::NotPositive { value });
        }
        check_digits(value)?;
        Ok(Self(value))
    }
}

/// Initial balance of a newly opened account: zero is allowed, negatives are not.
#[derive(Debug, Copy, Clone, PartialEq, Eq, parse_display::Display)]
pub struct OpeningBalance(Decimal);

impl OpeningBalance {
    pub const ZERO: Self = Self(Decimal::ZERO);

    pub const fn as_inner(&self) -> Decimal {
        self.0
    }
}

impl TryFrom<Decimal> for OpeningBalance {
    type Error = AmountError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        if value < Decimal::ZERO {
            return Err(AmountError::Negative { value });
        }
        check_digits(value)?;
        // `-0.00` keeps its sign bit.
        let value = if value.is_zero() { value.abs() } else { value };
        Ok(Self(value))
    }
}

fn check_digits(value: Decimal) -> Result<(), AmountError> {
    if value.normalize().scale() > MAX_FRACTION_DIGITS {
        return Err(AmountError::TooManyFractionDigits { value });
    }
    let integer_bound = Decimal::from(10_u64.pow(MAX_INTEGER_DIGITS));
    if value.abs().trunc() >= integer_bound {
        return Err(AmountError::TooManyIntegerDigits { value });
    }
    Ok(())
}
