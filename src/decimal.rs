use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::{LoanError, Result};

/// Money type with 8 decimal places precision
///
/// amounts are kept normalized so that `200.0` and `200` print the same.
/// arithmetic is checked: an amount beyond the decimal range is an error,
/// never a panic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub struct Money(Decimal);

impl Money {
    pub const ZERO: Money = Money(Decimal::ZERO);

    /// create from decimal
    pub fn from_decimal(d: Decimal) -> Self {
        Money(d.round_dp(8).normalize())
    }

    /// create from string with exact parsing
    pub fn from_str_exact(s: &str) -> std::result::Result<Self, rust_decimal::Error> {
        Ok(Money::from_decimal(Decimal::from_str(s)?))
    }

    /// create from integer amount (rupees, dollars, etc)
    pub fn from_major(amount: i64) -> Self {
        Money(Decimal::from(amount))
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn is_negative(&self) -> bool {
        self.0.is_sign_negative() && !self.0.is_zero()
    }

    /// multiply by a ratio
    pub fn checked_mul(&self, factor: Decimal) -> Result<Self> {
        self.0
            .checked_mul(factor)
            .map(Money::from_decimal)
            .ok_or_else(|| overflow(format!("{} * {}", self.0, factor)))
    }

    /// total over a number of equal periods
    pub fn checked_mul_periods(&self, periods: u32) -> Result<Self> {
        self.checked_mul(Decimal::from(periods))
    }

    /// calculate percentage (e.g., 5% of 100)
    pub fn percentage(&self, rate: Rate) -> Result<Self> {
        self.checked_mul(rate.0)
    }

    /// round up to the next whole multiple of `step`
    ///
    /// a zero step leaves the amount untouched
    pub fn ceil_to_multiple(&self, step: Money) -> Result<Self> {
        if step.is_zero() {
            return Ok(*self);
        }
        self.0
            .checked_div(step.0)
            .and_then(|steps| steps.ceil().checked_mul(step.0))
            .map(Money::from_decimal)
            .ok_or_else(|| overflow(format!("{} rounded to a multiple of {}", self.0, step.0)))
    }
}

fn overflow(operation: String) -> LoanError {
    LoanError::InvalidRequest {
        message: format!("amount out of range: {}", operation),
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Money {
    type Err = rust_decimal::Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Money::from_str_exact(s)
    }
}

/// rate type for interest rates, stored as a fraction (0.12 for 12%)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub struct Rate(Decimal);

impl Rate {
    pub const ZERO: Rate = Rate(Decimal::ZERO);

    /// create from whole percentage (e.g., 5 for 5%)
    pub fn from_percentage(p: u32) -> Self {
        Rate(Decimal::from(p) / Decimal::from(100))
    }

    /// create from a fractional percentage (e.g., 1.5 for 1.5%)
    pub fn from_percentage_decimal(p: Decimal) -> Self {
        Rate(p / Decimal::from(100))
    }

    pub fn as_percentage(&self) -> Decimal {
        self.0 * Decimal::from(100)
    }
}

impl fmt::Display for Rate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.as_percentage().normalize())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_money_precision() {
        let m = Money::from_str_exact("100.123456789").unwrap();
        assert_eq!(m.to_string(), "100.12345679"); // rounded to 8 places
    }

    #[test]
    fn test_percentage() {
        let principal = Money::from_major(2_000);
        let interest = principal.percentage(Rate::from_percentage(12)).unwrap();
        assert_eq!(interest, Money::from_major(240));

        let half = principal.percentage(Rate::from_percentage_decimal(dec!(1.5))).unwrap();
        assert_eq!(half, Money::from_major(30));
    }

    #[test]
    fn test_ceil_to_multiple() {
        let amount = Money::from_major(2_100);
        assert_eq!(
            amount.ceil_to_multiple(Money::from_major(1_000)).unwrap(),
            Money::from_major(3_000)
        );
        assert_eq!(
            Money::from_major(3_000).ceil_to_multiple(Money::from_major(1_000)).unwrap(),
            Money::from_major(3_000)
        );
        assert_eq!(amount.ceil_to_multiple(Money::ZERO).unwrap(), amount);
    }

    #[test]
    fn test_rate_display() {
        assert_eq!(Rate::from_percentage(12).to_string(), "12%");
        assert_eq!(Rate::from_percentage_decimal(dec!(2.5)).to_string(), "2.5%");
    }

    #[test]
    fn test_money_times_periods() {
        let installment = Money::from_str_exact("333.33333333").unwrap();
        assert_eq!(
            installment.checked_mul_periods(3).unwrap(),
            Money::from_str_exact("999.99999999").unwrap()
        );
    }

    #[test]
    fn test_overflow_is_an_error() {
        let huge = Money::from_decimal(Decimal::MAX);
        assert!(matches!(
            huge.checked_mul_periods(10),
            Err(LoanError::InvalidRequest { .. })
        ));
        assert!(matches!(
            huge.ceil_to_multiple(Money::from_str_exact("0.5").unwrap()),
            Err(LoanError::InvalidRequest { .. })
        ));
        // shrinking factors stay in range
        assert!(huge.checked_mul(dec!(0.2)).is_ok());
    }
}
