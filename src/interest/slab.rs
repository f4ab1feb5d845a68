use crate::decimal::{Money, Rate};
use crate::errors::{LoanError, Result};
use crate::interest::InterestCalculator;
use crate::types::CalculationSlab;

/// engine for slab-based up-front interest
///
/// with a stepped slab the principal is rounded up to the next whole slab
/// before the rate applies, so 2100 on a 1000 slab is charged as 3000.
pub struct SlabInterest {
    pub slab: CalculationSlab,
}

impl SlabInterest {
    pub fn new(slab: CalculationSlab) -> Self {
        Self { slab }
    }

    /// amount the rate is applied to
    pub fn principal_base(&self, principal: Money) -> Result<Money> {
        match self.slab {
            CalculationSlab::Flat => Ok(principal),
            CalculationSlab::Stepped(step) if step.is_negative() => Err(LoanError::InvalidRequest {
                message: format!("calculation slab must be positive, got {}", step),
            }),
            CalculationSlab::Stepped(step) => principal.ceil_to_multiple(step),
        }
    }
}

impl InterestCalculator for SlabInterest {
    fn calculate_interest(&self, principal: Money, rate: Rate) -> Result<Money> {
        self.principal_base(principal)?.percentage(rate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_stepped_slab_rounds_principal_up() {
        let engine = SlabInterest::new(CalculationSlab::Stepped(Money::from_major(1_000)));

        assert_eq!(
            engine.principal_base(Money::from_major(2_100)).unwrap(),
            Money::from_major(3_000)
        );
        assert_eq!(
            engine
                .calculate_interest(Money::from_major(2_100), Rate::from_percentage(10))
                .unwrap(),
            Money::from_major(300)
        );
    }

    #[test]
    fn test_exact_multiple_not_rounded() {
        let engine = SlabInterest::new(CalculationSlab::Stepped(Money::from_major(500)));

        assert_eq!(
            engine.principal_base(Money::from_major(2_000)).unwrap(),
            Money::from_major(2_000)
        );
        assert_eq!(
            engine
                .calculate_interest(Money::from_major(2_000), Rate::from_percentage(12))
                .unwrap(),
            Money::from_major(240)
        );
    }

    #[test]
    fn test_flat_fractional_rate() {
        let engine = SlabInterest::new(CalculationSlab::Flat);
        let amount = engine
            .calculate_interest(Money::from_major(1_000), Rate::from_percentage_decimal(dec!(2.5)))
            .unwrap();

        assert_eq!(amount, Money::from_major(25));
    }

    #[test]
    fn test_negative_slab_rejected() {
        let engine = SlabInterest::new(CalculationSlab::Stepped(Money::from_major(-100)));
        assert!(engine
            .calculate_interest(Money::from_major(1_000), Rate::from_percentage(5))
            .is_err());
    }
}
