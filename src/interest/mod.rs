pub mod slab;

use crate::decimal::{Money, Rate};
use crate::errors::Result;
use crate::types::CalculationSlab;

pub use slab::SlabInterest;

/// trait for up-front interest calculations
pub trait InterestCalculator {
    fn calculate_interest(&self, principal: Money, rate: Rate) -> Result<Money>;
}

/// initial interest charged on `principal`
pub fn interest(principal: Money, rate: Rate, slab: CalculationSlab) -> Result<Money> {
    SlabInterest::new(slab).calculate_interest(principal, rate)
}
