use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::str::FromStr;

use crate::decimal::Money;

/// name of a loan plan in the plan repository
pub type PlanName = String;

/// how the initial interest is charged on a principal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CalculationSlab {
    /// interest on the exact principal
    #[default]
    Flat,
    /// principal rounded up to the next multiple of the slab first
    Stepped(Money),
}

impl CalculationSlab {
    pub fn from_amount(amount: Money) -> Self {
        if amount.is_zero() {
            CalculationSlab::Flat
        } else {
            CalculationSlab::Stepped(amount)
        }
    }
}

impl Serialize for CalculationSlab {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            CalculationSlab::Flat => serializer.serialize_str("flat"),
            CalculationSlab::Stepped(amount) => amount.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for CalculationSlab {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        use serde::de::Error;

        match serde_json::Value::deserialize(deserializer)? {
            serde_json::Value::Null => Ok(CalculationSlab::Flat),
            serde_json::Value::String(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("flat") {
                    return Ok(CalculationSlab::Flat);
                }
                Decimal::from_str(trimmed)
                    .map(|d| CalculationSlab::from_amount(Money::from_decimal(d)))
                    .map_err(|_| D::Error::custom(format!("unknown calculation slab: {}", s)))
            }
            serde_json::Value::Number(n) => Decimal::from_str(&n.to_string())
                .or_else(|_| Decimal::from_scientific(&n.to_string()))
                .map(|d| CalculationSlab::from_amount(Money::from_decimal(d)))
                .map_err(|e| D::Error::custom(format!("invalid calculation slab {}: {}", n, e))),
            other => Err(D::Error::custom(format!(
                "calculation slab must be a number or \"flat\", found {}",
                other
            ))),
        }
    }
}
