use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

use crate::decimal::Rate;
use crate::errors::{LoanError, Result};
use crate::types::{CalculationSlab, PlanName};

/// loan plan record as stored or submitted, before validation
///
/// every field is optional so that incomplete records can be reported
/// with the full list of what is missing
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlanFields {
    pub name: Option<PlanName>,
    pub income_multiple: Option<Decimal>,
    pub max_duration: Option<u32>,
    pub billing_day: Option<u32>,
    #[serde(deserialize_with = "deserialize_flag")]
    pub force_duration: bool,
    pub rate_of_interest: Option<Decimal>,
    pub calculation_slab: CalculationSlab,
}

impl PlanFields {
    /// parse a single plan record from json
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// names of required fields that are absent or zero
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.income_multiple.map_or(true, |m| m.is_zero()) {
            missing.push("income_multiple");
        }
        if self.max_duration.map_or(true, |d| d == 0) {
            missing.push("max_duration");
        }
        if self.billing_day.map_or(true, |d| d == 0) {
            missing.push("billing_day");
        }
        missing
    }
}

/// accepts `true`/`false` as well as the `0`/`1` check values used by form backends
fn deserialize_flag<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<bool, D::Error> {
    use serde::de::Error;

    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::Null => Ok(false),
        serde_json::Value::Bool(b) => Ok(b),
        serde_json::Value::Number(n) => Ok(n.as_f64().map_or(false, |v| v != 0.0)),
        serde_json::Value::String(s) => match s.trim() {
            "" | "0" | "false" => Ok(false),
            "1" | "true" => Ok(true),
            other => Err(D::Error::custom(format!("invalid flag: {}", other))),
        },
        other => Err(D::Error::custom(format!("invalid flag: {}", other))),
    }
}

/// validated loan plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanPlan {
    pub name: Option<PlanName>,
    /// multiple of one period's income that may be lent in total
    pub income_multiple: Decimal,
    /// number of monthly billing periods
    pub max_duration: u32,
    /// day of month installments fall due
    pub billing_day: u32,
    /// keep `max_duration` even when it runs past the requested end date
    pub force_duration: bool,
    pub rate_of_interest: Rate,
    pub calculation_slab: CalculationSlab,
}

impl LoanPlan {
    /// create a plan that shrinks to fit the requested end date
    pub fn new(income_multiple: Decimal, max_duration: u32, billing_day: u32) -> Result<Self> {
        Self::try_from(PlanFields {
            income_multiple: Some(income_multiple),
            max_duration: Some(max_duration),
            billing_day: Some(billing_day),
            ..PlanFields::default()
        })
    }

    /// create a plan that always runs for `max_duration` periods
    pub fn fixed_term(income_multiple: Decimal, max_duration: u32, billing_day: u32) -> Result<Self> {
        Ok(Self {
            force_duration: true,
            ..Self::new(income_multiple, max_duration, billing_day)?
        })
    }

    pub fn named(mut self, name: impl Into<PlanName>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_interest(mut self, rate: Rate, slab: CalculationSlab) -> Self {
        self.rate_of_interest = rate;
        self.calculation_slab = slab;
        self
    }

    /// convert back to a raw record, e.g. for storing in a repository
    pub fn to_fields(&self) -> PlanFields {
        PlanFields {
            name: self.name.clone(),
            income_multiple: Some(self.income_multiple),
            max_duration: Some(self.max_duration),
            billing_day: Some(self.billing_day),
            force_duration: self.force_duration,
            rate_of_interest: Some(self.rate_of_interest.as_percentage()),
            calculation_slab: self.calculation_slab,
        }
    }
}

impl TryFrom<PlanFields> for LoanPlan {
    type Error = LoanError;

    fn try_from(fields: PlanFields) -> Result<Self> {
        let (income_multiple, max_duration, billing_day) =
            match (fields.income_multiple, fields.max_duration, fields.billing_day) {
                (Some(m), Some(d), Some(b)) if !m.is_zero() && d != 0 && b != 0 => (m, d, b),
                _ => {
                    return Err(LoanError::MissingPlanFields {
                        fields: fields.missing_fields(),
                    })
                }
            };

        if billing_day > 31 {
            return Err(LoanError::InvalidBillingDay { day: billing_day });
        }

        Ok(Self {
            name: fields.name,
            income_multiple,
            max_duration,
            billing_day,
            force_duration: fields.force_duration,
            rate_of_interest: Rate::from_percentage_decimal(
                fields.rate_of_interest.unwrap_or(Decimal::ZERO),
            ),
            calculation_slab: fields.calculation_slab,
        })
    }
}
