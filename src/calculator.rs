use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::calendar::{add_days, add_months, billing_anchor, month_difference};
use crate::config::LoanPlan;
use crate::decimal::Money;
use crate::errors::{LoanError, Result};
use crate::interest::interest;
use crate::repository::{PlanRepository, PlanSource};

/// inputs for one principal/duration calculation
#[derive(Debug, Clone, PartialEq)]
pub struct LoanRequest {
    /// income received by the borrower each period
    pub income: Money,
    pub plan: PlanSource,
    /// latest date the loan may run to
    pub end_date: NaiveDate,
    /// date the loan starts
    pub execution_date: NaiveDate,
}

/// maximum principal with its repayment schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationResult {
    pub principal: Money,
    /// last day of the final billing period
    pub expected_eta: NaiveDate,
    /// number of monthly billing periods
    pub duration: u32,
    /// installment collected each period
    pub recovery_amount: Money,
    pub initial_interest: Money,
}

impl CalculationResult {
    pub fn json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|e| format!("JSON error: {}", e))
    }
}

/// sizes loans against a plan repository
pub struct PrincipalCalculator<'a, R: PlanRepository + ?Sized> {
    repository: &'a R,
}

impl<'a, R: PlanRepository + ?Sized> PrincipalCalculator<'a, R> {
    pub fn new(repository: &'a R) -> Self {
        Self { repository }
    }

    /// resolve the request's plan and size the loan
    pub fn calculate(&self, request: LoanRequest) -> Result<CalculationResult> {
        let plan = self.repository.resolve(request.plan)?;
        calculate_for_plan(&plan, request.income, request.end_date, request.execution_date)
    }
}

/// size a loan for an already validated plan
///
/// the installment is `income * income_multiple / max_duration`. unless the
/// plan forces its duration, a schedule that would reach `end_date` is cut
/// down to the whole months between the first billing date and `end_date`,
/// which is zero periods when `end_date` falls inside the first one.
pub fn calculate_for_plan(
    plan: &LoanPlan,
    income: Money,
    end_date: NaiveDate,
    execution_date: NaiveDate,
) -> Result<CalculationResult> {
    let income_portion = plan.income_multiple / Decimal::from(plan.max_duration);
    let recovery_amount = income.checked_mul(income_portion)?;
    let mut duration = plan.max_duration;

    let billing_start_date = billing_anchor(execution_date, plan.billing_day)?;
    let mut expected_eta = add_months(billing_start_date, plan.max_duration as i32)?;

    debug!(
        plan = plan.name.as_deref().unwrap_or("inline"),
        %billing_start_date,
        %expected_eta,
        %recovery_amount,
        "computed unconstrained schedule"
    );

    if !plan.force_duration && end_date <= expected_eta {
        let months = month_difference(end_date, billing_start_date)?;
        duration = u32::try_from(months).map_err(|_| LoanError::InvalidDate {
            message: format!(
                "end date {} is before the first billing date {}",
                end_date, billing_start_date
            ),
        })?;
        // anchored on the end date rather than on billing_start + duration:
        // an end date falling exactly on a billing day yields an eta one
        // period earlier than the duration alone implies
        expected_eta = add_months(billing_anchor(end_date, plan.billing_day)?, -1)?;

        info!(
            max_duration = plan.max_duration,
            duration,
            %end_date,
            "duration capped to end date"
        );
    }

    let principal = recovery_amount.checked_mul_periods(duration)?;
    let initial_interest = interest(principal, plan.rate_of_interest, plan.calculation_slab)?;

    Ok(CalculationResult {
        principal,
        expected_eta: add_days(expected_eta, -1)?,
        duration,
        recovery_amount,
        initial_interest,
    })
}
