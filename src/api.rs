//! request/response boundary for hosts that expose the calculation remotely

use chrono::NaiveDate;
use hourglass_rs::SafeTimeProvider;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::calculator::{CalculationResult, LoanRequest, PrincipalCalculator};
use crate::decimal::Money;
use crate::errors::Result;
use crate::repository::{PlanRepository, PlanSource};

/// named parameters of a calculation call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationRequest {
    pub income: Money,
    /// plan name or an inline plan record
    pub loan_plan: serde_json::Value,
    pub end_date: NaiveDate,
    /// defaults to today
    #[serde(default)]
    pub execution_date: Option<NaiveDate>,
}

impl CalculationRequest {
    /// resolve the loose request shape into a calculator request
    pub fn into_loan_request(self, time_provider: &SafeTimeProvider) -> Result<LoanRequest> {
        Ok(LoanRequest {
            income: self.income,
            plan: PlanSource::try_from(self.loan_plan)?,
            end_date: self.end_date,
            execution_date: self
                .execution_date
                .unwrap_or_else(|| time_provider.now().date_naive()),
        })
    }
}

/// run one calculation call
pub fn execute<R: PlanRepository + ?Sized>(
    repository: &R,
    request: CalculationRequest,
    time_provider: &SafeTimeProvider,
) -> Result<CalculationResult> {
    let outcome = request
        .into_loan_request(time_provider)
        .and_then(|request| PrincipalCalculator::new(repository).calculate(request));

    if let Err(e) = &outcome {
        warn!(error = %e, "rejected principal calculation");
    }
    outcome
}

/// run one calculation call from a json body, returning a json body
pub fn execute_json<R: PlanRepository + ?Sized>(
    repository: &R,
    body: &str,
    time_provider: &SafeTimeProvider,
) -> Result<String> {
    let request: CalculationRequest = serde_json::from_str(body).map_err(|e| {
        warn!(error = %e, "malformed calculation request");
        e
    })?;
    let result = execute(repository, request, time_provider)?;
    Ok(serde_json::to_string(&result)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::LoanError;
    use crate::repository::InMemoryPlanRepository;
    use chrono::{TimeZone, Utc};
    use hourglass_rs::TimeSource;
    use serde_json::json;

    fn time() -> SafeTimeProvider {
        SafeTimeProvider::new(TimeSource::Test(Utc.with_ymd_and_hms(2024, 1, 1, 9, 30, 0).unwrap()))
    }

    fn request(loan_plan: serde_json::Value, execution_date: Option<NaiveDate>) -> CalculationRequest {
        CalculationRequest {
            income: Money::from_major(1_000),
            loan_plan,
            end_date: NaiveDate::from_ymd_opt(2025, 12, 31).unwrap(),
            execution_date,
        }
    }

    #[test]
    fn test_execution_date_defaults_to_today() {
        let repo = InMemoryPlanRepository::new();
        let plan = json!({
            "income_multiple": 2,
            "max_duration": 10,
            "billing_day": 5,
            "force_duration": true
        });

        let result = execute(&repo, request(plan, None), &time()).unwrap();
        assert_eq!(result.expected_eta, NaiveDate::from_ymd_opt(2024, 11, 4).unwrap());
    }

    #[test]
    fn test_explicit_execution_date_wins() {
        let repo = InMemoryPlanRepository::new();
        let plan = json!({"income_multiple": 2, "max_duration": 10, "billing_day": 5});

        let result = execute(
            &repo,
            request(plan, NaiveDate::from_ymd_opt(2024, 3, 10)),
            &time(),
        )
        .unwrap();
        assert_eq!(result.expected_eta, NaiveDate::from_ymd_opt(2025, 2, 4).unwrap());
    }

    #[test]
    fn test_number_plan_is_invalid_format() {
        let repo = InMemoryPlanRepository::new();
        let result = execute(&repo, request(json!(7), None), &time());
        assert!(matches!(result, Err(LoanError::InvalidFormat { .. })));
    }

    #[test]
    fn test_malformed_body() {
        let repo = InMemoryPlanRepository::new();
        let result = execute_json(&repo, r#"{"income": 1000"#, &time());
        assert!(matches!(result, Err(LoanError::InvalidRequest { .. })));
    }
}
