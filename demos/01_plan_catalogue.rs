/// plan catalogue - resolve named plans and inline plans through the json boundary
use microfinance_rs::chrono::{TimeZone, Utc};
use microfinance_rs::{execute_json, InMemoryPlanRepository, SafeTimeProvider, TimeSource};

const PLANS: &str = r#"[
    {"name": "Salary Advance", "income_multiple": 2, "max_duration": 10, "billing_day": 5, "rate_of_interest": 12},
    {"name": "Festival Loan", "income_multiple": 1.5, "max_duration": 6, "billing_day": 28,
     "force_duration": 1, "rate_of_interest": 5, "calculation_slab": 1000}
]"#;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== plan catalogue example ===\n");

    let repository = InMemoryPlanRepository::from_json(PLANS)?;

    // pin "today" so the default execution date is reproducible
    let time = SafeTimeProvider::new(TimeSource::Test(
        Utc.with_ymd_and_hms(2024, 1, 15, 0, 0, 0).unwrap()
    ));

    let requests = [
        r#"{"income": 1000, "loan_plan": "Salary Advance", "end_date": "2025-12-31"}"#,
        r#"{"income": 1000, "loan_plan": "Salary Advance", "end_date": "2024-06-30"}"#,
        r#"{"income": 2000, "loan_plan": "Festival Loan", "end_date": "2024-03-01"}"#,
        r#"{"income": 800, "loan_plan": {"income_multiple": 3, "max_duration": 12, "billing_day": 1}, "end_date": "2025-01-01"}"#,
        r#"{"income": 800, "loan_plan": 42, "end_date": "2025-01-01"}"#,
    ];

    for body in requests {
        println!("request:  {}", body);
        match execute_json(&repository, body, &time) {
            Ok(response) => println!("response: {}\n", response),
            Err(e) => println!("error:    {}\n", e),
        }
    }

    Ok(())
}
