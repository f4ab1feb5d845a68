/// quick start - size a loan against an inline plan
use microfinance_rs::chrono::NaiveDate;
use microfinance_rs::{calculate_for_plan, CalculationSlab, LoanPlan, Money, Rate};
use rust_decimal_macros::dec;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // lend up to twice the monthly income, repaid over 10 months on the 5th
    let plan = LoanPlan::new(dec!(2), 10, 5)?
        .named("Salary Advance")
        .with_interest(Rate::from_percentage(12), CalculationSlab::Flat);

    let start = NaiveDate::from_ymd_opt(2024, 1, 1).ok_or("bad date")?;
    let end = NaiveDate::from_ymd_opt(2024, 6, 30).ok_or("bad date")?;

    let result = calculate_for_plan(&plan, Money::from_major(1_000), end, start)?;

    println!("{}", result.json());

    Ok(())
}
