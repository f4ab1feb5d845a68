pub mod api;
pub mod calculator;
pub mod calendar;
pub mod config;
pub mod decimal;
pub mod errors;
pub mod interest;
pub mod repository;
pub mod types;

// re-export key types
pub use api::{execute, execute_json, CalculationRequest};
pub use calculator::{calculate_for_plan, CalculationResult, LoanRequest, PrincipalCalculator};
pub use config::{LoanPlan, PlanFields};
pub use decimal::{Money, Rate};
pub use errors::{LoanError, Result};
pub use interest::{interest, InterestCalculator, SlabInterest};
pub use repository::{InMemoryPlanRepository, PlanRepository, PlanSource};
pub use types::{CalculationSlab, PlanName};

// re-export external dependencies that users will need
pub use chrono;
pub use hourglass_rs::{SafeTimeProvider, TimeSource};
pub use rust_decimal::Decimal;
