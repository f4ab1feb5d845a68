use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoanError {
    #[error("invalid loan plan format: expected a plan name or a plan record, found {found}")]
    InvalidFormat {
        found: String,
    },

    #[error("missing values in loan plan: {}", fields.join(", "))]
    MissingPlanFields {
        fields: Vec<&'static str>,
    },

    #[error("loan plan not found: {name}")]
    PlanNotFound {
        name: String,
    },

    #[error("invalid billing day: {day}")]
    InvalidBillingDay {
        day: u32,
    },

    #[error("invalid date: {message}")]
    InvalidDate {
        message: String,
    },

    #[error("invalid request: {message}")]
    InvalidRequest {
        message: String,
    },
}

impl From<serde_json::Error> for LoanError {
    fn from(e: serde_json::Error) -> Self {
        LoanError::InvalidRequest {
            message: e.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, LoanError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_message_lists_every_field() {
        let err = LoanError::MissingPlanFields {
            fields: vec!["income_multiple", "billing_day"],
        };
        assert_eq!(
            err.to_string(),
            "missing values in loan plan: income_multiple, billing_day"
        );
    }

    #[test]
    fn test_json_error_becomes_invalid_request() {
        let parse = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err = LoanError::from(parse);
        assert!(matches!(err, LoanError::InvalidRequest { .. }));
    }
}
