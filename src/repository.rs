use std::collections::HashMap;

use serde_json::Value;
use tracing::debug;

use crate::config::{LoanPlan, PlanFields};
use crate::errors::{LoanError, Result};
use crate::types::PlanName;

/// where a loan plan comes from
#[derive(Debug, Clone, PartialEq)]
pub enum PlanSource {
    /// name of a plan held by the repository
    ById(PlanName),
    /// plan fields supplied with the request
    Inline(PlanFields),
}

impl TryFrom<Value> for PlanSource {
    type Error = LoanError;

    fn try_from(value: Value) -> Result<Self> {
        match value {
            Value::String(name) => Ok(PlanSource::ById(name)),
            object @ Value::Object(_) => Ok(PlanSource::Inline(serde_json::from_value(object)?)),
            other => Err(LoanError::InvalidFormat {
                found: json_kind(&other).to_string(),
            }),
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// read-only lookup of stored loan plans
pub trait PlanRepository: Send + Sync {
    fn get_plan(&self, name: &str) -> Result<PlanFields>;

    /// resolve a plan source into a validated plan
    fn resolve(&self, source: PlanSource) -> Result<LoanPlan> {
        let fields = match source {
            PlanSource::ById(name) => {
                debug!(plan = %name, "looking up loan plan");
                let mut fields = self.get_plan(&name)?;
                fields.name.get_or_insert(name);
                fields
            }
            PlanSource::Inline(fields) => fields,
        };
        LoanPlan::try_from(fields)
    }
}

/// plan repository backed by a map, keyed by plan name
#[derive(Debug, Default, Clone)]
pub struct InMemoryPlanRepository {
    plans: HashMap<PlanName, PlanFields>,
}

impl InMemoryPlanRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// store a plan record under `name`, replacing any previous record
    pub fn insert(&mut self, name: impl Into<PlanName>, fields: PlanFields) {
        self.plans.insert(name.into(), fields);
    }

    /// store a validated plan under its own name
    pub fn with_plan(mut self, plan: &LoanPlan) -> Result<Self> {
        let name = plan.name.clone().ok_or_else(|| LoanError::MissingPlanFields {
            fields: vec!["name"],
        })?;
        self.insert(name, plan.to_fields());
        Ok(self)
    }

    /// load a catalogue from a json array of named plan records
    ///
    /// records are stored as given; validation happens when a plan is resolved
    pub fn from_json(json: &str) -> Result<Self> {
        let records: Vec<PlanFields> = serde_json::from_str(json)?;
        let mut repository = Self::new();
        for record in records {
            let name = record.name.clone().ok_or_else(|| LoanError::MissingPlanFields {
                fields: vec!["name"],
            })?;
            repository.insert(name, record);
        }
        debug!(plans = repository.len(), "loaded loan plan catalogue");
        Ok(repository)
    }

    pub fn len(&self) -> usize {
        self.plans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plans.is_empty()
    }
}

impl PlanRepository for InMemoryPlanRepository {
    fn get_plan(&self, name: &str) -> Result<PlanFields> {
        self.plans
            .get(name)
            .cloned()
            .ok_or_else(|| LoanError::PlanNotFound {
                name: name.to_string(),
            })
    }
}
