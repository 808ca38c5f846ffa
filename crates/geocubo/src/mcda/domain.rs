use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Lowest rating an evaluator can assign to a parameter.
pub const MIN_EVALUATION: f64 = 0.0;
/// Highest rating an evaluator can assign to a parameter.
pub const MAX_EVALUATION: f64 = 10.0;

/// Raw ratings keyed by parameter id. Partial and noisy sets are accepted as-is.
pub type EvaluationSet = HashMap<String, f64>;

/// Identifier wrapper for top-level scoring categories.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryId(pub String);

impl CategoryId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CategoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier wrapper for scored parameters, unique across the whole hierarchy.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParameterId(pub String);

impl ParameterId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ParameterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A single scored criterion, weighted as a percentage of its category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    pub id: ParameterId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Back-reference to the owning category, re-linked when a hierarchy is built.
    #[serde(default)]
    pub category_id: CategoryId,
    pub weight: f64,
    #[serde(default = "default_min_value")]
    pub min_value: f64,
    #[serde(default = "default_max_value")]
    pub max_value: f64,
    /// Guidance for human evaluators; never read by the scoring engine.
    #[serde(default)]
    pub evaluation_criteria: String,
}

impl Parameter {
    /// Parameter with the standard 0-10 range and no evaluator text.
    pub fn new(id: impl Into<String>, name: impl Into<String>, weight: f64) -> Self {
        Self {
            id: ParameterId::new(id),
            name: name.into(),
            description: String::new(),
            category_id: CategoryId::default(),
            weight,
            min_value: MIN_EVALUATION,
            max_value: MAX_EVALUATION,
            evaluation_criteria: String::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_criteria(mut self, criteria: impl Into<String>) -> Self {
        self.evaluation_criteria = criteria.into();
        self
    }
}

fn default_min_value() -> f64 {
    MIN_EVALUATION
}

fn default_max_value() -> f64 {
    MAX_EVALUATION
}

/// Top-level grouping of parameters, weighted as a percentage of the total score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    pub weight: f64,
    #[serde(default)]
    pub parameters: Vec<Parameter>,
}

impl Category {
    pub fn new(id: impl Into<String>, name: impl Into<String>, weight: f64) -> Self {
        Self {
            id: CategoryId::new(id),
            name: name.into(),
            weight,
            parameters: Vec::new(),
        }
    }

    pub fn with_parameter(mut self, parameter: Parameter) -> Self {
        self.parameters.push(parameter);
        self
    }

    /// Sum of the declared parameter weights, used as the normalization denominator.
    pub fn parameter_weight_total(&self) -> f64 {
        self.parameters.iter().map(|parameter| parameter.weight).sum()
    }
}

/// Result of a parameter lookup, carrying the owning category for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParameterLookup {
    pub parameter: Parameter,
    pub category_id: CategoryId,
    pub category_name: String,
}
