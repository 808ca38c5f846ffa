use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::domain::{Category, CategoryId, EvaluationSet, ParameterId, MAX_EVALUATION, MIN_EVALUATION};
use super::hierarchy::McdaHierarchy;

/// Composite scores are reported with two decimals.
pub const SCORE_DECIMALS: i32 = 2;

/// Stateless scorer bound to one hierarchy snapshot.
#[derive(Debug, Clone)]
pub struct ScoringEngine {
    hierarchy: Arc<McdaHierarchy>,
}

impl ScoringEngine {
    pub fn new(hierarchy: Arc<McdaHierarchy>) -> Self {
        Self { hierarchy }
    }

    pub fn standard() -> Self {
        Self::new(Arc::new(McdaHierarchy::standard()))
    }

    pub fn hierarchy(&self) -> &McdaHierarchy {
        &self.hierarchy
    }

    pub fn compute_score(&self, evaluations: &EvaluationSet) -> f64 {
        compute_score(&self.hierarchy, evaluations)
    }

    pub fn breakdown(&self, evaluations: &EvaluationSet) -> ScoreBreakdown {
        breakdown(&self.hierarchy, evaluations)
    }
}

/// Per-category slice of a composite score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryScore {
    pub category_id: CategoryId,
    pub category_name: String,
    pub weight: f64,
    /// Category score on the evaluation scale (0-10 when parameter weights total 100).
    pub normalized_score: f64,
    /// Share of the composite score contributed by this category.
    pub contribution: f64,
    pub evaluated_parameters: usize,
    pub missing_parameters: Vec<ParameterId>,
}

/// Composite score with the trail needed by detail and comparison views.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub score: f64,
    pub raw_score: f64,
    pub categories: Vec<CategoryScore>,
    /// Evaluation keys that match no parameter in the hierarchy.
    pub ignored_parameters: Vec<String>,
}

/// Two-level weighted roll-up of `evaluations`, rounded to two decimals.
///
/// Missing parameters count as 0 but keep their weight in the category denominator,
/// values are clamped into [0, 10], and unknown keys are ignored. Never fails.
pub fn compute_score(hierarchy: &McdaHierarchy, evaluations: &EvaluationSet) -> f64 {
    let total: f64 = hierarchy
        .categories()
        .iter()
        .map(|category| score_category(category, evaluations).contribution)
        .sum();

    round_half_up(total, SCORE_DECIMALS)
}

/// Same computation as [`compute_score`], keeping the per-category detail.
pub fn breakdown(hierarchy: &McdaHierarchy, evaluations: &EvaluationSet) -> ScoreBreakdown {
    let categories: Vec<CategoryScore> = hierarchy
        .categories()
        .iter()
        .map(|category| score_category(category, evaluations))
        .collect();
    let raw_score: f64 = categories.iter().map(|slice| slice.contribution).sum();

    let mut ignored_parameters: Vec<String> = evaluations
        .keys()
        .filter(|key| hierarchy.parameter_by_id(key).is_none())
        .cloned()
        .collect();
    ignored_parameters.sort();

    ScoreBreakdown {
        score: round_half_up(raw_score, SCORE_DECIMALS),
        raw_score,
        categories,
        ignored_parameters,
    }
}

fn score_category(category: &Category, evaluations: &EvaluationSet) -> CategoryScore {
    let mut category_score = 0.0;
    let mut total_category_weight = 0.0;
    let mut evaluated_parameters = 0;
    let mut missing_parameters = Vec::new();

    for parameter in &category.parameters {
        let rating = rated_value(evaluations, parameter.id.as_str());
        if rating.is_some() {
            evaluated_parameters += 1;
        } else {
            missing_parameters.push(parameter.id.clone());
        }
        let value = rating
            .unwrap_or(MIN_EVALUATION)
            .clamp(MIN_EVALUATION, MAX_EVALUATION);
        category_score += value * parameter.weight / 100.0;
        total_category_weight += parameter.weight;
    }

    let normalized_score = normalize(category_score, total_category_weight);
    CategoryScore {
        category_id: category.id.clone(),
        category_name: category.name.clone(),
        weight: category.weight,
        normalized_score,
        contribution: normalized_score * category.weight / 100.0,
        evaluated_parameters,
        missing_parameters,
    }
}

/// Rounds half toward positive infinity, so `7.875` becomes `7.88` at two decimals.
pub fn round_half_up(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor + 0.5).floor() / factor
}

/// A usable rating for `parameter_id`; NaN reads the same as an absent key.
fn rated_value(evaluations: &EvaluationSet, parameter_id: &str) -> Option<f64> {
    evaluations
        .get(parameter_id)
        .copied()
        .filter(|value| !value.is_nan())
}

fn normalize(category_score: f64, total_category_weight: f64) -> f64 {
    if total_category_weight > 0.0 {
        category_score / total_category_weight * 100.0
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mcda::domain::Parameter;

    #[test]
    fn rounding_is_half_up_at_two_decimals() {
        assert_eq!(round_half_up(7.8749999, 2), 7.87);
        assert_eq!(round_half_up(7.8750001, 2), 7.88);
        assert_eq!(round_half_up(7.875, 2), 7.88);
        assert_eq!(round_half_up(0.0, 2), 0.0);
        assert_eq!(round_half_up(10.0, 2), 10.0);
    }

    #[test]
    fn nan_and_infinite_values_are_absorbed() {
        let mut evaluations = EvaluationSet::new();
        evaluations.insert("a".to_string(), f64::NAN);
        evaluations.insert("b".to_string(), f64::INFINITY);
        evaluations.insert("c".to_string(), f64::NEG_INFINITY);

        let category = Category::new("only", "Only", 100.0)
            .with_parameter(Parameter::new("a", "A", 25.0))
            .with_parameter(Parameter::new("b", "B", 25.0))
            .with_parameter(Parameter::new("c", "C", 25.0))
            .with_parameter(Parameter::new("missing", "Missing", 25.0));

        let slice = score_category(&category, &evaluations);

        assert_eq!(rated_value(&evaluations, "a"), None);
        assert_eq!(rated_value(&evaluations, "b"), Some(f64::INFINITY));
        assert_eq!(slice.normalized_score, 2.5);
        assert_eq!(slice.evaluated_parameters, 2);
        assert_eq!(
            slice.missing_parameters,
            vec![ParameterId::new("a"), ParameterId::new("missing")]
        );
    }

    #[test]
    fn zero_weight_category_normalizes_to_zero() {
        assert_eq!(normalize(0.0, 0.0), 0.0);
        assert_eq!(normalize(3.0, -0.0), 0.0);
    }
}
