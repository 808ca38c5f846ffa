use std::sync::Arc;

use axum::response::Response;
use serde_json::Value;

use crate::mcda::domain::{Category, EvaluationSet, Parameter};
use crate::mcda::hierarchy::McdaHierarchy;
use crate::mcda::store::HierarchyStore;

/// Two categories at 50% each whose parameter weights only total 50 per category.
pub(super) fn two_category_hierarchy() -> McdaHierarchy {
    McdaHierarchy::new(vec![
        Category::new("a", "Category A", 50.0)
            .with_parameter(Parameter::new("1", "Distance to Towns", 25.0))
            .with_parameter(Parameter::new("2", "Infrastructure Access", 25.0)),
        Category::new("b", "Category B", 50.0)
            .with_parameter(Parameter::new("3", "Market Demand", 30.0))
            .with_parameter(Parameter::new("4", "ROI Potential", 20.0)),
    ])
}

pub(super) fn evaluations(values: &[(&str, f64)]) -> EvaluationSet {
    values
        .iter()
        .map(|(key, value)| (key.to_string(), *value))
        .collect()
}

pub(super) fn reference_evaluations() -> EvaluationSet {
    evaluations(&[("1", 8.5), ("2", 7.0), ("3", 9.0), ("4", 6.5)])
}

pub(super) fn uniform_evaluations(hierarchy: &McdaHierarchy, value: f64) -> EvaluationSet {
    hierarchy
        .parameter_ids()
        .map(|id| (id.as_str().to_string(), value))
        .collect()
}

pub(super) fn standard_store() -> Arc<HierarchyStore> {
    Arc::new(HierarchyStore::standard())
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
