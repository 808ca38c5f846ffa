use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::debug;

use super::comparison::{compare_projects, ComparisonReport, ProjectEvaluation};
use super::domain::{Category, EvaluationSet};
use super::engine::ScoreBreakdown;
use super::hierarchy::{HierarchyDocument, McdaHierarchy, WeightReport};
use super::rating::ScoreBand;
use super::store::HierarchyStore;
use crate::error::AppError;

/// Router exposing the hierarchy, scoring and comparison endpoints.
pub fn mcda_router(store: Arc<HierarchyStore>) -> Router {
    Router::new()
        .route("/api/v1/mcda/categories", get(categories_handler))
        .route(
            "/api/v1/mcda/parameters/:parameter_id",
            get(parameter_handler),
        )
        .route("/api/v1/mcda/validation", get(validation_handler))
        .route("/api/v1/mcda/score", post(score_handler))
        .route("/api/v1/mcda/compare", post(compare_handler))
        .route("/api/v1/mcda/hierarchy", put(replace_hierarchy_handler))
        .with_state(store)
}

#[derive(Debug, Default, Deserialize)]
pub struct CategoryFilter {
    pub category: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CategoriesResponse {
    pub categories: Vec<Category>,
    pub total_parameters: usize,
    pub category_weight_total: f64,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ScoreRequest {
    #[serde(default)]
    pub project_id: Option<String>,
    #[serde(default)]
    pub evaluations: EvaluationSet,
}

/// Score payload consumed by map markers, badges and detail views.
#[derive(Debug, Clone, Serialize)]
pub struct ScoreCard {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
    pub score: f64,
    pub band: ScoreBand,
    pub band_label: &'static str,
    pub color: &'static str,
    pub breakdown: ScoreBreakdown,
    pub computed_at: DateTime<Utc>,
}

impl ScoreCard {
    pub fn new(
        project_id: Option<String>,
        breakdown: ScoreBreakdown,
        computed_at: DateTime<Utc>,
    ) -> Self {
        let band = ScoreBand::for_score(breakdown.score);
        Self {
            project_id,
            score: breakdown.score,
            band,
            band_label: band.label(),
            color: band.color(),
            breakdown,
            computed_at,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CompareRequest {
    #[serde(default)]
    pub projects: Vec<ProjectEvaluation>,
}

pub(crate) async fn categories_handler(
    State(store): State<Arc<HierarchyStore>>,
    Query(filter): Query<CategoryFilter>,
) -> Json<CategoriesResponse> {
    let hierarchy = store.snapshot();
    let categories: Vec<Category> = hierarchy
        .categories()
        .iter()
        .filter(|category| {
            filter
                .category
                .as_deref()
                .map_or(true, |wanted| category.id.as_str() == wanted)
        })
        .cloned()
        .collect();
    let total_parameters = categories
        .iter()
        .map(|category| category.parameters.len())
        .sum();

    Json(CategoriesResponse {
        categories,
        total_parameters,
        category_weight_total: hierarchy.category_weight_total(),
    })
}

pub(crate) async fn parameter_handler(
    State(store): State<Arc<HierarchyStore>>,
    Path(parameter_id): Path<String>,
) -> Response {
    match store.snapshot().parameter_by_id(&parameter_id) {
        Some(lookup) => (StatusCode::OK, Json(lookup)).into_response(),
        None => {
            let payload = json!({
                "error": format!("parameter '{parameter_id}' not found"),
                "parameter_id": parameter_id,
            });
            (StatusCode::NOT_FOUND, Json(payload)).into_response()
        }
    }
}

pub(crate) async fn validation_handler(
    State(store): State<Arc<HierarchyStore>>,
) -> Json<WeightReport> {
    Json(store.snapshot().weight_report())
}

pub(crate) async fn score_handler(
    State(store): State<Arc<HierarchyStore>>,
    Json(request): Json<ScoreRequest>,
) -> Json<ScoreCard> {
    let ScoreRequest {
        project_id,
        evaluations,
    } = request;

    let breakdown = store.engine().breakdown(&evaluations);
    debug!(
        project_id = project_id.as_deref().unwrap_or("-"),
        score = breakdown.score,
        ignored = breakdown.ignored_parameters.len(),
        "mcda score computed"
    );

    Json(ScoreCard::new(project_id, breakdown, Utc::now()))
}

pub(crate) async fn compare_handler(
    State(store): State<Arc<HierarchyStore>>,
    Json(request): Json<CompareRequest>,
) -> Json<ComparisonReport> {
    let hierarchy = store.snapshot();
    Json(compare_projects(&hierarchy, &request.projects))
}

pub(crate) async fn replace_hierarchy_handler(
    State(store): State<Arc<HierarchyStore>>,
    Json(document): Json<HierarchyDocument>,
) -> Result<Json<WeightReport>, AppError> {
    let hierarchy = McdaHierarchy::from_document(document)?;
    let report = hierarchy.weight_report();
    store.replace(hierarchy);
    Ok(Json(report))
}
