//! Multi-criteria decision analysis for development projects.
//!
//! A [`McdaHierarchy`] weights categories against the composite score and parameters
//! against their category. The [`ScoringEngine`] rolls sparse or complete 0-10 ratings up
//! through both levels into a 0-10 composite. Scoring never fails: missing ratings count
//! as zero, out-of-range ratings are clamped, and weight drift is reported separately by
//! the validators rather than rejected.

pub mod comparison;
pub mod domain;
pub mod engine;
pub mod hierarchy;
pub mod rating;
pub mod router;
pub mod store;

#[cfg(test)]
mod tests;

pub use comparison::{compare_projects, ComparisonReport, ProjectEvaluation, RankedProject};
pub use domain::{
    Category, CategoryId, EvaluationSet, Parameter, ParameterId, ParameterLookup,
    MAX_EVALUATION, MIN_EVALUATION,
};
pub use engine::{
    breakdown, compute_score, round_half_up, CategoryScore, ScoreBreakdown, ScoringEngine,
};
pub use hierarchy::{
    CategoryWeightCheck, HierarchyDocument, HierarchyError, McdaHierarchy, WeightReport,
    WEIGHT_TOLERANCE,
};
pub use rating::{average_score, cluster_band, ScoreBand};
pub use router::{mcda_router, ScoreCard, ScoreRequest};
pub use store::HierarchyStore;
