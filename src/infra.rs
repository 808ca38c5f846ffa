use geocubo::error::AppError;
use geocubo::mcda::{EvaluationSet, McdaHierarchy};
use metrics_exporter_prometheus::PrometheusHandle;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Hierarchy from `path` when given, otherwise the standard table.
pub(crate) fn load_hierarchy(path: Option<&Path>) -> Result<McdaHierarchy, AppError> {
    match path {
        Some(path) => {
            let hierarchy = McdaHierarchy::from_path(path)?;
            info!(
                path = %path.display(),
                categories = hierarchy.categories().len(),
                parameters = hierarchy.parameter_count(),
                "loaded mcda hierarchy"
            );
            Ok(hierarchy)
        }
        None => {
            info!("using standard mcda hierarchy");
            Ok(McdaHierarchy::standard())
        }
    }
}

/// Parameter id → rating map from a JSON object file.
pub(crate) fn read_evaluations(path: &Path) -> Result<EvaluationSet, AppError> {
    let raw = std::fs::read_to_string(path)?;
    parse_evaluations(&raw)
}

pub(crate) fn parse_evaluations(raw: &str) -> Result<EvaluationSet, AppError> {
    Ok(serde_json::from_str(raw)?)
}
