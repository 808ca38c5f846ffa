use std::sync::{Arc, PoisonError, RwLock};

use tracing::{info, warn};

use super::engine::ScoringEngine;
use super::hierarchy::{McdaHierarchy, WeightReport};

/// Process-wide holder for the active hierarchy.
///
/// Scoring requests take an `Arc` snapshot; a reload swaps in a whole new table, so a
/// request that started before the swap finishes against the hierarchy it began with.
#[derive(Debug)]
pub struct HierarchyStore {
    current: RwLock<Arc<McdaHierarchy>>,
}

impl HierarchyStore {
    pub fn new(hierarchy: McdaHierarchy) -> Self {
        log_weight_report(&hierarchy.weight_report());
        Self {
            current: RwLock::new(Arc::new(hierarchy)),
        }
    }

    pub fn standard() -> Self {
        Self::new(McdaHierarchy::standard())
    }

    pub fn snapshot(&self) -> Arc<McdaHierarchy> {
        // The guarded value is a plain Arc, so a poisoned lock still holds a whole table.
        let guard = self.current.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&guard)
    }

    pub fn engine(&self) -> ScoringEngine {
        ScoringEngine::new(self.snapshot())
    }

    /// Install `hierarchy` and return the one it replaced.
    pub fn replace(&self, hierarchy: McdaHierarchy) -> Arc<McdaHierarchy> {
        let report = hierarchy.weight_report();
        let next = Arc::new(hierarchy);
        let previous = {
            let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
            std::mem::replace(&mut *guard, next)
        };
        info!(
            categories = report.categories.len(),
            "mcda hierarchy replaced"
        );
        log_weight_report(&report);
        previous
    }
}

impl Default for HierarchyStore {
    fn default() -> Self {
        Self::standard()
    }
}

/// Surface weight drift as warnings; scoring continues either way.
pub fn log_weight_report(report: &WeightReport) {
    if !report.categories_balanced {
        warn!(
            total = report.category_weight_total,
            "mcda category weights do not sum to 100; scores may be inaccurate"
        );
    }
    for check in report.unbalanced_categories() {
        warn!(
            category = %check.category_id,
            total = check.parameter_weight_total,
            "mcda parameter weights do not sum to 100 within category"
        );
    }
}
