use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::domain::{CategoryId, EvaluationSet};
use super::engine::{breakdown, ScoreBreakdown};
use super::hierarchy::McdaHierarchy;
use super::rating::{average_score, ScoreBand};

/// One project's ratings as captured by the evaluation form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectEvaluation {
    pub project_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub evaluations: EvaluationSet,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedProject {
    pub rank: usize,
    pub project_id: String,
    pub name: String,
    pub score: f64,
    pub band: ScoreBand,
    pub breakdown: ScoreBreakdown,
}

/// Side-by-side ranking for the comparison view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonReport {
    pub ranked: Vec<RankedProject>,
    pub average_score: f64,
    /// Project with the highest normalized score in each category.
    pub category_leaders: BTreeMap<CategoryId, String>,
}

impl ComparisonReport {
    pub fn leader(&self) -> Option<&RankedProject> {
        self.ranked.first()
    }
}

/// Score every project and rank them best first. Ties keep submission order.
pub fn compare_projects(
    hierarchy: &McdaHierarchy,
    projects: &[ProjectEvaluation],
) -> ComparisonReport {
    let mut ranked: Vec<RankedProject> = projects
        .iter()
        .map(|project| {
            let breakdown = breakdown(hierarchy, &project.evaluations);
            RankedProject {
                rank: 0,
                project_id: project.project_id.clone(),
                name: project.name.clone(),
                score: breakdown.score,
                band: ScoreBand::for_score(breakdown.score),
                breakdown,
            }
        })
        .collect();

    // Leaders are picked before sorting so the first submitted project wins a tie.
    let category_leaders = category_leaders(hierarchy, &ranked);

    ranked.sort_by(|left, right| right.score.total_cmp(&left.score));
    for (index, project) in ranked.iter_mut().enumerate() {
        project.rank = index + 1;
    }

    let scores: Vec<f64> = ranked.iter().map(|project| project.score).collect();

    ComparisonReport {
        average_score: average_score(&scores),
        category_leaders,
        ranked,
    }
}

fn category_leaders(
    hierarchy: &McdaHierarchy,
    submitted: &[RankedProject],
) -> BTreeMap<CategoryId, String> {
    let mut leaders = BTreeMap::new();

    for category in hierarchy.categories() {
        let mut best: Option<(f64, &str)> = None;
        for project in submitted {
            let Some(score) = project
                .breakdown
                .categories
                .iter()
                .find(|slice| slice.category_id == category.id)
                .map(|slice| slice.normalized_score)
            else {
                continue;
            };
            if best.map_or(true, |(current, _)| score > current) {
                best = Some((score, project.project_id.as_str()));
            }
        }
        if let Some((_, project_id)) = best {
            leaders.insert(category.id.clone(), project_id.to_string());
        }
    }

    leaders
}
