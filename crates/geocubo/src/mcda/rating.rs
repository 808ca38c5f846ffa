use serde::{Deserialize, Serialize};

use super::engine::{round_half_up, SCORE_DECIMALS};

/// Display tier for a composite score, used for marker colors and badges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreBand {
    Low,
    Fair,
    Good,
    VeryGood,
    Excellent,
}

impl ScoreBand {
    pub fn for_score(score: f64) -> Self {
        if score >= 8.5 {
            Self::Excellent
        } else if score >= 7.5 {
            Self::VeryGood
        } else if score >= 6.5 {
            Self::Good
        } else if score >= 5.5 {
            Self::Fair
        } else {
            Self::Low
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Excellent => "Excellent",
            Self::VeryGood => "Very good",
            Self::Good => "Good",
            Self::Fair => "Fair",
            Self::Low => "Low",
        }
    }

    /// Hex color shared by map markers, clusters and comparison badges.
    pub fn color(&self) -> &'static str {
        match self {
            Self::Excellent => "#22c55e",
            Self::VeryGood => "#84cc16",
            Self::Good => "#eab308",
            Self::Fair => "#f97316",
            Self::Low => "#ef4444",
        }
    }
}

/// Mean of a set of composite scores (e.g. a marker cluster) rounded for display; 0 when
/// empty.
pub fn average_score(scores: &[f64]) -> f64 {
    round_half_up(mean(scores), SCORE_DECIMALS)
}

/// Band of a marker cluster, taken from the unrounded mean of its scores.
pub fn cluster_band(scores: &[f64]) -> ScoreBand {
    ScoreBand::for_score(mean(scores))
}

fn mean(scores: &[f64]) -> f64 {
    if scores.is_empty() {
        return 0.0;
    }
    let total: f64 = scores.iter().sum();
    total / scores.len() as f64
}
