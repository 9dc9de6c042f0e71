use serde::Deserialize;
use serde::Serialize;

use super::mean;
use crate::models::Positioning;
use crate::models::ScoredKeyword;

/// Cross-hair of the positioning map: mean volume and momentum of the Top-N.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct QuadrantThresholds {
    pub volume: f64,
    pub momentum: f64,
}

impl QuadrantThresholds {
    /// Must be given the ranked Top-N only, never the whole cohort.
    pub fn from_top_n(top_n: &[ScoredKeyword]) -> Self {
        Self {
            volume: mean(top_n.iter().map(|s| s.volume_score)).unwrap_or(0.0),
            momentum: mean(top_n.iter().map(|s| s.momentum_score)).unwrap_or(0.0),
        }
    }
}

/// Values equal to a threshold count as high.
pub fn classify_quadrant(volume: f64, momentum: f64, thresholds: &QuadrantThresholds) -> Positioning {
    match (volume >= thresholds.volume, momentum >= thresholds.momentum) {
        (true, true) => Positioning::MegaTrend,
        (true, false) => Positioning::SteadySeller,
        (false, true) => Positioning::RisingStar,
        (false, false) => Positioning::Niche,
    }
}
