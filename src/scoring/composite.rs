use tracing::debug;

use super::normalize_cohort;
use super::round_to;
use super::validate_cohort;
use super::RATIO_DECIMALS;
use super::SCORE_DECIMALS;
use crate::config::ScoreWeights;
use crate::models::Cohort;
use crate::models::CompositeScore;
use crate::models::NormalizedMetrics;
use crate::models::ScoredKeyword;
use crate::Result;

/// Each platform's share of `google + naver`, in percent. Both are 0 when the total is 0.
pub fn platform_ratios(google_point: f64, naver_point: f64) -> (f64, f64) {
    let total = google_point + naver_point;
    if total == 0.0 {
        return (0.0, 0.0);
    }
    (google_point / total * 100.0, naver_point / total * 100.0)
}

/// Combine normalized metrics into platform points and a total score.
///
/// Points and total are rounded to 2 decimals; shares are derived from the
/// unrounded points and rounded to 1 decimal.
pub fn score(normalized: &NormalizedMetrics, weights: &ScoreWeights) -> CompositeScore {
    let google_point = normalized.google_volume * weights.google_volume
        + normalized.google_surge * weights.google_surge;
    let naver_point =
        normalized.naver_sum * weights.naver_sum + normalized.naver_slope * weights.naver_slope;
    let (google_ratio, naver_ratio) = platform_ratios(google_point, naver_point);

    CompositeScore {
        google_point: round_to(google_point, SCORE_DECIMALS),
        naver_point: round_to(naver_point, SCORE_DECIMALS),
        total_score: round_to(google_point + naver_point, SCORE_DECIMALS),
        google_ratio_pct: round_to(google_ratio, RATIO_DECIMALS),
        naver_ratio_pct: round_to(naver_ratio, RATIO_DECIMALS),
    }
}

/// Volume and momentum axes, each the mean of two normalized metrics.
pub fn volume_momentum(normalized: &NormalizedMetrics) -> (f64, f64) {
    (
        (normalized.google_volume + normalized.naver_sum) / 2.0,
        (normalized.google_surge + normalized.naver_slope) / 2.0,
    )
}

/// Validate, normalize and score a whole cohort, keeping input order.
pub fn score_cohort(cohort: &Cohort, weights: &ScoreWeights) -> Result<Vec<ScoredKeyword>> {
    validate_cohort(cohort)?;

    let normalized = normalize_cohort(&cohort.metrics);
    let scored: Vec<ScoredKeyword> = cohort
        .metrics
        .iter()
        .zip(normalized)
        .map(|(metric, normalized)| {
            let (volume_score, momentum_score) = volume_momentum(&normalized);
            ScoredKeyword {
                keyword: metric.keyword.clone(),
                normalized,
                score: score(&normalized, weights),
                volume_score,
                momentum_score,
            }
        })
        .collect();

    debug!(
        "Scored cohort - category={}, keywords={}",
        cohort.category,
        scored.len()
    );

    Ok(scored)
}
