//! Scoring stages: min-max normalization, weighted composite score, Top-N ranking.
//!
//! Every function here is pure: it reads an immutable cohort and returns new rows.

mod composite;
mod normalize;
mod rank;

pub use composite::platform_ratios;
pub use composite::score;
pub use composite::score_cohort;
pub use composite::volume_momentum;
pub use normalize::normalize_cohort;
pub use normalize::normalize_min_max;
pub use rank::rank_by;
pub use rank::rank_top_n;

use std::collections::HashMap;
use std::collections::HashSet;

use rust_decimal::Decimal;
use tracing::warn;

use crate::models::keyword_key;
use crate::models::Cohort;
use crate::Result;
use crate::TrendRankError;

/// Decimal places for stored and displayed scores
pub const SCORE_DECIMALS: u32 = 2;
/// Decimal places for platform share percentages
pub const RATIO_DECIMALS: u32 = 1;

/// Round half to even at `places` decimals, on the shortest decimal form of `value`.
/// Values outside the `Decimal` range (and non-finite ones) are returned as is.
pub fn round_to(value: f64, places: u32) -> f64 {
    if !value.is_finite() {
        return value;
    }
    value
        .to_string()
        .parse::<Decimal>()
        .ok()
        .and_then(|d| d.round_dp(places).to_string().parse::<f64>().ok())
        .unwrap_or(value)
}

/// Check a cohort before it enters the pipeline.
///
/// Rejects empty keywords, duplicate keywords, non-finite metrics and negative
/// values in the two metrics that are counts. Keywords that differ only in
/// spacing or case are distinct, but share news and video statistics.
pub fn validate_cohort(cohort: &Cohort) -> Result<()> {
    let mut seen = HashSet::with_capacity(cohort.metrics.len());
    let mut join_keys: HashMap<String, &str> = HashMap::with_capacity(cohort.metrics.len());

    for (idx, m) in cohort.metrics.iter().enumerate() {
        if m.keyword.trim().is_empty() {
            return Err(TrendRankError::schema(format!(
                "{}: row {idx} has an empty keyword",
                cohort.category
            )));
        }
        if !seen.insert(m.keyword.trim()) {
            return Err(TrendRankError::schema(format!(
                "{}: duplicate keyword '{}'",
                cohort.category, m.keyword
            )));
        }
        if let Some(other) = join_keys.insert(keyword_key(&m.keyword), &m.keyword) {
            warn!(
                "{}: keywords '{}' and '{}' share news and video statistics",
                cohort.category, other, m.keyword
            );
        }

        let fields = [
            ("google_absolute_volume", m.google_absolute_volume),
            ("google_surge_ratio", m.google_surge_ratio),
            ("naver_trend_sum", m.naver_trend_sum),
            ("naver_growth_slope", m.naver_growth_slope),
        ];
        if let Some((name, value)) = fields.iter().find(|(_, v)| !v.is_finite()) {
            return Err(TrendRankError::schema(format!(
                "{}: '{}' has non-finite {name} ({value})",
                cohort.category, m.keyword
            )));
        }
        if m.google_absolute_volume < 0.0 || m.naver_trend_sum < 0.0 {
            return Err(TrendRankError::schema(format!(
                "{}: '{}' has a negative volume metric",
                cohort.category, m.keyword
            )));
        }
    }

    Ok(())
}
