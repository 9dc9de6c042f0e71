use crate::models::TrendType;

/// Label which platform carries the keyword's score.
///
/// Google is checked first, so the result is a single label even when both
/// shares could pass the threshold.
pub fn classify_dominance(google_ratio_pct: f64, naver_ratio_pct: f64, threshold_pct: f64) -> TrendType {
    if google_ratio_pct >= threshold_pct {
        TrendType::GoogleDominant
    } else if naver_ratio_pct >= threshold_pct {
        TrendType::NaverDominant
    } else {
        TrendType::Balanced
    }
}
