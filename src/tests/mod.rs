pub mod property_tests;

use crate::models::Category;
use crate::models::Cohort;
use crate::models::KeywordMetric;
use crate::models::Positioning;
use crate::models::RankedEntry;
use crate::models::TrendType;

/// Test helper to build one raw metric row
pub fn metric(keyword: &str, volume: f64, surge: f64, trend_sum: f64, slope: f64) -> KeywordMetric {
    KeywordMetric {
        keyword: keyword.to_string(),
        google_absolute_volume: volume,
        google_surge_ratio: surge,
        naver_trend_sum: trend_sum,
        naver_growth_slope: slope,
    }
}

/// Test helper to build a cohort for one category
pub fn cohort(category: Category, metrics: Vec<KeywordMetric>) -> Cohort {
    Cohort {
        category,
        base_date: "2025-01-10".to_string(),
        metrics,
    }
}

/// Test helper for a ranked row where only the score matters
pub fn ranked(rank: usize, keyword: &str, total_score: f64) -> RankedEntry {
    RankedEntry {
        rank,
        keyword: keyword.to_string(),
        total_score,
        google_point: total_score / 2.0,
        naver_point: total_score / 2.0,
        google_ratio_pct: 50.0,
        naver_ratio_pct: 50.0,
        trend_type: TrendType::Balanced,
        volume_score: 0.0,
        momentum_score: 0.0,
        positioning: Positioning::Niche,
    }
}

/// A realistic sports cohort with distinct scores
pub fn sports_cohort() -> Cohort {
    cohort(
        Category::Sports,
        vec![
            metric("손흥민", 200_000.0, 1000.0, 420.0, 3.5),
            metric("야구", 50_000.0, 200.0, 610.0, 0.4),
            metric("김연아", 20_000.0, 500.0, 150.0, 6.1),
            metric("축구 대표팀", 100_000.0, 100.0, 300.0, -1.2),
            metric("마라톤", 2_000.0, 0.0, 40.0, -0.3),
        ],
    )
}
