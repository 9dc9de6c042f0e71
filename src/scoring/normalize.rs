use crate::models::KeywordMetric;
use crate::models::NormalizedMetrics;

/// Min-max scale `values` to `[0, 100]`.
///
/// A constant column (`max == min`) maps to all zeros, not 50 and not NaN.
pub fn normalize_min_max(values: &[f64]) -> Vec<f64> {
    let Some(&first) = values.first() else {
        return Vec::new();
    };
    let (min, max) = values
        .iter()
        .fold((first, first), |(lo, hi), &v| (lo.min(v), hi.max(v)));

    if max > min {
        let range = max - min;
        values.iter().map(|&v| (v - min) / range * 100.0).collect()
    } else {
        vec![0.0; values.len()]
    }
}

/// Normalize each of the four raw metrics independently across the cohort.
pub fn normalize_cohort(metrics: &[KeywordMetric]) -> Vec<NormalizedMetrics> {
    let column = |f: fn(&KeywordMetric) -> f64| -> Vec<f64> {
        normalize_min_max(&metrics.iter().map(f).collect::<Vec<_>>())
    };

    let google_volume = column(|m| m.google_absolute_volume);
    let google_surge = column(|m| m.google_surge_ratio);
    let naver_sum = column(|m| m.naver_trend_sum);
    let naver_slope = column(|m| m.naver_growth_slope);

    (0..metrics.len())
        .map(|i| NormalizedMetrics {
            google_volume: google_volume[i],
            google_surge: google_surge[i],
            naver_sum: naver_sum[i],
            naver_slope: naver_slope[i],
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tied_minimum_and_single_max() {
        assert_eq!(normalize_min_max(&[10.0, 10.0, 100.0]), vec![0.0, 0.0, 100.0]);
    }

    #[test]
    fn test_degenerate_column_is_all_zero() {
        assert_eq!(normalize_min_max(&[7.5, 7.5, 7.5]), vec![0.0, 0.0, 0.0]);
        assert_eq!(normalize_min_max(&[42.0]), vec![0.0]);
    }

    #[test]
    fn test_empty_column() {
        assert!(normalize_min_max(&[]).is_empty());
    }

    #[test]
    fn test_bounds_and_interior_values() {
        let values = [-3.0, 2.0, 0.5, 7.0, -1.0];
        let normalized = normalize_min_max(&values);

        assert_eq!(normalized[0], 0.0);
        assert_eq!(normalized[3], 100.0);
        assert!((normalized[1] - 50.0).abs() < 1e-9);
        assert!(normalized.iter().all(|v| (0.0..=100.0).contains(v)));
    }

    #[test]
    fn test_columns_are_independent() {
        let metrics = vec![
            KeywordMetric {
                keyword: "a".into(),
                google_absolute_volume: 1000.0,
                google_surge_ratio: 50.0,
                naver_trend_sum: 3.0,
                naver_growth_slope: 1.0,
            },
            KeywordMetric {
                keyword: "b".into(),
                google_absolute_volume: 3000.0,
                google_surge_ratio: 50.0,
                naver_trend_sum: 1.0,
                naver_growth_slope: -1.0,
            },
        ];

        let normalized = normalize_cohort(&metrics);
        assert_eq!(normalized[0].google_volume, 0.0);
        assert_eq!(normalized[1].google_volume, 100.0);
        // constant column
        assert_eq!(normalized[0].google_surge, 0.0);
        assert_eq!(normalized[1].google_surge, 0.0);
        assert_eq!(normalized[0].naver_sum, 100.0);
        assert_eq!(normalized[1].naver_slope, 0.0);
        // raw values untouched
        assert_eq!(metrics[1].google_absolute_volume, 3000.0);
    }
}
