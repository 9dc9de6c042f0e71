use crate::models::ScoredKeyword;

/// Stable descending sort on `key`, truncated to `n` rows.
///
/// Rows with equal keys keep their input order. Fewer than `n` rows are
/// returned as they are, without padding.
pub fn rank_by<T, F>(mut rows: Vec<T>, n: usize, key: F) -> Vec<T>
where
    F: Fn(&T) -> f64,
{
    rows.sort_by(|a, b| key(b).total_cmp(&key(a)));
    rows.truncate(n);
    rows
}

/// Top-N keywords by rounded `total_score`.
pub fn rank_top_n(scored: Vec<ScoredKeyword>, n: usize) -> Vec<ScoredKeyword> {
    rank_by(scored, n, |s| s.score.total_score)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ties_keep_input_order() {
        let rows = vec![("first", 90.0), ("second", 90.0), ("third", 70.0)];
        let ranked = rank_by(rows, 10, |r| r.1);
        assert_eq!(
            ranked.iter().map(|r| r.0).collect::<Vec<_>>(),
            vec!["first", "second", "third"]
        );
    }

    #[test]
    fn test_tie_order_survives_reordering_of_others() {
        let rows = vec![("a", 10.0), ("t1", 50.0), ("b", 99.0), ("t2", 50.0), ("c", 1.0)];
        let ranked = rank_by(rows, 3, |r| r.1);
        assert_eq!(
            ranked.iter().map(|r| r.0).collect::<Vec<_>>(),
            vec!["b", "t1", "t2"]
        );
    }

    #[test]
    fn test_truncates_to_n() {
        let rows: Vec<f64> = (0..25).map(f64::from).collect();
        let ranked = rank_by(rows, 10, |v| *v);
        assert_eq!(ranked.len(), 10);
        assert_eq!(ranked[0], 24.0);
        assert!(ranked.windows(2).all(|w| w[0] >= w[1]));
    }

    #[test]
    fn test_small_cohort_returns_everything() {
        let ranked = rank_by(vec![3.0, 9.0], 10, |v| *v);
        assert_eq!(ranked, vec![9.0, 3.0]);
        assert!(rank_by(Vec::<f64>::new(), 10, |v| *v).is_empty());
    }
}
