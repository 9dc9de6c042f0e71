//! Properties of the individual stages over hand-built cohorts

#[cfg(test)]
mod property_tests {
    use crate::classify::build_ocean_table;
    use crate::classify::classify_engagement;
    use crate::classify::NewsIndex;
    use crate::config::AppConfig;
    use crate::config::EngagementConfig;
    use crate::config::ScoreWeights;
    use crate::models::Category;
    use crate::models::CategoryReport;
    use crate::models::EngagementSummary;
    use crate::models::NewsCoverage;
    use crate::models::OceanStatus;
    use crate::pipeline::TrendPipeline;
    use crate::scoring::normalize_min_max;
    use crate::scoring::rank_by;
    use crate::scoring::score_cohort;
    use crate::tests::cohort;
    use crate::tests::metric;
    use crate::tests::ranked;
    use crate::tests::sports_cohort;

    // ====== Normalizer ======

    #[test]
    fn test_normalized_values_stay_in_range() {
        let values = [3.0, -7.5, 12.25, 0.0, 99.0, 42.0];
        let normalized = normalize_min_max(&values);
        assert!(normalized.iter().all(|v| (0.0..=100.0).contains(v)));
        assert_eq!(normalized[4], 100.0);
        assert_eq!(normalized[1], 0.0);
    }

    #[test]
    fn test_repeated_minimum_scenario() {
        assert_eq!(normalize_min_max(&[10.0, 10.0, 100.0]), vec![0.0, 0.0, 100.0]);
    }

    #[test]
    fn test_fully_degenerate_cohort_still_scores() {
        let flat = cohort(
            Category::Climate,
            vec![
                metric("a", 5.0, 5.0, 5.0, 5.0),
                metric("b", 5.0, 5.0, 5.0, 5.0),
            ],
        );
        let scored = score_cohort(&flat, &ScoreWeights::default()).unwrap();
        assert_eq!(scored.len(), 2);
        for row in scored {
            assert_eq!(row.score.total_score, 0.0);
            assert_eq!(row.score.google_ratio_pct, 0.0);
            assert_eq!(row.score.naver_ratio_pct, 0.0);
        }
    }

    // ====== Composite Scorer ======

    #[test]
    fn test_platform_shares_sum_to_hundred() {
        let scored = score_cohort(&sports_cohort(), &ScoreWeights::default()).unwrap();
        for row in scored.iter().filter(|r| r.score.total_score > 0.0) {
            let sum = row.score.google_ratio_pct + row.score.naver_ratio_pct;
            assert!((sum - 100.0).abs() <= 0.1 + 1e-9, "{}: {sum}", row.keyword);
        }
    }

    // ====== Ranker ======

    #[test]
    fn test_ranker_keeps_input_order_for_ties() {
        let rows = vec![ranked(0, "first", 90.0), ranked(0, "second", 90.0), ranked(0, "third", 70.0)];
        let top = rank_by(rows, 10, |r| r.total_score);
        let keywords: Vec<&str> = top.iter().map(|r| r.keyword.as_str()).collect();
        assert_eq!(keywords, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_ranked_report_is_sorted_and_sized() {
        let pipeline = TrendPipeline::new(&AppConfig::default()).with_top_n(3).unwrap();
        let report = pipeline.analyze_category(&sports_cohort()).unwrap();
        assert_eq!(report.entries.len(), 3);
        assert!(report
            .entries
            .windows(2)
            .all(|w| w[0].total_score >= w[1].total_score));
        let ranks: Vec<usize> = report.entries.iter().map(|e| e.rank).collect();
        assert_eq!(ranks, vec![1, 2, 3]);

        let all = TrendPipeline::new(&AppConfig::default())
            .analyze_category(&sports_cohort())
            .unwrap();
        assert_eq!(all.entries.len(), 5);
    }

    // ====== Quadrant Classifier ======

    #[test]
    fn test_quadrant_ignores_population_outside_top_n() {
        let pipeline = TrendPipeline::new(&AppConfig::default()).with_top_n(3).unwrap();
        let base = sports_cohort();
        let before = pipeline.analyze_category(&base).unwrap();

        // Rows equal to the cohort minimum leave normalization untouched
        let mut enlarged = base.clone();
        for i in 0..6 {
            enlarged
                .metrics
                .push(metric(&format!("filler{i}"), 2_000.0, 0.0, 40.0, -1.2));
        }
        let after = pipeline.analyze_category(&enlarged).unwrap();

        assert_eq!(after.cohort_size, base.metrics.len() + 6);
        assert_eq!(before.volume_threshold, after.volume_threshold);
        assert_eq!(before.momentum_threshold, after.momentum_threshold);
        for (b, a) in before.entries.iter().zip(&after.entries) {
            assert_eq!(b.keyword, a.keyword);
            assert_eq!(b.positioning, a.positioning);
        }
    }

    // ====== Ocean Classifier ======

    fn report(category: Category, rows: &[(&str, f64)]) -> CategoryReport {
        CategoryReport {
            category,
            base_date: String::new(),
            cohort_size: rows.len(),
            volume_threshold: 0.0,
            momentum_threshold: 0.0,
            entries: rows
                .iter()
                .enumerate()
                .map(|(i, (k, s))| ranked(i + 1, k, *s))
                .collect(),
        }
    }

    #[test]
    fn test_new_category_shifts_ocean_thresholds() {
        let news = NewsIndex::from_records(&[NewsCoverage {
            category: Category::Climate,
            keyword: "폭염".into(),
            news_count: 10,
        }]);
        let climate = report(Category::Climate, &[("폭염", 50.0), ("미세먼지", 30.0)]);

        let (alone, _) = build_ocean_table(std::slice::from_ref(&climate), &news);
        assert_eq!(alone[1].ocean_status, OceanStatus::Minor);

        let sports = report(Category::Sports, &[("야구", 10.0), ("축구", 10.0)]);
        let (combined, thresholds) = build_ocean_table(&[climate, sports], &news);
        assert_eq!(thresholds.score, 25.0);
        assert_eq!(thresholds.news, 2.5);
        assert_eq!(combined[1].keyword, "미세먼지");
        assert_eq!(combined[1].ocean_status, OceanStatus::BlueOcean);
        assert_eq!(combined[0].ocean_status, OceanStatus::RedOcean);
        assert_eq!(combined[2].ocean_status, OceanStatus::Minor);
    }

    #[test]
    fn test_missing_news_defaults_to_zero() {
        let climate = report(Category::Climate, &[("폭염", 50.0)]);
        let (table, thresholds) = build_ocean_table(&[climate], &NewsIndex::default());
        assert_eq!(table[0].news_count, 0);
        assert_eq!(thresholds.news, 0.0);
        // 0 >= 0 counts as high coverage
        assert_eq!(table[0].ocean_status, OceanStatus::RedOcean);
    }

    // ====== Engagement Classifier ======

    #[test]
    fn test_zero_view_keyword_is_excluded_not_cool() {
        let summaries = vec![
            EngagementSummary {
                category: Category::Entertainment,
                keyword: "무관심".into(),
                video_count: 3,
                avg_view_count: 0.0,
                avg_like_count: 50.0,
                avg_comment_count: 0.0,
            },
            EngagementSummary {
                category: Category::Entertainment,
                keyword: "조용함".into(),
                video_count: 3,
                avg_view_count: 10_000.0,
                avg_like_count: 1.0,
                avg_comment_count: 0.0,
            },
        ];
        let table = classify_engagement(&summaries, &EngagementConfig::default());
        assert_eq!(table.len(), 1);
        assert_eq!(table[0].keyword, "조용함");
    }
}
