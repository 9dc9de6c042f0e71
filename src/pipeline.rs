//! One run of the trend pipeline: cohorts in, ranked and classified tables out.

use std::collections::HashSet;
use std::path::Path;
use std::path::PathBuf;

use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use tracing::debug;
use tracing::info;
use tracing::warn;
use uuid::Uuid;

use crate::classify::build_ocean_table;
use crate::classify::classify_dominance;
use crate::classify::classify_engagement;
use crate::classify::classify_quadrant;
use crate::classify::summarize_engagement;
use crate::classify::NewsDocument;
use crate::classify::NewsIndex;
use crate::classify::OceanThresholds;
use crate::classify::QuadrantThresholds;
use crate::config::AppConfig;
use crate::config::EngagementConfig;
use crate::config::ScoringConfig;
use crate::correlation::correlation_report;
use crate::correlation::CorrelationReport;
use crate::models::Category;
use crate::models::CategoryReport;
use crate::models::Cohort;
use crate::models::EngagementEntry;
use crate::models::EngagementSummary;
use crate::models::OceanEntry;
use crate::models::RankedEntry;
use crate::models::VideoStat;
use crate::preprocess::preprocessed_path;
use crate::scoring::rank_by;
use crate::scoring::rank_top_n;
use crate::scoring::round_to;
use crate::scoring::score_cohort;
use crate::scoring::validate_cohort;
use crate::scoring::SCORE_DECIMALS;
use crate::Result;
use crate::TrendRankError;

/// Everything a run consumes. Missing join data is simply empty.
#[derive(Debug, Clone, Default)]
pub struct PipelineInputs {
    pub cohorts: Vec<Cohort>,
    pub news: NewsIndex,
    pub videos: Vec<VideoStat>,
    /// Collector run whose videos belong to this run
    pub source_run: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunOutput {
    pub run_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub top_n: usize,
    pub categories: Vec<CategoryReport>,
    pub ocean: Vec<OceanEntry>,
    pub ocean_thresholds: OceanThresholds,
    pub engagement_summaries: Vec<EngagementSummary>,
    pub engagement: Vec<EngagementEntry>,
    pub correlations: CorrelationReport,
}

impl RunOutput {
    pub fn category(&self, category: Category) -> Option<&CategoryReport> {
        self.categories.iter().find(|r| r.category == category)
    }
}

/// Stateless pipeline carrying the immutable scoring configuration.
pub struct TrendPipeline {
    scoring: ScoringConfig,
    engagement: EngagementConfig,
}

impl TrendPipeline {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            scoring: config.scoring.clone(),
            engagement: config.engagement.clone(),
        }
    }

    /// Override the Top-N size for this pipeline only.
    pub fn with_top_n(mut self, top_n: usize) -> Result<Self> {
        if top_n == 0 {
            return Err(TrendRankError::invalid_config("top_n must be at least 1"));
        }
        self.scoring.top_n = top_n;
        Ok(self)
    }

    pub const fn top_n(&self) -> usize {
        self.scoring.top_n
    }

    /// Run with a fresh run id and the current time.
    pub fn run(&self, inputs: &PipelineInputs) -> Result<RunOutput> {
        self.run_with_id(inputs, Uuid::new_v4(), Utc::now())
    }

    pub fn run_with_id(
        &self,
        inputs: &PipelineInputs,
        run_id: Uuid,
        created_at: DateTime<Utc>,
    ) -> Result<RunOutput> {
        info!(
            "Starting run {} - categories={}, news_records={}, videos={}",
            run_id,
            inputs.cohorts.len(),
            inputs.news.len(),
            inputs.videos.len()
        );

        // Fail before any scoring so a bad cohort leaves no partial output
        let mut seen = HashSet::with_capacity(inputs.cohorts.len());
        for cohort in &inputs.cohorts {
            if !seen.insert(cohort.category) {
                return Err(TrendRankError::schema(format!(
                    "category {} supplied more than once",
                    cohort.category
                )));
            }
            validate_cohort(cohort)?;
        }

        let categories = inputs
            .cohorts
            .iter()
            .map(|cohort| self.analyze_category(cohort))
            .collect::<Result<Vec<_>>>()?;

        let (ocean, ocean_thresholds) = build_ocean_table(&categories, &inputs.news);

        let engagement_summaries = summarize_engagement(
            &inputs.videos,
            inputs.source_run.as_deref(),
            &inputs.news,
            self.engagement.videos_per_keyword,
        );
        let engagement = classify_engagement(&engagement_summaries, &self.engagement);
        let correlations = correlation_report(&ocean, &engagement_summaries)?;

        info!(
            "Run {} finished - ranked={}, ocean={}, engagement={}",
            run_id,
            categories.iter().map(|c| c.entries.len()).sum::<usize>(),
            ocean.len(),
            engagement.len()
        );

        Ok(RunOutput {
            run_id,
            created_at,
            top_n: self.scoring.top_n,
            categories,
            ocean,
            ocean_thresholds,
            engagement_summaries,
            engagement,
            correlations,
        })
    }

    /// Score, rank and label one category.
    pub fn analyze_category(&self, cohort: &Cohort) -> Result<CategoryReport> {
        let scored = score_cohort(cohort, &self.scoring.weights)?;
        let top = rank_top_n(scored, self.scoring.top_n);
        let thresholds = QuadrantThresholds::from_top_n(&top);

        debug!(
            "Quadrant thresholds - category={}, volume={:.2}, momentum={:.2}",
            cohort.category, thresholds.volume, thresholds.momentum
        );

        let entries = top
            .iter()
            .enumerate()
            .map(|(idx, row)| RankedEntry {
                rank: idx + 1,
                keyword: row.keyword.clone(),
                total_score: row.score.total_score,
                google_point: row.score.google_point,
                naver_point: row.score.naver_point,
                google_ratio_pct: row.score.google_ratio_pct,
                naver_ratio_pct: row.score.naver_ratio_pct,
                trend_type: classify_dominance(
                    row.score.google_ratio_pct,
                    row.score.naver_ratio_pct,
                    self.scoring.dominance_threshold_pct,
                ),
                volume_score: round_to(row.volume_score, SCORE_DECIMALS),
                momentum_score: round_to(row.momentum_score, SCORE_DECIMALS),
                positioning: classify_quadrant(row.volume_score, row.momentum_score, &thresholds),
            })
            .collect();

        Ok(CategoryReport {
            category: cohort.category,
            base_date: cohort.base_date.clone(),
            cohort_size: cohort.metrics.len(),
            volume_threshold: round_to(thresholds.volume, SCORE_DECIMALS),
            momentum_threshold: round_to(thresholds.momentum, SCORE_DECIMALS),
            entries,
        })
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

/// Read the cohort of one category from `data_dir`.
pub fn load_cohort(data_dir: &Path, category: Category) -> Result<Cohort> {
    let path = preprocessed_path(data_dir, category);
    if !path.exists() {
        return Err(TrendRankError::schema(format!(
            "metric file for {} not found: {}",
            category,
            path.display()
        )));
    }

    let cohort: Cohort = read_json(&path)?;
    if cohort.category != category {
        return Err(TrendRankError::schema(format!(
            "{} declares category {}, expected {}",
            path.display(),
            cohort.category,
            category
        )));
    }
    Ok(cohort)
}

/// Load cohorts plus the optional news and video files.
pub fn load_inputs(
    data_dir: &Path,
    categories: &[Category],
    news_path: Option<&Path>,
    videos_path: Option<&Path>,
) -> Result<PipelineInputs> {
    let cohorts = categories
        .iter()
        .map(|&category| load_cohort(data_dir, category))
        .collect::<Result<Vec<_>>>()?;

    let news = match news_path.filter(|p| p.exists()) {
        Some(path) => NewsIndex::from_document(&read_json::<NewsDocument>(path)?),
        None => {
            warn!("No news coverage file, every news count defaults to 0");
            NewsIndex::default()
        }
    };

    let videos = match videos_path.filter(|p| p.exists()) {
        Some(path) => read_json::<Vec<VideoStat>>(path)?,
        None => {
            warn!("No video statistics file, engagement table will be empty");
            Vec::new()
        }
    };

    Ok(PipelineInputs {
        cohorts,
        news,
        videos,
        source_run: None,
    })
}

fn write_json<T: Serialize + ?Sized>(path: PathBuf, value: &T) -> Result<PathBuf> {
    std::fs::write(&path, serde_json::to_string_pretty(value)?)?;
    debug!("Wrote {}", path.display());
    Ok(path)
}

/// Write every output table of a run into `dir` and return the files written.
pub fn write_outputs(output: &RunOutput, dir: &Path) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(dir)?;
    let mut written = Vec::new();

    for report in &output.categories {
        let name = format!("top{}_{}.json", output.top_n, report.category.code());
        written.push(write_json(dir.join(name), report)?);
    }

    written.push(write_json(dir.join("ocean_status.json"), &output.ocean)?);

    let by_rate = rank_by(output.engagement.clone(), output.engagement.len(), |e| {
        e.engagement_rate
    });
    written.push(write_json(dir.join("engagement.json"), &by_rate)?);

    for category in Category::ALL {
        let rows: Vec<&EngagementEntry> =
            by_rate.iter().filter(|e| e.category == category).collect();
        if !rows.is_empty() {
            let name = format!("engagement_{}.json", category.code());
            written.push(write_json(dir.join(name), &rows)?);
        }
    }

    written.push(write_json(dir.join("correlation.json"), &output.correlations)?);

    info!("Wrote {} output files to {}", written.len(), dir.display());
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::KeywordMetric;

    fn metric(keyword: &str, volume: f64, surge: f64, sum: f64, slope: f64) -> KeywordMetric {
        KeywordMetric {
            keyword: keyword.to_string(),
            google_absolute_volume: volume,
            google_surge_ratio: surge,
            naver_trend_sum: sum,
            naver_growth_slope: slope,
        }
    }

    fn cohort(category: Category, metrics: Vec<KeywordMetric>) -> Cohort {
        Cohort {
            category,
            base_date: "2025-01-10".to_string(),
            metrics,
        }
    }

    #[test]
    fn test_analyze_category_ranks_and_labels() {
        let pipeline = TrendPipeline::new(&AppConfig::default());
        let report = pipeline
            .analyze_category(&cohort(
                Category::Sports,
                vec![
                    metric("low", 0.0, 0.0, 0.0, 0.0),
                    metric("google", 100.0, 100.0, 0.0, 0.0),
                    metric("both", 100.0, 100.0, 100.0, 100.0),
                ],
            ))
            .unwrap();

        let keywords: Vec<&str> = report.entries.iter().map(|e| e.keyword.as_str()).collect();
        assert_eq!(keywords, vec!["both", "google", "low"]);
        assert_eq!(report.entries[0].rank, 1);
        assert_eq!(report.entries[0].total_score, 100.0);
        assert_eq!(report.entries[1].trend_type, crate::models::TrendType::GoogleDominant);
        assert_eq!(report.entries[0].trend_type, crate::models::TrendType::Balanced);
        assert_eq!(report.entries[2].google_ratio_pct, 0.0);
        assert_eq!(report.cohort_size, 3);
    }

    #[test]
    fn test_schema_violation_aborts_whole_run() {
        let pipeline = TrendPipeline::new(&AppConfig::default());
        let inputs = PipelineInputs {
            cohorts: vec![
                cohort(Category::Climate, vec![metric("ok", 1.0, 1.0, 1.0, 1.0)]),
                cohort(Category::Sports, vec![metric("bad", f64::NAN, 1.0, 1.0, 1.0)]),
            ],
            ..PipelineInputs::default()
        };
        assert!(pipeline.run(&inputs).unwrap_err().is_schema_violation());
    }

    #[test]
    fn test_duplicate_category_rejected() {
        let pipeline = TrendPipeline::new(&AppConfig::default());
        let inputs = PipelineInputs {
            cohorts: vec![
                cohort(Category::Climate, vec![metric("a", 1.0, 1.0, 1.0, 1.0)]),
                cohort(Category::Climate, vec![metric("b", 1.0, 1.0, 1.0, 1.0)]),
            ],
            ..PipelineInputs::default()
        };
        assert!(pipeline.run(&inputs).is_err());
    }

    #[test]
    fn test_with_top_n_truncates() {
        let pipeline = TrendPipeline::new(&AppConfig::default()).with_top_n(2).unwrap();
        let report = pipeline
            .analyze_category(&cohort(
                Category::Finance,
                vec![
                    metric("a", 1.0, 0.0, 0.0, 0.0),
                    metric("b", 2.0, 0.0, 0.0, 0.0),
                    metric("c", 3.0, 0.0, 0.0, 0.0),
                ],
            ))
            .unwrap();
        assert_eq!(report.entries.len(), 2);
        assert_eq!(report.entries[0].keyword, "c");
    }

    #[test]
    fn test_with_top_n_rejects_zero() {
        let err = TrendPipeline::new(&AppConfig::default())
            .with_top_n(0)
            .err()
            .unwrap();
        assert!(matches!(err, TrendRankError::InvalidConfig(_)));
    }

    #[test]
    fn test_load_cohort_missing_file_is_schema_violation() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_cohort(dir.path(), Category::Climate).unwrap_err();
        assert!(err.is_schema_violation());
    }

    #[test]
    fn test_load_cohort_category_mismatch() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            preprocessed_path(dir.path(), Category::Climate),
            r#"{"category": "sports", "results": []}"#,
        )
        .unwrap();
        let err = load_cohort(dir.path(), Category::Climate).unwrap_err();
        assert!(matches!(err, TrendRankError::Schema(_)));
    }
}
