//! Converts raw collector reports into per-category metric cohorts.

use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;
use serde::Serialize;
use tracing::info;
use tracing::warn;

use crate::models::Category;
use crate::models::Cohort;
use crate::models::KeywordMetric;
use crate::scoring::round_to;
use crate::scoring::SCORE_DECIMALS;
use crate::Result;
use crate::TrendRankError;

/// Korean magnitude suffixes used by the trends page.
const VOLUME_UNITS: [(&str, f64); 2] = [("만", 10_000.0), ("천", 1_000.0)];

/// One day of the Naver relative search ratio.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DailyRatio {
    #[serde(default)]
    pub period: String,
    #[serde(default)]
    pub ratio: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawTrendItem {
    #[serde(default, alias = "keyword")]
    pub rank_title: String,
    /// Scraped text block: volume on line 1, surge percentage on line 3
    #[serde(default)]
    pub google_volume: Option<String>,
    #[serde(default)]
    pub naver_trend_sum: Option<f64>,
    #[serde(default)]
    pub naver_daily_ratio: Vec<DailyRatio>,
}

/// `raw_data/trend_report_<category>.json`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawTrendReport {
    #[serde(default)]
    pub category: Option<Category>,
    #[serde(default)]
    pub base_date: String,
    pub results: Vec<RawTrendItem>,
}

fn parse_number(text: &str) -> f64 {
    text.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v >= 0.0)
        .unwrap_or(0.0)
}

/// Parse a volume like `"1.2만+"`, `"5천+"` or `"2,000+"`. Unparseable text is 0.
pub fn parse_volume(line: &str) -> f64 {
    let cleaned = line.replace(['+', ','], "");
    let cleaned = cleaned.trim();
    for (unit, multiplier) in VOLUME_UNITS {
        if cleaned.contains(unit) {
            return parse_number(&cleaned.replace(unit, "")) * multiplier;
        }
    }
    parse_number(cleaned)
}

/// Split the scraped Google block into `(absolute_volume, surge_ratio)`.
pub fn parse_google_volume(text: &str) -> (f64, f64) {
    let lines: Vec<&str> = text.lines().collect();
    let volume = lines.first().map_or(0.0, |line| parse_volume(line));
    let surge = lines
        .get(2)
        .map_or(0.0, |line| parse_number(&line.replace(['%', ','], "")));
    (volume, surge)
}

/// Least-squares slope of `series` against `0..len`, rounded to 2 decimals.
pub fn growth_slope(series: &[f64]) -> f64 {
    if series.len() < 2 {
        return 0.0;
    }
    let n = series.len() as f64;
    let mean_x = (n - 1.0) / 2.0;
    let mean_y = series.iter().sum::<f64>() / n;

    let (num, den) = series
        .iter()
        .enumerate()
        .fold((0.0, 0.0), |(num, den), (i, y)| {
            let dx = i as f64 - mean_x;
            (num + dx * (y - mean_y), den + dx * dx)
        });

    if den == 0.0 {
        return 0.0;
    }
    round_to(num / den, SCORE_DECIMALS)
}

fn preprocess_item(item: &RawTrendItem) -> KeywordMetric {
    let (google_absolute_volume, google_surge_ratio) = item
        .google_volume
        .as_deref()
        .map_or((0.0, 0.0), parse_google_volume);
    let ratios: Vec<f64> = item.naver_daily_ratio.iter().map(|d| d.ratio).collect();

    KeywordMetric {
        keyword: item.rank_title.trim().to_string(),
        google_absolute_volume,
        google_surge_ratio,
        naver_trend_sum: item
            .naver_trend_sum
            .unwrap_or_else(|| ratios.iter().sum()),
        naver_growth_slope: growth_slope(&ratios),
    }
}

/// Build the metric cohort of one category.
pub fn preprocess_report(report: &RawTrendReport) -> Result<Cohort> {
    let category = report
        .category
        .ok_or_else(|| TrendRankError::schema("trend report has no category"))?;

    Ok(Cohort {
        category,
        base_date: report.base_date.clone(),
        metrics: report.results.iter().map(preprocess_item).collect(),
    })
}

pub fn raw_report_path(raw_dir: &Path, category: Category) -> PathBuf {
    raw_dir.join(format!("trend_report_{}.json", category.code()))
}

pub fn preprocessed_path(data_dir: &Path, category: Category) -> PathBuf {
    data_dir.join(format!("preprocessed_{}.json", category.code()))
}

/// Convert every requested category and return the files written.
pub fn preprocess_dir(
    raw_dir: &Path,
    data_dir: &Path,
    categories: &[Category],
) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(data_dir)?;
    let mut written = Vec::with_capacity(categories.len());

    for &category in categories {
        let source = raw_report_path(raw_dir, category);
        if !source.exists() {
            warn!("Raw trend report not found, skipping: {}", source.display());
            continue;
        }

        let content = std::fs::read_to_string(&source)?;
        let mut report: RawTrendReport = serde_json::from_str(&content)?;
        report.category.get_or_insert(category);

        let cohort = preprocess_report(&report)?;
        let target = preprocessed_path(data_dir, category);
        std::fs::write(&target, serde_json::to_string_pretty(&cohort)?)?;

        info!(
            "Preprocessed {} keywords for {} -> {}",
            cohort.metrics.len(),
            category,
            target.display()
        );
        written.push(target);
    }

    Ok(written)
}
