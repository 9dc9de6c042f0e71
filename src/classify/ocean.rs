use std::collections::BTreeMap;
use std::collections::HashMap;

use serde::Deserialize;
use serde::Serialize;
use tracing::debug;

use super::mean;
use crate::models::deserialize_run_id;
use crate::models::keyword_key;
use crate::models::Category;
use crate::models::CategoryReport;
use crate::models::NewsCoverage;
use crate::models::OceanEntry;
use crate::models::OceanStatus;

/// Per-source article totals in the news collector's grouped document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewsTotals {
    #[serde(default)]
    pub google: u64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewsArticle {
    #[serde(default, deserialize_with = "deserialize_run_id")]
    pub run_id: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GroupedNewsEntry {
    #[serde(default)]
    pub total_count: NewsTotals,
    #[serde(default)]
    pub articles: Vec<NewsArticle>,
}

/// `{category: {keyword: {total_count: {google: n}}}}`
pub type GroupedNews = BTreeMap<Category, BTreeMap<String, GroupedNewsEntry>>;

/// Either shape the news collector may hand over.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NewsDocument {
    Records(Vec<NewsCoverage>),
    Grouped(GroupedNews),
}

/// Press-coverage lookup by `(category, keyword)`. Unknown keywords count 0.
///
/// Also remembers the collector run each keyword's articles came from, which
/// ties video statistics to the same run.
#[derive(Debug, Clone, Default)]
pub struct NewsIndex {
    counts: HashMap<(Category, String), u64>,
    runs: HashMap<(Category, String), String>,
}

impl NewsIndex {
    pub fn from_records(records: &[NewsCoverage]) -> Self {
        let mut counts = HashMap::with_capacity(records.len());
        for record in records {
            let key = (record.category, keyword_key(&record.keyword));
            if counts.insert(key, record.news_count).is_some() {
                debug!(
                    "Duplicate news record, keeping the last - category={}, keyword={}",
                    record.category, record.keyword
                );
            }
        }
        Self {
            counts,
            runs: HashMap::new(),
        }
    }

    pub fn from_grouped(grouped: &GroupedNews) -> Self {
        let mut counts = HashMap::new();
        let mut runs = HashMap::new();
        for (&category, keywords) in grouped {
            for (keyword, entry) in keywords {
                let key = (category, keyword_key(keyword));
                if let Some(run_id) = entry.articles.first().and_then(|a| a.run_id.clone()) {
                    runs.insert(key.clone(), run_id);
                }
                if counts.insert(key, entry.total_count.google).is_some() {
                    debug!(
                        "News keywords share a join key, keeping the last - category={}, keyword={}",
                        category, keyword
                    );
                }
            }
        }
        Self { counts, runs }
    }

    pub fn from_document(document: &NewsDocument) -> Self {
        match document {
            NewsDocument::Records(records) => Self::from_records(records),
            NewsDocument::Grouped(grouped) => Self::from_grouped(grouped),
        }
    }

    pub fn news_count(&self, category: Category, keyword: &str) -> u64 {
        self.counts
            .get(&(category, keyword_key(keyword)))
            .copied()
            .unwrap_or(0)
    }

    /// Collector run of the keyword's articles, when the document carries one.
    pub fn run_id(&self, category: Category, keyword: &str) -> Option<&str> {
        self.runs
            .get(&(category, keyword_key(keyword)))
            .map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

/// Demand/supply cross-hair: mean total score and mean news count of the set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct OceanThresholds {
    pub score: f64,
    pub news: f64,
}

impl OceanThresholds {
    pub fn from_points(points: &[(f64, u64)]) -> Self {
        Self {
            score: mean(points.iter().map(|p| p.0)).unwrap_or(0.0),
            news: mean(points.iter().map(|p| p.1 as f64)).unwrap_or(0.0),
        }
    }
}

/// Values equal to a threshold count as high.
pub fn classify_ocean(total_score: f64, news_count: u64, thresholds: &OceanThresholds) -> OceanStatus {
    let high_demand = total_score >= thresholds.score;
    let high_coverage = news_count as f64 >= thresholds.news;
    match (high_demand, high_coverage) {
        (true, false) => OceanStatus::BlueOcean,
        (true, true) => OceanStatus::RedOcean,
        (false, true) => OceanStatus::MediaBubble,
        (false, false) => OceanStatus::Minor,
    }
}

/// Classify the union of every category's Top-N against shared thresholds.
pub fn build_ocean_table(
    reports: &[CategoryReport],
    news: &NewsIndex,
) -> (Vec<OceanEntry>, OceanThresholds) {
    let joined: Vec<(Category, &str, f64, u64)> = reports
        .iter()
        .flat_map(|report| {
            report.entries.iter().map(move |entry| {
                (
                    report.category,
                    entry.keyword.as_str(),
                    entry.total_score,
                    news.news_count(report.category, &entry.keyword),
                )
            })
        })
        .collect();

    let points: Vec<(f64, u64)> = joined.iter().map(|j| (j.2, j.3)).collect();
    let thresholds = OceanThresholds::from_points(&points);
    let missing = joined.iter().filter(|j| j.3 == 0).count();

    debug!(
        "Ocean thresholds - keywords={}, score_mean={:.2}, news_mean={:.2}, zero_news={}",
        joined.len(),
        thresholds.score,
        thresholds.news,
        missing
    );

    let entries = joined
        .into_iter()
        .map(|(category, keyword, total_score, news_count)| OceanEntry {
            category,
            keyword: keyword.to_string(),
            total_score,
            news_count,
            ocean_status: classify_ocean(total_score, news_count, &thresholds),
        })
        .collect();

    (entries, thresholds)
}
