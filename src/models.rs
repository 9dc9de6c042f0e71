use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Trend category. Input accepts both the code and the Korean display name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    #[serde(alias = "기후")]
    Climate,
    #[serde(alias = "엔터테인먼트", alias = "연예/문화")]
    Entertainment,
    #[serde(alias = "finance_business", alias = "비즈니스 및 금융", alias = "금융/비즈니스")]
    Finance,
    #[serde(alias = "스포츠")]
    Sports,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Climate,
        Category::Entertainment,
        Category::Finance,
        Category::Sports,
    ];

    pub const fn code(self) -> &'static str {
        match self {
            Category::Climate => "climate",
            Category::Entertainment => "entertainment",
            Category::Finance => "finance",
            Category::Sports => "sports",
        }
    }

    pub const fn display_name(self) -> &'static str {
        match self {
            Category::Climate => "기후",
            Category::Entertainment => "엔터테인먼트",
            Category::Finance => "비즈니스 및 금융",
            Category::Sports => "스포츠",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.code())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Category::ALL
            .into_iter()
            .find(|c| c.code().eq_ignore_ascii_case(trimmed) || c.display_name() == trimmed)
            .or_else(|| (trimmed == "finance_business").then_some(Category::Finance))
            .ok_or_else(|| format!("unknown category: {s}"))
    }
}

/// Join key for matching keywords across collectors: whitespace removed, lowercased.
pub fn keyword_key(keyword: &str) -> String {
    keyword
        .chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Collector run ids arrive as text or as database serials.
pub(crate) fn deserialize_run_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(match Option::<serde_json::Value>::deserialize(deserializer)? {
        Some(serde_json::Value::String(text)) => Some(text),
        Some(serde_json::Value::Number(number)) => Some(number.to_string()),
        _ => None,
    })
}

/// Raw per-keyword metrics for one collection run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordMetric {
    #[serde(alias = "rank_title")]
    pub keyword: String,
    pub google_absolute_volume: f64,
    pub google_surge_ratio: f64,
    pub naver_trend_sum: f64,
    pub naver_growth_slope: f64,
}

/// All keywords of one category normalized together.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cohort {
    pub category: Category,
    #[serde(default)]
    pub base_date: String,
    #[serde(rename = "results")]
    pub metrics: Vec<KeywordMetric>,
}

/// Metrics min-max scaled to `[0, 100]` within their cohort.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct NormalizedMetrics {
    pub google_volume: f64,
    pub google_surge: f64,
    pub naver_sum: f64,
    pub naver_slope: f64,
}

/// Platform points and shares; points rounded to 2 decimals, shares to 1.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CompositeScore {
    pub google_point: f64,
    pub naver_point: f64,
    pub total_score: f64,
    pub google_ratio_pct: f64,
    pub naver_ratio_pct: f64,
}

/// A keyword after scoring, before ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredKeyword {
    pub keyword: String,
    pub normalized: NormalizedMetrics,
    pub score: CompositeScore,
    /// Unrounded `(norm(volume) + norm(trend_sum)) / 2`
    pub volume_score: f64,
    /// Unrounded `(norm(surge) + norm(slope)) / 2`
    pub momentum_score: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TrendType {
    GoogleDominant,
    NaverDominant,
    Balanced,
}

impl TrendType {
    pub const fn id(self) -> &'static str {
        match self {
            TrendType::GoogleDominant => "google-dominant",
            TrendType::NaverDominant => "naver-dominant",
            TrendType::Balanced => "balanced",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            TrendType::GoogleDominant => "Google-led",
            TrendType::NaverDominant => "Naver-led",
            TrendType::Balanced => "Platform balanced",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Positioning {
    MegaTrend,
    SteadySeller,
    RisingStar,
    Niche,
}

impl Positioning {
    pub const fn id(self) -> &'static str {
        match self {
            Positioning::MegaTrend => "mega-trend",
            Positioning::SteadySeller => "steady-seller",
            Positioning::RisingStar => "rising-star",
            Positioning::Niche => "niche",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Positioning::MegaTrend => "Mega trend (high volume, high momentum)",
            Positioning::SteadySeller => "Steady seller (high volume, low momentum)",
            Positioning::RisingStar => "Rising star (low volume, high momentum)",
            Positioning::Niche => "Niche (low volume, low momentum)",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OceanStatus {
    BlueOcean,
    RedOcean,
    MediaBubble,
    Minor,
}

impl OceanStatus {
    pub const fn id(self) -> &'static str {
        match self {
            OceanStatus::BlueOcean => "blue-ocean",
            OceanStatus::RedOcean => "red-ocean",
            OceanStatus::MediaBubble => "media-bubble",
            OceanStatus::Minor => "minor",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            OceanStatus::BlueOcean => "Blue ocean (high demand, low coverage)",
            OceanStatus::RedOcean => "Red ocean (high demand, high coverage)",
            OceanStatus::MediaBubble => "Media bubble (low demand, high coverage)",
            OceanStatus::Minor => "Minor (low demand, low coverage)",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TemperatureStatus {
    Hot,
    Warm,
    Light,
    Cool,
}

impl TemperatureStatus {
    pub const fn id(self) -> &'static str {
        match self {
            TemperatureStatus::Hot => "hot",
            TemperatureStatus::Warm => "warm",
            TemperatureStatus::Light => "light",
            TemperatureStatus::Cool => "cool",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            TemperatureStatus::Hot => "Hot (devoted fans)",
            TemperatureStatus::Warm => "Warm (favourable)",
            TemperatureStatus::Light => "Light (casual interest)",
            TemperatureStatus::Cool => "Cool (views only)",
        }
    }
}

macro_rules! display_by_id {
    ($($ty:ty),*) => {
        $(impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.pad(self.id())
            }
        })*
    };
}

display_by_id!(TrendType, Positioning, OceanStatus, TemperatureStatus);

/// One row of the published Top-N table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedEntry {
    pub rank: usize,
    pub keyword: String,
    pub total_score: f64,
    pub google_point: f64,
    pub naver_point: f64,
    pub google_ratio_pct: f64,
    pub naver_ratio_pct: f64,
    pub trend_type: TrendType,
    pub volume_score: f64,
    pub momentum_score: f64,
    pub positioning: Positioning,
}

/// Ranked table of one category within a run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryReport {
    pub category: Category,
    pub base_date: String,
    pub cohort_size: usize,
    pub volume_threshold: f64,
    pub momentum_threshold: f64,
    pub entries: Vec<RankedEntry>,
}

/// Press coverage for one keyword, supplied by the news collector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsCoverage {
    pub category: Category,
    #[serde(alias = "rank_title")]
    pub keyword: String,
    #[serde(alias = "google_news_count")]
    pub news_count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OceanEntry {
    pub category: Category,
    pub keyword: String,
    pub total_score: f64,
    pub news_count: u64,
    pub ocean_status: OceanStatus,
}

/// Statistics of one video returned for a keyword by the video collector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoStat {
    pub category: Category,
    pub keyword: String,
    #[serde(default, deserialize_with = "deserialize_run_id")]
    pub run_id: Option<String>,
    #[serde(default, alias = "youtube_id")]
    pub video_id: Option<String>,
    pub view_count: u64,
    #[serde(default)]
    pub like_count: u64,
    #[serde(default)]
    pub comment_count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngagementSummary {
    pub category: Category,
    pub keyword: String,
    pub video_count: usize,
    pub avg_view_count: f64,
    pub avg_like_count: f64,
    pub avg_comment_count: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngagementEntry {
    pub category: Category,
    pub keyword: String,
    pub avg_view_count: f64,
    pub avg_like_count: f64,
    pub avg_comment_count: f64,
    pub engagement_rate: f64,
    pub temperature_status: TemperatureStatus,
}

/// Run metadata as stored in `collection_runs`.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct CollectionRun {
    pub run_id: Uuid,
    pub category: String,
    pub base_date: String,
    pub keyword_count: i32,
    pub created_at: DateTime<Utc>,
}
