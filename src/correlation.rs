//! Pearson correlation between the composite score and external signals.

use std::collections::HashMap;

use serde::Deserialize;
use serde::Serialize;

use crate::models::keyword_key;
use crate::models::Category;
use crate::models::EngagementSummary;
use crate::models::OceanEntry;
use crate::Result;
use crate::TrendRankError;

/// Outcome of a correlation. `Undefined` when either side has no variance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", content = "value", rename_all = "lowercase")]
pub enum Correlation {
    Coefficient(f64),
    Undefined,
}

impl Correlation {
    pub const fn coefficient(self) -> Option<f64> {
        match self {
            Correlation::Coefficient(r) => Some(r),
            Correlation::Undefined => None,
        }
    }
}

impl std::fmt::Display for Correlation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Correlation::Coefficient(r) => write!(f, "{r:.3}"),
            Correlation::Undefined => f.write_str("undefined"),
        }
    }
}

/// Pearson coefficient of two aligned sequences.
pub fn pearson(xs: &[f64], ys: &[f64]) -> Result<Correlation> {
    if xs.len() != ys.len() {
        return Err(TrendRankError::schema(format!(
            "correlation inputs differ in length ({} vs {})",
            xs.len(),
            ys.len()
        )));
    }
    if xs.len() < 2 || is_constant(xs) || is_constant(ys) {
        return Ok(Correlation::Undefined);
    }

    let n = xs.len() as f64;
    let mean_x = xs.iter().sum::<f64>() / n;
    let mean_y = ys.iter().sum::<f64>() / n;

    let (cov, var_x, var_y) = xs.iter().zip(ys).fold((0.0, 0.0, 0.0), |(c, vx, vy), (x, y)| {
        let dx = x - mean_x;
        let dy = y - mean_y;
        (c + dx * dy, vx + dx * dx, vy + dy * dy)
    });

    let denominator = (var_x * var_y).sqrt();
    if denominator == 0.0 || !denominator.is_finite() {
        return Ok(Correlation::Undefined);
    }
    Ok(Correlation::Coefficient((cov / denominator).clamp(-1.0, 1.0)))
}

fn is_constant(values: &[f64]) -> bool {
    values.windows(2).all(|w| w[0] == w[1])
}

/// Diagnostic correlations over the joined keyword set of a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrelationReport {
    pub news_sample_size: usize,
    pub score_vs_news: Correlation,
    pub youtube_sample_size: usize,
    pub score_vs_views: Correlation,
    pub score_vs_likes: Correlation,
    pub score_vs_comments: Correlation,
}

/// News correlations use every ocean row; YouTube ones use the inner join of
/// ocean rows with engagement summaries on `(category, keyword)`.
pub fn correlation_report(
    ocean: &[OceanEntry],
    summaries: &[EngagementSummary],
) -> Result<CorrelationReport> {
    let scores: Vec<f64> = ocean.iter().map(|o| o.total_score).collect();
    let news: Vec<f64> = ocean.iter().map(|o| o.news_count as f64).collect();

    let by_key: HashMap<(Category, String), &EngagementSummary> = summaries
        .iter()
        .map(|s| ((s.category, keyword_key(&s.keyword)), s))
        .collect();
    let joined: Vec<(f64, &EngagementSummary)> = ocean
        .iter()
        .filter_map(|o| {
            by_key
                .get(&(o.category, keyword_key(&o.keyword)))
                .map(|s| (o.total_score, *s))
        })
        .collect();

    let joined_scores: Vec<f64> = joined.iter().map(|j| j.0).collect();
    let column = |f: fn(&EngagementSummary) -> f64| -> Vec<f64> {
        joined.iter().map(|j| f(j.1)).collect()
    };

    Ok(CorrelationReport {
        news_sample_size: ocean.len(),
        score_vs_news: pearson(&scores, &news)?,
        youtube_sample_size: joined.len(),
        score_vs_views: pearson(&joined_scores, &column(|s| s.avg_view_count))?,
        score_vs_likes: pearson(&joined_scores, &column(|s| s.avg_like_count))?,
        score_vs_comments: pearson(&joined_scores, &column(|s| s.avg_comment_count))?,
    })
}
