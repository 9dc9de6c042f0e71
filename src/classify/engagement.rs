use std::collections::HashMap;

use tracing::debug;
use tracing::warn;

use super::NewsIndex;
use crate::config::EngagementConfig;
use crate::models::keyword_key;
use crate::models::Category;
use crate::models::EngagementEntry;
use crate::models::EngagementSummary;
use crate::models::TemperatureStatus;
use crate::models::VideoStat;
use crate::scoring::round_to;
use crate::scoring::SCORE_DECIMALS;

const AVERAGE_DECIMALS: u32 = 1;

/// Average the top `per_keyword` videos (by view count) of every keyword.
///
/// Each keyword is restricted to one collector run: `run_id` when given, else
/// the run of the keyword's news articles, else the run holding most of the
/// file's videos. Untagged videos are always kept. Output follows first
/// appearance order.
pub fn summarize_engagement(
    videos: &[VideoStat],
    run_id: Option<&str>,
    news: &NewsIndex,
    per_keyword: usize,
) -> Vec<EngagementSummary> {
    let fallback = if run_id.is_none() {
        dominant_run(videos)
    } else {
        None
    };

    let mut order: Vec<(Category, String)> = Vec::new();
    let mut groups: HashMap<(Category, String), Vec<&VideoStat>> = HashMap::new();

    for video in videos {
        let key = (video.category, keyword_key(&video.keyword));
        groups
            .entry(key.clone())
            .or_insert_with(|| {
                order.push(key);
                Vec::new()
            })
            .push(video);
    }

    order
        .into_iter()
        .filter_map(|key| {
            let mut group = groups.remove(&key)?;
            if let Some(wanted) = run_id.or_else(|| news.run_id(key.0, &key.1)).or(fallback) {
                group.retain(|v| v.run_id.as_deref().map_or(true, |run| run == wanted));
            }
            if group.is_empty() {
                debug!(
                    "No videos from the current run - category={}, keyword={}",
                    key.0, key.1
                );
                return None;
            }
            group.sort_by(|a, b| b.view_count.cmp(&a.view_count));
            group.truncate(per_keyword);
            Some(summarize_group(&group))
        })
        .collect()
}

/// Run tagging most videos when the file mixes several. Ties go to the run seen last.
fn dominant_run(videos: &[VideoStat]) -> Option<&str> {
    let mut counts: HashMap<&str, (usize, usize)> = HashMap::new();
    for (idx, run) in videos
        .iter()
        .enumerate()
        .filter_map(|(idx, v)| Some((idx, v.run_id.as_deref()?)))
    {
        let entry = counts.entry(run).or_insert((0, idx));
        entry.0 += 1;
        entry.1 = idx;
    }
    if counts.len() < 2 {
        return None;
    }

    let (run, (count, _)) = counts.into_iter().max_by_key(|(_, stats)| *stats)?;
    warn!("Video statistics mix collector runs, keeping run {run} ({count} videos)");
    Some(run)
}

fn summarize_group(group: &[&VideoStat]) -> EngagementSummary {
    let count = group.len() as f64;
    let average = |f: fn(&VideoStat) -> u64| {
        round_to(group.iter().map(|v| f(v) as f64).sum::<f64>() / count, AVERAGE_DECIMALS)
    };

    EngagementSummary {
        category: group[0].category,
        keyword: group[0].keyword.clone(),
        video_count: group.len(),
        avg_view_count: average(|v| v.view_count),
        avg_like_count: average(|v| v.like_count),
        avg_comment_count: average(|v| v.comment_count),
    }
}

/// `(likes + comments) / views * 100`, rounded to 2 decimals. `None` without views.
pub fn engagement_rate(summary: &EngagementSummary) -> Option<f64> {
    (summary.avg_view_count > 0.0).then(|| {
        round_to(
            (summary.avg_like_count + summary.avg_comment_count) / summary.avg_view_count * 100.0,
            SCORE_DECIMALS,
        )
    })
}

pub fn classify_temperature(rate: f64, thresholds: &EngagementConfig) -> TemperatureStatus {
    if rate >= thresholds.hot {
        TemperatureStatus::Hot
    } else if rate >= thresholds.warm {
        TemperatureStatus::Warm
    } else if rate >= thresholds.light {
        TemperatureStatus::Light
    } else {
        TemperatureStatus::Cool
    }
}

/// Keywords without views are left out of the table, not rated `cool`.
pub fn classify_engagement(
    summaries: &[EngagementSummary],
    thresholds: &EngagementConfig,
) -> Vec<EngagementEntry> {
    let entries: Vec<EngagementEntry> = summaries
        .iter()
        .filter_map(|summary| {
            let Some(rate) = engagement_rate(summary) else {
                debug!(
                    "Skipping keyword without views - category={}, keyword={}",
                    summary.category, summary.keyword
                );
                return None;
            };
            Some(EngagementEntry {
                category: summary.category,
                keyword: summary.keyword.clone(),
                avg_view_count: summary.avg_view_count,
                avg_like_count: summary.avg_like_count,
                avg_comment_count: summary.avg_comment_count,
                engagement_rate: rate,
                temperature_status: classify_temperature(rate, thresholds),
            })
        })
        .collect();

    debug!(
        "Engagement classified - summaries={}, classified={}",
        summaries.len(),
        entries.len()
    );

    entries
}
