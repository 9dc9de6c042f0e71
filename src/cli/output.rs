//! CLI output formatting utilities
//!
//! This module provides consistent output formatting for the `trendrank` CLI

use crate::correlation::Correlation;
use crate::database::StoredRanking;
use crate::models::CategoryReport;
use crate::models::CollectionRun;
use crate::models::OceanStatus;
use crate::models::TemperatureStatus;
use crate::pipeline::RunOutput;
use crate::AppConfig;

/// Truncate at a character boundary, appending "..." when shortened
#[must_use]
pub fn truncate_str(s: &str, max_chars: usize) -> String {
    if s.chars().count() > max_chars {
        let truncated: String = s.chars().take(max_chars).collect();
        format!("{truncated}...")
    } else {
        s.to_string()
    }
}

/// Print the Top-N table of one category
pub fn print_category_report(report: &CategoryReport) {
    println!(
        "📊 {} ({}) - base date: {}, cohort: {} keywords",
        report.category,
        report.category.display_name(),
        if report.base_date.is_empty() { "N/A" } else { report.base_date.as_str() },
        report.cohort_size
    );
    println!(
        "  Quadrant thresholds: volume >= {:.2}, momentum >= {:.2}",
        report.volume_threshold, report.momentum_threshold
    );
    println!(
        "  {:>3}  {:<20} {:>7} {:>8} {:>8}  {:<16} {:<14}",
        "#", "Keyword", "Score", "Google%", "Naver%", "Type", "Positioning"
    );
    for entry in &report.entries {
        println!(
            "  {:>3}  {:<20} {:>7.2} {:>8.1} {:>8.1}  {:<16} {:<14}",
            entry.rank,
            truncate_str(&entry.keyword, 17),
            entry.total_score,
            entry.google_ratio_pct,
            entry.naver_ratio_pct,
            entry.trend_type,
            entry.positioning
        );
    }
    println!();
}

fn format_correlation(name: &str, value: Correlation, sample: usize) -> String {
    format!("  {name:<20} {:>10}  (n={sample})", value.to_string())
}

/// Print ocean, engagement and correlation summaries of a run
pub fn print_run_summary(output: &RunOutput) {
    println!("🧭 Run {} at {}", output.run_id, output.created_at.to_rfc3339());
    println!();

    println!(
        "🌊 Ocean status ({} keywords, score >= {:.2}, news >= {:.2}):",
        output.ocean.len(),
        output.ocean_thresholds.score,
        output.ocean_thresholds.news
    );
    for status in [
        OceanStatus::BlueOcean,
        OceanStatus::RedOcean,
        OceanStatus::MediaBubble,
        OceanStatus::Minor,
    ] {
        let count = output.ocean.iter().filter(|o| o.ocean_status == status).count();
        println!("  {:<50} {count}", status.label());
    }
    println!();

    println!(
        "🔥 Engagement ({} of {} keywords with views):",
        output.engagement.len(),
        output.engagement_summaries.len()
    );
    for status in [
        TemperatureStatus::Hot,
        TemperatureStatus::Warm,
        TemperatureStatus::Light,
        TemperatureStatus::Cool,
    ] {
        let count = output
            .engagement
            .iter()
            .filter(|e| e.temperature_status == status)
            .count();
        println!("  {:<50} {count}", status.label());
    }
    println!();

    let c = &output.correlations;
    println!("📈 Correlation with total score:");
    println!("{}", format_correlation("news count", c.score_vs_news, c.news_sample_size));
    println!("{}", format_correlation("avg views", c.score_vs_views, c.youtube_sample_size));
    println!("{}", format_correlation("avg likes", c.score_vs_likes, c.youtube_sample_size));
    println!(
        "{}",
        format_correlation("avg comments", c.score_vs_comments, c.youtube_sample_size)
    );
    println!();
}

/// Print recorded runs
pub fn print_run_list(runs: &[CollectionRun]) {
    println!("Found {} run records:", runs.len());
    for run in runs {
        println!(
            "  - {} | {} | base date: {} | keywords: {} | {}",
            run.run_id,
            run.category,
            if run.base_date.is_empty() { "N/A" } else { run.base_date.as_str() },
            run.keyword_count,
            run.created_at.format("%Y-%m-%d %H:%M:%S")
        );
    }
}

/// Print a Top-N table read back from the database
pub fn print_stored_ranking(rows: &[StoredRanking]) {
    let Some(first) = rows.first() else {
        print_warning("No stored ranking for this category");
        return;
    };
    println!(
        "📊 {} - run {} at {}",
        first.category,
        first.run_id,
        first.created_at.format("%Y-%m-%d %H:%M:%S")
    );
    for row in rows {
        println!(
            "  {:>3}  {:<20} {:>7.2} {:>8.1} {:>8.1}  {:<16} {:<14}",
            row.rank,
            truncate_str(&row.keyword, 17),
            row.total_score,
            row.google_ratio_pct,
            row.naver_ratio_pct,
            row.trend_type,
            row.positioning
        );
    }
}

/// Print configuration
pub fn print_config(config: &AppConfig) {
    println!("📋 trendrank Configuration:");
    println!();

    println!("🗄️  Database:");
    println!("  URL: {}", mask_database_url(config.database_url()));
    println!("  Max connections: {}", config.max_connections());
    println!("  Min connections: {}", config.min_connections());
    println!("  Connection timeout: {}s", config.connection_timeout());
    println!();

    println!("📝 Logging:");
    println!("  Level: {}", config.logging.level);
    println!("  Backtrace: {}", config.logging.backtrace);
    println!();

    let w = config.score_weights();
    println!("🧮 Scoring:");
    println!(
        "  Weights: google_volume={}, google_surge={}, naver_sum={}, naver_slope={}",
        w.google_volume, w.google_surge, w.naver_sum, w.naver_slope
    );
    println!("  Top-N: {}", config.top_n());
    println!("  Dominance threshold: {}%", config.dominance_threshold_pct());
    println!();

    println!("🔥 Engagement:");
    println!(
        "  Tiers: hot >= {}%, warm >= {}%, light >= {}%",
        config.engagement.hot, config.engagement.warm, config.engagement.light
    );
    println!("  Videos per keyword: {}", config.videos_per_keyword());
    println!();

    println!("📁 Paths:");
    println!("  Raw reports: {}", config.paths.raw_dir);
    println!("  Metric files: {}", config.paths.data_dir);
    println!("  Results: {}", config.paths.output_dir);
}

/// Mask database URL for logging (hide password)
#[must_use]
pub fn mask_database_url(url: &str) -> String {
    if let Ok(parsed) = url::Url::parse(url) {
        if let Some(host) = parsed.host_str() {
            format!(
                "{}://{}@{}:{}",
                parsed.scheme(),
                parsed.username(),
                host,
                parsed.port().unwrap_or(5432)
            )
        } else {
            "***masked***".to_string()
        }
    } else {
        "***invalid***".to_string()
    }
}

pub fn print_info(msg: &str) {
    println!("ℹ️  {msg}");
}

pub fn print_success(msg: &str) {
    println!("✅ {msg}");
}

pub fn print_warning(msg: &str) {
    println!("⚠️  {msg}");
}

pub fn print_error(msg: &str) {
    eprintln!("❌ {msg}");
}
