//! Preprocessing and scoring run handlers

use std::path::PathBuf;

use tracing::info;

use crate::cli::output::print_category_report;
use crate::cli::output::print_info;
use crate::cli::output::print_run_summary;
use crate::cli::output::print_success;
use crate::cli::output::print_warning;
use crate::database::Database;
use crate::models::Category;
use crate::pipeline::load_inputs;
use crate::pipeline::write_outputs;
use crate::pipeline::TrendPipeline;
use crate::preprocess::preprocess_dir;
use crate::AppConfig;
use crate::Result;

/// Options of the `run` command, resolved against the configuration
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    pub data_dir: Option<PathBuf>,
    pub news: Option<PathBuf>,
    pub videos: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
    pub top_n: Option<usize>,
    pub categories: Vec<Category>,
    pub source_run: Option<String>,
    pub persist: bool,
}

fn resolve_categories(categories: &[Category]) -> Vec<Category> {
    if categories.is_empty() {
        Category::ALL.to_vec()
    } else {
        categories.to_vec()
    }
}

/// Handle preprocess command
pub fn handle_preprocess_command(
    config: &AppConfig,
    raw_dir: Option<PathBuf>,
    data_dir: Option<PathBuf>,
    categories: &[Category],
) -> Result<()> {
    let raw_dir = raw_dir.unwrap_or_else(|| PathBuf::from(&config.paths.raw_dir));
    let data_dir = data_dir.unwrap_or_else(|| PathBuf::from(&config.paths.data_dir));
    let categories = resolve_categories(categories);

    print_info(&format!(
        "🧹 Preprocessing {} categories from {}",
        categories.len(),
        raw_dir.display()
    ));
    let written = preprocess_dir(&raw_dir, &data_dir, &categories)?;

    if written.len() < categories.len() {
        print_warning(&format!(
            "{} of {} raw reports were missing",
            categories.len() - written.len(),
            categories.len()
        ));
    }
    for path in &written {
        print_success(&format!("Wrote {}", path.display()));
    }
    Ok(())
}

/// Handle run command
pub async fn handle_run_command(config: &AppConfig, options: RunOptions) -> Result<()> {
    let data_dir = options
        .data_dir
        .unwrap_or_else(|| PathBuf::from(&config.paths.data_dir));
    let output_dir = options
        .output_dir
        .unwrap_or_else(|| PathBuf::from(&config.paths.output_dir));
    let categories = resolve_categories(&options.categories);

    let mut inputs = load_inputs(
        &data_dir,
        &categories,
        options.news.as_deref(),
        options.videos.as_deref(),
    )?;
    inputs.source_run = options.source_run;

    let mut pipeline = TrendPipeline::new(config);
    if let Some(top_n) = options.top_n {
        pipeline = pipeline.with_top_n(top_n)?;
    }

    print_info(&format!(
        "🧮 Ranking Top-{} of {} categories",
        pipeline.top_n(),
        categories.len()
    ));
    let output = pipeline.run(&inputs)?;

    for report in &output.categories {
        print_category_report(report);
    }
    print_run_summary(&output);

    let written = write_outputs(&output, &output_dir)?;
    print_success(&format!(
        "Wrote {} result files to {}",
        written.len(),
        output_dir.display()
    ));

    if options.persist {
        let db = Database::from_config(config).await?;
        db.verify_schema_or_error().await?;
        db.persist_run(&output).await?;
        info!("Run {} stored", output.run_id);
        print_success(&format!("Stored run {}", output.run_id));
    }

    Ok(())
}
