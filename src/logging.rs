//! Logging configuration for trendrank

use std::path::Path;

use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::fmt::{self};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::Registry;

use crate::Result;

const LOG_DIR: &str = "logs";
const LOG_FILE: &str = "trendrank.log";

/// Initialize logging system with file output
pub fn init_logging() -> Result<()> {
    init_logging_with_config(None)
}

/// Initialize logging with configuration
pub fn init_logging_with_config(config: Option<&crate::config::AppConfig>) -> Result<()> {
    let env_filter = if let Some(config) = config {
        let level = &config.logging.level;
        EnvFilter::new(format!("{level},trendrank={level}"))
    } else {
        // Fallback to environment variable or default
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,trendrank=debug"))
    };

    let level = config.map_or("info", |c| c.logging.level.as_str());
    init_registry(env_filter, level)
}

/// Initialize logging with custom log level
pub fn init_logging_with_level(level: &str) -> Result<()> {
    let env_filter = EnvFilter::new(format!("{level},trendrank={level}"));
    init_registry(env_filter, level)
}

fn init_registry(env_filter: EnvFilter, level: &str) -> Result<()> {
    let logs_dir = Path::new(LOG_DIR);
    if !logs_dir.exists() {
        std::fs::create_dir_all(logs_dir)?;
    }

    let file_appender = tracing_appender::rolling::daily(LOG_DIR, LOG_FILE);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let console_layer = fmt::layer()
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_writer(std::io::stderr);

    let file_layer = fmt::layer()
        .with_target(true)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_writer(non_blocking)
        .with_ansi(false); // No colors in file

    Registry::default()
        .with(env_filter)
        .with(console_layer)
        .with(file_layer)
        .init();

    tracing::info!("Logging initialized with level: {} - console and file output enabled", level);
    tracing::info!("Log files will be saved to: {}/{}.YYYY-MM-DD", LOG_DIR, LOG_FILE);

    // The guard flushes the file writer on drop; keep it for the process lifetime
    std::mem::forget(guard);

    Ok(())
}

/// Initialize simple logging for testing
pub fn init_simple_logging() -> Result<()> {
    let _ = tracing_subscriber::fmt()
        .with_target(true)
        .with_line_number(true)
        .with_max_level(tracing::Level::INFO)
        .with_test_writer()
        .try_init();

    Ok(())
}
