//! CLI command definitions and argument parsing

use std::path::PathBuf;

use clap::Parser;
use clap::Subcommand;

use crate::models::Category;

#[derive(Parser)]
#[command(name = "trendrank")]
#[command(about = "Keyword trend scoring, ranking and classification")]
#[command(version)]
pub struct Cli {
    /// Enable verbose debug logging (default: info level)
    #[arg(short, long)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Convert raw collector reports into metric files
    Preprocess {
        /// Directory holding trend_report_<category>.json (default: paths.raw_dir)
        #[arg(long)]
        raw_dir: Option<PathBuf>,
        /// Directory to write preprocessed_<category>.json to (default: paths.data_dir)
        #[arg(long)]
        data_dir: Option<PathBuf>,
        /// Categories to process, comma separated (default: all)
        #[arg(short, long, value_delimiter = ',')]
        categories: Vec<Category>,
    },
    /// Score, rank and classify one run
    Run {
        /// Directory holding preprocessed_<category>.json (default: paths.data_dir)
        #[arg(long)]
        data_dir: Option<PathBuf>,
        /// News coverage JSON (flat records or the collector's grouped document)
        #[arg(long)]
        news: Option<PathBuf>,
        /// Video statistics JSON
        #[arg(long)]
        videos: Option<PathBuf>,
        /// Directory for the result tables (default: paths.output_dir)
        #[arg(short, long)]
        output_dir: Option<PathBuf>,
        /// Override the configured Top-N size
        #[arg(long)]
        top_n: Option<usize>,
        /// Categories to run, comma separated (default: all)
        #[arg(short, long, value_delimiter = ',')]
        categories: Vec<Category>,
        /// Only use videos collected under this collector run id
        #[arg(long)]
        source_run: Option<String>,
        /// Also store the run in PostgreSQL
        #[arg(long)]
        persist: bool,
    },
    /// Initialize database schema and indexes
    Init {
        /// Drop existing trendrank tables before creating them
        #[arg(short, long)]
        force: bool,
    },
    /// List recorded runs
    Runs {
        /// Maximum number of records to return
        #[arg(short, long, default_value = "20")]
        limit: i64,
    },
    /// Show the latest stored Top-N of a category
    Latest {
        /// Category code or Korean name
        category: Category,
    },
    /// Show current configuration
    Config,
}
