use clap::Parser;
use tracing::info;
use trendrank::cli::handle_config_command;
use trendrank::cli::handle_init_command;
use trendrank::cli::handle_latest_command;
use trendrank::cli::handle_preprocess_command;
use trendrank::cli::handle_run_command;
use trendrank::cli::handle_runs_command;
use trendrank::cli::print_error;
use trendrank::cli::Cli;
use trendrank::cli::Commands;
use trendrank::cli::RunOptions;
use trendrank::database::Database;
use trendrank::AppConfig;
use trendrank::Result;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    if cli.verbose {
        trendrank::logging::init_logging_with_level("debug")?;
    } else {
        trendrank::logging::init_logging()?;
    }

    // Load configuration
    let config = AppConfig::load()?;
    info!("Configuration loaded successfully");

    let result = run_command(cli.command, &config).await;
    if let Err(e) = &result {
        print_error(&e.to_string());
        if e.is_schema_violation() {
            print_error("Run aborted without output; fix the input data and rerun.");
        }
    }
    result
}

async fn run_command(command: Commands, config: &AppConfig) -> Result<()> {
    match command {
        Commands::Preprocess {
            raw_dir,
            data_dir,
            categories,
        } => handle_preprocess_command(config, raw_dir, data_dir, &categories),
        Commands::Run {
            data_dir,
            news,
            videos,
            output_dir,
            top_n,
            categories,
            source_run,
            persist,
        } => {
            let options = RunOptions {
                data_dir,
                news,
                videos,
                output_dir,
                top_n,
                categories,
                source_run,
                persist,
            };
            handle_run_command(config, options).await
        }
        Commands::Init { force } => {
            let db = Database::from_config(config).await?;
            handle_init_command(&db, force).await
        }
        Commands::Runs { limit } => {
            let db = Database::from_config(config).await?;
            handle_runs_command(&db, limit).await
        }
        Commands::Latest { category } => {
            let db = Database::from_config(config).await?;
            handle_latest_command(&db, category).await
        }
        Commands::Config => handle_config_command(config),
    }
}
