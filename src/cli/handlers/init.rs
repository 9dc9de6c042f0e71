//! Database initialization and run history handlers

use crate::cli::output::print_info;
use crate::cli::output::print_run_list;
use crate::cli::output::print_stored_ranking;
use crate::cli::output::print_success;
use crate::cli::output::print_warning;
use crate::database::Database;
use crate::models::Category;
use crate::Result;

/// Handle database initialization command
pub async fn handle_init_command(db: &Database, force: bool) -> Result<()> {
    if force {
        print_warning("Dropping existing trendrank tables (--force)");
        db.drop_schema().await?;
    } else if db.is_schema_initialized().await? {
        print_info("Schema already present, ensuring tables and indexes exist");
    }

    print_info("🗄️  Initializing trendrank database...");
    db.init_schema().await?;
    print_success("Database initialization complete!");
    Ok(())
}

/// Handle runs listing command
pub async fn handle_runs_command(db: &Database, limit: i64) -> Result<()> {
    db.verify_schema_or_error().await?;
    let runs = db.list_runs(limit.max(1)).await?;
    print_run_list(&runs);
    Ok(())
}

/// Handle latest ranking command
pub async fn handle_latest_command(db: &Database, category: Category) -> Result<()> {
    db.verify_schema_or_error().await?;
    let rows = db.latest_ranking(category).await?;
    print_stored_ranking(&rows);
    Ok(())
}
