use trendrank::cli::mask_database_url;
use trendrank::database::Database;
use trendrank::AppConfig;
use trendrank::Result;

#[tokio::main]
async fn main() -> Result<()> {
    trendrank::logging::init_logging()?;

    // Load configuration from config.toml
    let config = AppConfig::load()?;

    println!("🔄 Running database migrations...");
    println!("📋 Database URL: {}", mask_database_url(config.database_url()));

    let db = Database::from_config(&config).await?;

    // Initialize database schema
    db.init_schema().await?;
    println!("✅ Database migrations completed successfully!");

    Ok(())
}
