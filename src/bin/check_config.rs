use trendrank::cli::mask_database_url;
use trendrank::AppConfig;
use trendrank::Result;

fn main() -> Result<()> {
    println!("🔍 Checking configuration...");

    match AppConfig::load() {
        Ok(config) => {
            println!("✅ Configuration loaded successfully!");
            println!("📋 Configuration details:");
            println!("  Database URL: {}", mask_database_url(config.database_url()));
            println!("  Max connections: {}", config.max_connections());
            println!("  Min connections: {}", config.min_connections());
            println!("  Connection timeout: {}s", config.connection_timeout());

            let w = config.score_weights();
            println!(
                "  Score weights: {} / {} / {} / {} (sum {})",
                w.google_volume,
                w.google_surge,
                w.naver_sum,
                w.naver_slope,
                w.sum()
            );
            println!("  Top-N: {}", config.top_n());
            println!("  Dominance threshold: {}%", config.dominance_threshold_pct());
            println!("  Videos per keyword: {}", config.videos_per_keyword());

            println!("\n🎉 Configuration check completed successfully!");
        }
        Err(e) => {
            println!("❌ Configuration error: {e}");
            println!("\n💡 To fix this:");
            println!("  1. Copy config.example.toml to config.toml");
            println!("  2. Edit config.toml with your database connection and scoring settings");
            println!("  3. Run this check again");
            return Err(e);
        }
    }

    Ok(())
}
