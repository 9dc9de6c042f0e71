use super::Database;
use crate::Result;
use crate::TrendRankError;

const REQUIRED_TABLES: [&str; 4] = [
    "collection_runs",
    "keyword_scores",
    "ocean_status",
    "keyword_engagement",
];

impl Database {
    /// Check if database schema is initialized
    /// Returns true if all required tables exist
    pub async fn is_schema_initialized(&self) -> Result<bool> {
        for table_name in REQUIRED_TABLES {
            let exists = sqlx::query_scalar::<_, bool>(
                r"
                SELECT EXISTS (
                    SELECT FROM information_schema.tables
                    WHERE table_schema = 'public'
                    AND table_name = $1
                )
                ",
            )
            .bind(table_name)
            .fetch_one(&self.pool)
            .await?;

            if !exists {
                tracing::debug!("Missing required table: {}", table_name);
                return Ok(false);
            }
        }

        Ok(true)
    }

    /// Verify database schema or return helpful error
    pub async fn verify_schema_or_error(&self) -> Result<()> {
        if !self.is_schema_initialized().await? {
            return Err(TrendRankError::Custom(
                "Database schema not initialized!\n\n\
                 Please run the following command to initialize the database:\n\n\
                 \x1b[1;32mtrendrank init\x1b[0m"
                    .to_string(),
            ));
        }
        Ok(())
    }

    /// Drop every trendrank table. Used by `init --force`.
    pub async fn drop_schema(&self) -> Result<()> {
        for table_name in REQUIRED_TABLES.iter().rev() {
            sqlx::query(&format!("DROP TABLE IF EXISTS {table_name} CASCADE"))
                .execute(&self.pool)
                .await?;
        }
        tracing::warn!("Dropped all trendrank tables");
        Ok(())
    }

    /// Initialize database schema
    pub async fn init_schema(&self) -> Result<()> {
        // One row per category per run; rows are never updated
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS collection_runs (
                run_id UUID NOT NULL,
                category VARCHAR(32) NOT NULL,
                base_date VARCHAR(32) NOT NULL DEFAULT '',
                keyword_count INTEGER NOT NULL,
                created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
                PRIMARY KEY (run_id, category)
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS keyword_scores (
                id BIGSERIAL PRIMARY KEY,
                run_id UUID NOT NULL,
                category VARCHAR(32) NOT NULL,
                rank INTEGER NOT NULL,
                keyword TEXT NOT NULL,
                total_score DOUBLE PRECISION NOT NULL,
                google_point DOUBLE PRECISION NOT NULL,
                naver_point DOUBLE PRECISION NOT NULL,
                google_ratio_pct DOUBLE PRECISION NOT NULL,
                naver_ratio_pct DOUBLE PRECISION NOT NULL,
                trend_type VARCHAR(32) NOT NULL,
                volume_score DOUBLE PRECISION NOT NULL,
                momentum_score DOUBLE PRECISION NOT NULL,
                positioning VARCHAR(32) NOT NULL,
                UNIQUE (run_id, category, keyword),
                FOREIGN KEY (run_id, category) REFERENCES collection_runs (run_id, category)
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS ocean_status (
                id BIGSERIAL PRIMARY KEY,
                run_id UUID NOT NULL,
                category VARCHAR(32) NOT NULL,
                keyword TEXT NOT NULL,
                total_score DOUBLE PRECISION NOT NULL,
                news_count BIGINT NOT NULL DEFAULT 0,
                ocean_status VARCHAR(32) NOT NULL,
                UNIQUE (run_id, category, keyword)
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS keyword_engagement (
                id BIGSERIAL PRIMARY KEY,
                run_id UUID NOT NULL,
                category VARCHAR(32) NOT NULL,
                keyword TEXT NOT NULL,
                avg_view_count DOUBLE PRECISION NOT NULL,
                avg_like_count DOUBLE PRECISION NOT NULL,
                avg_comment_count DOUBLE PRECISION NOT NULL,
                engagement_rate DOUBLE PRECISION NOT NULL,
                temperature_status VARCHAR(32) NOT NULL,
                UNIQUE (run_id, category, keyword)
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_collection_runs_category_created ON collection_runs (category, created_at DESC)",
        )
        .execute(&self.pool)
        .await?;
        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_keyword_scores_run ON keyword_scores (run_id, category, rank)",
        )
        .execute(&self.pool)
        .await?;

        tracing::info!("Database schema initialized");
        Ok(())
    }
}
