use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use sqlx::PgConnection;
use uuid::Uuid;

use super::runs::insert_run_row;
use super::Database;
use crate::models::Category;
use crate::models::CategoryReport;
use crate::models::EngagementEntry;
use crate::models::OceanEntry;
use crate::pipeline::RunOutput;
use crate::Result;

/// A ranked row read back from `keyword_scores`.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct StoredRanking {
    pub run_id: Uuid,
    pub category: String,
    pub rank: i32,
    pub keyword: String,
    pub total_score: f64,
    pub google_ratio_pct: f64,
    pub naver_ratio_pct: f64,
    pub trend_type: String,
    pub positioning: String,
    pub created_at: DateTime<Utc>,
}

async fn insert_score_rows(
    conn: &mut PgConnection,
    run_id: Uuid,
    report: &CategoryReport,
) -> Result<()> {
    for entry in &report.entries {
        sqlx::query(
            r"
            INSERT INTO keyword_scores (
                run_id, category, rank, keyword, total_score, google_point, naver_point,
                google_ratio_pct, naver_ratio_pct, trend_type, volume_score, momentum_score,
                positioning
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            ",
        )
        .bind(run_id)
        .bind(report.category.code())
        .bind(entry.rank as i32)
        .bind(&entry.keyword)
        .bind(entry.total_score)
        .bind(entry.google_point)
        .bind(entry.naver_point)
        .bind(entry.google_ratio_pct)
        .bind(entry.naver_ratio_pct)
        .bind(entry.trend_type.id())
        .bind(entry.volume_score)
        .bind(entry.momentum_score)
        .bind(entry.positioning.id())
        .execute(&mut *conn)
        .await?;
    }
    Ok(())
}

async fn insert_ocean_rows(conn: &mut PgConnection, run_id: Uuid, entries: &[OceanEntry]) -> Result<()> {
    for entry in entries {
        sqlx::query(
            r"
            INSERT INTO ocean_status (run_id, category, keyword, total_score, news_count, ocean_status)
            VALUES ($1, $2, $3, $4, $5, $6)
            ",
        )
        .bind(run_id)
        .bind(entry.category.code())
        .bind(&entry.keyword)
        .bind(entry.total_score)
        .bind(i64::try_from(entry.news_count).unwrap_or(i64::MAX))
        .bind(entry.ocean_status.id())
        .execute(&mut *conn)
        .await?;
    }
    Ok(())
}

async fn insert_engagement_rows(
    conn: &mut PgConnection,
    run_id: Uuid,
    entries: &[EngagementEntry],
) -> Result<()> {
    for entry in entries {
        sqlx::query(
            r"
            INSERT INTO keyword_engagement (
                run_id, category, keyword, avg_view_count, avg_like_count, avg_comment_count,
                engagement_rate, temperature_status
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ",
        )
        .bind(run_id)
        .bind(entry.category.code())
        .bind(&entry.keyword)
        .bind(entry.avg_view_count)
        .bind(entry.avg_like_count)
        .bind(entry.avg_comment_count)
        .bind(entry.engagement_rate)
        .bind(entry.temperature_status.id())
        .execute(&mut *conn)
        .await?;
    }
    Ok(())
}

impl Database {
    /// Store the Top-N table of one category. The run must already be recorded.
    pub async fn insert_category_report(&self, run_id: Uuid, report: &CategoryReport) -> Result<()> {
        let mut conn = self.pool.acquire().await?;
        insert_score_rows(&mut *conn, run_id, report).await
    }

    pub async fn insert_ocean_entries(&self, run_id: Uuid, entries: &[OceanEntry]) -> Result<()> {
        let mut conn = self.pool.acquire().await?;
        insert_ocean_rows(&mut *conn, run_id, entries).await
    }

    pub async fn insert_engagement_entries(
        &self,
        run_id: Uuid,
        entries: &[EngagementEntry],
    ) -> Result<()> {
        let mut conn = self.pool.acquire().await?;
        insert_engagement_rows(&mut *conn, run_id, entries).await
    }

    /// Store a whole run atomically: either every table is written or none.
    pub async fn persist_run(&self, output: &RunOutput) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        for report in &output.categories {
            insert_run_row(&mut *tx, output.run_id, report, output.created_at).await?;
            insert_score_rows(&mut *tx, output.run_id, report).await?;
        }
        insert_ocean_rows(&mut *tx, output.run_id, &output.ocean).await?;
        insert_engagement_rows(&mut *tx, output.run_id, &output.engagement).await?;

        tx.commit().await?;

        tracing::info!(
            "Persisted run {} - categories={}, ocean_rows={}, engagement_rows={}",
            output.run_id,
            output.categories.len(),
            output.ocean.len(),
            output.engagement.len()
        );
        Ok(())
    }

    /// Top-N table of the most recent run that covered `category`.
    pub async fn latest_ranking(&self, category: Category) -> Result<Vec<StoredRanking>> {
        let rows = sqlx::query_as::<_, StoredRanking>(
            r"
            SELECT s.run_id, s.category, s.rank, s.keyword, s.total_score,
                   s.google_ratio_pct, s.naver_ratio_pct, s.trend_type, s.positioning,
                   r.created_at
            FROM keyword_scores s
            JOIN collection_runs r ON r.run_id = s.run_id AND r.category = s.category
            WHERE s.category = $1
              AND s.run_id = (
                  SELECT run_id FROM collection_runs
                  WHERE category = $1
                  ORDER BY created_at DESC
                  LIMIT 1
              )
            ORDER BY s.rank ASC
            ",
        )
        .bind(category.code())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }
}
