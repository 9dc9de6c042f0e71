use chrono::DateTime;
use chrono::Utc;
use sqlx::PgConnection;
use uuid::Uuid;

use super::Database;
use crate::models::CategoryReport;
use crate::models::CollectionRun;
use crate::Result;

pub(super) async fn insert_run_row(
    conn: &mut PgConnection,
    run_id: Uuid,
    report: &CategoryReport,
    created_at: DateTime<Utc>,
) -> Result<()> {
    sqlx::query(
        r"
        INSERT INTO collection_runs (run_id, category, base_date, keyword_count, created_at)
        VALUES ($1, $2, $3, $4, $5)
        ",
    )
    .bind(run_id)
    .bind(report.category.code())
    .bind(&report.base_date)
    .bind(report.cohort_size as i32)
    .bind(created_at)
    .execute(&mut *conn)
    .await?;

    Ok(())
}

impl Database {
    /// Register one category of a run. Fails if the pair was already recorded.
    pub async fn record_run(
        &self,
        run_id: Uuid,
        report: &CategoryReport,
        created_at: DateTime<Utc>,
    ) -> Result<()> {
        let mut conn = self.pool.acquire().await?;
        insert_run_row(&mut *conn, run_id, report, created_at).await
    }

    /// Most recent runs first
    pub async fn list_runs(&self, limit: i64) -> Result<Vec<CollectionRun>> {
        let runs = sqlx::query_as::<_, CollectionRun>(
            r"
            SELECT run_id, category, base_date, keyword_count, created_at
            FROM collection_runs
            ORDER BY created_at DESC, category ASC
            LIMIT $1
            ",
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(runs)
    }
}
