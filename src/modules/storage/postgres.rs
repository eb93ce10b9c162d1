use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use super::report_store::ReportStore;
use crate::core::error::{AppError, Result};
use crate::features::reports::models::{NewReport, NewResolution, Report, ResolutionRecord};
use crate::shared::timestamp::RawTimestamp;

const REPORT_COLUMNS: &str = r#"
    id, issue_type, location, priority, details,
    timestamp_at, timestamp_raw, user_email, status
"#;

const RESOLUTION_COLUMNS: &str = "id, report_id, issue_type, location, priority, timestamp";

/// Row shape of the `reports` table
#[derive(Debug, FromRow)]
struct ReportRow {
    id: Uuid,
    issue_type: Option<String>,
    location: Option<String>,
    priority: String,
    details: String,
    timestamp_at: Option<DateTime<Utc>>,
    timestamp_raw: Option<serde_json::Value>,
    user_email: String,
    status: String,
}

impl From<ReportRow> for Report {
    fn from(row: ReportRow) -> Self {
        // Native column wins; the JSON column only holds legacy imports
        let timestamp = match row.timestamp_at {
            Some(t) => Some(RawTimestamp::Native(t)),
            None => row.timestamp_raw.and_then(RawTimestamp::from_json),
        };

        Self {
            id: row.id,
            issue_type: row.issue_type,
            location: row.location,
            priority: row.priority,
            details: row.details,
            timestamp,
            user_email: row.user_email,
            status: row.status,
        }
    }
}

/// PostgreSQL-backed report store
pub struct PgReportStore {
    pool: PgPool,
}

impl PgReportStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn db_error(operation: &'static str) -> impl FnOnce(sqlx::Error) -> AppError {
    move |e| {
        tracing::error!("Failed to {}: {:?}", operation, e);
        AppError::Database(e)
    }
}

#[async_trait]
impl ReportStore for PgReportStore {
    async fn list_reports(&self) -> Result<Vec<Report>> {
        let rows = sqlx::query_as::<_, ReportRow>(&format!(
            "SELECT {} FROM reports",
            REPORT_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("list reports"))?;

        Ok(rows.into_iter().map(Report::from).collect())
    }

    async fn list_reports_by_email(&self, email: &str) -> Result<Vec<Report>> {
        let rows = sqlx::query_as::<_, ReportRow>(&format!(
            "SELECT {} FROM reports WHERE user_email = $1",
            REPORT_COLUMNS
        ))
        .bind(email)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("list reports by email"))?;

        Ok(rows.into_iter().map(Report::from).collect())
    }

    async fn find_report(&self, id: Uuid) -> Result<Option<Report>> {
        let row = sqlx::query_as::<_, ReportRow>(&format!(
            "SELECT {} FROM reports WHERE id = $1",
            REPORT_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("find report"))?;

        Ok(row.map(Report::from))
    }

    async fn insert_report(&self, report: NewReport) -> Result<Report> {
        let row = sqlx::query_as::<_, ReportRow>(&format!(
            r#"
            INSERT INTO reports
                (id, issue_type, location, priority, details, timestamp_at, user_email, status)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {}
            "#,
            REPORT_COLUMNS
        ))
        .bind(Uuid::now_v7())
        .bind(&report.issue_type)
        .bind(&report.location)
        .bind(&report.priority)
        .bind(&report.details)
        .bind(report.timestamp)
        .bind(&report.user_email)
        .bind(&report.status)
        .fetch_one(&self.pool)
        .await
        .map_err(db_error("insert report"))?;

        Ok(row.into())
    }

    async fn delete_report(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM reports WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(db_error("delete report"))?;

        Ok(result.rows_affected() == 1)
    }

    async fn list_resolutions(&self) -> Result<Vec<ResolutionRecord>> {
        sqlx::query_as::<_, ResolutionRecord>(&format!(
            "SELECT {} FROM admin_updates",
            RESOLUTION_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("list resolution records"))
    }

    async fn insert_resolution(&self, resolution: NewResolution) -> Result<ResolutionRecord> {
        sqlx::query_as::<_, ResolutionRecord>(&format!(
            r#"
            INSERT INTO admin_updates (id, report_id, issue_type, location, priority, timestamp)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {}
            "#,
            RESOLUTION_COLUMNS
        ))
        .bind(Uuid::now_v7())
        .bind(&resolution.report_id)
        .bind(&resolution.issue_type)
        .bind(&resolution.location)
        .bind(&resolution.priority)
        .bind(resolution.timestamp)
        .fetch_one(&self.pool)
        .await
        .map_err(db_error("insert resolution record"))
    }
}
