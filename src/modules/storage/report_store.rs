use async_trait::async_trait;
use uuid::Uuid;

use crate::core::error::Result;
use crate::features::reports::models::{NewReport, NewResolution, Report, ResolutionRecord};

/// Document store holding the `reports` and `admin_updates` collections.
///
/// Implementations are shared across requests behind an `Arc`; every call
/// is an independent read or write with no cross-call transaction.
#[async_trait]
pub trait ReportStore: Send + Sync {
    async fn list_reports(&self) -> Result<Vec<Report>>;

    async fn list_reports_by_email(&self, email: &str) -> Result<Vec<Report>>;

    async fn find_report(&self, id: Uuid) -> Result<Option<Report>>;

    async fn insert_report(&self, report: NewReport) -> Result<Report>;

    /// Returns `false` when no report had that id
    async fn delete_report(&self, id: Uuid) -> Result<bool>;

    async fn list_resolutions(&self) -> Result<Vec<ResolutionRecord>>;

    async fn insert_resolution(&self, resolution: NewResolution) -> Result<ResolutionRecord>;
}
