use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::RwLock;
use uuid::Uuid;

use super::report_store::ReportStore;
use crate::core::error::{AppError, Result};
use crate::features::reports::models::{NewReport, NewResolution, Report, ResolutionRecord};
use crate::shared::timestamp::RawTimestamp;

/// In-memory store with the same contract as the PostgreSQL one.
#[derive(Default)]
pub struct InMemoryReportStore {
    reports: RwLock<Vec<Report>>,
    resolutions: RwLock<Vec<ResolutionRecord>>,
    unavailable: AtomicBool,
}

impl InMemoryReportStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_reports(reports: Vec<Report>) -> Self {
        Self {
            reports: RwLock::new(reports),
            ..Self::default()
        }
    }

    /// Seed a resolution record pointing at `report_id`
    pub async fn seed_resolution(&self, report_id: &str) {
        self.resolutions.write().await.push(ResolutionRecord {
            id: Uuid::now_v7(),
            report_id: report_id.to_string(),
            issue_type: String::new(),
            location: String::new(),
            priority: String::new(),
            timestamp: chrono::Utc::now(),
        });
    }

    /// Make every subsequent call fail as if the database were down
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    pub async fn report_count(&self) -> usize {
        self.reports.read().await.len()
    }

    pub async fn resolution_count(&self) -> usize {
        self.resolutions.read().await.len()
    }

    fn check_available(&self) -> Result<()> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(AppError::Storage("document store unavailable".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl ReportStore for InMemoryReportStore {
    async fn list_reports(&self) -> Result<Vec<Report>> {
        self.check_available()?;
        Ok(self.reports.read().await.clone())
    }

    async fn list_reports_by_email(&self, email: &str) -> Result<Vec<Report>> {
        self.check_available()?;
        Ok(self
            .reports
            .read()
            .await
            .iter()
            .filter(|r| r.user_email == email)
            .cloned()
            .collect())
    }

    async fn find_report(&self, id: Uuid) -> Result<Option<Report>> {
        self.check_available()?;
        Ok(self.reports.read().await.iter().find(|r| r.id == id).cloned())
    }

    async fn insert_report(&self, report: NewReport) -> Result<Report> {
        self.check_available()?;
        let stored = Report {
            id: Uuid::now_v7(),
            issue_type: Some(report.issue_type),
            location: Some(report.location),
            priority: report.priority,
            details: report.details,
            timestamp: Some(RawTimestamp::Native(report.timestamp)),
            user_email: report.user_email,
            status: report.status,
        };
        self.reports.write().await.push(stored.clone());
        Ok(stored)
    }

    async fn delete_report(&self, id: Uuid) -> Result<bool> {
        self.check_available()?;
        let mut reports = self.reports.write().await;
        let before = reports.len();
        reports.retain(|r| r.id != id);
        Ok(reports.len() < before)
    }

    async fn list_resolutions(&self) -> Result<Vec<ResolutionRecord>> {
        self.check_available()?;
        Ok(self.resolutions.read().await.clone())
    }

    async fn insert_resolution(&self, resolution: NewResolution) -> Result<ResolutionRecord> {
        self.check_available()?;
        let stored = ResolutionRecord {
            id: Uuid::now_v7(),
            report_id: resolution.report_id,
            issue_type: resolution.issue_type,
            location: resolution.location,
            priority: resolution.priority,
            timestamp: resolution.timestamp,
        };
        self.resolutions.write().await.push(stored.clone());
        Ok(stored)
    }
}
