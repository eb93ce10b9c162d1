use chrono::{DateTime, Utc};
use std::cmp::Reverse;
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::features::auth::CallerIdentity;
use crate::features::reports::dtos::{ReportResponseDto, ResolutionResponseDto, SubmitReportDto};
use crate::features::reports::models::{
    NewReport, NewResolution, Report, ResolutionIndex, ResolutionRecord,
};
use crate::modules::storage::ReportStore;
use crate::shared::constants::DEFAULT_REPORT_STATUS;
use crate::shared::timestamp::{normalize, ParseFallback};

/// Service for report submission and the resolve-then-delete workflow
pub struct ReportService {
    store: Arc<dyn ReportStore>,
}

impl ReportService {
    pub fn new(store: Arc<dyn ReportStore>) -> Self {
        Self { store }
    }

    /// Validate and store a new report stamped at `now`
    pub async fn submit(
        &self,
        dto: &SubmitReportDto,
        caller: &CallerIdentity,
        now: DateTime<Utc>,
    ) -> Result<Report> {
        let fields = dto.required_fields()?;
        dto.validate().map_err(|e| AppError::Validation(e.to_string()))?;

        let report = self
            .store
            .insert_report(NewReport {
                issue_type: fields.issue_type,
                location: fields.location,
                priority: fields.priority,
                details: dto.details.clone().unwrap_or_default(),
                timestamp: now,
                user_email: caller.email_or_anonymous().to_string(),
                status: DEFAULT_REPORT_STATUS.to_string(),
            })
            .await?;

        tracing::info!(
            "Report {} submitted for location '{}' by {}",
            report.id,
            report.location.as_deref().unwrap_or_default(),
            report.user_email
        );

        Ok(report)
    }

    /// Every report, newest first
    pub async fn list_all(&self) -> Result<Vec<ReportResponseDto>> {
        let reports = self.store.list_reports().await?;
        self.to_response(reports).await
    }

    /// Reports submitted by `email`, newest first
    pub async fn list_for(&self, email: &str) -> Result<Vec<ReportResponseDto>> {
        let reports = self.store.list_reports_by_email(email).await?;
        self.to_response(reports).await
    }

    /// Record a resolution for the report. The report itself stays until it
    /// is explicitly deleted.
    pub async fn resolve(&self, id: Uuid, now: DateTime<Utc>) -> Result<ResolutionRecord> {
        let report = self
            .store
            .find_report(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Report not found".to_string()))?;

        let record = self
            .store
            .insert_resolution(NewResolution::for_report(&report, now))
            .await?;

        tracing::info!("Report {} resolved (record {})", report.id, record.id);
        Ok(record)
    }

    /// Delete a report that has already been resolved
    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let report = self
            .store
            .find_report(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Report not found".to_string()))?;

        let index = ResolutionIndex::build(&self.store.list_resolutions().await?);
        if !index.is_resolved(&report) {
            return Err(AppError::Conflict(
                "Report must be resolved before it can be deleted".to_string(),
            ));
        }

        if !self.store.delete_report(id).await? {
            return Err(AppError::NotFound("Report not found".to_string()));
        }

        tracing::info!("Report {} deleted", id);
        Ok(())
    }

    /// Every resolution record, newest first
    pub async fn list_resolutions(&self) -> Result<Vec<ResolutionResponseDto>> {
        let mut records = self.store.list_resolutions().await?;
        records.sort_by_key(|r| Reverse(r.timestamp));
        Ok(records.into_iter().map(ResolutionResponseDto::from).collect())
    }

    async fn to_response(&self, mut reports: Vec<Report>) -> Result<Vec<ReportResponseDto>> {
        let index = ResolutionIndex::build(&self.store.list_resolutions().await?);

        reports.sort_by_cached_key(|r| {
            Reverse(normalize(r.timestamp.as_ref(), ParseFallback::Earliest))
        });

        Ok(reports
            .into_iter()
            .map(|r| ReportResponseDto::from_report(r, &index))
            .collect())
    }
}
