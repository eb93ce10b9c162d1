use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::core::error::AppError;
use crate::features::reports::models::{Report, ReportLifecycle, ResolutionIndex, ResolutionRecord};
use crate::shared::timestamp::{normalize, ParseFallback};

/// Request DTO for submitting a report
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubmitReportDto {
    #[validate(length(max = 100, message = "issueType must be at most 100 characters"))]
    pub issue_type: Option<String>,
    #[validate(length(max = 200, message = "location must be at most 200 characters"))]
    pub location: Option<String>,
    #[validate(length(max = 50, message = "priority must be at most 50 characters"))]
    pub priority: Option<String>,
    #[validate(length(max = 2000, message = "details must be at most 2000 characters"))]
    pub details: Option<String>,
}

/// Required fields of a submission, trimmed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequiredReportFields {
    pub issue_type: String,
    pub location: String,
    pub priority: String,
}

impl SubmitReportDto {
    /// Check required fields in order, reporting the first one that is
    /// missing or blank.
    pub fn required_fields(&self) -> Result<RequiredReportFields, AppError> {
        fn required(value: &Option<String>, name: &str) -> Result<String, AppError> {
            value
                .as_deref()
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_string)
                .ok_or_else(|| AppError::Validation(format!("{} is required", name)))
        }

        Ok(RequiredReportFields {
            issue_type: required(&self.issue_type, "issueType")?,
            location: required(&self.location, "location")?,
            priority: required(&self.priority, "priority")?,
        })
    }
}

/// Response DTO for a stored report
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReportResponseDto {
    pub id: Uuid,
    pub issue_type: Option<String>,
    pub location: Option<String>,
    pub priority: String,
    pub details: String,
    /// Normalized instant; null when absent or unparseable
    pub timestamp: Option<DateTime<Utc>>,
    pub user_email: String,
    pub status: String,
    pub lifecycle: ReportLifecycle,
}

impl ReportResponseDto {
    pub fn from_report(report: Report, index: &ResolutionIndex) -> Self {
        let lifecycle = index.lifecycle_of(&report);
        let timestamp = normalize(report.timestamp.as_ref(), ParseFallback::Earliest).instant();

        Self {
            id: report.id,
            issue_type: report.issue_type,
            location: report.location,
            priority: report.priority,
            details: report.details,
            timestamp,
            user_email: report.user_email,
            status: report.status,
            lifecycle,
        }
    }
}

/// Response DTO for a resolution record
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResolutionResponseDto {
    pub id: Uuid,
    pub report_id: String,
    pub issue_type: String,
    pub location: String,
    pub priority: String,
    pub timestamp: DateTime<Utc>,
}

impl From<ResolutionRecord> for ResolutionResponseDto {
    fn from(r: ResolutionRecord) -> Self {
        Self {
            id: r.id,
            report_id: r.report_id,
            issue_type: r.issue_type,
            location: r.location,
            priority: r.priority,
            timestamp: r.timestamp,
        }
    }
}
