use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::shared::timestamp::RawTimestamp;

/// Priority parsed from the free-text label stored on a report.
///
/// Labels are compared uppercased; anything outside the known set is
/// `Unrecognized` and treated like a non-critical report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Priority {
    High,
    Medium,
    Low,
    Unrecognized,
}

impl Priority {
    pub fn from_label(label: &str) -> Self {
        match label.to_uppercase().as_str() {
            "HIGH" | "HIGH PRIORITY" => Priority::High,
            "MEDIUM" | "MEDIUM PRIORITY" => Priority::Medium,
            "LOW" | "LOW PRIORITY" => Priority::Low,
            _ => Priority::Unrecognized,
        }
    }

    pub fn is_high(self) -> bool {
        self == Priority::High
    }
}

/// Where a report is in the resolve-then-delete workflow. A deleted report
/// no longer exists, so it has no variant here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ReportLifecycle {
    Active,
    ResolvedPendingDeletion,
}

/// Stored issue report
#[derive(Debug, Clone)]
pub struct Report {
    pub id: Uuid,
    /// Absent only on legacy imported documents
    pub issue_type: Option<String>,
    pub location: Option<String>,
    pub priority: String,
    pub details: String,
    pub timestamp: Option<RawTimestamp>,
    pub user_email: String,
    pub status: String,
}

impl Report {
    pub fn priority_level(&self) -> Priority {
        Priority::from_label(&self.priority)
    }

    /// Identifier in the string form used by resolution records
    pub fn id_string(&self) -> String {
        self.id.to_string()
    }

    /// Whether the report carries a usable timestamp field at all
    pub fn has_timestamp(&self) -> bool {
        self.timestamp.as_ref().is_some_and(RawTimestamp::is_present)
    }
}

/// Data for inserting a new report
#[derive(Debug, Clone)]
pub struct NewReport {
    pub issue_type: String,
    pub location: String,
    pub priority: String,
    pub details: String,
    pub timestamp: DateTime<Utc>,
    pub user_email: String,
    pub status: String,
}
