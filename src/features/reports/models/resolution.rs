use chrono::{DateTime, Utc};
use sqlx::FromRow;
use std::collections::HashSet;
use uuid::Uuid;

use super::report::{Report, ReportLifecycle};

/// Record written when an administrator resolves a report.
///
/// `report_id` is the string form of the report id. Nothing enforces that
/// the report still exists, and a report may be resolved more than once.
#[derive(Debug, Clone, FromRow)]
pub struct ResolutionRecord {
    pub id: Uuid,
    pub report_id: String,
    pub issue_type: String,
    pub location: String,
    pub priority: String,
    pub timestamp: DateTime<Utc>,
}

/// Data for inserting a resolution record
#[derive(Debug, Clone)]
pub struct NewResolution {
    pub report_id: String,
    pub issue_type: String,
    pub location: String,
    pub priority: String,
    pub timestamp: DateTime<Utc>,
}

impl NewResolution {
    /// Denormalized copy of the report's fields, stamped at `resolved_at`
    pub fn for_report(report: &Report, resolved_at: DateTime<Utc>) -> Self {
        Self {
            report_id: report.id_string(),
            issue_type: report.issue_type.clone().unwrap_or_default(),
            location: report.location.clone().unwrap_or_default(),
            priority: report.priority.clone(),
            timestamp: resolved_at,
        }
    }
}

/// Set of report ids that have at least one resolution record.
#[derive(Debug, Clone, Default)]
pub struct ResolutionIndex {
    resolved: HashSet<String>,
}

impl ResolutionIndex {
    pub fn build(records: &[ResolutionRecord]) -> Self {
        let resolved = records
            .iter()
            .filter(|r| !r.report_id.is_empty())
            .map(|r| r.report_id.clone())
            .collect();
        Self { resolved }
    }

    pub fn contains(&self, report_id: &str) -> bool {
        self.resolved.contains(report_id)
    }

    pub fn is_resolved(&self, report: &Report) -> bool {
        self.contains(&report.id_string())
    }

    pub fn lifecycle_of(&self, report: &Report) -> ReportLifecycle {
        if self.is_resolved(report) {
            ReportLifecycle::ResolvedPendingDeletion
        } else {
            ReportLifecycle::Active
        }
    }

    pub fn resolved_count(&self) -> usize {
        self.resolved.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(report_id: &str) -> ResolutionRecord {
        ResolutionRecord {
            id: Uuid::now_v7(),
            report_id: report_id.to_string(),
            issue_type: "Leak".to_string(),
            location: "Restroom - First Floor(110)".to_string(),
            priority: "HIGH".to_string(),
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn test_index_skips_empty_ids_and_collapses_duplicates() {
        let index = ResolutionIndex::build(&[record("a"), record(""), record("a"), record("b")]);
        assert_eq!(index.resolved_count(), 2);
        assert!(index.contains("a"));
        assert!(index.contains("b"));
        assert!(!index.contains(""));
    }

    #[test]
    fn test_orphaned_records_are_tolerated() {
        let index = ResolutionIndex::build(&[record("no-such-report")]);
        assert!(index.contains("no-such-report"));
        assert!(!index.contains(&Uuid::now_v7().to_string()));
    }
}
