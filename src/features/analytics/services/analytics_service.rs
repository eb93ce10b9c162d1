use chrono::{DateTime, Utc};
use std::sync::Arc;

use super::heatmap;
use super::status_classifier::{classify, is_active, window_cutoff};
use crate::core::error::Result;
use crate::features::analytics::dtos::{HeatmapResponseDto, WashroomStatusDto};
use crate::features::analytics::models::locations_for;
use crate::features::reports::models::{Report, ResolutionIndex, ResolutionRecord};
use crate::modules::storage::ReportStore;

/// Read-views derived from the full report and resolution collections.
/// Nothing is cached; every call reads both collections again.
pub struct AnalyticsService {
    store: Arc<dyn ReportStore>,
}

impl AnalyticsService {
    pub fn new(store: Arc<dyn ReportStore>) -> Self {
        Self { store }
    }

    /// Status of every discovered location, or of the catalog when no report
    /// names a location.
    pub async fn washroom_status(&self, now: DateTime<Utc>) -> Result<Vec<WashroomStatusDto>> {
        let (reports, resolutions) = self.load().await?;
        let index = ResolutionIndex::build(&resolutions);
        let cutoff = window_cutoff(now);

        tracing::debug!(
            "Classifying washroom status with {} resolved reports, cutoff {}",
            index.resolved_count(),
            cutoff
        );

        let statuses = locations_for(&reports)
            .into_iter()
            .map(|location| {
                let active: Vec<&Report> = reports
                    .iter()
                    .filter(|r| is_active(r, &location, &index, cutoff))
                    .collect();
                let (status, last_updated) = classify(&active, now);

                WashroomStatusDto {
                    name: location,
                    status,
                    last_updated,
                }
            })
            .collect();

        Ok(statuses)
    }

    pub async fn heatmap(&self) -> Result<HeatmapResponseDto> {
        let (reports, resolutions) = self.load().await?;
        let index = ResolutionIndex::build(&resolutions);
        let (data, summary) = heatmap::aggregate(&reports, &index);

        Ok(HeatmapResponseDto { data, summary })
    }

    async fn load(&self) -> Result<(Vec<Report>, Vec<ResolutionRecord>)> {
        let reports = self.store.list_reports().await?;
        let resolutions = self.store.list_resolutions().await?;

        tracing::debug!(
            "Loaded {} reports and {} resolution records",
            reports.len(),
            resolutions.len()
        );

        Ok((reports, resolutions))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::AppError;
    use crate::features::analytics::dtos::WashroomState;
    use crate::features::analytics::models::known_locations;
    use crate::modules::storage::InMemoryReportStore;
    use crate::shared::test_helpers::ReportBuilder;
    use chrono::Duration;

    const LOCATION: &str = "Restroom - Second Floor(210)";

    fn service(reports: Vec<Report>) -> (AnalyticsService, Arc<InMemoryReportStore>) {
        let store = Arc::new(InMemoryReportStore::with_reports(reports));
        (AnalyticsService::new(store.clone()), store)
    }

    fn status_of<'a>(statuses: &'a [WashroomStatusDto], name: &str) -> &'a WashroomStatusDto {
        statuses.iter().find(|s| s.name == name).unwrap()
    }

    #[tokio::test]
    async fn test_empty_store_reports_catalog_as_good() {
        let (service, _) = service(vec![]);
        let statuses = service.washroom_status(Utc::now()).await.unwrap();

        let names: Vec<String> = statuses.iter().map(|s| s.name.clone()).collect();
        assert_eq!(names, known_locations());
        for status in &statuses {
            assert_eq!(status.status, WashroomState::Good);
            assert_eq!(status.last_updated, "No recent issues");
        }
    }

    #[tokio::test]
    async fn test_fresh_high_priority_report_is_issue() {
        let now = Utc::now();
        let (service, _) = service(vec![ReportBuilder::new(LOCATION)
            .priority("HIGH")
            .at(now)
            .build()]);

        let statuses = service.washroom_status(now).await.unwrap();
        assert_eq!(statuses.len(), 1);
        assert_eq!(statuses[0].status, WashroomState::Issue);
        assert_eq!(statuses[0].last_updated, "Just now");
    }

    #[tokio::test]
    async fn test_low_priority_two_hours_old_is_maintenance() {
        let now = Utc::now();
        let (service, _) = service(vec![ReportBuilder::new(LOCATION)
            .priority("low")
            .at(now - Duration::hours(2))
            .build()]);

        let statuses = service.washroom_status(now).await.unwrap();
        assert_eq!(statuses[0].status, WashroomState::Maintenance);
        assert_eq!(statuses[0].last_updated, "2 hours ago");
    }

    #[tokio::test]
    async fn test_resolved_high_priority_report_is_good() {
        let now = Utc::now();
        let report = ReportBuilder::new(LOCATION).priority("HIGH").at(now).build();
        let (service, store) = service(vec![report.clone()]);
        store.seed_resolution(&report.id.to_string()).await;

        let statuses = service.washroom_status(now).await.unwrap();
        // the location is still discovered from the resolved report
        assert_eq!(statuses.len(), 1);
        assert_eq!(statuses[0].status, WashroomState::Good);
        assert_eq!(statuses[0].last_updated, "No recent issues");
    }

    #[tokio::test]
    async fn test_stale_reports_leave_location_good() {
        let now = Utc::now();
        let (service, _) = service(vec![
            ReportBuilder::new(LOCATION)
                .priority("HIGH")
                .at(now - Duration::hours(30))
                .build(),
            ReportBuilder::new("Lobby").at(now - Duration::minutes(5)).build(),
        ]);

        let statuses = service.washroom_status(now).await.unwrap();
        assert_eq!(status_of(&statuses, LOCATION).status, WashroomState::Good);

        let lobby = status_of(&statuses, "Lobby");
        assert_eq!(lobby.status, WashroomState::Maintenance);
        assert_eq!(lobby.last_updated, "5 mins ago");
    }

    #[tokio::test]
    async fn test_unparseable_timestamp_counts_as_active() {
        let now = Utc::now();
        let (service, _) = service(vec![ReportBuilder::new(LOCATION)
            .priority("HIGH PRIORITY")
            .raw_text("last tuesday")
            .build()]);

        let statuses = service.washroom_status(now).await.unwrap();
        assert_eq!(statuses[0].status, WashroomState::Issue);
        assert_eq!(statuses[0].last_updated, "Just now");
    }

    #[tokio::test]
    async fn test_heatmap_groups_trimmed_categories() {
        let (service, _) = service(vec![
            ReportBuilder::new(LOCATION).issue_type("Leak").build(),
            ReportBuilder::new(LOCATION).issue_type("leak ").build(),
            ReportBuilder::new(LOCATION).issue_type("Leak ").build(),
        ]);

        let heatmap = service.heatmap().await.unwrap();
        let summary = &heatmap.summary[LOCATION];
        assert_eq!(summary.total, 3);
        assert_eq!(summary.categories["Leak"], 2);
        assert_eq!(summary.categories["leak"], 1);
    }

    #[tokio::test]
    async fn test_heatmap_excludes_resolved() {
        let resolved = ReportBuilder::new(LOCATION).build();
        let (service, store) = service(vec![resolved.clone()]);
        store.seed_resolution(&resolved.id.to_string()).await;
        // orphaned record
        store.seed_resolution("no-such-report").await;

        let heatmap = service.heatmap().await.unwrap();
        assert!(heatmap.data.is_empty());
        assert!(heatmap.summary.is_empty());
    }

    #[tokio::test]
    async fn test_repeated_reads_are_identical() {
        let now = Utc::now();
        let (service, _) = service(vec![
            ReportBuilder::new("Lobby").issue_type("Odor").at(now).build(),
            ReportBuilder::new(LOCATION).priority("HIGH").at(now).build(),
            ReportBuilder::new("Cafeteria").at(now - Duration::hours(4)).build(),
        ]);

        assert_eq!(
            service.washroom_status(now).await.unwrap(),
            service.washroom_status(now).await.unwrap()
        );
        assert_eq!(service.heatmap().await.unwrap(), service.heatmap().await.unwrap());
    }

    #[tokio::test]
    async fn test_storage_failure_propagates() {
        let (service, store) = service(vec![]);
        store.set_unavailable(true);

        assert!(matches!(
            service.washroom_status(Utc::now()).await,
            Err(AppError::Storage(_))
        ));
        assert!(matches!(service.heatmap().await, Err(AppError::Storage(_))));
    }
}
