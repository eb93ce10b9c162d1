use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use utoipa::ToSchema;

// ============================================================================
// Washroom status
// ============================================================================

/// Derived condition of a location
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum WashroomState {
    /// No active reports in the status window
    Good,
    /// Active reports, none of them high priority
    Maintenance,
    /// At least one active high priority report
    Issue,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WashroomStatusDto {
    pub name: String,
    pub status: WashroomState,
    /// Human-readable age of the newest active report, e.g. "2 hours ago"
    pub last_updated: String,
}

// ============================================================================
// Heatmap
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct HeatmapEntryDto {
    pub location: String,
    pub category: String,
    pub count: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct LocationSummaryDto {
    pub total: u64,
    pub categories: BTreeMap<String, u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct HeatmapResponseDto {
    pub data: Vec<HeatmapEntryDto>,
    pub summary: BTreeMap<String, LocationSummaryDto>,
}
