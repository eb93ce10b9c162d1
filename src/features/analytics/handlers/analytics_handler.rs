use axum::{extract::State, Json};
use chrono::Utc;
use std::sync::Arc;

use crate::core::error::AppError;
use crate::features::analytics::dtos::*;
use crate::features::analytics::services::AnalyticsService;
use crate::shared::types::ErrorResponse;

/// Current status of every washroom
#[utoipa::path(
    get,
    path = "/api/washroom-status",
    tag = "analytics",
    responses(
        (status = 200, description = "Status per location", body = Vec<WashroomStatusDto>),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    )
)]
pub async fn get_washroom_status(
    State(service): State<Arc<AnalyticsService>>,
) -> Result<Json<Vec<WashroomStatusDto>>, AppError> {
    let statuses = service.washroom_status(Utc::now()).await?;
    Ok(Json(statuses))
}

/// Unresolved report counts by location and category
#[utoipa::path(
    get,
    path = "/api/heatmap",
    tag = "analytics",
    responses(
        (status = 200, description = "Heatmap entries and per-location summary", body = HeatmapResponseDto),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    )
)]
pub async fn get_heatmap(
    State(service): State<Arc<AnalyticsService>>,
) -> Result<Json<HeatmapResponseDto>, AppError> {
    let heatmap = service.heatmap().await?;
    Ok(Json(heatmap))
}
