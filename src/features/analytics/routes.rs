use axum::{routing::get, Router};
use std::sync::Arc;

use crate::features::analytics::handlers;
use crate::features::analytics::services::AnalyticsService;

/// Create public analytics routes
pub fn routes(analytics_service: Arc<AnalyticsService>) -> Router {
    Router::new()
        .route("/api/washroom-status", get(handlers::get_washroom_status))
        .route("/api/heatmap", get(handlers::get_heatmap))
        .with_state(analytics_service)
}
