use std::sync::Arc;

use axum::{
    routing::{delete, get, post},
    Router,
};

use crate::features::reports::handlers;
use crate::features::reports::services::ReportService;

/// Report submission, listing and the resolve-then-delete workflow.
///
/// `/api/my-reports` expects the identity middleware to be applied by the caller.
pub fn routes(report_service: Arc<ReportService>) -> Router {
    Router::new()
        .route(
            "/api/reports",
            get(handlers::list_reports).post(handlers::submit_report),
        )
        .route("/api/my-reports", get(handlers::list_my_reports))
        .route("/api/reports/{id}/resolve", post(handlers::resolve_report))
        .route("/api/reports/{id}", delete(handlers::delete_report))
        .route("/api/admin-updates", get(handlers::list_admin_updates))
        .with_state(report_service)
}
