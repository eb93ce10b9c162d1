use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::core::extractor::{AppJson, RequireCaller};
use crate::features::auth::CallerIdentity;
use crate::features::reports::dtos::{ReportResponseDto, ResolutionResponseDto, SubmitReportDto};
use crate::features::reports::services::ReportService;
use crate::shared::types::{ErrorResponse, MessageResponse};

/// Ids that are not UUIDs cannot name a stored report
fn parse_report_id(raw: &str) -> Result<Uuid> {
    Uuid::parse_str(raw).map_err(|_| AppError::NotFound("Report not found".to_string()))
}

/// Submit a new report (authentication optional)
#[utoipa::path(
    post,
    path = "/api/reports",
    request_body = SubmitReportDto,
    responses(
        (status = 201, description = "Report stored", body = MessageResponse),
        (status = 400, description = "Missing or invalid field", body = ErrorResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    ),
    tag = "reports"
)]
pub async fn submit_report(
    caller: CallerIdentity,
    State(service): State<Arc<ReportService>>,
    AppJson(dto): AppJson<Option<SubmitReportDto>>,
) -> Result<(StatusCode, Json<MessageResponse>)> {
    let dto = dto.ok_or_else(|| AppError::BadRequest("Request body is required".to_string()))?;
    let report = service.submit(&dto, &caller, Utc::now()).await?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("Report submitted successfully!").with_id(report.id)),
    ))
}

/// List every report, newest first
#[utoipa::path(
    get,
    path = "/api/reports",
    responses(
        (status = 200, description = "All reports", body = Vec<ReportResponseDto>),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    ),
    tag = "reports"
)]
pub async fn list_reports(
    State(service): State<Arc<ReportService>>,
) -> Result<Json<Vec<ReportResponseDto>>> {
    Ok(Json(service.list_all().await?))
}

/// List the caller's own reports
#[utoipa::path(
    get,
    path = "/api/my-reports",
    responses(
        (status = 200, description = "Caller's reports", body = Vec<ReportResponseDto>),
        (status = 401, description = "No valid bearer token", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "reports"
)]
pub async fn list_my_reports(
    RequireCaller(caller): RequireCaller,
    State(service): State<Arc<ReportService>>,
) -> Result<Json<Vec<ReportResponseDto>>> {
    Ok(Json(service.list_for(caller.email_or_anonymous()).await?))
}

/// Resolve a report; it remains stored until deleted
#[utoipa::path(
    post,
    path = "/api/reports/{id}/resolve",
    params(
        ("id" = String, Path, description = "Report ID")
    ),
    responses(
        (status = 200, description = "Resolution recorded", body = MessageResponse),
        (status = 404, description = "Report not found", body = ErrorResponse)
    ),
    tag = "reports"
)]
pub async fn resolve_report(
    State(service): State<Arc<ReportService>>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>> {
    let id = parse_report_id(&id)?;
    let record = service.resolve(id, Utc::now()).await?;

    Ok(Json(
        MessageResponse::new("Report moved to admin updates for user confirmation")
            .with_id(record.id),
    ))
}

/// Delete a resolved report
#[utoipa::path(
    delete,
    path = "/api/reports/{id}",
    params(
        ("id" = String, Path, description = "Report ID")
    ),
    responses(
        (status = 200, description = "Report deleted", body = MessageResponse),
        (status = 404, description = "Report not found", body = ErrorResponse),
        (status = 409, description = "Report has not been resolved", body = ErrorResponse)
    ),
    tag = "reports"
)]
pub async fn delete_report(
    State(service): State<Arc<ReportService>>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>> {
    let id = parse_report_id(&id)?;
    service.delete(id).await?;
    Ok(Json(MessageResponse::new("Report deleted successfully")))
}

/// List resolution records, newest first
#[utoipa::path(
    get,
    path = "/api/admin-updates",
    responses(
        (status = 200, description = "Resolution records", body = Vec<ResolutionResponseDto>),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    ),
    tag = "reports"
)]
pub async fn list_admin_updates(
    State(service): State<Arc<ReportService>>,
) -> Result<Json<Vec<ResolutionResponseDto>>> {
    Ok(Json(service.list_resolutions().await?))
}
