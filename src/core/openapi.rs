use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::features::analytics::{dtos as analytics_dtos, handlers as analytics_handlers};
use crate::features::reports::{
    dtos as reports_dtos, handlers as reports_handlers, models as reports_models,
};
use crate::shared::types::{ErrorResponse, MessageResponse};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Reports
        reports_handlers::report_handler::submit_report,
        reports_handlers::report_handler::list_reports,
        reports_handlers::report_handler::list_my_reports,
        reports_handlers::report_handler::resolve_report,
        reports_handlers::report_handler::delete_report,
        reports_handlers::report_handler::list_admin_updates,
        // Analytics (public)
        analytics_handlers::analytics_handler::get_washroom_status,
        analytics_handlers::analytics_handler::get_heatmap,
    ),
    components(
        schemas(
            // Shared
            ErrorResponse,
            MessageResponse,
            // Reports
            reports_models::ReportLifecycle,
            reports_dtos::SubmitReportDto,
            reports_dtos::ReportResponseDto,
            reports_dtos::ResolutionResponseDto,
            // Analytics
            analytics_dtos::WashroomState,
            analytics_dtos::WashroomStatusDto,
            analytics_dtos::HeatmapEntryDto,
            analytics_dtos::LocationSummaryDto,
            analytics_dtos::HeatmapResponseDto,
        )
    ),
    tags(
        (name = "reports", description = "Issue reports and the resolve-then-delete workflow"),
        (name = "analytics", description = "Washroom status and heatmap read-views (public)"),
    ),
    modifiers(&SecurityAddon),
    info(
        title = "Washroom Watch API",
        version = "0.1.0",
        description = "API documentation for Washroom Watch",
    )
)]
pub struct ApiDoc;

/// Adds Bearer JWT security scheme to the OpenAPI document
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}
