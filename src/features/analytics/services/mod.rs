mod analytics_service;
pub mod heatmap;
pub mod status_classifier;

pub use analytics_service::AnalyticsService;
