mod report;
mod resolution;

pub use report::{NewReport, Report, ReportLifecycle};
pub use resolution::{NewResolution, ResolutionIndex, ResolutionRecord};
