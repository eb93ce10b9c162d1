/// Identity recorded when a report is submitted without a valid token
pub const ANONYMOUS_EMAIL: &str = "anonymous";

/// Status stored on newly submitted reports. Not authoritative: resolution
/// is tracked through the `admin_updates` collection.
pub const DEFAULT_REPORT_STATUS: &str = "pending";

/// Trailing window, in hours, within which an unresolved report affects status
pub const STATUS_WINDOW_HOURS: i64 = 24;

/// Location label used by the heatmap when a report has none
pub const UNKNOWN_LOCATION: &str = "Unknown";

/// Category label used by the heatmap when a report has none
pub const OTHER_CATEGORY: &str = "Other";
