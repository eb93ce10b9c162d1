//! Recency filter and status classification for a single location.
//!
//! The two halves read timestamps with opposite fallbacks. Inclusion fails
//! open: a report whose timestamp cannot be parsed counts as recent, so an
//! urgent report is never hidden by bad data. Ordering fails last: the same
//! report loses the "most recent" selection to any parsed timestamp.

use chrono::{DateTime, Duration, Utc};

use crate::features::analytics::dtos::WashroomState;
use crate::features::reports::models::{Report, ResolutionIndex};
use crate::shared::constants::STATUS_WINDOW_HOURS;
use crate::shared::timestamp::{normalize, NormalizedTime, ParseFallback};

const NO_RECENT_ISSUES: &str = "No recent issues";

/// Oldest instant still inside the status window
pub fn window_cutoff(now: DateTime<Utc>) -> DateTime<Utc> {
    now - Duration::hours(STATUS_WINDOW_HOURS)
}

/// Whether `report` counts against `location` at `cutoff`.
///
/// Requires a matching location, a timestamp field, and no resolution record.
/// The boundary itself is inside the window.
pub fn is_active(
    report: &Report,
    location: &str,
    index: &ResolutionIndex,
    cutoff: DateTime<Utc>,
) -> bool {
    if report.location.as_deref() != Some(location) || !report.has_timestamp() {
        return false;
    }
    if index.is_resolved(report) {
        return false;
    }

    normalize(report.timestamp.as_ref(), ParseFallback::AssumeRecent).is_at_or_after(cutoff)
}

/// Status and "last updated" phrase for the active reports of one location.
pub fn classify(active: &[&Report], now: DateTime<Utc>) -> (WashroomState, String) {
    if active.is_empty() {
        return (WashroomState::Good, NO_RECENT_ISSUES.to_string());
    }

    let state = if active.iter().any(|r| r.priority_level().is_high()) {
        WashroomState::Issue
    } else {
        WashroomState::Maintenance
    };

    let latest = active
        .iter()
        .map(|r| normalize(r.timestamp.as_ref(), ParseFallback::Earliest))
        .max()
        .unwrap_or(NormalizedTime::Earliest);

    let effective = latest.instant().unwrap_or(now);
    (state, elapsed_phrase(now - effective))
}

/// Render an elapsed duration, truncating to whole units. Negative durations
/// (timestamps in the future) read as "Just now".
pub fn elapsed_phrase(elapsed: Duration) -> String {
    let seconds = elapsed.num_seconds().max(0);

    if seconds < 3_600 {
        let minutes = seconds / 60;
        if minutes > 0 {
            format!("{} mins ago", minutes)
        } else {
            "Just now".to_string()
        }
    } else if seconds < 86_400 {
        let hours = seconds / 3_600;
        format!("{} hour{} ago", hours, if hours > 1 { "s" } else { "" })
    } else {
        let days = seconds / 86_400;
        format!("{} day{} ago", days, if days > 1 { "s" } else { "" })
    }
}
