use std::collections::BTreeMap;

use crate::features::analytics::dtos::{HeatmapEntryDto, LocationSummaryDto};
use crate::features::reports::models::{Report, ResolutionIndex};
use crate::shared::constants::{OTHER_CATEGORY, UNKNOWN_LOCATION};

/// Count unresolved reports by location and trimmed category. Age does not
/// matter here.
///
/// Returns the flat entries and the per-location rollup, both ordered by
/// location then category.
pub fn aggregate(
    reports: &[Report],
    index: &ResolutionIndex,
) -> (Vec<HeatmapEntryDto>, BTreeMap<String, LocationSummaryDto>) {
    let mut counts: BTreeMap<&str, BTreeMap<&str, u64>> = BTreeMap::new();

    for report in reports.iter().filter(|r| !index.is_resolved(r)) {
        let location = report.location.as_deref().unwrap_or(UNKNOWN_LOCATION);
        let category = report
            .issue_type
            .as_deref()
            .map(str::trim)
            .unwrap_or(OTHER_CATEGORY);

        *counts
            .entry(location)
            .or_default()
            .entry(category)
            .or_default() += 1;
    }

    let entries = counts
        .iter()
        .flat_map(|(location, categories)| {
            categories.iter().map(|(category, count)| HeatmapEntryDto {
                location: location.to_string(),
                category: category.to_string(),
                count: *count,
            })
        })
        .collect();

    let summary = counts
        .into_iter()
        .map(|(location, categories)| {
            let summary = LocationSummaryDto {
                total: categories.values().sum(),
                categories: categories
                    .into_iter()
                    .map(|(category, count)| (category.to_string(), count))
                    .collect(),
            };
            (location.to_string(), summary)
        })
        .collect();

    (entries, summary)
}
