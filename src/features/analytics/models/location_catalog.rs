use std::collections::BTreeSet;

use crate::features::reports::models::Report;

/// Restrooms reported on before any report exists, ground through sixth floor.
pub const KNOWN_LOCATIONS: [&str; 7] = [
    "Restroom - Ground Floor(010)",
    "Restroom - First Floor(110)",
    "Restroom - Second Floor(210)",
    "Restroom - Third Floor(310)",
    "Restroom - Fourth Floor(410)",
    "Restroom - Fifth Floor(510)",
    "Restroom - Sixth Floor(610)",
];

pub fn known_locations() -> Vec<String> {
    KNOWN_LOCATIONS.iter().map(|l| l.to_string()).collect()
}

/// Locations to evaluate: every distinct non-empty location found in
/// `reports`, sorted, or the catalog when there are none.
pub fn locations_for(reports: &[Report]) -> Vec<String> {
    let discovered: BTreeSet<&str> = reports
        .iter()
        .filter_map(|r| r.location.as_deref())
        .filter(|l| !l.is_empty())
        .collect();

    if discovered.is_empty() {
        return known_locations();
    }

    discovered.into_iter().map(str::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::ReportBuilder;

    #[test]
    fn test_catalog_order() {
        let locations = known_locations();
        assert_eq!(locations.len(), 7);
        assert_eq!(locations[0], "Restroom - Ground Floor(010)");
        assert_eq!(locations[6], "Restroom - Sixth Floor(610)");
    }

    #[test]
    fn test_no_reports_falls_back_to_catalog() {
        assert_eq!(locations_for(&[]), known_locations());
    }

    #[test]
    fn test_reports_without_location_fall_back_to_catalog() {
        let reports = vec![
            ReportBuilder::without_location().build(),
            ReportBuilder::new("").build(),
        ];
        assert_eq!(locations_for(&reports), known_locations());
    }

    #[test]
    fn test_discovered_locations_replace_catalog() {
        let reports = vec![
            ReportBuilder::new("Lobby").build(),
            ReportBuilder::new("Cafeteria").build(),
            ReportBuilder::new("Lobby").build(),
        ];
        assert_eq!(locations_for(&reports), vec!["Cafeteria", "Lobby"]);
    }
}
