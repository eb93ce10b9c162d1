mod location_catalog;

pub use location_catalog::locations_for;
#[cfg(test)]
pub use location_catalog::known_locations;
