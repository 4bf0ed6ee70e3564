//! Read-only reference data: aircraft radio layouts, unit types and terrains.

/// Per-aircraft channel profiles.
pub mod aircraft;
/// Terrain data loading.
pub mod terrain;
/// Known unit type identifiers.
pub mod units;

pub use aircraft::{AircraftCatalog, AircraftChannelProfile, AircraftDataProvider};
pub use terrain::TerrainCatalog;
pub use units::is_known_unit_type;
