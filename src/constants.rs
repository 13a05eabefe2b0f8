//! Angular constants used by the splitter, all in degrees.

/// Northernmost valid latitude (the north pole).
pub const MAX_LAT_DEG: f64 = 90.0;
/// Southernmost valid latitude (the south pole).
pub const MIN_LAT_DEG: f64 = -90.0;

/// Longitude of the antimeridian on its eastern (+180) side.
pub const MAX_LNG_DEG: f64 = 180.0;
/// Longitude of the antimeridian on its western (-180) side.
pub const MIN_LNG_DEG: f64 = -180.0;

/// One full turn around the globe.
pub const FULL_TURN_DEG: f64 = 360.0;

/// Epsilon for floating point comparisons. ~0.1mm in degrees.
pub const EPSILON_DEG: f64 = 0.000_000_001;
