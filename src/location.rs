// src/location.rs

use crate::constants::{EPSILON_DEG, MAX_LAT_DEG, MIN_LAT_DEG};
use crate::types::Location;

/// Clamps a latitude into `[-90, 90]`. Non-finite input collapses to the equator.
#[inline]
#[must_use]
pub(crate) fn clamp_lat(lat: f64) -> f64 {
  if lat.is_nan() {
    return 0.0;
  }
  lat.clamp(MIN_LAT_DEG, MAX_LAT_DEG)
}

/// Sign of a longitude as -1, 0 or 1. Unlike `f64::signum`, zero (and -0.0) maps to 0.
#[inline]
#[must_use]
pub(crate) fn lng_signum(lng: f64) -> i8 {
  if lng > 0.0 {
    1
  } else if lng < 0.0 {
    -1
  } else {
    0
  }
}

/// Determines if the components of two locations are within some
/// threshold distance of each other.
#[inline]
#[must_use]
pub(crate) fn geo_almost_equal_threshold(p1: &Location, p2: &Location, threshold: f64) -> bool {
  (p1.latitude - p2.latitude).abs() < threshold && (p1.longitude - p2.longitude).abs() < threshold
}

/// Determines if two locations are the same position within [`EPSILON_DEG`].
/// Altitude is ignored.
#[inline]
#[must_use]
pub(crate) fn geo_almost_equal(p1: &Location, p2: &Location) -> bool {
  geo_almost_equal_threshold(p1, p2, EPSILON_DEG)
}

/// Whether a ring repeats its first position as its last.
#[must_use]
pub(crate) fn is_explicitly_closed(ring: &[Location]) -> bool {
  match (ring.first(), ring.last()) {
    (Some(first), Some(last)) if ring.len() > 1 => geo_almost_equal(first, last),
    _ => false,
  }
}

/// Whether a ring has fewer than two distinct positions.
#[must_use]
pub(crate) fn is_degenerate(ring: &[Location]) -> bool {
  match ring.first() {
    None => true,
    Some(first) => ring.iter().all(|p| geo_almost_equal(first, p)),
  }
}
