//! Core splitter data structures.

use crate::constants::{MAX_LAT_DEG, MAX_LNG_DEG, MIN_LAT_DEG, MIN_LNG_DEG};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
#[cfg(feature = "serde")]
use serde_repr::{Deserialize_repr, Serialize_repr};

/// A geographic position in degrees.
///
/// Latitude is expected in `[-90, 90]` and longitude in `[-180, 180]`. Both
/// `-180` and `180` are legal and are treated as the two sides of the
/// antimeridian rather than the same point.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Location {
  /// Latitude in degrees.
  pub latitude: f64,
  /// Longitude in degrees.
  pub longitude: f64,
  /// Optional altitude, carried through untouched on input vertices.
  #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
  pub altitude: Option<f64>,
}

impl Location {
  /// Creates a location without an altitude. No range checks are made.
  pub const fn new(latitude: f64, longitude: f64) -> Self {
    Self {
      latitude,
      longitude,
      altitude: None,
    }
  }

  /// Creates a location carrying an altitude. No range checks are made.
  pub const fn with_altitude(latitude: f64, longitude: f64, altitude: f64) -> Self {
    Self {
      latitude,
      longitude,
      altitude: Some(altitude),
    }
  }

  /// Creates a location, rejecting non-finite or out of range coordinates.
  pub fn try_new(latitude: f64, longitude: f64) -> Result<Self, SplitError> {
    let loc = Self::new(latitude, longitude);
    loc.validate()?;
    Ok(loc)
  }

  /// Checks that the coordinates are finite and inside the geographic domain.
  pub fn validate(&self) -> Result<(), SplitError> {
    if !self.latitude.is_finite() || !self.longitude.is_finite() || self.altitude.is_some_and(|a| !a.is_finite()) {
      return Err(SplitError::NonFinite);
    }
    if !(MIN_LAT_DEG..=MAX_LAT_DEG).contains(&self.latitude) {
      return Err(SplitError::LatitudeDomain);
    }
    if !(MIN_LNG_DEG..=MAX_LNG_DEG).contains(&self.longitude) {
      return Err(SplitError::LongitudeDomain);
    }
    Ok(())
  }
}

/// An ordered sequence of locations forming a boundary (closed) or a path (open).
pub type Ring = Vec<Location>;

/// One side of the antimeridian.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
#[cfg_attr(feature = "serde", derive(Serialize_repr, Deserialize_repr))]
pub enum Side {
  /// The +180 side.
  East = 0,
  /// The -180 side.
  West = 1,
}

impl Side {
  /// The longitude of the antimeridian on this side.
  pub fn longitude(self) -> f64 {
    match self {
      Side::East => MAX_LNG_DEG,
      Side::West => MIN_LNG_DEG,
    }
  }

  /// The other side of the antimeridian.
  pub fn opposite(self) -> Self {
    match self {
      Side::East => Side::West,
      Side::West => Side::East,
    }
  }

  /// The side a longitude leans towards. Zero and positive longitudes are east.
  pub fn of_longitude(longitude: f64) -> Self {
    if longitude < 0.0 {
      Side::West
    } else {
      Side::East
    }
  }
}

/// Which geographic pole, if any, a ring encloses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
#[cfg_attr(feature = "serde", derive(Serialize_repr, Deserialize_repr))]
pub enum Pole {
  /// No pole is enclosed.
  #[default]
  None = 0,
  /// The north pole is enclosed.
  North = 1,
  /// The south pole is enclosed.
  South = 2,
}

impl Pole {
  /// Latitude of the pole, or `None` for [`Pole::None`].
  pub fn latitude(self) -> Option<f64> {
    match self {
      Pole::None => None,
      Pole::North => Some(MAX_LAT_DEG),
      Pole::South => Some(MIN_LAT_DEG),
    }
  }
}

/// An edge of an input ring that crosses the antimeridian.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Crossing {
  /// Index in the input ring of the edge's start vertex.
  pub edge_index: usize,
  /// Side of the antimeridian the edge starts on.
  pub side: Side,
  /// Latitude at which the edge meets the antimeridian.
  pub latitude: f64,
}

/// Position of a vertex inside a [`SplitResult`]: `polygons[polygon][index]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct VertexRef {
  /// Index into `SplitResult::polygons`.
  pub polygon: usize,
  /// Index into that polygon's vertices.
  pub index: usize,
}

/// Diagnostic record for a synthesized vertex in an output polygon.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LinkEntry {
  /// Index in the input ring of the start vertex of the crossing edge.
  pub original_index: usize,
  /// Index of the vertex within its output polygon.
  pub new_index: usize,
  /// The twin split vertex at the same latitude on the opposite side.
  /// `None` for pole bridge vertices.
  pub link_to: Option<VertexRef>,
  /// True when reassembly jumped away from this vertex.
  pub visited: bool,
  /// True for the split vertices of the bridged crossing and for the pole vertices.
  pub is_pole_bridge: bool,
}

/// Output of splitting a single ring.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SplitResult {
  /// Simple rings confined to `[-180, 180]` longitude.
  pub polygons: Vec<Ring>,
  /// The pole enclosed by the input ring.
  pub pole: Pole,
  /// Index of the polygon holding the synthesized pole vertices.
  pub pole_index: Option<usize>,
  /// One link table per polygon. Empty when collection is disabled.
  pub link_tables: Vec<Vec<LinkEntry>>,
}

impl SplitResult {
  /// Whether the input ring enclosed a pole.
  pub fn contains_pole(&self) -> bool {
    self.pole != Pole::None
  }

  /// Whether splitting changed the ring's shape, i.e. it crossed the antimeridian.
  pub fn crosses_antimeridian(&self) -> bool {
    self.polygons.len() > 1 || self.contains_pole()
  }

  /// The polygon carrying the pole vertices, if any.
  pub fn pole_ring(&self) -> Option<&Ring> {
    self.pole_index.and_then(|i| self.polygons.get(i))
  }
}

/// How the enclosed pole is chosen once crossing parity says one is enclosed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
#[cfg_attr(feature = "serde", derive(Serialize_repr, Deserialize_repr))]
pub enum PoleRule {
  /// The hemisphere holding more vertices wins. Ties fall back to [`PoleRule::Extent`].
  #[default]
  Majority = 0,
  /// The hemisphere the ring reaches further into wins. Ties go north.
  Extent = 1,
}

/// Splitter configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SplitOptions {
  /// Rule used to pick the enclosed pole.
  pub pole_rule: PoleRule,
  /// Fill `SplitResult::link_tables`.
  pub collect_link_tables: bool,
}

impl Default for SplitOptions {
  fn default() -> Self {
    Self {
      pole_rule: PoleRule::Majority,
      collect_link_tables: true,
    }
  }
}

/// Input validation error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[repr(u32)]
#[cfg_attr(feature = "serde", derive(Serialize_repr, Deserialize_repr))]
pub enum SplitError {
  /// Latitude was outside `[-90, 90]`.
  #[error("latitude outside [-90, 90]")]
  LatitudeDomain = 1,
  /// Longitude was outside `[-180, 180]`.
  #[error("longitude outside [-180, 180]")]
  LongitudeDomain = 2,
  /// A coordinate was NaN or infinite.
  #[error("coordinate is not finite")]
  NonFinite = 3,
}
