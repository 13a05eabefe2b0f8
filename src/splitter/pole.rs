// src/splitter/pole.rs

use super::crossing::Augmented;
use crate::types::{Location, Pole, PoleRule};
use std::cmp::Ordering;

/// Classifies which pole, if any, a closed ring encloses.
///
/// An even number of antimeridian crossings (zero included) encloses no pole. An odd
/// number encloses exactly one, picked from the ring's latitudes by `rule`.
#[must_use]
pub fn classify_pole(ring: &[Location], crossing_count: usize, rule: PoleRule) -> Pole {
  if crossing_count % 2 == 0 || ring.is_empty() {
    return Pole::None;
  }
  match rule {
    PoleRule::Majority => by_majority(ring),
    PoleRule::Extent => by_extent(ring),
  }
}

fn by_majority(ring: &[Location]) -> Pole {
  let north = ring.iter().filter(|p| p.latitude > 0.0).count();
  let south = ring.iter().filter(|p| p.latitude < 0.0).count();
  match north.cmp(&south) {
    Ordering::Greater => Pole::North,
    Ordering::Less => Pole::South,
    Ordering::Equal => by_extent(ring),
  }
}

fn by_extent(ring: &[Location]) -> Pole {
  let (min_lat, max_lat) = ring.iter().fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| {
    (lo.min(p.latitude), hi.max(p.latitude))
  });

  if min_lat > 0.0 {
    Pole::North
  } else if max_lat < 0.0 {
    Pole::South
  } else if max_lat.abs() >= min_lat.abs() {
    Pole::North
  } else {
    Pole::South
  }
}

/// The crossing nearest the enclosed pole: the northernmost for [`Pole::North`], the
/// southernmost for [`Pole::South`]. Ties go to the earlier crossing in ring order.
pub(crate) fn bridge_crossing(aug: &Augmented, pole: Pole) -> Option<usize> {
  let candidates = aug.open_crossings().map(|c| (c, aug.crossings[c].crossing.latitude));
  match pole {
    Pole::None => None,
    Pole::North => candidates
      .reduce(|best, next| if next.1 > best.1 { next } else { best })
      .map(|(c, _)| c),
    Pole::South => candidates
      .reduce(|best, next| if next.1 < best.1 { next } else { best })
      .map(|(c, _)| c),
  }
}

/// Closes the loop around the enclosed pole by routing the nearest crossing through it.
/// Returns the bridged crossing.
pub(crate) fn inject_pole(aug: &mut Augmented, pole: Pole) -> Option<usize> {
  let c = bridge_crossing(aug, pole)?;
  log::debug!(
    "bridging crossing on edge {} at latitude {:.6} through the {:?} pole",
    aug.crossings[c].crossing.edge_index,
    aug.crossings[c].crossing.latitude,
    pole
  );
  aug.insert_pole_bridge(c, pole);
  Some(c)
}
