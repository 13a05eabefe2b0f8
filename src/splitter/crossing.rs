// src/splitter/crossing.rs

use crate::constants::{EPSILON_DEG, FULL_TURN_DEG, MAX_LNG_DEG};
use crate::location::{clamp_lat, lng_signum};
use crate::types::{Crossing, Location, Pole, Side};

/// Whether the edge `p1 -> p2` crosses the antimeridian.
///
/// The edge crosses when its endpoints lie on opposite sides of the prime meridian and
/// are more than 180 degrees of longitude apart, so that the short way round passes
/// through ±180. A delta of exactly 180 is never a crossing: the edge is taken to run
/// through the in-range longitudes between its endpoints.
///
/// An endpoint lying on ±180 is already on the meridian and never makes a crossing by
/// itself. Whether a ring passes through such a vertex to the far side depends on the
/// vertices around it, which [`find_crossings`] takes into account.
#[must_use]
pub fn edge_crosses_antimeridian(p1: &Location, p2: &Location) -> bool {
  if on_meridian(p1) || on_meridian(p2) {
    return false;
  }
  if lng_signum(p1.longitude) == lng_signum(p2.longitude) {
    return false;
  }
  let delta = (p2.longitude - p1.longitude).abs();
  delta > MAX_LNG_DEG && delta < FULL_TURN_DEG
}

/// Whether the open path `locations` crosses the antimeridian anywhere, including by
/// passing through a vertex on ±180 to the far side.
#[must_use]
pub fn locations_cross_antimeridian(locations: &[Location]) -> bool {
  !plan_crossings(locations, false).is_empty()
}

/// Latitude at which a crossing edge meets the antimeridian.
///
/// Latitude is interpolated linearly against longitude after unwrapping `p2` by a full
/// turn, so the edge runs monotonically from `p1` through ±180. The result is clamped
/// into `[-90, 90]`.
#[must_use]
pub fn meridian_intersection(p1: &Location, p2: &Location) -> f64 {
  let (meridian, lng2) = if p1.longitude > 0.0 {
    (MAX_LNG_DEG, p2.longitude + FULL_TURN_DEG)
  } else {
    (-MAX_LNG_DEG, p2.longitude - FULL_TURN_DEG)
  };
  let span = lng2 - p1.longitude;
  let mid = (p1.latitude + p2.latitude) * 0.5;
  if span.abs() < EPSILON_DEG {
    return clamp_lat(mid);
  }

  let t = (meridian - p1.longitude) / span;
  let lat = p1.latitude + t * (p2.latitude - p1.latitude);
  if lat.is_finite() {
    clamp_lat(lat)
  } else {
    clamp_lat(mid)
  }
}

/// The pair of vertices replacing a crossing edge's jump across the antimeridian.
///
/// The first vertex lies on `p1`'s side, the second on `p2`'s side, both at the
/// interpolated crossing latitude and without altitude.
#[must_use]
pub fn split_vertices(p1: &Location, p2: &Location) -> (Location, Location) {
  let lat = meridian_intersection(p1, p2);
  let side = Side::of_longitude(p1.longitude);
  (
    Location::new(lat, side.longitude()),
    Location::new(lat, side.opposite().longitude()),
  )
}

/// Every edge of `ring` that crosses the antimeridian, in ring order.
///
/// When `is_closed` is true the edge from the last vertex back to the first is examined
/// too. A repeated closing vertex is recognised and not counted twice. A ring that only
/// touches ±180 at a vertex and turns back has no crossing there.
#[must_use]
pub fn find_crossings(ring: &[Location], is_closed: bool) -> Vec<Crossing> {
  let points = super::working_points(ring, is_closed);
  plan_crossings(points, is_closed).into_iter().map(|plan| plan.crossing).collect()
}

#[inline]
fn on_meridian(loc: &Location) -> bool {
  loc.longitude.abs() == MAX_LNG_DEG
}

/// Side of the meridian a vertex off ±180 reaches it from. A vertex on the prime
/// meridian is exactly half a turn away and has no side.
fn approach_side(loc: &Location) -> Option<Side> {
  match lng_signum(loc.longitude) {
    1 => Some(Side::East),
    -1 => Some(Side::West),
    _ => None,
  }
}

/// Gives the vertices of a run lying on ±180 the side the ring is on while it runs
/// along the meridian. When the ring leaves on the side it came from, the whole run
/// keeps that side. Otherwise the run switches sides at its first vertex stored on the
/// far side, so every stored longitude lands on the side it names where possible.
fn assign_run(points: &[Location], sides: &mut [Option<Side>], run: &[usize], before: Option<Side>, after: Option<Side>) {
  let (before, after) = match (before, after) {
    (Some(before), Some(after)) => (before, after),
    (before, after) => {
      let side = before.or(after);
      for &i in run {
        sides[i] = side;
      }
      return;
    }
  };
  let turn = if before == after {
    run.len()
  } else {
    run
      .iter()
      .position(|&i| Side::of_longitude(points[i].longitude) == after)
      .unwrap_or(run.len())
  };
  for (k, &i) in run.iter().enumerate() {
    sides[i] = Some(if k < turn { before } else { after });
  }
}

/// Side of the meridian each vertex is on. Off-meridian vertices use their sign;
/// vertices on ±180 inherit from the vertices around them. A ring lying entirely on
/// the meridian has no sides at all.
fn effective_sides(points: &[Location], is_closed: bool) -> Vec<Option<Side>> {
  let n = points.len();
  let mut sides: Vec<Option<Side>> = points
    .iter()
    .map(|p| if on_meridian(p) { None } else { approach_side(p) })
    .collect();
  let Some(anchor) = points.iter().position(|p| !on_meridian(p)) else {
    return sides;
  };

  // A closed ring is scanned from just after an off-meridian vertex so that no run wraps.
  let (order, mut before): (Vec<usize>, Option<Side>) = if is_closed {
    ((1..=n).map(|k| (anchor + k) % n).collect(), sides[anchor])
  } else {
    ((0..n).collect(), None)
  };
  let mut run = Vec::new();
  for i in order {
    if on_meridian(&points[i]) {
      run.push(i);
      continue;
    }
    let after = sides[i];
    assign_run(points, &mut sides, &run, before, after);
    run.clear();
    before = after;
  }
  assign_run(points, &mut sides, &run, before, None);
  sides
}

/// Which endpoint of a crossing edge, if any, already sits on the meridian and stands
/// in for one of the split vertices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Reuse {
  Neither,
  Start,
  End,
}

#[derive(Debug, Clone, Copy)]
struct CrossingPlan {
  crossing: Crossing,
  reuse: Reuse,
}

/// Finds the crossing edges of `points` and how each one is split.
fn plan_crossings(points: &[Location], is_closed: bool) -> Vec<CrossingPlan> {
  let n = points.len();
  if n < 2 {
    return Vec::new();
  }
  let edge_count = if is_closed { n } else { n - 1 };
  let sides = effective_sides(points, is_closed);
  let mut plans = Vec::new();

  for i in 0..edge_count {
    let j = (i + 1) % n;
    let (p1, p2) = (&points[i], &points[j]);
    let plan = if !on_meridian(p1) && !on_meridian(p2) {
      edge_crosses_antimeridian(p1, p2).then(|| CrossingPlan {
        crossing: Crossing {
          edge_index: i,
          side: Side::of_longitude(p1.longitude),
          latitude: meridian_intersection(p1, p2),
        },
        reuse: Reuse::Neither,
      })
    } else {
      match (sides[i], sides[j]) {
        (Some(from), Some(to)) if from != to => {
          let reuse = if on_meridian(p1) && Side::of_longitude(p1.longitude) == from {
            Reuse::Start
          } else if on_meridian(p2) && Side::of_longitude(p2.longitude) == to {
            Reuse::End
          } else {
            Reuse::Neither
          };
          let latitude = if reuse == Reuse::End || !on_meridian(p1) {
            p2.latitude
          } else {
            p1.latitude
          };
          Some(CrossingPlan {
            crossing: Crossing {
              edge_index: i,
              side: from,
              latitude: clamp_lat(latitude),
            },
            reuse,
          })
        }
        _ => None,
      }
    };
    plans.extend(plan);
  }
  plans
}

/// What a vertex of the augmented sequence stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum VertexKind {
  /// An input vertex, by its index in the input ring.
  Original(usize),
  /// A split vertex of a crossing. `exit` is true for the vertex on the start side.
  /// `original` is set when an input vertex on ±180 serves as the split vertex.
  Split {
    crossing: usize,
    exit: bool,
    original: Option<usize>,
  },
  /// A synthesized pole vertex bridging a crossing.
  Pole { crossing: usize },
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct Vertex {
  pub location: Location,
  pub kind: VertexKind,
}

/// A crossing plus where its split vertices sit in the augmented sequence.
#[derive(Debug, Clone, Copy)]
pub(crate) struct CrossingSlots {
  pub crossing: Crossing,
  /// Index of the split vertex on the start side.
  pub exit_at: usize,
  /// Index of the split vertex on the far side. Follows `exit_at` cyclically.
  pub entry_at: usize,
  /// Set once pole vertices have been inserted between `exit_at` and `entry_at`.
  pub bridged: bool,
}

/// The input ring rewritten with split vertices at every crossing.
/// Indices into `vertices` are the arena addresses used by the link table.
#[derive(Debug, Clone, Default)]
pub(crate) struct Augmented {
  pub vertices: Vec<Vertex>,
  pub crossings: Vec<CrossingSlots>,
}

impl Augmented {
  /// Walks the edges of `points` and inserts split vertices into each crossing edge.
  /// An endpoint already on the meridian is reused as its split vertex rather than
  /// duplicated.
  pub fn build(points: &[Location], is_closed: bool) -> Self {
    let n = points.len();
    let plans = plan_crossings(points, is_closed);
    let mut vertices = Vec::with_capacity(n + 2 * plans.len() + 2);
    let mut crossings: Vec<CrossingSlots> = plans
      .iter()
      .map(|plan| CrossingSlots {
        crossing: plan.crossing,
        exit_at: 0,
        entry_at: 0,
        bridged: false,
      })
      .collect();

    // Input vertices reused as the far-side split vertex of the crossing ending on them.
    let mut entry_of = vec![None; n];
    for (c, plan) in plans.iter().enumerate() {
      if plan.reuse == Reuse::End {
        entry_of[(plan.crossing.edge_index + 1) % n] = Some(c);
      }
    }

    let mut pending = plans.iter().enumerate().peekable();
    for (i, p1) in points.iter().enumerate() {
      let at = vertices.len();
      let kind = match entry_of[i] {
        Some(c) => {
          crossings[c].entry_at = at;
          VertexKind::Split {
            crossing: c,
            exit: false,
            original: Some(i),
          }
        }
        None => VertexKind::Original(i),
      };
      vertices.push(Vertex { location: *p1, kind });

      let Some((c, plan)) = pending.next_if(|(_, plan)| plan.crossing.edge_index == i) else {
        continue;
      };
      let lat = plan.crossing.latitude;
      let side = plan.crossing.side;
      let exit = Location::new(lat, side.longitude());
      let entry = Location::new(lat, side.opposite().longitude());

      match plan.reuse {
        Reuse::Start => {
          vertices[at].kind = VertexKind::Split {
            crossing: c,
            exit: true,
            original: Some(i),
          };
          crossings[c].exit_at = at;
        }
        Reuse::End | Reuse::Neither => {
          crossings[c].exit_at = vertices.len();
          vertices.push(Vertex {
            location: exit,
            kind: VertexKind::Split {
              crossing: c,
              exit: true,
              original: None,
            },
          });
        }
      }
      if plan.reuse != Reuse::End {
        crossings[c].entry_at = vertices.len();
        vertices.push(Vertex {
          location: entry,
          kind: VertexKind::Split {
            crossing: c,
            exit: false,
            original: None,
          },
        });
      }
    }

    Self { vertices, crossings }
  }

  /// Crossings that still need a partner on the meridian.
  pub fn open_crossings(&self) -> impl Iterator<Item = usize> + '_ {
    self.crossings.iter().enumerate().filter(|(_, c)| !c.bridged).map(|(i, _)| i)
  }

  /// Inserts the two pole vertices between the split vertices of crossing `c`.
  pub fn insert_pole_bridge(&mut self, c: usize, pole: Pole) {
    let Some(pole_lat) = pole.latitude() else {
      return;
    };
    let slots = self.crossings[c];
    let side = slots.crossing.side;
    let at = slots.exit_at + 1;
    let bridge = [
      Vertex {
        location: Location::new(pole_lat, side.longitude()),
        kind: VertexKind::Pole { crossing: c },
      },
      Vertex {
        location: Location::new(pole_lat, side.opposite().longitude()),
        kind: VertexKind::Pole { crossing: c },
      },
    ];
    self.vertices.splice(at..at, bridge);

    for other in &mut self.crossings {
      if other.exit_at >= at {
        other.exit_at += 2;
      }
      if other.entry_at >= at {
        other.entry_at += 2;
      }
    }
    self.crossings[c].bridged = true;
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use approx::assert_relative_eq;

  #[test]
  fn test_edge_crosses_antimeridian() {
    let east = Location::new(10.0, 170.0);
    let west = Location::new(20.0, -170.0);
    assert!(edge_crosses_antimeridian(&east, &west));
    assert!(edge_crosses_antimeridian(&west, &east));

    // Short way passes through the prime meridian.
    assert!(!edge_crosses_antimeridian(&Location::new(0.0, -10.0), &Location::new(0.0, 10.0)));
    // Same hemisphere.
    assert!(!edge_crosses_antimeridian(&Location::new(0.0, 100.0), &Location::new(0.0, 179.0)));
    // Duplicate points.
    assert!(!edge_crosses_antimeridian(&east, &east));
  }

  #[test]
  fn test_edge_on_meridian() {
    let plus = Location::new(10.0, 180.0);
    let minus = Location::new(20.0, -180.0);
    // Walking along the meridian column is not a crossing.
    assert!(!edge_crosses_antimeridian(&plus, &minus));
    assert!(!edge_crosses_antimeridian(&minus, &Location::new(30.0, -170.0)));
    // A vertex on the meridian never crosses by itself, whatever its stored sign.
    assert!(!edge_crosses_antimeridian(&plus, &Location::new(30.0, -170.0)));
    assert!(!edge_crosses_antimeridian(&Location::new(0.0, 170.0), &minus));
  }

  #[test]
  fn test_meridian_vertex_touch_and_pass() {
    let touch = [Location::new(0.0, 170.0), Location::new(10.0, -180.0), Location::new(20.0, 170.0)];
    assert!(!locations_cross_antimeridian(&touch));
    assert!(find_crossings(&touch, true).is_empty());

    let pass = [Location::new(0.0, 170.0), Location::new(10.0, -180.0), Location::new(20.0, -170.0)];
    assert!(locations_cross_antimeridian(&pass));
    let crossings = find_crossings(&pass, false);
    assert_eq!(crossings.len(), 1);
    assert_eq!(crossings[0].edge_index, 0);
    assert_eq!(crossings[0].side, Side::East);
    assert_eq!(crossings[0].latitude, 10.0);
  }

  #[test]
  fn test_run_along_meridian() {
    // Enters at 10N on the east side, runs north along the meridian, leaves west at 20N.
    let points = [
      Location::new(0.0, 170.0),
      Location::new(10.0, 180.0),
      Location::new(20.0, -180.0),
      Location::new(30.0, -170.0),
    ];
    let crossings = find_crossings(&points, false);
    assert_eq!(crossings.len(), 1);
    assert_eq!(crossings[0].edge_index, 1);
    assert_eq!(crossings[0].latitude, 10.0);

    // Only meridian vertices: nothing to cross.
    let column = [Location::new(-90.0, -180.0), Location::new(90.0, -180.0), Location::new(90.0, 180.0)];
    assert!(find_crossings(&column, true).is_empty());
  }

  #[test]
  fn test_antipodal_delta_is_not_a_crossing() {
    assert!(!edge_crosses_antimeridian(&Location::new(0.0, -10.0), &Location::new(0.0, 170.0)));
    assert!(!edge_crosses_antimeridian(&Location::new(0.0, 90.0), &Location::new(0.0, -90.0)));
    assert!(!edge_crosses_antimeridian(&Location::new(0.0, 0.0), &Location::new(0.0, -180.0)));
  }

  #[test]
  fn test_locations_cross_antimeridian() {
    let path = [Location::new(0.0, 160.0), Location::new(0.0, 175.0), Location::new(0.0, -175.0)];
    assert!(locations_cross_antimeridian(&path));
    assert!(!locations_cross_antimeridian(&path[..2]));
    assert!(!locations_cross_antimeridian(&[]));
  }

  #[test]
  fn test_meridian_intersection() {
    let lat = meridian_intersection(&Location::new(20.0, 170.0), &Location::new(25.0, -175.0));
    assert_relative_eq!(lat, 20.0 + 5.0 * 10.0 / 15.0, epsilon = 1e-12);

    let lat = meridian_intersection(&Location::new(33.0, -178.0), &Location::new(31.0, 175.0));
    assert_relative_eq!(lat, 33.0 - 2.0 * 2.0 / 7.0, epsilon = 1e-12);

    // Endpoint already on the meridian.
    let lat = meridian_intersection(&Location::new(-12.0, 180.0), &Location::new(40.0, -170.0));
    assert_relative_eq!(lat, -12.0, epsilon = 1e-12);
  }

  #[test]
  fn test_meridian_intersection_stays_in_range() {
    let lat = meridian_intersection(&Location::new(90.0, 179.0), &Location::new(90.0, -179.0));
    assert!(lat <= 90.0);
    let lat = meridian_intersection(&Location::new(-90.0, -1.0e-300), &Location::new(-90.0, 179.0));
    assert!((-90.0..=90.0).contains(&lat));
  }

  #[test]
  fn test_split_vertices() {
    let (exit, entry) = split_vertices(
      &Location::with_altitude(0.0, -170.0, 500.0),
      &Location::with_altitude(10.0, 170.0, 500.0),
    );
    assert_eq!(exit.longitude, -180.0);
    assert_eq!(entry.longitude, 180.0);
    assert_relative_eq!(exit.latitude, 5.0, epsilon = 1e-12);
    assert_eq!(exit.latitude, entry.latitude);
    assert_eq!(exit.altitude, None);
    assert_eq!(entry.altitude, None);
  }

  #[test]
  fn test_augmented_build_closed() {
    let points = [
      Location::new(0.0, 170.0),
      Location::new(0.0, -170.0),
      Location::new(10.0, -170.0),
      Location::new(10.0, 170.0),
    ];
    let aug = Augmented::build(&points, true);
    assert_eq!(aug.crossings.len(), 2);
    assert_eq!(aug.vertices.len(), 8);

    let first = aug.crossings[0];
    assert_eq!(first.crossing.edge_index, 0);
    assert_eq!(first.crossing.side, Side::East);
    assert_eq!((first.exit_at, first.entry_at), (1, 2));

    // The closing edge's crossing lands at the tail.
    let second = aug.crossings[1];
    assert_eq!(second.crossing.edge_index, 2);
    assert_eq!(second.crossing.side, Side::West);
    assert_eq!((second.exit_at, second.entry_at), (5, 6));
  }

  #[test]
  fn test_augmented_build_open_skips_closing_edge() {
    let points = [Location::new(0.0, -170.0), Location::new(0.0, -175.0), Location::new(0.0, 175.0)];
    let closed = Augmented::build(&points, true);
    let open = Augmented::build(&points, false);
    assert_eq!(closed.crossings.len(), 2);
    assert_eq!(open.crossings.len(), 1);
    assert_eq!(open.vertices.len(), 5);
    assert_eq!(open.crossings[0].crossing.edge_index, 1);
  }

  #[test]
  fn test_augmented_reuses_meridian_start() {
    let points = [Location::new(0.0, 170.0), Location::new(5.0, 180.0), Location::new(10.0, -170.0)];
    let aug = Augmented::build(&points, false);
    assert_eq!(aug.vertices.len(), 4);
    assert_eq!(aug.crossings.len(), 1);
    let c = aug.crossings[0];
    assert_eq!((c.exit_at, c.entry_at), (1, 2));
    assert_eq!(c.crossing.side, Side::East);
    assert_eq!(
      aug.vertices[1].kind,
      VertexKind::Split {
        crossing: 0,
        exit: true,
        original: Some(1)
      }
    );
    assert_eq!(aug.vertices[1].location, points[1]);
    assert_eq!(aug.vertices[2].location, Location::new(5.0, -180.0));
  }

  #[test]
  fn test_augmented_reuses_meridian_end() {
    let points = [Location::new(0.0, 170.0), Location::new(5.0, -180.0), Location::new(10.0, -170.0)];
    let aug = Augmented::build(&points, false);
    assert_eq!(aug.vertices.len(), 4);
    let c = aug.crossings[0];
    assert_eq!((c.exit_at, c.entry_at), (1, 2));
    assert_eq!(aug.vertices[1].location, Location::new(5.0, 180.0));
    assert_eq!(
      aug.vertices[2].kind,
      VertexKind::Split {
        crossing: 0,
        exit: false,
        original: Some(1)
      }
    );
  }

  #[test]
  fn test_augmented_reused_entry_wraps_to_front() {
    let points = [
      Location::new(0.0, -180.0),
      Location::new(0.0, -170.0),
      Location::new(10.0, -170.0),
      Location::new(10.0, 170.0),
    ];
    let aug = Augmented::build(&points, true);
    assert_eq!(aug.vertices.len(), 7);
    assert_eq!(aug.crossings.len(), 2);
    assert_eq!((aug.crossings[0].exit_at, aug.crossings[0].entry_at), (3, 4));
    // The closing edge ends on vertex 0, which is the far-side split vertex.
    assert_eq!((aug.crossings[1].exit_at, aug.crossings[1].entry_at), (6, 0));
    assert_eq!(aug.vertices[6].location, Location::new(0.0, 180.0));
  }

  #[test]
  fn test_augmented_touch_adds_nothing() {
    let points = [Location::new(0.0, -170.0), Location::new(10.0, 180.0), Location::new(20.0, -170.0)];
    let aug = Augmented::build(&points, true);
    assert!(aug.crossings.is_empty());
    assert_eq!(aug.vertices.len(), 3);
  }

  #[test]
  fn test_insert_pole_bridge_shifts_later_slots() {
    let points = [
      Location::new(-60.0, 150.0),
      Location::new(-60.0, -150.0),
      Location::new(-70.0, -170.0),
      Location::new(-70.0, 170.0),
    ];
    let mut aug = Augmented::build(&points, true);
    assert_eq!(aug.crossings.len(), 2);
    aug.insert_pole_bridge(0, Pole::South);

    assert!(aug.crossings[0].bridged);
    assert_eq!((aug.crossings[0].exit_at, aug.crossings[0].entry_at), (1, 4));
    assert_eq!(aug.vertices[2].location, Location::new(-90.0, 180.0));
    assert_eq!(aug.vertices[3].location, Location::new(-90.0, -180.0));
    assert_eq!((aug.crossings[1].exit_at, aug.crossings[1].entry_at), (7, 8));
    assert_eq!(aug.open_crossings().collect::<Vec<_>>(), vec![1]);
  }

  #[test]
  fn test_find_crossings_ignores_repeated_closing_vertex() {
    let ring = vec![
      Location::new(0.0, 170.0),
      Location::new(0.0, -170.0),
      Location::new(10.0, -170.0),
      Location::new(10.0, 170.0),
      Location::new(0.0, 170.0),
    ];
    let crossings = find_crossings(&ring, true);
    assert_eq!(crossings.len(), 2);
    assert_eq!(crossings[1].edge_index, 2);
    assert_relative_eq!(crossings[1].latitude, 10.0, epsilon = 1e-12);
  }
}
