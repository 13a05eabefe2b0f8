// src/splitter/mod.rs
//! Antimeridian and pole splitting of single rings.
//!
//! A ring is rewritten with a pair of split vertices (one at +180, one at -180) inside
//! every edge that crosses the antimeridian. An odd crossing count means the ring
//! encloses a pole; the crossing nearest that pole is then routed through two pole
//! vertices instead of being cut. The remaining crossings are paired along the meridian
//! and the sequence is walked, jumping between paired split vertices, to emit disjoint
//! simple loops.

pub mod crossing;
mod links;
pub mod pole;
mod reassemble;

pub use crossing::{
  edge_crosses_antimeridian, find_crossings, locations_cross_antimeridian, meridian_intersection, split_vertices,
};
pub use pole::classify_pole;

use crate::location::{is_degenerate, is_explicitly_closed};
use crate::types::{Location, Pole, Ring, SplitError, SplitOptions, SplitResult};
use crossing::Augmented;
use links::{pair_crossings, LinkTable};
use pole::inject_pole;
use reassemble::{reassemble_closed, reassemble_open};

/// The vertices the splitter works on: a repeated closing vertex is dropped for closed rings.
pub(crate) fn working_points(ring: &[Location], is_closed: bool) -> &[Location] {
  if is_closed && is_explicitly_closed(ring) {
    &ring[..ring.len() - 1]
  } else {
    ring
  }
}

/// Splits one ring with default options. See [`split_with_options`].
#[must_use]
pub fn split(ring: &[Location], is_closed: bool) -> SplitResult {
  split_with_options(ring, is_closed, &SplitOptions::default())
}

/// Splits one ring into simple rings that never jump across the antimeridian.
///
/// # Arguments
/// * `ring` - Vertices in degrees. A closed ring may or may not repeat its first vertex.
/// * `is_closed` - Whether the last vertex connects back to the first. Open paths are cut
///   into open pieces and never enclose a pole.
/// * `options` - Pole rule and link table collection.
///
/// # Returns
/// Closed input yields closed rings (first vertex repeated last). A ring without
/// crossings comes back unchanged apart from being closed. Degenerate input (fewer than
/// two distinct positions) is echoed as a single ring. This function never fails.
#[must_use]
pub fn split_with_options(ring: &[Location], is_closed: bool, options: &SplitOptions) -> SplitResult {
  if is_degenerate(ring) {
    log::trace!("degenerate ring of {} vertices echoed unchanged", ring.len());
    return SplitResult {
      polygons: vec![ring.to_vec()],
      link_tables: if options.collect_link_tables { vec![Vec::new()] } else { Vec::new() },
      ..SplitResult::default()
    };
  }

  let points = working_points(ring, is_closed);
  let mut aug = Augmented::build(points, is_closed);
  log::trace!(
    "ring of {} vertices has {} antimeridian crossings",
    points.len(),
    aug.crossings.len()
  );

  if aug.crossings.is_empty() {
    let mut unchanged: Ring = ring.to_vec();
    if is_closed && !is_explicitly_closed(ring) {
      unchanged.push(ring[0]);
    }
    return SplitResult {
      polygons: vec![unchanged],
      link_tables: if options.collect_link_tables { vec![Vec::new()] } else { Vec::new() },
      ..SplitResult::default()
    };
  }

  let (reassembly, table, pole) = if is_closed {
    let pole = classify_pole(points, aug.crossings.len(), options.pole_rule);
    if pole != Pole::None {
      log::debug!("ring with {} crossings encloses the {:?} pole", aug.crossings.len(), pole);
      inject_pole(&mut aug, pole);
    }
    let mut table = LinkTable::build(&aug, &pair_crossings(&aug));
    let reassembly = reassemble_closed(&aug, &mut table);
    (reassembly, table, pole)
  } else {
    let table = LinkTable::build(&aug, &vec![None; aug.crossings.len()]);
    (reassemble_open(&aug), table, Pole::None)
  };

  let link_tables = if options.collect_link_tables {
    table.export(&aug, &reassembly.placements, reassembly.polygons.len())
  } else {
    Vec::new()
  };

  SplitResult {
    polygons: reassembly.polygons,
    pole,
    pole_index: reassembly.pole_index,
    link_tables,
  }
}

/// Validates every vertex before splitting with default options.
pub fn try_split(ring: &[Location], is_closed: bool) -> Result<SplitResult, SplitError> {
  for loc in ring {
    loc.validate()?;
  }
  Ok(split(ring, is_closed))
}

/// Splits each ring independently, e.g. a polygon's boundary and each of its holes.
/// Results are in input order. With the `parallel` feature rings are split on the rayon
/// thread pool.
#[must_use]
pub fn split_rings(rings: &[Ring], is_closed: bool) -> Vec<SplitResult> {
  #[cfg(feature = "parallel")]
  {
    use rayon::prelude::*;
    rings.par_iter().map(|ring| split(ring, is_closed)).collect()
  }
  #[cfg(not(feature = "parallel"))]
  {
    rings.iter().map(|ring| split(ring, is_closed)).collect()
  }
}
