// src/splitter/reassemble.rs

use super::crossing::{Augmented, VertexKind};
use super::links::LinkTable;
use crate::types::{Ring, VertexRef};

/// Walk state of each crossing's entry vertex, which is where loops start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WalkState {
  Unvisited,
  InProgress,
  Closed,
}

/// Loops produced from an augmented sequence.
#[derive(Debug, Clone, Default)]
pub(crate) struct Reassembly {
  pub polygons: Vec<Ring>,
  /// Where each augmented vertex landed, by augmented index.
  pub placements: Vec<Option<VertexRef>>,
  /// Polygon holding the pole vertices.
  pub pole_index: Option<usize>,
}

impl Reassembly {
  fn new(vertex_count: usize) -> Self {
    Self {
      polygons: Vec::new(),
      placements: vec![None; vertex_count],
      pole_index: None,
    }
  }

  fn place(&mut self, aug: &Augmented, i: usize, ring: &mut Ring) {
    let polygon = self.polygons.len();
    self.placements[i] = Some(VertexRef {
      polygon,
      index: ring.len(),
    });
    if matches!(aug.vertices[i].kind, VertexKind::Pole { .. }) {
      self.pole_index = Some(polygon);
    }
    ring.push(aug.vertices[i].location);
  }

  fn emit(&mut self, mut ring: Ring, close: bool) {
    if ring.is_empty() {
      return;
    }
    if close {
      ring.push(ring[0]);
    }
    self.polygons.push(ring);
  }
}

/// Stitches a closed augmented sequence back into disjoint simple loops.
///
/// Each loop starts at an unvisited entry vertex and follows the original vertex order.
/// On reaching a paired exit vertex the walk jumps along the meridian to the entry
/// vertex the link table names and carries on from there. The loop closes when the walk
/// jumps back to its starting vertex. Every output loop repeats its first vertex last.
///
/// With no unbridged crossing the whole sequence is a single loop.
pub(crate) fn reassemble_closed(aug: &Augmented, table: &mut LinkTable) -> Reassembly {
  let n = aug.vertices.len();
  let mut out = Reassembly::new(n);

  if aug.open_crossings().next().is_none() {
    let mut ring = Ring::with_capacity(n + 1);
    for i in 0..n {
      out.place(aug, i, &mut ring);
    }
    out.emit(ring, true);
    return out;
  }

  let mut states = vec![WalkState::Unvisited; aug.crossings.len()];
  let starts: Vec<usize> = aug.open_crossings().collect();

  for c in starts {
    if states[c] != WalkState::Unvisited {
      continue;
    }
    let start = aug.crossings[c].entry_at;
    states[c] = WalkState::InProgress;
    let mut in_loop = vec![c];
    let mut ring = Ring::new();
    let mut i = start;

    // Each augmented vertex is placed at most once, so a loop never exceeds n steps.
    for _ in 0..n {
      out.place(aug, i, &mut ring);

      let next = match table.jump_from(aug, i) {
        Some(target) => {
          table.mark_visited(i);
          target
        }
        None => (i + 1) % n,
      };
      if next == start {
        break;
      }

      if let VertexKind::Split { crossing, exit: false, .. } = aug.vertices[next].kind {
        if !aug.crossings[crossing].bridged {
          if states[crossing] != WalkState::Unvisited {
            log::warn!("reassembly re-entered crossing {crossing}; closing loop early");
            break;
          }
          states[crossing] = WalkState::InProgress;
          in_loop.push(crossing);
        }
      }
      i = next;
    }

    for k in in_loop {
      states[k] = WalkState::Closed;
    }
    out.emit(ring, true);
  }

  out
}

/// Cuts an open augmented sequence at every crossing. Piece `k` ends at the exit vertex
/// of crossing `k` and the next piece starts at its entry vertex. Pieces are left open.
pub(crate) fn reassemble_open(aug: &Augmented) -> Reassembly {
  let n = aug.vertices.len();
  let mut out = Reassembly::new(n);
  let mut ring = Ring::new();

  for i in 0..n {
    out.place(aug, i, &mut ring);
    if let VertexKind::Split { exit: true, .. } = aug.vertices[i].kind {
      out.emit(std::mem::take(&mut ring), false);
    }
  }
  out.emit(ring, false);
  out
}
