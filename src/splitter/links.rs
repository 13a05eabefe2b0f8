// src/splitter/links.rs

use super::crossing::{Augmented, VertexKind};
use crate::types::{LinkEntry, VertexRef};

/// Link state of one synthesized vertex in the augmented sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Link {
  /// The crossing this vertex belongs to.
  pub crossing: usize,
  /// Augmented index reached by following the meridian from this vertex to the
  /// neighbouring crossing on the same side. `None` for bridge vertices and for
  /// crossings left without a partner.
  pub jump_to: Option<usize>,
  /// Set when reassembly jumps away from this vertex.
  pub visited: bool,
  pub is_pole_bridge: bool,
}

/// Pairs crossings that bound the same stretch of the antimeridian.
///
/// Unbridged crossings are ordered by latitude, north to south, and paired off two by
/// two. Every crossing contributes one vertex at the same latitude on each side of the
/// meridian, so the same pairing holds on both sides. Returns the partner of each crossing.
pub(crate) fn pair_crossings(aug: &Augmented) -> Vec<Option<usize>> {
  let mut order: Vec<usize> = aug.open_crossings().collect();
  order.sort_by(|&a, &b| {
    let (la, lb) = (aug.crossings[a].crossing.latitude, aug.crossings[b].crossing.latitude);
    lb.total_cmp(&la).then(a.cmp(&b))
  });

  let mut partners = vec![None; aug.crossings.len()];
  for pair in order.chunks_exact(2) {
    partners[pair[0]] = Some(pair[1]);
    partners[pair[1]] = Some(pair[0]);
  }
  if order.len() % 2 == 1 {
    log::warn!("odd number of unbridged crossings; crossing {} left unpaired", order[order.len() - 1]);
  }
  partners
}

/// Link table addressed by augmented vertex index.
#[derive(Debug, Clone, Default)]
pub(crate) struct LinkTable {
  slots: Vec<Option<Link>>,
}

impl LinkTable {
  /// Registers every split and pole vertex of `aug`. A paired exit vertex jumps to its
  /// partner's entry vertex and a paired entry vertex to its partner's exit vertex, which
  /// are the two ends of the meridian stretch on each side.
  pub fn build(aug: &Augmented, partners: &[Option<usize>]) -> Self {
    let mut slots = vec![None; aug.vertices.len()];
    for (i, vertex) in aug.vertices.iter().enumerate() {
      slots[i] = match vertex.kind {
        VertexKind::Original(_) => None,
        VertexKind::Pole { crossing } => Some(Link {
          crossing,
          jump_to: None,
          visited: false,
          is_pole_bridge: true,
        }),
        VertexKind::Split { crossing, exit, .. } => {
          let bridged = aug.crossings[crossing].bridged;
          let jump_to = if bridged {
            None
          } else {
            partners[crossing].map(|p| {
              let partner = &aug.crossings[p];
              if exit {
                partner.entry_at
              } else {
                partner.exit_at
              }
            })
          };
          Some(Link {
            crossing,
            jump_to,
            visited: false,
            is_pole_bridge: bridged,
          })
        }
      };
    }
    Self { slots }
  }

  pub fn get(&self, index: usize) -> Option<&Link> {
    self.slots.get(index).and_then(Option::as_ref)
  }

  /// Where the walk continues after leaving `index`, if `index` is a paired exit vertex.
  pub fn jump_from(&self, aug: &Augmented, index: usize) -> Option<usize> {
    match aug.vertices[index].kind {
      VertexKind::Split { exit: true, .. } => self.get(index).and_then(|l| l.jump_to),
      _ => None,
    }
  }

  pub fn mark_visited(&mut self, index: usize) {
    if let Some(Some(link)) = self.slots.get_mut(index) {
      link.visited = true;
    }
  }

  /// Builds one diagnostic table per output polygon.
  ///
  /// `placements[i]` is where augmented vertex `i` ended up. Each split vertex links to
  /// its twin at the same latitude on the opposite side; bridge vertices link nowhere.
  pub fn export(&self, aug: &Augmented, placements: &[Option<VertexRef>], polygon_count: usize) -> Vec<Vec<LinkEntry>> {
    let mut tables = vec![Vec::new(); polygon_count];
    for (i, slot) in self.slots.iter().enumerate() {
      let (Some(link), Some(at)) = (slot, placements.get(i).copied().flatten()) else {
        continue;
      };
      let slots = &aug.crossings[link.crossing];
      let link_to = if link.is_pole_bridge {
        None
      } else {
        let twin = if i == slots.exit_at { slots.entry_at } else { slots.exit_at };
        placements.get(twin).copied().flatten()
      };
      tables[at.polygon].push(LinkEntry {
        original_index: slots.crossing.edge_index,
        new_index: at.index,
        link_to,
        visited: link.visited,
        is_pole_bridge: link.is_pole_bridge,
      });
    }
    for table in &mut tables {
      table.sort_by_key(|e| e.new_index);
    }
    tables
  }
}
