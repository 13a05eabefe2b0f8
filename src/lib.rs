#![deny(clippy::all)] // Enforce clippy lints
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)] // Often a matter of taste
#![allow(clippy::must_use_candidate)] // For functions where side effects are intended
#![allow(clippy::float_cmp)] // Split vertices sit exactly on ±180 by construction
#![allow(clippy::similar_names)] // Can be common in math-heavy code

//! `xs-dateline` splits latitude/longitude rings for rendering on a virtual globe.
//!
//! A ring whose edges jump across the ±180° antimeridian, or which loops around a pole,
//! cannot be drawn directly in a single longitude range. [`split`] rewrites such a ring
//! into simple rings confined to `[-180, 180]`, and reports which pole, if any, the ring
//! enclosed. Each ring is split on its own: a polygon's boundary and its holes are
//! independent calls (see [`split_rings`]).

// Declare modules
pub mod constants;
mod location;
pub mod splitter;
pub mod types;

// Re-export key public types and functions for easier use
pub use splitter::{
  classify_pole, edge_crosses_antimeridian, find_crossings, locations_cross_antimeridian, meridian_intersection, split,
  split_rings, split_vertices, split_with_options, try_split,
};
pub use types::{
  Crossing, LinkEntry, Location, Pole, PoleRule, Ring, Side, SplitError, SplitOptions, SplitResult, VertexRef,
};
