mod cell;
mod coord;
mod grid;
mod patterns;
pub mod automaton;
pub mod cluster;

pub use cell::Cell;
pub use coord::{CellRef, NEIGHBOR_OFFSETS};
pub use grid::Grid;
pub use patterns::{Pattern, presets};
pub use automaton::GridAutomaton;
pub use cluster::{Organism, cluster, cluster_with};
