//! Owner of the current generation.
//!
//! The automaton hands out the next generation as a fresh [`Grid`] and only
//! replaces its own state when the caller commits it, so the logical grid is
//! always a complete, consistent generation.

use rand::SeedableRng;
use rand::rngs::StdRng;

use super::{Cell, CellRef, Grid, Pattern};
use crate::error::{LifeError, Result};

/// Boards at least this large are evolved with rayon
const PARALLEL_THRESHOLD: usize = 128 * 128;

/// Conway's Life on a square torus
#[derive(Clone, Debug)]
pub struct GridAutomaton {
    grid: Grid,
    generation: u64,
}

impl GridAutomaton {
    /// Random board where each cell is alive with probability `density`
    pub fn initialize(size: usize, density: f64) -> Result<Self> {
        validate(size, density)?;
        let mut rng = rand::rng();
        Self::from_grid(Grid::random(size, density, &mut rng))
    }

    /// Reproducible variant of [`GridAutomaton::initialize`]
    pub fn initialize_seeded(size: usize, density: f64, seed: u64) -> Result<Self> {
        validate(size, density)?;
        let mut rng = StdRng::seed_from_u64(seed);
        Self::from_grid(Grid::random(size, density, &mut rng))
    }

    /// Wrap an existing board as generation 0
    pub fn from_grid(grid: Grid) -> Result<Self> {
        if grid.size() == 0 {
            return Err(LifeError::invalid_config("grid size must be positive"));
        }
        Ok(Self { grid, generation: 0 })
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn size(&self) -> usize {
        self.grid.size()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn population(&self) -> usize {
        self.grid.population()
    }

    pub fn live_cells(&self) -> Vec<CellRef> {
        self.grid.live_cells()
    }

    pub fn cell_at(&self, x: i64, y: i64) -> Cell {
        self.grid.cell_at(x, y)
    }

    pub fn live_neighbor_count(&self, x: i64, y: i64) -> u8 {
        self.grid.live_neighbor_count(x, y)
    }

    /// Compute the following generation without touching the current one
    pub fn next_generation(&self) -> Grid {
        if self.grid.size() * self.grid.size() >= PARALLEL_THRESHOLD {
            self.grid.next_generation_parallel()
        } else {
            self.grid.next_generation()
        }
    }

    /// Cells that differ between two boards, with their new state
    pub fn diff(old: &Grid, new: &Grid) -> Result<Vec<(usize, usize, Cell)>> {
        old.diff(new)
    }

    /// Replace the current board with a previously computed successor
    pub fn commit(&mut self, next: Grid) -> Result<()> {
        if next.size() != self.grid.size() {
            return Err(LifeError::DimensionMismatch {
                expected: self.grid.size(),
                found: next.size(),
            });
        }
        self.grid = next;
        self.generation += 1;
        Ok(())
    }

    /// Stamp a pattern onto the board with its top-left corner at `(x, y)`.
    /// Placement wraps around the torus.
    pub fn place_pattern(&mut self, pattern: &Pattern, x: i64, y: i64) {
        pattern.place_on(&mut self.grid, x, y);
    }
}

fn validate(size: usize, density: f64) -> Result<()> {
    if size == 0 {
        return Err(LifeError::invalid_config("grid size must be positive"));
    }
    if !(0.0..=1.0).contains(&density) {
        return Err(LifeError::invalid_config(format!(
            "density must be within [0, 1], got {density}"
        )));
    }
    Ok(())
}
