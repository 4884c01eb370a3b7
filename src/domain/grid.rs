use super::{Cell, CellRef};
use crate::error::{LifeError, Result};
use rand::Rng;
use rayon::prelude::*;

/// Square toroidal grid of cells.
/// Updates are functional: evolution returns a new grid and leaves `self` alone.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    size: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Create a new grid with all cells initially dead.
    /// `size` must be positive; coordinate lookups on an empty grid panic.
    pub fn new(size: usize) -> Self {
        Self {
            size,
            cells: vec![Cell::Dead; size * size],
        }
    }

    /// Fill a grid where every cell is alive independently with probability `density`.
    /// Callers validate `density`; values outside [0, 1] are clamped.
    pub fn random<R: Rng>(size: usize, density: f64, rng: &mut R) -> Self {
        let p = if density.is_nan() { 0.0 } else { density.clamp(0.0, 1.0) };
        let cells = (0..size * size)
            .map(|_| Cell::from(rng.random_bool(p)))
            .collect();
        Self { size, cells }
    }

    /// Build a grid with exactly the given cells alive (coordinates wrap)
    pub fn from_live_cells(size: usize, live: impl IntoIterator<Item = (usize, usize)>) -> Self {
        let mut grid = Self::new(size);
        for (x, y) in live {
            grid.set(x as i64, y as i64, Cell::Alive);
        }
        grid
    }

    /// Side length N
    pub const fn size(&self) -> usize {
        self.size
    }

    /// Cell at toroidal coordinates. Any integer pair is valid.
    pub fn cell_at(&self, x: i64, y: i64) -> Cell {
        self.cells[CellRef::wrapped(x, y, self.size).index(self.size)]
    }

    /// Cell at an already-normalized reference
    #[inline]
    pub fn get(&self, cell: CellRef) -> Cell {
        self.cells[cell.index(self.size)]
    }

    /// Set cell at toroidal coordinates (used for seeding and painting)
    pub fn set(&mut self, x: i64, y: i64, cell: Cell) {
        let idx = CellRef::wrapped(x, y, self.size).index(self.size);
        self.cells[idx] = cell;
    }

    /// Number of live cells among the 8 toroidal neighbors
    pub fn live_neighbor_count(&self, x: i64, y: i64) -> u8 {
        CellRef::wrapped(x, y, self.size)
            .neighbors(self.size)
            .map(|n| self.get(n).as_count())
            .sum()
    }

    fn next_cell(&self, index: usize) -> Cell {
        let CellRef { x, y } = CellRef::from_index(index, self.size);
        let neighbors = self.live_neighbor_count(x as i64, y as i64);
        self.cells[index].evolve(neighbors)
    }

    /// Pure functional evolution - returns the next generation (serial)
    pub fn next_generation(&self) -> Self {
        let cells = (0..self.cells.len()).map(|i| self.next_cell(i)).collect();
        Self { size: self.size, cells }
    }

    /// Same as [`Grid::next_generation`], cells evaluated in parallel with rayon.
    /// Worth it once the grid has a few tens of thousands of cells.
    pub fn next_generation_parallel(&self) -> Self {
        let cells = (0..self.cells.len())
            .into_par_iter()
            .map(|i| self.next_cell(i))
            .collect();
        Self { size: self.size, cells }
    }

    /// Positions whose state differs between `self` and `other`, with the new state,
    /// in row-major order.
    pub fn diff(&self, other: &Grid) -> Result<Vec<(usize, usize, Cell)>> {
        if self.size != other.size {
            return Err(LifeError::DimensionMismatch {
                expected: self.size,
                found: other.size,
            });
        }
        Ok(self
            .cells
            .iter()
            .zip(&other.cells)
            .enumerate()
            .filter(|(_, (old, new))| old != new)
            .map(|(i, (_, &new))| {
                let CellRef { x, y } = CellRef::from_index(i, self.size);
                (x, y, new)
            })
            .collect())
    }

    /// Count of live cells
    pub fn population(&self) -> usize {
        self.cells.iter().filter(|c| c.is_alive()).count()
    }

    /// Live positions in row-major order
    pub fn live_cells(&self) -> Vec<CellRef> {
        self.iter_cells()
            .filter(|(_, cell)| cell.is_alive())
            .map(|(pos, _)| pos)
            .collect()
    }

    /// Iterate over all cells with their positions
    pub fn iter_cells(&self) -> impl Iterator<Item = (CellRef, Cell)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(|(i, &cell)| (CellRef::from_index(i, self.size), cell))
    }
}
