use super::{Cell, Grid};

/// A named shape that can be stamped onto the torus
#[derive(Clone, Debug)]
pub struct Pattern {
    pub name: &'static str,
    pub description: &'static str,
    pub width: usize,
    pub height: usize,
    pub cells: Vec<(usize, usize)>,  // Offsets of live cells from the top-left corner
}

impl Pattern {
    /// Create a new pattern from alive cell coordinates
    pub fn new(name: &'static str, description: &'static str, cells: Vec<(usize, usize)>) -> Self {
        let width = cells.iter().map(|(x, _)| *x).max().map_or(0, |w| w + 1);
        let height = cells.iter().map(|(_, y)| *y).max().map_or(0, |h| h + 1);
        Self { name, description, width, height, cells }
    }

    /// Stamp the pattern with its top-left corner at `(x, y)`; wraps at the edges
    pub fn place_on(&self, grid: &mut Grid, x: i64, y: i64) {
        for &(dx, dy) in &self.cells {
            grid.set(x + dx as i64, y + dy as i64, Cell::Alive);
        }
    }

    /// Top-left corner that centres the pattern on a `size`×`size` board
    pub fn centered_origin(&self, size: usize) -> (i64, i64) {
        (
            (size as i64 - self.width as i64) / 2,
            (size as i64 - self.height as i64) / 2,
        )
    }
}

/// Small library of classic seeds
pub mod presets {
    use super::*;

    /// Glider - moves diagonally, crosses the seam of the torus
    pub fn glider() -> Pattern {
        Pattern::new(
            "Glider",
            "Moves diagonally (period 4)",
            vec![
                (1, 0),
                (2, 1),
                (0, 2), (1, 2), (2, 2),
            ]
        )
    }

    /// Blinker - period 2 oscillator
    pub fn blinker() -> Pattern {
        Pattern::new(
            "Blinker",
            "Oscillator (period 2)",
            vec![(0, 0), (1, 0), (2, 0)]
        )
    }

    pub fn toad() -> Pattern {
        Pattern::new(
            "Toad",
            "Oscillator (period 2)",
            vec![
                (1, 0), (2, 0), (3, 0),
                (0, 1), (1, 1), (2, 1),
            ]
        )
    }

    /// Beacon - two blocks that merge and split every generation
    pub fn beacon() -> Pattern {
        Pattern::new(
            "Beacon",
            "Two organisms merging and splitting (period 2)",
            vec![
                (0, 0), (1, 0),
                (0, 1),
                (3, 2),
                (2, 3), (3, 3),
            ]
        )
    }

    pub fn block() -> Pattern {
        Pattern::new(
            "Block",
            "Still life",
            vec![
                (0, 0), (1, 0),
                (0, 1), (1, 1),
            ]
        )
    }

    /// R-pentomino - long-lived methuselah, good for watching organisms split
    pub fn r_pentomino() -> Pattern {
        Pattern::new(
            "R-pentomino",
            "Methuselah - stabilizes at gen 1103",
            vec![
                (1, 0), (2, 0),
                (0, 1), (1, 1),
                (1, 2),
            ]
        )
    }

    /// Lightweight Spaceship (LWSS)
    pub fn lwss() -> Pattern {
        Pattern::new(
            "LWSS",
            "Lightweight Spaceship (period 4)",
            vec![
                (1, 0), (4, 0),
                (0, 1),
                (0, 2), (4, 2),
                (0, 3), (1, 3), (2, 3), (3, 3),
            ]
        )
    }

    /// Get all available patterns
    pub fn all_patterns() -> Vec<Pattern> {
        vec![
            glider(),
            blinker(),
            toad(),
            beacon(),
            block(),
            r_pentomino(),
            lwss(),
        ]
    }
}
