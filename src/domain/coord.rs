/// Offsets of the 8 surrounding positions (Moore neighborhood)
pub const NEIGHBOR_OFFSETS: [(i64, i64); 8] = [
    (-1, -1), (0, -1), (1, -1),
    (-1, 0),           (1, 0),
    (-1, 1),  (0, 1),  (1, 1),
];

/// A grid position, compared and hashed by value.
/// Always normalized to `0 <= x, y < size` for the grid it belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellRef {
    pub x: usize,
    pub y: usize,
}

impl CellRef {
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// Build a reference from arbitrary signed coordinates, wrapping onto the torus
    pub fn wrapped(x: i64, y: i64, size: usize) -> Self {
        let n = size as i64;
        Self {
            x: x.rem_euclid(n) as usize,
            y: y.rem_euclid(n) as usize,
        }
    }

    /// Flattened row-major index (`y * size + x`)
    #[inline]
    pub const fn index(self, size: usize) -> usize {
        self.y * size + self.x
    }

    /// Inverse of [`CellRef::index`]
    #[inline]
    pub const fn from_index(index: usize, size: usize) -> Self {
        Self {
            x: index % size,
            y: index / size,
        }
    }

    /// Toroidal adjacency: the 8 neighbors of this cell on a `size`×`size` torus.
    ///
    /// On grids smaller than 3 the same position can show up more than once
    /// (and a cell can be its own neighbor on a 1×1 torus).
    pub fn neighbors(self, size: usize) -> impl Iterator<Item = CellRef> {
        let (x, y) = (self.x as i64, self.y as i64);
        NEIGHBOR_OFFSETS
            .into_iter()
            .map(move |(dx, dy)| CellRef::wrapped(x + dx, y + dy, size))
    }
}

impl From<(usize, usize)> for CellRef {
    fn from((x, y): (usize, usize)) -> Self {
        Self { x, y }
    }
}
