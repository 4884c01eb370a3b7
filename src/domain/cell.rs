/// State of a single grid position.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum Cell {
    #[default]
    Dead,
    Alive,
}

impl Cell {
    /// Check if the cell is currently alive
    pub const fn is_alive(self) -> bool {
        matches!(self, Cell::Alive)
    }

    /// Numeric form used when summing neighborhoods (alive = 1, dead = 0)
    pub const fn as_count(self) -> u8 {
        match self {
            Cell::Alive => 1,
            Cell::Dead => 0,
        }
    }

    /// B3/S23: a live cell survives with 2 or 3 neighbors,
    /// a dead cell is born with exactly 3, everything else is dead.
    pub const fn evolve(self, neighbors: u8) -> Self {
        match (self, neighbors) {
            (Cell::Alive, 2 | 3) => Cell::Alive,
            (Cell::Dead, 3) => Cell::Alive,
            _ => Cell::Dead,
        }
    }
}

impl From<bool> for Cell {
    fn from(alive: bool) -> Self {
        if alive { Cell::Alive } else { Cell::Dead }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_live_cell_dies_of_isolation_and_crowding() {
        for n in [0, 1, 4, 5, 8] {
            assert_eq!(Cell::Alive.evolve(n), Cell::Dead, "neighbors = {n}");
        }
    }

    #[test]
    fn test_live_cell_survives_with_two_or_three() {
        assert_eq!(Cell::Alive.evolve(2), Cell::Alive);
        assert_eq!(Cell::Alive.evolve(3), Cell::Alive);
    }

    #[test]
    fn test_dead_cell_born_only_with_three() {
        assert_eq!(Cell::Dead.evolve(3), Cell::Alive);
        for n in [0, 1, 2, 4, 6, 8] {
            assert_eq!(Cell::Dead.evolve(n), Cell::Dead, "neighbors = {n}");
        }
    }

    #[test]
    fn test_from_bool_and_count() {
        assert_eq!(Cell::from(true), Cell::Alive);
        assert_eq!(Cell::from(false).as_count(), 0);
        assert_eq!(Cell::Alive.as_count(), 1);
    }
}
