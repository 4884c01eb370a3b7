//! Connected-component analysis over live cells.
//!
//! Live cells are grouped into organisms: maximal sets connected under
//! 8-neighbor adjacency. The search is a plain BFS over an implicit graph
//! whose edges come from an adjacency function, so it knows nothing about
//! how the grid is stored.

use std::collections::{HashSet, VecDeque};

use super::CellRef;

/// A maximal connected group of live cells
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Organism {
    /// 0-based, contiguous, in discovery order. Only meaningful within one clustering.
    pub id: usize,
    /// Members in BFS visiting order
    pub cells: Vec<CellRef>,
}

impl Organism {
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn contains(&self, cell: CellRef) -> bool {
        self.cells.contains(&cell)
    }

    /// Best-effort colour index. Organisms are renumbered every clustering,
    /// so the slot is not stable across generations.
    pub fn color_slot(&self, palette_len: usize) -> usize {
        if palette_len == 0 { 0 } else { self.id % palette_len }
    }
}

/// Partition live cells into organisms on a `grid_size`×`grid_size` torus
pub fn cluster(live_cells: &[CellRef], grid_size: usize) -> Vec<Organism> {
    cluster_with(live_cells, |cell| cell.neighbors(grid_size))
}

/// Breadth-first component search with a caller-supplied adjacency function
pub fn cluster_with<F, I>(live_cells: &[CellRef], adjacency: F) -> Vec<Organism>
where
    F: Fn(CellRef) -> I,
    I: IntoIterator<Item = CellRef>,
{
    let live: HashSet<CellRef> = live_cells.iter().copied().collect();
    let mut visited: HashSet<CellRef> = HashSet::with_capacity(live.len());
    let mut queue = VecDeque::new();
    let mut organisms = Vec::new();

    for &start in live_cells {
        if !visited.insert(start) {
            continue;
        }

        let mut members = Vec::new();
        queue.push_back(start);

        while let Some(cell) = queue.pop_front() {
            members.push(cell);
            for neighbor in adjacency(cell) {
                if live.contains(&neighbor) && visited.insert(neighbor) {
                    queue.push_back(neighbor);
                }
            }
        }

        organisms.push(Organism {
            id: organisms.len(),
            cells: members,
        });
    }

    organisms
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cells(coords: &[(usize, usize)]) -> Vec<CellRef> {
        coords.iter().map(|&c| CellRef::from(c)).collect()
    }

    fn sorted(org: &Organism) -> Vec<CellRef> {
        let mut members = org.cells.clone();
        members.sort();
        members
    }

    #[test]
    fn test_empty_input_yields_no_organisms() {
        assert!(cluster(&[], 10).is_empty());
    }

    #[test]
    fn test_two_separate_groups() {
        let organisms = cluster(&cells(&[(0, 0), (0, 1), (5, 5)]), 10);
        assert_eq!(organisms.len(), 2);
        assert_eq!(sorted(&organisms[0]), cells(&[(0, 0), (0, 1)]));
        assert_eq!(sorted(&organisms[1]), cells(&[(5, 5)]));
    }

    #[test]
    fn test_wrap_around_is_adjacent() {
        let organisms = cluster(&cells(&[(0, 0), (9, 9)]), 10);
        assert_eq!(organisms.len(), 1);
        assert_eq!(organisms[0].len(), 2);
    }

    #[test]
    fn test_component_spanning_edge_matches_interior_copy() {
        // same L-shape, once straddling the seam and once in the middle
        let seam = cluster(&cells(&[(9, 4), (0, 4), (1, 5)]), 10);
        let interior = cluster(&cells(&[(4, 4), (5, 4), (6, 5)]), 10);
        assert_eq!(seam.len(), 1);
        assert_eq!(interior.len(), 1);
        assert_eq!(seam[0].len(), interior[0].len());
    }

    #[test]
    fn test_isolated_cells_are_singletons() {
        let organisms = cluster(&cells(&[(1, 1), (4, 4), (7, 7)]), 10);
        assert_eq!(organisms.len(), 3);
        assert!(organisms.iter().all(|o| o.len() == 1));
    }

    #[test]
    fn test_ids_follow_discovery_order() {
        let organisms = cluster(&cells(&[(5, 5), (0, 0), (5, 6)]), 10);
        let ids: Vec<_> = organisms.iter().map(|o| o.id).collect();
        assert_eq!(ids, vec![0, 1]);
        assert!(organisms[0].contains(CellRef::new(5, 5)));
        assert!(organisms[0].contains(CellRef::new(5, 6)));
        assert_eq!(organisms[1].cells, cells(&[(0, 0)]));
    }

    #[test]
    fn test_partition_covers_every_cell_once() {
        let input = cells(&[(0, 0), (1, 1), (2, 2), (6, 0), (6, 1), (3, 8), (9, 3), (0, 3)]);
        let organisms = cluster(&input, 10);
        let mut covered: Vec<_> = organisms.iter().flat_map(|o| o.cells.iter().copied()).collect();
        covered.sort();
        let mut expected = input.clone();
        expected.sort();
        assert_eq!(covered, expected);
    }

    #[test]
    fn test_duplicate_input_collapsed() {
        let organisms = cluster(&cells(&[(2, 2), (2, 2)]), 10);
        assert_eq!(organisms.len(), 1);
        assert_eq!(organisms[0].len(), 1);
    }

    #[test]
    fn test_custom_adjacency_without_diagonals() {
        let von_neumann = |c: CellRef| {
            [(1i64, 0i64), (-1, 0), (0, 1), (0, -1)]
                .into_iter()
                .map(move |(dx, dy)| CellRef::wrapped(c.x as i64 + dx, c.y as i64 + dy, 10))
        };
        let organisms = cluster_with(&cells(&[(0, 0), (1, 1)]), von_neumann);
        assert_eq!(organisms.len(), 2);
    }

    #[test]
    fn test_color_slot_cycles_palette() {
        let org = Organism { id: 7, cells: cells(&[(0, 0)]) };
        assert_eq!(org.color_slot(5), 2);
        assert_eq!(org.color_slot(0), 0);
    }
}
