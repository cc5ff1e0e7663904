use nalgebra::Point3;
use std::collections::{BTreeMap, HashMap};

/// Integer coordinates of one grid cell.
pub type CellIndex = [i64; 3];

/// Relative padding applied to the cell edge so that floor rounding can never
/// separate two atoms within the cutoff by more than one cell.
const CELL_PADDING: f64 = 1e-9;

/// The 13 neighbour offsets that are lexicographically greater than `(0, 0, 0)`.
///
/// Visiting the home cell plus these offsets covers every adjacent cell pair
/// exactly once.
#[rustfmt::skip]
const FORWARD_NEIGHBORS: [(i64, i64, i64); 13] = [
    (0, 0, 1),
    (0, 1, -1), (0, 1, 0), (0, 1, 1),
    (1, -1, -1), (1, -1, 0), (1, -1, 1),
    (1, 0, -1), (1, 0, 0), (1, 0, 1),
    (1, 1, -1), (1, 1, 0), (1, 1, 1),
];

/// Sparse uniform grid over a set of points. Only occupied cells are stored,
/// in sorted cell order.
#[derive(Debug, Clone)]
pub struct CellGrid {
    cell_size: f64,
    cells: Vec<(CellIndex, Vec<usize>)>,
    slots: HashMap<CellIndex, usize>,
}

impl CellGrid {
    /// Bins `positions` into cells whose edge is `cutoff` (slightly padded).
    pub fn build(positions: &[Point3<f64>], cutoff: f64) -> Self {
        let cell_size = cutoff * (1.0 + CELL_PADDING);

        let mut occupied: BTreeMap<CellIndex, Vec<usize>> = BTreeMap::new();
        for (idx, position) in positions.iter().enumerate() {
            occupied
                .entry(cell_of(position, cell_size))
                .or_default()
                .push(idx);
        }

        let cells: Vec<_> = occupied.into_iter().collect();
        let slots = cells
            .iter()
            .enumerate()
            .map(|(slot, (cell, _))| (*cell, slot))
            .collect();

        Self {
            cell_size,
            cells,
            slots,
        }
    }

    pub fn cell_size(&self) -> f64 {
        self.cell_size
    }

    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    pub fn cell(&self, slot: usize) -> (CellIndex, &[usize]) {
        let (cell, members) = &self.cells[slot];
        (*cell, members)
    }

    /// Calls `visit` with every candidate pair owned by the cell at `slot`:
    /// pairs inside the cell, then pairs against each forward neighbour.
    ///
    /// Taken over all slots, each unordered pair of points in the same or
    /// adjacent cells is visited exactly once.
    pub fn for_each_candidate(&self, slot: usize, mut visit: impl FnMut(usize, usize)) {
        let (home, members) = &self.cells[slot];

        for (a, &i) in members.iter().enumerate() {
            for &j in &members[a + 1..] {
                visit(i, j);
            }
        }

        for &(dx, dy, dz) in &FORWARD_NEIGHBORS {
            let Some(neighbor) = offset(home, dx, dy, dz) else {
                continue;
            };
            let Some(&neighbor_slot) = self.slots.get(&neighbor) else {
                continue;
            };
            let others = &self.cells[neighbor_slot].1;
            for &i in members {
                for &j in others {
                    visit(i, j);
                }
            }
        }
    }
}

fn cell_of(position: &Point3<f64>, cell_size: f64) -> CellIndex {
    [
        (position.x / cell_size).floor() as i64,
        (position.y / cell_size).floor() as i64,
        (position.z / cell_size).floor() as i64,
    ]
}

fn offset(cell: &CellIndex, dx: i64, dy: i64, dz: i64) -> Option<CellIndex> {
    Some([
        cell[0].checked_add(dx)?,
        cell[1].checked_add(dy)?,
        cell[2].checked_add(dz)?,
    ])
}
