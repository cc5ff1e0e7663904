use super::grid::CellGrid;
use itertools::{Either, Itertools};
use nalgebra::Point3;
use thiserror::Error;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

#[derive(Debug, Error, PartialEq, Clone, Copy)]
pub enum NeighborError {
    #[error("Neighbor search cutoff must be finite and positive, got {0}")]
    InvalidCutoff(f64),
}

/// How candidate pairs are generated before the exact distance filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchStrategy {
    /// Sparse cell grid with half-shell traversal.
    #[default]
    CellGrid,
    /// Every pair is a candidate.
    Exhaustive,
}

/// An unordered atom pair within the cutoff, lower flat index first.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NeighborPair {
    pub i: usize,
    pub j: usize,
    pub distance: f64,
}

/// Enumerates every atom pair whose separation is at most the cutoff.
///
/// Atoms are addressed by flat index. In inter mode the groups are laid out one
/// after another, so the first atom of group `g` follows the last atom of group
/// `g - 1`, and only pairs spanning two different groups are produced.
#[derive(Debug, Clone)]
pub struct NeighborFinder {
    positions: Vec<Point3<f64>>,
    group_of: Option<Vec<usize>>,
    cutoff: f64,
    grid: Option<CellGrid>,
}

impl NeighborFinder {
    /// All unordered pairs `i != j` within one atom set.
    pub fn intra(
        positions: &[Point3<f64>],
        cutoff: f64,
        strategy: SearchStrategy,
    ) -> Result<Self, NeighborError> {
        Self::new(positions.to_vec(), None, cutoff, strategy)
    }

    /// Cross-group pairs only, across two or more disjoint atom sets.
    pub fn inter(
        groups: &[&[Point3<f64>]],
        cutoff: f64,
        strategy: SearchStrategy,
    ) -> Result<Self, NeighborError> {
        let positions = groups.iter().flat_map(|group| group.iter().copied()).collect();
        let group_of = groups
            .iter()
            .enumerate()
            .flat_map(|(g, group)| std::iter::repeat_n(g, group.len()))
            .collect();
        Self::new(positions, Some(group_of), cutoff, strategy)
    }

    fn new(
        positions: Vec<Point3<f64>>,
        group_of: Option<Vec<usize>>,
        cutoff: f64,
        strategy: SearchStrategy,
    ) -> Result<Self, NeighborError> {
        if !cutoff.is_finite() || cutoff <= 0.0 {
            return Err(NeighborError::InvalidCutoff(cutoff));
        }
        let grid = match strategy {
            SearchStrategy::CellGrid => Some(CellGrid::build(&positions, cutoff)),
            SearchStrategy::Exhaustive => None,
        };
        Ok(Self {
            positions,
            group_of,
            cutoff,
            grid,
        })
    }

    pub fn cutoff(&self) -> f64 {
        self.cutoff
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn strategy(&self) -> SearchStrategy {
        match self.grid {
            Some(_) => SearchStrategy::CellGrid,
            None => SearchStrategy::Exhaustive,
        }
    }

    /// Lazily yields the pairs, one grid cell (or one leading atom) at a time.
    pub fn pairs(&self) -> impl Iterator<Item = NeighborPair> + '_ {
        match &self.grid {
            Some(grid) => Either::Left(
                (0..grid.cell_count()).flat_map(move |slot| self.cell_batch(grid, slot)),
            ),
            None => Either::Right(
                (0..self.positions.len())
                    .tuple_combinations()
                    .filter_map(move |(i, j)| self.check(i, j)),
            ),
        }
    }

    /// Parallel counterpart of [`NeighborFinder::pairs`]; collecting it gives
    /// the same pairs in the same order.
    #[cfg(feature = "parallel")]
    pub fn par_pairs(&self) -> impl ParallelIterator<Item = NeighborPair> + '_ {
        let n = self.positions.len();
        match &self.grid {
            Some(grid) => rayon::iter::Either::Left(
                (0..grid.cell_count())
                    .into_par_iter()
                    .flat_map_iter(move |slot| self.cell_batch(grid, slot)),
            ),
            None => rayon::iter::Either::Right((0..n).into_par_iter().flat_map_iter(move |i| {
                (i + 1..n).filter_map(move |j| self.check(i, j))
            })),
        }
    }

    fn cell_batch(&self, grid: &CellGrid, slot: usize) -> Vec<NeighborPair> {
        let mut batch = Vec::new();
        grid.for_each_candidate(slot, |a, b| {
            let (i, j) = if a < b { (a, b) } else { (b, a) };
            if let Some(pair) = self.check(i, j) {
                batch.push(pair);
            }
        });
        batch
    }

    #[inline]
    fn check(&self, i: usize, j: usize) -> Option<NeighborPair> {
        if let Some(group_of) = &self.group_of {
            if group_of[i] == group_of[j] {
                return None;
            }
        }
        let distance = nalgebra::distance(&self.positions[i], &self.positions[j]);
        (distance <= self.cutoff).then_some(NeighborPair { i, j, distance })
    }
}
