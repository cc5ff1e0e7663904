use super::aggregate::{InteractionPair, ScoreAggregator, ScoreResult};
use super::energy::{DEFAULT_DIELECTRIC, EnergyCalculationError, PairPotential};
use super::params::{AtomRecord, ForceFieldTable};
use crate::core::models::atom::AtomInput;
use crate::core::models::ids::AtomId;
use crate::core::spatial::neighbors::{NeighborError, NeighborFinder, NeighborPair, SearchStrategy};
use nalgebra::Point3;
use thiserror::Error;
use tracing::{debug, warn};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

#[derive(Debug, Error, PartialEq)]
pub enum ScoringError {
    #[error(transparent)]
    Neighbor(#[from] NeighborError),
    #[error("Atoms {a} and {b} are separated by a degenerate distance ({distance})")]
    DegenerateGeometry { a: AtomId, b: AtomId, distance: f64 },
    #[error("Atom {0} refers to a parameter entry that is not part of this force field")]
    ForeignParameter(AtomId),
}

/// What to do with a pair of distinct atoms sitting at zero separation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DegeneratePolicy {
    /// Warn and leave the pair out of the result.
    #[default]
    Skip,
    /// Abort the scoring call.
    Fail,
}

struct ScorableAtom<'t> {
    id: AtomId,
    position: Point3<f64>,
    record: &'t AtomRecord,
}

/// Scores atom sets against one force field table.
///
/// The distance cutoff defaults to the table's own cutoff; every call is a pure
/// read of the table and the inputs.
#[derive(Debug, Clone)]
pub struct Scorer<'a> {
    table: &'a ForceFieldTable,
    potential: PairPotential,
    strategy: SearchStrategy,
    on_degenerate: DegeneratePolicy,
}

impl<'a> Scorer<'a> {
    pub fn new(table: &'a ForceFieldTable) -> Self {
        Self {
            table,
            potential: PairPotential::new(table.distance_cutoff(), DEFAULT_DIELECTRIC),
            strategy: SearchStrategy::default(),
            on_degenerate: DegeneratePolicy::default(),
        }
    }

    pub fn with_cutoff(mut self, cutoff: f64) -> Self {
        self.potential = PairPotential::new(cutoff, self.potential.dielectric());
        self
    }

    pub fn with_dielectric(mut self, dielectric: f64) -> Self {
        self.potential = PairPotential::new(self.potential.cutoff(), dielectric);
        self
    }

    pub fn with_strategy(mut self, strategy: SearchStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_degenerate_policy(mut self, policy: DegeneratePolicy) -> Self {
        self.on_degenerate = policy;
        self
    }

    pub fn cutoff(&self) -> f64 {
        self.potential.cutoff()
    }

    /// Scores every pair of distinct scorable atoms within `atoms`.
    pub fn score_intra(&self, atoms: &[AtomInput]) -> Result<ScoreResult, ScoringError> {
        let scorable = self.scorable(atoms)?;
        let positions: Vec<_> = scorable.iter().map(|atom| atom.position).collect();
        let finder = NeighborFinder::intra(&positions, self.cutoff(), self.strategy)?;
        self.score_pairs(&scorable, &finder)
    }

    /// Scores only pairs spanning two different groups.
    pub fn score_inter(&self, groups: &[&[AtomInput]]) -> Result<ScoreResult, ScoringError> {
        let scorable_groups = groups
            .iter()
            .map(|group| self.scorable(group))
            .collect::<Result<Vec<_>, _>>()?;
        let positions: Vec<Vec<_>> = scorable_groups
            .iter()
            .map(|group| group.iter().map(|atom| atom.position).collect())
            .collect();
        let position_groups: Vec<&[Point3<f64>]> = positions.iter().map(Vec::as_slice).collect();

        let finder = NeighborFinder::inter(&position_groups, self.cutoff(), self.strategy)?;
        let scorable: Vec<_> = scorable_groups.into_iter().flatten().collect();
        self.score_pairs(&scorable, &finder)
    }

    fn scorable(&self, atoms: &[AtomInput]) -> Result<Vec<ScorableAtom<'a>>, ScoringError> {
        atoms
            .iter()
            .filter_map(|atom| atom.scorable_key().map(|key| (atom, key)))
            .map(|(atom, key)| {
                let record = self
                    .table
                    .get(key)
                    .ok_or(ScoringError::ForeignParameter(atom.id))?;
                Ok(ScorableAtom {
                    id: atom.id,
                    position: atom.position,
                    record,
                })
            })
            .collect()
    }

    fn score_pairs(
        &self,
        atoms: &[ScorableAtom<'a>],
        finder: &NeighborFinder,
    ) -> Result<ScoreResult, ScoringError> {
        debug!(
            "Scoring {} atoms with cutoff {:.3} using {:?} search.",
            atoms.len(),
            finder.cutoff(),
            finder.strategy()
        );

        #[cfg(feature = "parallel")]
        let evaluated = finder
            .par_pairs()
            .map(|pair| self.evaluate(atoms, pair))
            .collect::<Result<Vec<_>, _>>()?;

        #[cfg(not(feature = "parallel"))]
        let evaluated = finder
            .pairs()
            .map(|pair| self.evaluate(atoms, pair))
            .collect::<Result<Vec<_>, _>>()?;

        let aggregator: ScoreAggregator = evaluated.into_iter().flatten().collect();
        debug!("Recorded {} interacting pairs.", aggregator.pairs().len());
        Ok(aggregator.finish())
    }

    fn evaluate(
        &self,
        atoms: &[ScorableAtom<'a>],
        pair: NeighborPair,
    ) -> Result<Option<InteractionPair>, ScoringError> {
        let (first, second) = (&atoms[pair.i], &atoms[pair.j]);
        match self
            .potential
            .evaluate(first.record, second.record, pair.distance)
        {
            Ok(energy) => Ok(Some(InteractionPair {
                a: first.id,
                b: second.id,
                distance: pair.distance,
                energy,
            })),
            Err(EnergyCalculationError::DegenerateGeometry(distance)) => match self.on_degenerate {
                DegeneratePolicy::Skip => {
                    warn!(
                        "Skipping atoms {} and {}: degenerate separation ({}).",
                        first.id, second.id, distance
                    );
                    Ok(None)
                }
                DegeneratePolicy::Fail => Err(ScoringError::DegenerateGeometry {
                    a: first.id,
                    b: second.id,
                    distance,
                }),
            },
        }
    }
}
