use super::term::EnergyTerm;
use crate::core::models::ids::AtomId;
use serde::Serialize;

/// One evaluated atom pair together with its energy contribution.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct InteractionPair {
    pub a: AtomId,
    pub b: AtomId,
    pub distance: f64,
    pub energy: EnergyTerm,
}

/// Final outcome of a scoring run: per-term totals plus the pairs that produced them.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ScoreResult {
    pub total_energy: f64,
    pub steric: f64,
    pub desolvation: f64,
    pub charge: f64,
    pub pairs: Vec<InteractionPair>,
}

impl ScoreResult {
    pub fn energy(&self) -> EnergyTerm {
        EnergyTerm::new(self.steric, self.desolvation, self.charge)
    }
}

/// Running per-term sums with full provenance of every contributing pair.
///
/// Totals are always consistent with the recorded pairs: every contribution
/// goes through [`ScoreAggregator::accumulate`].
#[derive(Debug, Clone, Default)]
pub struct ScoreAggregator {
    energy: EnergyTerm,
    pairs: Vec<InteractionPair>,
}

impl ScoreAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            energy: EnergyTerm::default(),
            pairs: Vec::with_capacity(capacity),
        }
    }

    pub fn accumulate(&mut self, pair: InteractionPair) {
        self.energy += pair.energy;
        self.pairs.push(pair);
    }

    pub fn total_energy(&self) -> f64 {
        self.energy.total()
    }

    pub fn steric(&self) -> f64 {
        self.energy.steric
    }

    pub fn desolvation(&self) -> f64 {
        self.energy.desolvation
    }

    pub fn charge(&self) -> f64 {
        self.energy.charge
    }

    pub fn pairs(&self) -> &[InteractionPair] {
        &self.pairs
    }

    pub fn finish(self) -> ScoreResult {
        ScoreResult {
            total_energy: self.energy.total(),
            steric: self.energy.steric,
            desolvation: self.energy.desolvation,
            charge: self.energy.charge,
            pairs: self.pairs,
        }
    }
}

impl Extend<InteractionPair> for ScoreAggregator {
    fn extend<I: IntoIterator<Item = InteractionPair>>(&mut self, iter: I) {
        for pair in iter {
            self.accumulate(pair);
        }
    }
}

impl FromIterator<InteractionPair> for ScoreAggregator {
    fn from_iter<I: IntoIterator<Item = InteractionPair>>(iter: I) -> Self {
        let mut aggregator = Self::new();
        aggregator.extend(iter);
        aggregator
    }
}
