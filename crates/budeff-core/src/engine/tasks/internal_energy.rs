use crate::core::forcefield::aggregate::ScoreResult;
use crate::core::forcefield::params::ForceFieldTable;
use crate::core::models::atom::AtomInput;
use crate::engine::config::ScoringConfig;
use crate::engine::error::EngineError;
use tracing::{info, instrument};

#[instrument(skip_all, name = "internal_energy_task")]
pub fn run(
    atoms: &[AtomInput],
    table: &ForceFieldTable,
    config: &ScoringConfig,
) -> Result<ScoreResult, EngineError> {
    let scorable = atoms.iter().filter(|atom| atom.scorable_key().is_some()).count();
    info!(
        "Scoring internal energy of {} atoms ({} scorable) with force field '{}'.",
        atoms.len(),
        scorable,
        table.name()
    );

    let result = config.scorer(table).score_intra(atoms)?;

    info!(
        "Internal energy: {:.4} over {} pairs.",
        result.total_energy,
        result.pairs.len()
    );
    Ok(result)
}
