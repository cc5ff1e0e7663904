use crate::core::forcefield::aggregate::ScoreResult;
use crate::core::forcefield::params::ForceFieldTable;
use crate::core::models::atom::AtomInput;
use crate::engine::config::ScoringConfig;
use crate::engine::error::EngineError;
use tracing::{info, instrument, warn};

#[instrument(skip_all, name = "interaction_energy_task")]
pub fn run(
    groups: &[&[AtomInput]],
    table: &ForceFieldTable,
    config: &ScoringConfig,
) -> Result<ScoreResult, EngineError> {
    if groups.len() < 2 {
        warn!(
            "Interaction energy requested for {} group(s); no cross-group pairs exist.",
            groups.len()
        );
    }
    info!(
        "Scoring interaction energy between {} groups ({} atoms) with force field '{}'.",
        groups.len(),
        groups.iter().map(|group| group.len()).sum::<usize>(),
        table.name()
    );

    let result = config.scorer(table).score_inter(groups)?;

    info!(
        "Interaction energy: {:.4} over {} pairs.",
        result.total_energy,
        result.pairs.len()
    );
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Point3;

    fn table() -> ForceFieldTable {
        ForceFieldTable::from_json_str(
            "ff",
            r#"{"WLD": {
                "N": ["N", 1.7, 1.1, 0.6, 1.5, 0.5, 0.5, 0.0],
                "O": ["O", 1.6, 1.1, 0.6, 1.5, -0.5, 0.5, 0.0]
            }}"#,
        )
        .unwrap()
    }

    #[test]
    fn run_only_counts_cross_group_pairs() {
        let table = table();
        let n = table.lookup("LYS", "N").ok();
        let o = table.lookup("ASP", "O").ok();
        let first = [
            AtomInput::new(0, Point3::new(0.0, 0.0, 0.0), n),
            AtomInput::new(1, Point3::new(1.5, 0.0, 0.0), n),
        ];
        let second = [AtomInput::new(2, Point3::new(4.0, 0.0, 0.0), o)];

        let result = run(&[&first[..], &second[..]], &table, &ScoringConfig::default()).unwrap();

        assert_eq!(result.pairs.len(), 2);
        assert!(result.charge < 0.0);
        assert_eq!(result.desolvation, 0.0);
    }

    #[test]
    fn single_group_has_no_interaction() {
        let table = table();
        let n = table.lookup("LYS", "N").ok();
        let only = [
            AtomInput::new(0, Point3::new(0.0, 0.0, 0.0), n),
            AtomInput::new(1, Point3::new(1.5, 0.0, 0.0), n),
        ];

        let result = run(&[&only[..]], &table, &ScoringConfig::default()).unwrap();

        assert!(result.pairs.is_empty());
        assert_eq!(result.total_energy, 0.0);
    }
}
