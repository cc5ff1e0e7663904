use crate::core::forcefield::aggregate::ScoreResult;
use crate::core::forcefield::parameterization::Parameterizer;
use crate::core::forcefield::params::ForceFieldTable;
use crate::core::forcefield::registry::ForceFieldRegistry;
use crate::core::models::atom::{AtomInput, StructureAtom};
use crate::engine::config::ScoringConfig;
use crate::engine::error::EngineError;
use crate::engine::tasks;
use std::path::Path;
use std::sync::Arc;
use tracing::{info, instrument};

/// Loads a force field from a single JSON file, or picks one table out of a
/// directory of them.
///
/// For a directory, `id` selects the table by file stem; it may be omitted only
/// when the directory holds exactly one table.
pub fn load_forcefield(path: &Path, id: Option<&str>) -> Result<Arc<ForceFieldTable>, EngineError> {
    if !path.is_dir() {
        return Ok(Arc::new(ForceFieldTable::load(path)?));
    }

    let registry = ForceFieldRegistry::load_dir(path)?;
    let available = || registry.ids().map(str::to_string).collect::<Vec<_>>();

    match id {
        Some(id) => registry.get(id).ok_or_else(|| EngineError::UnknownForceField {
            id: id.to_string(),
            available: available(),
        }),
        None if registry.len() == 1 => registry
            .ids()
            .next()
            .and_then(|only| registry.get(only))
            .ok_or_else(|| EngineError::ForceFieldNotSelected {
                available: available(),
            }),
        None => Err(EngineError::ForceFieldNotSelected {
            available: available(),
        }),
    }
}

/// Internal energy of one structure: every pair of its scorable atoms.
#[instrument(skip_all, name = "internal_energy_workflow")]
pub fn internal_energy<A: StructureAtom>(
    atoms: &[A],
    table: &ForceFieldTable,
    config: &ScoringConfig,
) -> Result<ScoreResult, EngineError> {
    info!("Assigning force field parameters to {} atoms.", atoms.len());
    let inputs = Parameterizer::new(table).prepare(atoms, 0);
    tasks::internal_energy::run(&inputs, table, config)
}

/// Interaction energy between two or more structures: cross-group pairs only.
///
/// Atom ids are assigned consecutively across the groups in the order given.
#[instrument(skip_all, name = "interaction_energy_workflow")]
pub fn interaction_energy<A: StructureAtom>(
    groups: &[&[A]],
    table: &ForceFieldTable,
    config: &ScoringConfig,
) -> Result<ScoreResult, EngineError> {
    info!("Assigning force field parameters to {} groups.", groups.len());
    let parameterizer = Parameterizer::new(table);

    let mut next_id = 0;
    let prepared: Vec<Vec<AtomInput>> = groups
        .iter()
        .map(|group| {
            let inputs = parameterizer.prepare(group, next_id);
            next_id += group.len();
            inputs
        })
        .collect();
    let group_refs: Vec<&[AtomInput]> = prepared.iter().map(Vec::as_slice).collect();

    tasks::interaction_energy::run(&group_refs, table, config)
}

/// Interaction energy between the groups that `group_of` sorts `atoms` into.
///
/// Groups are ordered by first appearance and may interleave in `atoms`. Each
/// atom keeps its index in `atoms` as its id, so reported pairs point straight
/// back at the caller's list.
#[instrument(skip_all, name = "grouped_interaction_energy_workflow")]
pub fn interaction_energy_by_group<A, K, F>(
    atoms: &[A],
    group_of: F,
    table: &ForceFieldTable,
    config: &ScoringConfig,
) -> Result<ScoreResult, EngineError>
where
    A: StructureAtom,
    K: PartialEq,
    F: Fn(&A) -> K,
{
    let mut labels: Vec<K> = Vec::new();
    let mut members: Vec<Vec<(usize, &A)>> = Vec::new();
    for (index, atom) in atoms.iter().enumerate() {
        let label = group_of(atom);
        match labels.iter().position(|known| *known == label) {
            Some(slot) => members[slot].push((index, atom)),
            None => {
                labels.push(label);
                members.push(vec![(index, atom)]);
            }
        }
    }
    info!(
        "Assigning force field parameters to {} atoms in {} groups.",
        atoms.len(),
        members.len()
    );

    let parameterizer = Parameterizer::new(table);
    let prepared: Vec<Vec<AtomInput>> = members
        .into_iter()
        .map(|group| parameterizer.prepare_indexed(group))
        .collect();
    let group_refs: Vec<&[AtomInput]> = prepared.iter().map(Vec::as_slice).collect();

    tasks::interaction_energy::run(&group_refs, table, config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::ids::AtomId;
    use nalgebra::Point3;
    use std::fs;
    use tempfile::tempdir;

    const TOLERANCE: f64 = 1e-9;

    const FF_JSON: &str = r#"{
        "KEY": ["type", "radius", "core", "well", "npnp", "charge", "solv", "reserved"],
        "ALA": {
            "CB": ["C", 1.9, 1.2, 0.5, 2.0, 0.0, 1.0, 0.0]
        },
        "WLD": {
            "N": ["N", 1.7, 1.1, 0.6, 1.5, 0.3, 0.5, 0.0],
            "CA": ["C", 1.9, 1.2, 0.5, 2.0, 0.0, 1.0, 0.0],
            "O": ["O", 1.6, 1.1, 0.6, 1.5, -0.5, 0.5, 0.0]
        }
    }"#;

    struct Atom {
        element: &'static str,
        residue: &'static str,
        label: &'static str,
        position: Point3<f64>,
    }

    impl StructureAtom for Atom {
        fn element(&self) -> &str {
            self.element
        }
        fn residue_code(&self) -> &str {
            self.residue
        }
        fn atom_label(&self) -> &str {
            self.label
        }
        fn position(&self) -> Point3<f64> {
            self.position
        }
    }

    fn residue(shift: f64) -> Vec<Atom> {
        let at = |element, label, x: f64, y, z| Atom {
            element,
            residue: "ALA",
            label,
            position: Point3::new(x + shift, y, z),
        };
        vec![
            at("N", "N", 0.0, 0.0, 0.0),
            at("H", "H", -0.6, 0.8, 0.0),
            at("C", "CA", 1.45, 0.3, 0.0),
            at("C", "CB", 1.9, 1.7, 0.3),
            at("O", "O", 3.1, -0.4, 0.6),
            at("C", "CX", 2.0, -1.0, -1.0),
        ]
    }

    fn table() -> ForceFieldTable {
        ForceFieldTable::from_json_str("bude_test", FF_JSON).unwrap()
    }

    #[test]
    fn internal_energy_ignores_hydrogens_and_unknown_atoms() {
        let table = table();
        let atoms = residue(0.0);

        let result = internal_energy(&atoms, &table, &ScoringConfig::default()).unwrap();

        // N, CA, CB, O are scorable: four atoms, six pairs.
        assert_eq!(result.pairs.len(), 6);
        for pair in &result.pairs {
            assert_ne!(pair.a, AtomId(1));
            assert_ne!(pair.b, AtomId(5));
        }
        assert!(
            (result.total_energy - (result.steric + result.desolvation + result.charge)).abs()
                < TOLERANCE
        );
    }

    #[test]
    fn interaction_energy_numbers_atoms_across_groups() {
        let table = table();
        let first = residue(0.0);
        let second = residue(3.0);

        let result = interaction_energy(
            &[&first[..], &second[..]],
            &table,
            &ScoringConfig::default(),
        )
        .unwrap();

        assert!(!result.pairs.is_empty());
        for pair in &result.pairs {
            assert!(pair.a.index() < 6);
            assert!(pair.b.index() >= 6);
        }
    }

    #[test]
    fn interaction_energy_is_symmetric() {
        let table = table();
        let first = residue(0.0);
        let second = residue(2.5);
        let config = ScoringConfig::default();

        let ab = interaction_energy(&[&first[..], &second[..]], &table, &config).unwrap();
        let ba = interaction_energy(&[&second[..], &first[..]], &table, &config).unwrap();

        assert!((ab.total_energy - ba.total_energy).abs() < TOLERANCE);
        assert!((ab.steric - ba.steric).abs() < TOLERANCE);
        assert!((ab.desolvation - ba.desolvation).abs() < TOLERANCE);
        assert!((ab.charge - ba.charge).abs() < TOLERANCE);
    }

    struct Tagged {
        group: u8,
        atom: Atom,
    }

    impl StructureAtom for Tagged {
        fn element(&self) -> &str {
            self.atom.element()
        }
        fn residue_code(&self) -> &str {
            self.atom.residue_code()
        }
        fn atom_label(&self) -> &str {
            self.atom.atom_label()
        }
        fn position(&self) -> Point3<f64> {
            self.atom.position
        }
    }

    #[test]
    fn grouped_interaction_energy_keeps_input_indices_as_ids() {
        let table = table();
        let config = ScoringConfig::default();
        let by_slices =
            interaction_energy(&[&residue(0.0)[..], &residue(3.0)[..]], &table, &config).unwrap();

        let interleaved: Vec<Tagged> = residue(0.0)
            .into_iter()
            .zip(residue(3.0))
            .flat_map(|(a, b)| [Tagged { group: 0, atom: a }, Tagged { group: 1, atom: b }])
            .collect();

        let grouped =
            interaction_energy_by_group(&interleaved, |tagged| tagged.group, &table, &config)
                .unwrap();

        assert_eq!(grouped.pairs.len(), by_slices.pairs.len());
        assert!((grouped.total_energy - by_slices.total_energy).abs() < TOLERANCE);
        for pair in &grouped.pairs {
            let a = &interleaved[pair.a.index()];
            let b = &interleaved[pair.b.index()];
            assert_eq!((a.group, b.group), (0, 1));
            let expected = nalgebra::distance(&a.atom.position, &b.atom.position);
            assert!((pair.distance - expected).abs() < TOLERANCE);
        }
    }

    #[test]
    fn load_forcefield_reads_a_single_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bude_2016v1.json");
        fs::write(&path, FF_JSON).unwrap();

        let table = load_forcefield(&path, None).unwrap();

        assert_eq!(table.name(), "bude_2016v1");
        assert_eq!(table.len(), 4);
    }

    #[test]
    fn load_forcefield_selects_from_a_directory() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("bude_2015v1.json"), FF_JSON).unwrap();
        fs::write(dir.path().join("bude_2016v1.json"), FF_JSON).unwrap();

        let table = load_forcefield(dir.path(), Some("bude_2015v1")).unwrap();
        assert_eq!(table.name(), "bude_2015v1");

        let missing = load_forcefield(dir.path(), Some("bude_2099"));
        assert!(matches!(missing, Err(EngineError::UnknownForceField { .. })));

        let ambiguous = load_forcefield(dir.path(), None);
        match ambiguous {
            Err(EngineError::ForceFieldNotSelected { available }) => {
                assert_eq!(available, vec!["bude_2015v1", "bude_2016v1"]);
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn load_forcefield_uses_the_only_table_in_a_directory() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("bude_2016v1.json"), FF_JSON).unwrap();

        let table = load_forcefield(dir.path(), None).unwrap();
        assert_eq!(table.name(), "bude_2016v1");
    }
}
