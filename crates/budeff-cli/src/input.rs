use crate::error::{CliError, Result};
use budeff::core::models::atom::StructureAtom;
use nalgebra::Point3;
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

/// One row of the atom list: `group,element,residue,atom,x,y,z`.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct AtomRow {
    pub group: String,
    pub element: String,
    pub residue: String,
    pub atom: String,
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl StructureAtom for AtomRow {
    fn element(&self) -> &str {
        &self.element
    }

    fn residue_code(&self) -> &str {
        &self.residue
    }

    fn atom_label(&self) -> &str {
        &self.atom
    }

    fn position(&self) -> Point3<f64> {
        Point3::new(self.x, self.y, self.z)
    }
}

pub fn read_atoms(path: &Path) -> Result<Vec<AtomRow>> {
    debug!("Reading atom list from {:?}", path);
    let parse_error = |e: csv::Error| CliError::FileParsing {
        path: path.to_path_buf(),
        source: e.into(),
    };

    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .comment(Some(b'#'))
        .from_path(path)
        .map_err(parse_error)?;

    let rows = reader
        .deserialize()
        .collect::<std::result::Result<Vec<AtomRow>, _>>()
        .map_err(parse_error)?;
    debug!("Read {} atoms.", rows.len());
    Ok(rows)
}

/// Distinct values of the group column, in order of first appearance.
pub fn group_names(rows: &[AtomRow]) -> Vec<&str> {
    let mut names: Vec<&str> = Vec::new();
    for row in rows {
        if !names.contains(&row.group.as_str()) {
            names.push(&row.group);
        }
    }
    names
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    const ATOMS_CSV: &str = "\
group,element,residue,atom,x,y,z
# receptor
A, N, ALA, N, 0.0, 0.0, 0.0
A, C, ALA, CA, 1.45, 0.0, 0.0
B, O, HOH, O, 4.0, 1.0, 0.0
A, C, ALA, CB, 1.9, 1.4, 0.0
";

    #[test]
    fn read_atoms_parses_trimmed_rows_and_skips_comments() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("atoms.csv");
        fs::write(&path, ATOMS_CSV).unwrap();

        let rows = read_atoms(&path).unwrap();

        assert_eq!(rows.len(), 4);
        assert_eq!(rows[1].atom_label(), "CA");
        assert_eq!(rows[1].residue_code(), "ALA");
        assert_eq!(rows[2].element(), "O");
        assert_eq!(rows[2].position(), Point3::new(4.0, 1.0, 0.0));
    }

    #[test]
    fn read_atoms_reports_malformed_rows() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("atoms.csv");
        fs::write(&path, "group,element,residue,atom,x,y,z\nA,C,ALA,CA,one,0,0\n").unwrap();

        let result = read_atoms(&path);

        assert!(matches!(result, Err(CliError::FileParsing { .. })));
    }

    #[test]
    fn read_atoms_reports_missing_file() {
        let dir = tempdir().unwrap();
        let result = read_atoms(&dir.path().join("missing.csv"));
        assert!(matches!(result, Err(CliError::FileParsing { .. })));
    }

    #[test]
    fn group_names_preserves_first_appearance_order() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("atoms.csv");
        fs::write(&path, ATOMS_CSV).unwrap();

        let rows = read_atoms(&path).unwrap();

        assert_eq!(group_names(&rows), vec!["A", "B"]);
        assert_eq!(rows[3].group, "A");
    }
}
