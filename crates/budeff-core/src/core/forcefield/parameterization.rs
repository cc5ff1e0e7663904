use super::params::{ForceFieldTable, ParamKey};
use crate::core::models::atom::{AtomInput, StructureAtom, is_hydrogen_element};
use tracing::warn;

/// Resolves the atoms of a caller-owned structure against a force field table.
///
/// The result is a parallel list rather than an annotation on the atoms
/// themselves, so the caller's structure is never modified.
pub struct Parameterizer<'a> {
    table: &'a ForceFieldTable,
}

impl<'a> Parameterizer<'a> {
    pub fn new(table: &'a ForceFieldTable) -> Self {
        Self { table }
    }

    /// Resolves every atom, in order.
    ///
    /// Hydrogens are always `None`. Atoms the table cannot resolve are `None` as
    /// well and produce a warning; they are excluded from scoring but never abort
    /// the assignment.
    pub fn assign<A: StructureAtom>(&self, atoms: &[A]) -> Vec<Option<ParamKey>> {
        atoms.iter().map(|atom| self.assign_one(atom)).collect()
    }

    /// Resolves `atoms` and packages them as kernel inputs with consecutive ids
    /// starting at `first_id`.
    pub fn prepare<A: StructureAtom>(&self, atoms: &[A], first_id: usize) -> Vec<AtomInput> {
        self.prepare_indexed(
            atoms
                .iter()
                .enumerate()
                .map(|(offset, atom)| (first_id + offset, atom)),
        )
    }

    /// Like [`prepare`](Self::prepare), but each atom keeps the id it is paired with.
    pub fn prepare_indexed<'b, A, I>(&self, atoms: I) -> Vec<AtomInput>
    where
        A: StructureAtom + 'b,
        I: IntoIterator<Item = (usize, &'b A)>,
    {
        atoms
            .into_iter()
            .map(|(id, atom)| AtomInput::from_structure(id, atom, self.assign_one(atom)))
            .collect()
    }

    fn assign_one<A: StructureAtom>(&self, atom: &A) -> Option<ParamKey> {
        if is_hydrogen_element(atom.element()) {
            return None;
        }
        match self.table.lookup(atom.residue_code(), atom.atom_label()) {
            Ok(key) => Some(key),
            Err(e) => {
                warn!("{} (force field '{}').", e, self.table.name());
                None
            }
        }
    }
}
