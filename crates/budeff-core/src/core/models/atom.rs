use super::ids::AtomId;
use crate::core::forcefield::params::ParamKey;
use nalgebra::Point3;

/// The narrow view of an atom that the scoring kernel needs from a structure provider.
///
/// Parsing structure files and maintaining the atom/residue/chain hierarchy is the
/// job of the caller; any type exposing these four properties can be parameterized
/// and scored.
pub trait StructureAtom {
    /// Element symbol (e.g., "C", "N", "H").
    fn element(&self) -> &str;
    /// Three-letter code of the owning residue or molecule (e.g., "ALA", "HOH").
    fn residue_code(&self) -> &str;
    /// Label of the atom within its residue (e.g., "CA", "OG1").
    fn atom_label(&self) -> &str;
    /// Cartesian coordinates in Angstroms.
    fn position(&self) -> Point3<f64>;
}

/// Returns `true` if the element symbol denotes hydrogen.
#[inline]
pub fn is_hydrogen_element(element: &str) -> bool {
    element.trim().eq_ignore_ascii_case("H")
}

/// A single atom as consumed by the scoring kernel.
///
/// This is the explicit, parallel record produced by the assignment step: it pairs
/// an atom's identity and coordinates with the force field entry it resolved to,
/// without touching the caller's own atom objects.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AtomInput {
    /// Identity reported back in the interaction provenance.
    pub id: AtomId,
    /// Hydrogens never take part in scoring.
    pub is_hydrogen: bool,
    /// The 3D coordinates of the atom in Angstroms.
    pub position: Point3<f64>,
    /// Resolved force field entry, or `None` if the atom could not be parameterized.
    pub ff_id: Option<ParamKey>,
}

impl AtomInput {
    /// Creates a new heavy-atom input.
    ///
    /// # Arguments
    ///
    /// * `id` - The identity of the atom.
    /// * `position` - The 3D coordinates of the atom.
    /// * `ff_id` - The resolved force field entry, if any.
    pub fn new(id: usize, position: Point3<f64>, ff_id: Option<ParamKey>) -> Self {
        Self {
            id: AtomId(id),
            is_hydrogen: false,
            position,
            ff_id,
        }
    }

    /// Builds an input from any [`StructureAtom`] and its resolved entry.
    pub fn from_structure<A: StructureAtom>(
        id: usize,
        atom: &A,
        ff_id: Option<ParamKey>,
    ) -> Self {
        Self {
            id: AtomId(id),
            is_hydrogen: is_hydrogen_element(atom.element()),
            position: atom.position(),
            ff_id,
        }
    }

    /// Returns the resolved entry if this atom takes part in scoring.
    #[inline]
    pub fn scorable_key(&self) -> Option<ParamKey> {
        if self.is_hydrogen { None } else { self.ff_id }
    }
}
