use serde::Serialize;
use std::fmt;

/// Identity of an atom within one scoring call.
///
/// Ids are assigned by the caller (or by [`Parameterizer::prepare`]) and are
/// only meaningful relative to the atom list they were issued for.
///
/// [`Parameterizer::prepare`]: crate::core::forcefield::parameterization::Parameterizer::prepare
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize)]
pub struct AtomId(pub usize);

impl AtomId {
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

impl From<usize> for AtomId {
    fn from(index: usize) -> Self {
        Self(index)
    }
}

impl fmt::Display for AtomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}
