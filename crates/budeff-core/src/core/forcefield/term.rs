use serde::Serialize;
use std::iter::Sum;
use std::ops::{Add, AddAssign};

/// The three components of the pairwise potential.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct EnergyTerm {
    pub steric: f64,
    pub desolvation: f64,
    pub charge: f64,
}

impl EnergyTerm {
    pub fn new(steric: f64, desolvation: f64, charge: f64) -> Self {
        Self {
            steric,
            desolvation,
            charge,
        }
    }

    #[inline]
    pub fn total(&self) -> f64 {
        self.steric + self.desolvation + self.charge
    }
}

impl Add for EnergyTerm {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self {
            steric: self.steric + rhs.steric,
            desolvation: self.desolvation + rhs.desolvation,
            charge: self.charge + rhs.charge,
        }
    }
}

impl AddAssign for EnergyTerm {
    fn add_assign(&mut self, rhs: Self) {
        self.steric += rhs.steric;
        self.desolvation += rhs.desolvation;
        self.charge += rhs.charge;
    }
}

impl Sum for EnergyTerm {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), |acc, term| acc + term)
    }
}
