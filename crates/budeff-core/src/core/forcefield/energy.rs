use super::params::{AtomRecord, Polarity};
use super::potentials;
use super::term::EnergyTerm;
use thiserror::Error;

pub const DEFAULT_DIELECTRIC: f64 = 4.0;

#[derive(Debug, Error, PartialEq, Clone, Copy)]
pub enum EnergyCalculationError {
    #[error("Atoms are separated by a degenerate distance ({0})")]
    DegenerateGeometry(f64),
}

/// Evaluates the steric, desolvation and charge energy of a single atom pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PairPotential {
    cutoff: f64,
    dielectric: f64,
}

impl PairPotential {
    pub fn new(cutoff: f64, dielectric: f64) -> Self {
        Self { cutoff, dielectric }
    }

    pub fn cutoff(&self) -> f64 {
        self.cutoff
    }

    pub fn dielectric(&self) -> f64 {
        self.dielectric
    }

    pub fn evaluate(
        &self,
        a: &AtomRecord,
        b: &AtomRecord,
        dist: f64,
    ) -> Result<EnergyTerm, EnergyCalculationError> {
        if dist <= 0.0 || !dist.is_finite() {
            return Err(EnergyCalculationError::DegenerateGeometry(dist));
        }

        let radius_sum = a.radius + b.radius;
        let core_sum = a.core_radius + b.core_radius;

        let steric = potentials::steric(
            dist,
            core_sum,
            radius_sum,
            a.well_depth * b.well_depth,
            self.cutoff,
        );

        let desolvation = if a.polarity == Polarity::NonPolar && b.polarity == Polarity::NonPolar {
            let npnp_cutoff = 0.5 * (a.npnp_cutoff + b.npnp_cutoff);
            let strength = 0.5 * (a.solvation_coefficient.abs() + b.solvation_coefficient.abs());
            potentials::desolvation(dist, radius_sum, npnp_cutoff, strength, self.cutoff)
        } else {
            0.0
        };

        let charge =
            potentials::damped_coulomb(dist, a.charge, b.charge, self.dielectric, self.cutoff);

        Ok(EnergyTerm::new(steric, desolvation, charge))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(ff_type: &str, charge: f64) -> AtomRecord {
        AtomRecord {
            ff_type: ff_type.to_string(),
            radius: 1.9,
            core_radius: 1.2,
            well_depth: 0.8,
            npnp_cutoff: 4.0,
            charge,
            solvation_coefficient: 1.5,
            reserved: 0.0,
            polarity: Polarity::classify(ff_type, charge),
        }
    }

    fn potential() -> PairPotential {
        PairPotential::new(2.0 * 1.9 + 4.0, DEFAULT_DIELECTRIC)
    }

    #[test]
    fn evaluate_rejects_zero_distance() {
        let a = record("C", 0.0);
        let result = potential().evaluate(&a, &a, 0.0);
        assert_eq!(result, Err(EnergyCalculationError::DegenerateGeometry(0.0)));
    }

    #[test]
    fn evaluate_rejects_nan_distance() {
        let a = record("C", 0.0);
        assert!(potential().evaluate(&a, &a, f64::NAN).is_err());
    }

    #[test]
    fn evaluate_is_finite_for_tiny_separation() {
        let a = record("N", -0.5);
        let b = record("O", 0.5);
        let energy = potential().evaluate(&a, &b, 1e-6).unwrap();
        assert!(energy.steric.is_finite());
        assert!(energy.desolvation.is_finite());
        assert!(energy.charge.is_finite());
    }

    #[test]
    fn evaluate_is_symmetric_in_its_arguments() {
        let a = record("C", 0.0);
        let b = record("O", -0.5);
        let ab = potential().evaluate(&a, &b, 3.3).unwrap();
        let ba = potential().evaluate(&b, &a, 3.3).unwrap();
        assert_eq!(ab, ba);
    }

    #[test]
    fn non_polar_pair_gains_desolvation_energy_at_contact() {
        let a = record("C", 0.0);
        let energy = potential().evaluate(&a, &a, 3.8).unwrap();
        assert_eq!(energy.desolvation, -1.5);
        assert!(energy.steric < 0.0);
        assert_eq!(energy.charge, 0.0);
    }

    #[test]
    fn polar_or_charged_pairs_have_no_desolvation() {
        let carbon = record("C", 0.0);
        let oxygen = record("O", -0.5);
        let charged_carbon = record("C", 0.3);

        let polar = potential().evaluate(&carbon, &oxygen, 3.8).unwrap();
        let charged = potential().evaluate(&carbon, &charged_carbon, 3.8).unwrap();

        assert_eq!(polar.desolvation, 0.0);
        assert_eq!(charged.desolvation, 0.0);
    }

    #[test]
    fn charge_term_sign_follows_charge_product() {
        let plus = record("N", 0.5);
        let minus = record("O", -0.5);
        let attractive = potential().evaluate(&plus, &minus, 4.0).unwrap();
        let repulsive = potential().evaluate(&minus, &minus, 4.0).unwrap();
        assert!(attractive.charge < 0.0);
        assert!(repulsive.charge > 0.0);
    }

    #[test]
    fn all_terms_vanish_at_cutoff() {
        let a = record("C", 0.0);
        let b = record("N", 0.5);
        let cutoff = potential().cutoff();
        let energy = potential().evaluate(&a, &b, cutoff).unwrap();
        assert_eq!(energy, EnergyTerm::default());
    }

    #[test]
    fn all_terms_vanish_at_a_cutoff_shorter_than_contact_plus_npnp() {
        let a = record("C", 0.0);
        let b = record("C", 0.0);
        let short = PairPotential::new(5.0, DEFAULT_DIELECTRIC);

        assert_eq!(short.evaluate(&a, &b, 5.0).unwrap(), EnergyTerm::default());
        let near = short.evaluate(&a, &b, 5.0 - 1e-9).unwrap();
        assert!(near.steric.abs() < 1e-6);
        assert!(near.desolvation.abs() < 1e-6);
        assert!(near.charge.abs() < 1e-6);
    }

    #[test]
    fn terms_are_continuous_when_the_cutoff_falls_inside_the_well() {
        let a = record("C", 0.0);
        let short = PairPotential::new(3.0, DEFAULT_DIELECTRIC);
        let near = short.evaluate(&a, &a, 3.0 - 1e-9).unwrap();
        assert!(near.steric.abs() < 1e-6);
        assert!(near.desolvation.abs() < 1e-6);
        assert!(short.evaluate(&a, &a, 2.7).unwrap().steric < 0.0);
    }
}
