// ─────────────────────────────────────────────────────────────────────
// BBN Injection Models — Solver Contracts
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Contracts between the injection models and the nuclear network solver.
//!
//! The thermal-rate integration and the reaction-matrix assembly are
//! external; they see the models only through [`InjectionSource`].

use bbn_types::error::BbnResult;
use bbn_types::state::{Particle, TemperatureRange, ThermalRates};
use ndarray::Array2;

use crate::cosmology::Cosmology;

/// Source terms of an injection scenario.
///
/// Delta terms are rates of monochromatic injection at the injection
/// energy E0 [number / (time · volume)], never negative. Continuum terms
/// are differential in the secondary energy and vanish exactly outside
/// the kinematically allowed range.
pub trait InjectionSource {
    fn delta(&self, particle: Particle, temperature: f64) -> f64;

    fn continuum(&self, particle: Particle, energy: f64, temperature: f64) -> f64;
}

/// Thermal nuclear rates from the source terms (cascade + reaction database).
pub trait NuclearReactor {
    fn thermal_rates(
        &self,
        source: &dyn InjectionSource,
        range: TemperatureRange,
        e0: f64,
        cosmology: &dyn Cosmology,
    ) -> BbnResult<ThermalRates>;
}

/// Assembly of the NY x NY propagator exponent from thermal rates.
pub trait MatrixGenerator {
    fn final_matp(&self, rates: &ThermalRates, cosmology: &dyn Cosmology)
        -> BbnResult<Array2<f64>>;
}
