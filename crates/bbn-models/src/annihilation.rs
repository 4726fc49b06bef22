// ─────────────────────────────────────────────────────────────────────
// BBN Injection Models — Annihilation
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Residual annihilation of relic dark matter into γγ or e+e-.
//!
//! The number density follows the present relic density back in time,
//! and <σv> = a + b·v² with v² = 6 T_χ / m_χ, where the dark-matter
//! temperature T_χ tracks the bath until kinetic decoupling.

use std::sync::Arc;

use bbn_types::config::{AnnihilationParams, ParameterSet};
use bbn_types::error::BbnResult;
use bbn_types::state::TemperatureRange;

use crate::checks;
use crate::cosmology::Cosmology;
use crate::spectrum::fsr_photon_kernel;

/// Decades of temperature below Tmax. The rate falls at least as T^6.
const SPAN_DECADES: f64 = 4.0;

/// Tmax = me² / (22 · 0.5 · Emin) from the Be7 photodisintegration
/// threshold, with 0.5 for the high-energy tail of the bath photons.
const BE7_THRESHOLD_FACTOR: f64 = 22.0;
const TAIL_FACTOR: f64 = 0.5;

/// Dark matter annihilating with a velocity-dependent cross section.
#[derive(Debug, Clone)]
pub struct AnnihilationModel {
    params: AnnihilationParams,
    cosmology: Arc<dyn Cosmology>,
    constants: ParameterSet,
}

impl AnnihilationModel {
    pub fn new(
        params: AnnihilationParams,
        cosmology: Arc<dyn Cosmology>,
        constants: &ParameterSet,
    ) -> BbnResult<Self> {
        checks::positive("mchi", params.mchi)?;
        checks::non_negative("a (s-wave)", params.a)?;
        checks::non_negative("b (p-wave)", params.b)?;
        checks::non_negative("tempkd", params.tempkd)?;
        checks::branching_ratio("bree", params.bree)?;
        checks::branching_ratio("braa", params.braa)?;

        Ok(AnnihilationModel {
            params,
            cosmology,
            constants: *constants,
        })
    }

    pub fn params(&self) -> &AnnihilationParams {
        &self.params
    }

    pub fn cosmology(&self) -> &Arc<dyn Cosmology> {
        &self.cosmology
    }

    pub fn constants(&self) -> &ParameterSet {
        &self.constants
    }

    /// Annihilation at rest releases the full mass per particle.
    pub fn injection_energy(&self) -> f64 {
        self.params.mchi
    }

    pub fn number_density(&self, temperature: f64) -> f64 {
        let sf_ratio = self.cosmology.scale_factor(self.constants.t0_cmb)
            / self.cosmology.scale_factor(temperature);

        self.constants.rho_d0 * sf_ratio.powi(3) / self.params.mchi
    }

    /// Kinetic temperature of the dark matter.
    pub fn dm_temperature(&self, temperature: f64) -> f64 {
        let tkd = self.params.tempkd;
        if temperature >= tkd {
            return temperature;
        }

        let sf_ratio = self.cosmology.scale_factor(tkd) / self.cosmology.scale_factor(temperature);
        tkd * sf_ratio.powi(2)
    }

    /// <σv> in natural units.
    pub fn sigma_v(&self, temperature: f64) -> f64 {
        let to_natural = self.constants.hbar.powi(2) * self.constants.c_si.powi(3);
        let swave_nu = self.params.a / to_natural;
        let pwave_nu = self.params.b / to_natural;

        let v2 = 6.0 * self.dm_temperature(temperature) / self.params.mchi;
        swave_nu + pwave_nu * v2
    }

    pub fn temperature_range(&self) -> BbnResult<TemperatureRange> {
        let t_max = self.constants.me2 / (BE7_THRESHOLD_FACTOR * TAIL_FACTOR * self.constants.emin);
        let t_min = 10f64.powf(t_max.log10() - SPAN_DECADES);
        TemperatureRange::new(t_min, t_max)
    }

    /// Photon pairs from the γγ ("Z") channel.
    pub fn source_photon_z(&self, temperature: f64) -> f64 {
        self.params.braa * self.number_density(temperature).powi(2) * self.sigma_v(temperature)
    }

    pub fn source_electron_0(&self, temperature: f64) -> f64 {
        self.params.bree * 0.5 * self.number_density(temperature).powi(2) * self.sigma_v(temperature)
    }

    /// FSR photons off the e+e- channel.
    pub fn source_photon_c(&self, energy: f64, temperature: f64) -> f64 {
        let kernel = fsr_photon_kernel(energy, self.injection_energy(), &self.constants);
        if kernel == 0.0 {
            return 0.0;
        }
        self.source_electron_0(temperature) * kernel
    }

    pub fn source_electron_c(&self, _energy: f64, _temperature: f64) -> f64 {
        0.0
    }
}
