// ─────────────────────────────────────────────────────────────────────
// BBN Injection Models — Decay
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Two-body decay of a massive mediator into γγ or e+e-.
//!
//! The mediator abundance is anchored at a reference temperature T0 and
//! diluted by expansion while it decays exponentially in cosmic time:
//!
//!   n(T) = n0a · nγ(T0) · (a(T0)/a(T))³ · exp(-(t(T) - t(T0))/τ)

use std::sync::Arc;

use bbn_types::config::{DecayParams, ParameterSet};
use bbn_types::error::BbnResult;
use bbn_types::state::TemperatureRange;

use crate::checks;
use crate::cosmology::Cosmology;
use crate::spectrum::fsr_photon_kernel;

/// Decades of temperature spanned around the decay temperature.
const SPAN_DECADES: f64 = 2.0;

/// Mediator decaying with a fixed lifetime.
#[derive(Debug, Clone)]
pub struct DecayModel {
    params: DecayParams,
    /// t(T0) [s]
    t0: f64,
    cosmology: Arc<dyn Cosmology>,
    constants: ParameterSet,
}

impl DecayModel {
    pub fn new(
        params: DecayParams,
        cosmology: Arc<dyn Cosmology>,
        constants: &ParameterSet,
    ) -> BbnResult<Self> {
        checks::positive("mphi", params.mphi)?;
        checks::positive("tau", params.tau)?;
        checks::positive("temp0", params.temp0)?;
        checks::non_negative("n0a", params.n0a)?;
        checks::branching_ratio("bree", params.bree)?;
        checks::branching_ratio("braa", params.braa)?;

        let t0 = cosmology.time(params.temp0);
        Ok(DecayModel {
            params,
            t0,
            cosmology,
            constants: *constants,
        })
    }

    pub fn params(&self) -> &DecayParams {
        &self.params
    }

    pub fn cosmology(&self) -> &Arc<dyn Cosmology> {
        &self.cosmology
    }

    pub fn constants(&self) -> &ParameterSet {
        &self.constants
    }

    /// Each daughter carries half the mass.
    pub fn injection_energy(&self) -> f64 {
        self.params.mphi / 2.0
    }

    /// Decay rate ħ/τ [MeV].
    fn width(&self) -> f64 {
        self.constants.hbar / self.params.tau
    }

    pub fn number_density(&self, temperature: f64) -> f64 {
        let p = &self.params;
        let sf_ratio =
            self.cosmology.scale_factor(p.temp0) / self.cosmology.scale_factor(temperature);
        let delta_t = self.cosmology.time(temperature) - self.t0;
        let n_gamma = self.constants.pi2 * p.temp0.powi(3) / 15.0;

        p.n0a * n_gamma * sf_ratio.powi(3) * (-delta_t / p.tau).exp()
    }

    /// -1.5 / +0.5 decades around the decay temperature, since most of
    /// the injection happens after t = τ.
    pub fn temperature_range(&self) -> BbnResult<TemperatureRange> {
        let td = self.cosmology.temperature(self.params.tau);
        checks::positive("decay temperature", td)?;

        let td_ofm = td.log10();
        let t_min = 10f64.powf(td_ofm - 3.0 * SPAN_DECADES / 4.0);
        let t_max = 10f64.powf(td_ofm + SPAN_DECADES / 4.0);
        TemperatureRange::new(t_min, t_max)
    }

    pub fn source_photon_0(&self, temperature: f64) -> f64 {
        self.params.braa * 2.0 * self.number_density(temperature) * self.width()
    }

    pub fn source_electron_0(&self, temperature: f64) -> f64 {
        self.params.bree * self.number_density(temperature) * self.width()
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::radiation_cosmology;
    use bbn_types::error::BbnError;

    fn params() -> DecayParams {
        DecayParams {
            mphi: 20.0,
            tau: 1e7,
            temp0: 10.0,
            n0a: 1e-10,
            bree: 1.0,
            braa: 0.0,
        }
    }

    fn model(params: DecayParams) -> DecayModel {
        DecayModel::new(params, radiation_cosmology(), &ParameterSet::default()).unwrap()
    }

    #[test]
    fn test_injection_energy_half_mass() {
        assert_eq!(model(params()).injection_energy(), 10.0);
    }

    #[test]
    fn test_number_density_at_reference() {
        let m = model(params());
        let c = ParameterSet::default();
        let expected = 1e-10 * c.pi2 * 1000.0 / 15.0;
        assert!(((m.number_density(10.0) - expected) / expected).abs() < 1e-12);
    }

    #[test]
    fn test_number_density_decays_after_tau() {
        let m = model(params());
        let cosmo = radiation_cosmology();
        // Compare against pure redshift dilution
        let temp = cosmo.temperature(3e7);
        let diluted = 1e-10 * ParameterSet::default().pi2 * 1000.0 / 15.0 * (temp / 10.0).powi(3);
        let ratio = m.number_density(temp) / diluted;
        let expected = (-(cosmo.time(temp) - cosmo.time(10.0)) / 1e7).exp();
        assert!((ratio - expected).abs() < 1e-9);
        assert!(ratio < 0.06);
    }

    #[test]
    fn test_temperature_range_around_decay() {
        let m = model(params());
        let td = radiation_cosmology().temperature(1e7);
        let range = m.temperature_range().unwrap();
        assert!((range.min / td - 10f64.powf(-1.5)).abs() < 1e-12);
        assert!((range.max / td - 10f64.powf(0.5)).abs() < 1e-12);
        assert!((range.decades() - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_delta_sources() {
        let mut p = params();
        p.braa = 0.25;
        p.bree = 0.75;
        let m = model(p);
        let t = 1e-3;
        let width = ParameterSet::default().hbar / 1e7;
        let n = m.number_density(t);
        assert!((m.source_photon_0(t) - 0.5 * n * width).abs() <= 1e-12 * n * width);
        assert!((m.source_electron_0(t) - 0.75 * n * width).abs() <= 1e-12 * n * width);
    }

    #[test]
    fn test_photon_continuum_ignores_photon_channel() {
        let mut p = params();
        p.braa = 0.0;
        let without = model(p);
        p.braa = 1.0;
        let with = model(p);
        assert_eq!(
            without.source_photon_c(2.0, 1e-3),
            with.source_photon_c(2.0, 1e-3)
        );
        assert!(with.source_photon_c(2.0, 1e-3) > 0.0);
    }

    #[test]
    fn test_invalid_parameters() {
        let cosmo = radiation_cosmology();
        let c = ParameterSet::default();
        for bad in [
            DecayParams { mphi: 0.0, ..params() },
            DecayParams { tau: -1.0, ..params() },
            DecayParams { temp0: 0.0, ..params() },
            DecayParams { n0a: -1e-10, ..params() },
            DecayParams { bree: 1.5, ..params() },
            DecayParams { braa: f64::NAN, ..params() },
        ] {
            let err = DecayModel::new(bad, cosmo.clone(), &c).unwrap_err();
            assert!(matches!(err, BbnError::ConfigError(_)));
        }
    }
}
