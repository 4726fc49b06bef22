// ─────────────────────────────────────────────────────────────────────
// BBN Injection Models — Scenario
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Injection scenario and abundance propagation.
//!
//! A [`Scenario`] fixes the injection energy and the temperature window at
//! construction, exposes the source terms of its [`Physics`] through
//! [`InjectionSource`], and turns baseline abundances into perturbed ones:
//!
//!   Y = expm(matp) · Y0
//!
//! `matp` is obtained once from the external solver and buffered.

use std::sync::Arc;

use bbn_math::linalg::expm;
use bbn_types::config::{AnnihilationParams, DecayParams, ParameterSet, ScenarioConfig};
use bbn_types::error::{BbnError, BbnResult};
use bbn_types::state::{Particle, TemperatureRange};
use ndarray::Array2;
use tracing::{debug, info};

use crate::annihilation::AnnihilationModel;
use crate::cosmology::Cosmology;
use crate::decay::DecayModel;
use crate::solver::{InjectionSource, MatrixGenerator, NuclearReactor};

/// The closed set of injection mechanisms.
///
/// Each variant supplies exactly five functions: the temperature range,
/// the photon and electron delta terms, the photon and electron continua.
#[derive(Debug, Clone)]
pub enum Physics {
    Decay(DecayModel),
    Annihilation(AnnihilationModel),
}

impl Physics {
    pub fn name(&self) -> &'static str {
        match self {
            Physics::Decay(_) => "decay",
            Physics::Annihilation(_) => "annihilation",
        }
    }

    pub fn injection_energy(&self) -> f64 {
        match self {
            Physics::Decay(m) => m.injection_energy(),
            Physics::Annihilation(m) => m.injection_energy(),
        }
    }

    pub fn temperature_range(&self) -> BbnResult<TemperatureRange> {
        match self {
            Physics::Decay(m) => m.temperature_range(),
            Physics::Annihilation(m) => m.temperature_range(),
        }
    }

    pub fn cosmology(&self) -> &Arc<dyn Cosmology> {
        match self {
            Physics::Decay(m) => m.cosmology(),
            Physics::Annihilation(m) => m.cosmology(),
        }
    }

    pub fn constants(&self) -> &ParameterSet {
        match self {
            Physics::Decay(m) => m.constants(),
            Physics::Annihilation(m) => m.constants(),
        }
    }

    fn source_photon_0(&self, temperature: f64) -> f64 {
        match self {
            Physics::Decay(m) => m.source_photon_0(temperature),
            Physics::Annihilation(m) => m.source_photon_z(temperature),
        }
    }

    fn source_electron_0(&self, temperature: f64) -> f64 {
        match self {
            Physics::Decay(m) => m.source_electron_0(temperature),
            Physics::Annihilation(m) => m.source_electron_0(temperature),
        }
    }

    fn source_photon_c(&self, energy: f64, temperature: f64) -> f64 {
        match self {
            Physics::Decay(m) => m.source_photon_c(energy, temperature),
            Physics::Annihilation(m) => m.source_photon_c(energy, temperature),
        }
    }

    fn source_electron_c(&self, energy: f64, temperature: f64) -> f64 {
        match self {
            Physics::Decay(m) => m.source_electron_c(energy, temperature),
            Physics::Annihilation(m) => m.source_electron_c(energy, temperature),
        }
    }
}

/// Injection scenario with a memoized abundance propagator.
///
/// The buffer is owned exclusively by this instance and mutated only
/// through `&mut self`.
#[derive(Debug, Clone)]
pub struct Scenario {
    e0: f64,
    range: TemperatureRange,
    physics: Physics,
    matp_buffer: Option<Array2<f64>>,
}

impl Scenario {
    pub fn new(physics: Physics) -> BbnResult<Self> {
        let e0 = physics.injection_energy();
        if !e0.is_finite() || e0 <= 0.0 {
            return Err(BbnError::ConfigError(format!(
                "injection energy must be finite and > 0, got {e0}"
            )));
        }
        let range = physics.temperature_range()?;

        debug!(
            model = physics.name(),
            e0,
            t_min = range.min,
            t_max = range.max,
            "scenario constructed"
        );
        Ok(Scenario {
            e0,
            range,
            physics,
            matp_buffer: None,
        })
    }

    pub fn decay(
        params: DecayParams,
        cosmology: Arc<dyn Cosmology>,
        constants: &ParameterSet,
    ) -> BbnResult<Self> {
        Self::new(Physics::Decay(DecayModel::new(params, cosmology, constants)?))
    }

    pub fn annihilation(
        params: AnnihilationParams,
        cosmology: Arc<dyn Cosmology>,
        constants: &ParameterSet,
    ) -> BbnResult<Self> {
        Self::new(Physics::Annihilation(AnnihilationModel::new(
            params, cosmology, constants,
        )?))
    }

    pub fn from_config(
        config: &ScenarioConfig,
        cosmology: Arc<dyn Cosmology>,
        constants: &ParameterSet,
    ) -> BbnResult<Self> {
        match *config {
            ScenarioConfig::Decay(params) => Self::decay(params, cosmology, constants),
            ScenarioConfig::Annihilation(params) => {
                Self::annihilation(params, cosmology, constants)
            }
        }
    }

    pub fn injection_energy(&self) -> f64 {
        self.e0
    }

    pub fn temperature_range(&self) -> TemperatureRange {
        self.range
    }

    pub fn physics(&self) -> &Physics {
        &self.physics
    }

    pub fn cosmology(&self) -> &Arc<dyn Cosmology> {
        self.physics.cosmology()
    }

    /// Whether `run_disintegration` would skip the network entirely.
    pub fn is_below_threshold(&self) -> bool {
        self.e0 <= self.physics.constants().emin
    }

    /// Final abundances, one column per baseline column.
    ///
    /// Below the nuclear thresholds the baseline is returned unchanged.
    /// Otherwise the propagator exponent is taken from the buffer or, if
    /// empty, computed by `reactor` and `generator` and stored in the
    /// buffer. This is a memoizing call: the first invocation above
    /// threshold fills the buffer as a side effect. Solver errors
    /// propagate unchanged and leave the buffer empty.
    pub fn run_disintegration(
        &mut self,
        reactor: &dyn NuclearReactor,
        generator: &dyn MatrixGenerator,
    ) -> BbnResult<Array2<f64>> {
        let cosmology = Arc::clone(self.physics.cosmology());
        let baseline = cosmology.bbn_abundances();

        if self.is_below_threshold() {
            debug!(
                e0 = self.e0,
                emin = self.physics.constants().emin,
                "below nuclear thresholds, baseline abundances returned"
            );
            return Ok(baseline.clone());
        }

        let matp = match self.matp_buffer.take() {
            Some(matp) => {
                debug!(model = self.physics.name(), "reusing buffered propagator");
                matp
            }
            None => self.solve_propagator(reactor, generator, cosmology.as_ref())?,
        };

        let result = apply_propagator(&matp, baseline);
        self.matp_buffer = Some(matp);
        result
    }

    fn solve_propagator(
        &self,
        reactor: &dyn NuclearReactor,
        generator: &dyn MatrixGenerator,
        cosmology: &dyn Cosmology,
    ) -> BbnResult<Array2<f64>> {
        info!(
            model = self.physics.name(),
            e0 = self.e0,
            t_min = self.range.min,
            t_max = self.range.max,
            "computing propagator from thermal rates"
        );
        let rates = reactor.thermal_rates(self, self.range, self.e0, cosmology)?;
        debug!(points = rates.temperature.len(), "thermal rates ready");
        generator.final_matp(&rates, cosmology)
    }

    /// Buffered propagator exponent, if any.
    pub fn propagator_buffer(&self) -> Option<&Array2<f64>> {
        self.matp_buffer.as_ref()
    }

    /// Install a propagator exponent, bypassing the solver on the next
    /// `run_disintegration`.
    ///
    /// The caller guarantees that `matp` was computed for the same
    /// temperature range and source shape; this is not checked.
    pub fn set_propagator_buffer(&mut self, matp: Array2<f64>) {
        debug!(dim = ?matp.dim(), "propagator buffer set");
        self.matp_buffer = Some(matp);
    }

    pub fn take_propagator_buffer(&mut self) -> Option<Array2<f64>> {
        self.matp_buffer.take()
    }

    pub fn clear_propagator_buffer(&mut self) {
        if self.matp_buffer.take().is_some() {
            debug!("propagator buffer cleared");
        }
    }
}

/// expm(matp) · Y0.
fn apply_propagator(matp: &Array2<f64>, baseline: &Array2<f64>) -> BbnResult<Array2<f64>> {
    let ny = baseline.nrows();
    if matp.dim() != (ny, ny) {
        return Err(BbnError::LinAlg(format!(
            "propagator exponent is {:?}, expected {ny}x{ny}",
            matp.dim()
        )));
    }
    let fmat = expm(matp)?;
    Ok(fmat.dot(baseline))
}

/// Positron terms are always answered by the electron functions.
impl InjectionSource for Scenario {
    fn delta(&self, particle: Particle, temperature: f64) -> f64 {
        match particle {
            Particle::Photon => self.physics.source_photon_0(temperature),
            Particle::Electron | Particle::Positron => {
                self.physics.source_electron_0(temperature)
            }
        }
    }

    fn continuum(&self, particle: Particle, energy: f64, temperature: f64) -> f64 {
        match particle {
            Particle::Photon => self.physics.source_photon_c(energy, temperature),
            Particle::Electron | Particle::Positron => {
                self.physics.source_electron_c(energy, temperature)
            }
        }
    }
}
