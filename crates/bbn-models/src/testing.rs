//! Stand-in collaborators for unit tests.

use std::cell::Cell;
use std::sync::Arc;

use bbn_math::grid::temperature_grid;
use bbn_types::config::ParameterSet;
use bbn_types::error::{BbnError, BbnResult};
use bbn_types::state::{Particle, TemperatureRange, ThermalRates};
use ndarray::Array2;

use crate::cosmology::{Cosmology, RadiationCosmology};
use crate::solver::{InjectionSource, MatrixGenerator, NuclearReactor};

/// Two baseline columns (central, shifted) over the nine isotopes.
pub(crate) fn baseline_abundances() -> Array2<f64> {
    let central = [1e-16, 0.753, 1.9e-5, 9e-15, 7.5e-6, 0.0617, 1.1e-14, 4.5e-11, 4.2e-10];
    Array2::from_shape_fn((9, 2), |(i, j)| central[i] * (1.0 + 0.01 * j as f64))
}

pub(crate) fn radiation_cosmology() -> Arc<dyn Cosmology> {
    let constants = ParameterSet::default();
    Arc::new(
        RadiationCosmology::new(
            RadiationCosmology::G_STAR_LATE,
            baseline_abundances(),
            &constants,
        )
        .expect("reference cosmology"),
    )
}

/// Reactor whose single rate column is the total delta injection rate.
#[derive(Default)]
pub(crate) struct CountingReactor {
    pub calls: Cell<usize>,
}

impl NuclearReactor for CountingReactor {
    fn thermal_rates(
        &self,
        source: &dyn InjectionSource,
        range: TemperatureRange,
        _e0: f64,
        _cosmology: &dyn Cosmology,
    ) -> BbnResult<ThermalRates> {
        self.calls.set(self.calls.get() + 1);
        let temperature = temperature_grid(&range, 10)?;
        let rates = Array2::from_shape_fn((temperature.len(), 1), |(i, _)| {
            let t = temperature[i];
            Particle::ALL.iter().map(|&p| source.delta(p, t)).sum::<f64>()
        });
        ThermalRates::new(temperature, rates)
    }
}

pub(crate) struct FailingReactor;

impl NuclearReactor for FailingReactor {
    fn thermal_rates(
        &self,
        _source: &dyn InjectionSource,
        _range: TemperatureRange,
        _e0: f64,
        _cosmology: &dyn Cosmology,
    ) -> BbnResult<ThermalRates> {
        Err(BbnError::SolverFailure("rate integration diverged".to_string()))
    }
}

/// Be7 -> He3 + He4 style destruction pattern in units of the rate sum.
pub(crate) fn destruction_pattern() -> Array2<f64> {
    let mut pattern = Array2::zeros((9, 9));
    pattern[[8, 8]] = -1.0;
    pattern[[4, 8]] = 1.0;
    pattern[[5, 8]] = 1.0;
    pattern[[2, 2]] = -0.3;
    pattern[[1, 2]] = 0.3;
    pattern[[0, 2]] = 0.3;
    pattern
}

/// Generator producing `pattern · (rate sum / reference)`, linear in the sources.
pub(crate) struct LinearGenerator {
    pub pattern: Array2<f64>,
    pub reference: f64,
    pub calls: Cell<usize>,
}

impl LinearGenerator {
    pub fn new(reference: f64) -> Self {
        LinearGenerator {
            pattern: destruction_pattern(),
            reference,
            calls: Cell::new(0),
        }
    }
}

impl MatrixGenerator for LinearGenerator {
    fn final_matp(
        &self,
        rates: &ThermalRates,
        _cosmology: &dyn Cosmology,
    ) -> BbnResult<Array2<f64>> {
        self.calls.set(self.calls.get() + 1);
        Ok(&self.pattern * (rates.rates.sum() / self.reference))
    }
}
