// ─────────────────────────────────────────────────────────────────────
// BBN Injection Models — State
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};

use crate::error::{BbnError, BbnResult};

/// Injected particle species, in source-table order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Particle {
    Photon,
    Electron,
    Positron,
}

impl Particle {
    pub const ALL: [Particle; 3] = [Particle::Photon, Particle::Electron, Particle::Positron];

    /// Position in the source tables.
    pub fn index(self) -> usize {
        match self {
            Particle::Photon => 0,
            Particle::Electron => 1,
            Particle::Positron => 2,
        }
    }
}

/// Tracked isotopes, in abundance-row order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Isotope {
    Neutron,
    Proton,
    Deuterium,
    Tritium,
    Helium3,
    Helium4,
    Lithium6,
    Lithium7,
    Beryllium7,
}

impl Isotope {
    pub const ALL: [Isotope; 9] = [
        Isotope::Neutron,
        Isotope::Proton,
        Isotope::Deuterium,
        Isotope::Tritium,
        Isotope::Helium3,
        Isotope::Helium4,
        Isotope::Lithium6,
        Isotope::Lithium7,
        Isotope::Beryllium7,
    ];

    /// Row of this isotope in an abundance matrix.
    pub fn row(self) -> usize {
        self as usize
    }

    pub fn label(self) -> &'static str {
        match self {
            Isotope::Neutron => "n",
            Isotope::Proton => "p",
            Isotope::Deuterium => "H2",
            Isotope::Tritium => "H3",
            Isotope::Helium3 => "He3",
            Isotope::Helium4 => "He4",
            Isotope::Lithium6 => "Li6",
            Isotope::Lithium7 => "Li7",
            Isotope::Beryllium7 => "Be7",
        }
    }
}

/// Temperature window of a calculation [MeV], `0 < min < max`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TemperatureRange {
    pub min: f64,
    pub max: f64,
}

impl TemperatureRange {
    pub fn new(min: f64, max: f64) -> BbnResult<Self> {
        if !(min.is_finite() && max.is_finite()) || min <= 0.0 || min >= max {
            return Err(BbnError::ConfigError(format!(
                "temperature range requires 0 < Tmin < Tmax, got ({min}, {max})"
            )));
        }
        Ok(TemperatureRange { min, max })
    }

    pub fn contains(&self, temperature: f64) -> bool {
        (self.min..=self.max).contains(&temperature)
    }

    /// Number of decades spanned.
    pub fn decades(&self) -> f64 {
        self.max.log10() - self.min.log10()
    }
}

/// Thermal nuclear rates handed from the reactor to the matrix generator.
///
/// `rates` has one row per entry of `temperature`; column meaning is owned
/// by the solver.
#[derive(Debug, Clone)]
pub struct ThermalRates {
    pub temperature: Array1<f64>,
    pub rates: Array2<f64>,
}

impl ThermalRates {
    pub fn new(temperature: Array1<f64>, rates: Array2<f64>) -> BbnResult<Self> {
        if rates.nrows() != temperature.len() {
            return Err(BbnError::SolverFailure(format!(
                "thermal rates have {} rows for {} temperatures",
                rates.nrows(),
                temperature.len()
            )));
        }
        Ok(ThermalRates { temperature, rates })
    }
}
