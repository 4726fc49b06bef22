// ─────────────────────────────────────────────────────────────────────
// BBN Injection Models — Cosmology
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Background cosmology and baseline abundance providers.
//!
//! The Standard-Model background used in production comes from an external
//! loader implementing [`Cosmology`]. Two reference providers live here:
//! an analytic radiation-dominated universe and a tabulated provider with
//! power-law interpolation between rows.

use bbn_math::interp::{interp_loglog, validate_loglog_table};
use bbn_types::config::ParameterSet;
use bbn_types::error::{BbnError, BbnResult};
use ndarray::Array2;
use std::fmt;

/// Background cosmology as seen by the injection models.
///
/// Temperatures in MeV, times in s.
pub trait Cosmology: Send + Sync + fmt::Debug {
    /// Scale factor a(T).
    fn scale_factor(&self, temperature: f64) -> f64;

    /// Cosmic time t(T), decreasing in T.
    fn time(&self, temperature: f64) -> f64;

    /// Approximate inverse of [`Cosmology::time`].
    fn temperature(&self, time: f64) -> f64;

    /// Baseline abundances, one row per isotope, one column per
    /// alternative baseline set (central value, uncertainty variants).
    fn bbn_abundances(&self) -> &Array2<f64>;
}

fn check_abundances(abundances: &Array2<f64>, constants: &ParameterSet) -> BbnResult<()> {
    if abundances.nrows() != constants.ny || abundances.ncols() == 0 {
        return Err(BbnError::ConfigError(format!(
            "baseline abundances must be {} x N with N >= 1, got {:?}",
            constants.ny,
            abundances.dim()
        )));
    }
    if !abundances.iter().all(|v| v.is_finite()) {
        return Err(BbnError::ConfigError(
            "baseline abundances contain non-finite values".to_string(),
        ));
    }
    Ok(())
}

/// Radiation-dominated universe with constant relativistic degrees of freedom.
///
/// a(T) = T0_CMB / T,  H = sqrt(8π³ G g* / 90) T²,  t = 1 / (2H).
#[derive(Debug, Clone)]
pub struct RadiationCosmology {
    g_star: f64,
    /// sqrt(8π³ G g* / 90) [1/MeV]
    hubble_coeff: f64,
    hbar: f64,
    t0_cmb: f64,
    abundances: Array2<f64>,
}

impl RadiationCosmology {
    /// Relativistic degrees of freedom after e+e- annihilation.
    pub const G_STAR_LATE: f64 = 3.36;

    pub fn new(g_star: f64, abundances: Array2<f64>, constants: &ParameterSet) -> BbnResult<Self> {
        if !g_star.is_finite() || g_star <= 0.0 {
            return Err(BbnError::ConfigError(format!(
                "g_star must be finite and > 0, got {g_star}"
            )));
        }
        check_abundances(&abundances, constants)?;

        let hubble_coeff =
            (8.0 * constants.pi.powi(3) * constants.gn * g_star / 90.0).sqrt();
        Ok(RadiationCosmology {
            g_star,
            hubble_coeff,
            hbar: constants.hbar,
            t0_cmb: constants.t0_cmb,
            abundances,
        })
    }

    pub fn g_star(&self) -> f64 {
        self.g_star
    }

    /// Hubble rate H(T) [1/s].
    pub fn hubble_rate(&self, temperature: f64) -> f64 {
        self.hubble_coeff * temperature * temperature / self.hbar
    }
}

impl Cosmology for RadiationCosmology {
    fn scale_factor(&self, temperature: f64) -> f64 {
        self.t0_cmb / temperature
    }

    fn time(&self, temperature: f64) -> f64 {
        self.hbar / (2.0 * self.hubble_coeff * temperature * temperature)
    }

    fn temperature(&self, time: f64) -> f64 {
        (self.hbar / (2.0 * self.hubble_coeff * time)).sqrt()
    }

    fn bbn_abundances(&self) -> &Array2<f64> {
        &self.abundances
    }
}

/// Cosmology from tabulated (T, a, t) columns.
///
/// Lookups interpolate linearly in log-log space and extend the boundary
/// power laws outside the table. The `checked_*` variants refuse to
/// extrapolate.
#[derive(Debug, Clone)]
pub struct TabulatedCosmology {
    /// Ascending temperatures.
    temperature: Vec<f64>,
    scale_factor: Vec<f64>,
    time: Vec<f64>,
    /// Ascending times and the matching temperatures.
    time_ascending: Vec<f64>,
    temperature_by_time: Vec<f64>,
    abundances: Array2<f64>,
}

impl TabulatedCosmology {
    pub fn new(
        temperature: Vec<f64>,
        scale_factor: Vec<f64>,
        time: Vec<f64>,
        abundances: Array2<f64>,
        constants: &ParameterSet,
    ) -> BbnResult<Self> {
        if temperature.len() != scale_factor.len() || temperature.len() != time.len() {
            return Err(BbnError::ConfigError(format!(
                "cosmology columns differ in length: T={}, a={}, t={}",
                temperature.len(),
                scale_factor.len(),
                time.len()
            )));
        }
        check_abundances(&abundances, constants)?;

        // Sort rows by temperature
        let mut order: Vec<usize> = (0..temperature.len()).collect();
        order.sort_by(|&i, &j| temperature[i].total_cmp(&temperature[j]));
        let temperature: Vec<f64> = order.iter().map(|&i| temperature[i]).collect();
        let scale_factor: Vec<f64> = order.iter().map(|&i| scale_factor[i]).collect();
        let time: Vec<f64> = order.iter().map(|&i| time[i]).collect();

        validate_loglog_table(&temperature, &scale_factor)?;
        validate_loglog_table(&temperature, &time)?;

        let time_ascending: Vec<f64> = time.iter().rev().copied().collect();
        let temperature_by_time: Vec<f64> = temperature.iter().rev().copied().collect();
        validate_loglog_table(&time_ascending, &temperature_by_time).map_err(|_| {
            BbnError::ConfigError(
                "cosmic time must decrease strictly with temperature".to_string(),
            )
        })?;

        Ok(TabulatedCosmology {
            temperature,
            scale_factor,
            time,
            time_ascending,
            temperature_by_time,
            abundances,
        })
    }

    /// Tabulated temperature span (min, max).
    pub fn temperature_bounds(&self) -> (f64, f64) {
        (self.temperature[0], self.temperature[self.temperature.len() - 1])
    }

    fn check_temperature(&self, temperature: f64) -> BbnResult<()> {
        let (lo, hi) = self.temperature_bounds();
        if !(lo..=hi).contains(&temperature) {
            return Err(BbnError::DomainError {
                what: "temperature".to_string(),
                value: temperature,
            });
        }
        Ok(())
    }

    pub fn checked_scale_factor(&self, temperature: f64) -> BbnResult<f64> {
        self.check_temperature(temperature)?;
        Ok(self.scale_factor(temperature))
    }

    pub fn checked_time(&self, temperature: f64) -> BbnResult<f64> {
        self.check_temperature(temperature)?;
        Ok(self.time(temperature))
    }

    pub fn checked_temperature(&self, time: f64) -> BbnResult<f64> {
        let lo = self.time_ascending[0];
        let hi = self.time_ascending[self.time_ascending.len() - 1];
        if !(lo..=hi).contains(&time) {
            return Err(BbnError::DomainError {
                what: "time".to_string(),
                value: time,
            });
        }
        Ok(self.temperature(time))
    }
}

impl Cosmology for TabulatedCosmology {
    fn scale_factor(&self, temperature: f64) -> f64 {
        interp_loglog(&self.temperature, &self.scale_factor, temperature)
    }

    fn time(&self, temperature: f64) -> f64 {
        interp_loglog(&self.temperature, &self.time, temperature)
    }

    fn temperature(&self, time: f64) -> f64 {
        interp_loglog(&self.time_ascending, &self.temperature_by_time, time)
    }

    fn bbn_abundances(&self) -> &Array2<f64> {
        &self.abundances
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bbn_math::grid::log_grid;

    fn abundances(constants: &ParameterSet) -> Array2<f64> {
        Array2::from_elem((constants.ny, 2), 1e-5)
    }

    fn radiation() -> RadiationCosmology {
        let constants = ParameterSet::default();
        RadiationCosmology::new(RadiationCosmology::G_STAR_LATE, abundances(&constants), &constants)
            .unwrap()
    }

    #[test]
    fn test_radiation_time_scale() {
        // t ≈ 1.32 s / T_MeV² for g* = 3.36
        let cosmo = radiation();
        let t = cosmo.time(1.0);
        assert!((t - 1.32).abs() < 0.01, "t(1 MeV) = {t}");
        assert!((cosmo.time(0.1) / t - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_radiation_hubble_rate() {
        let cosmo = radiation();
        assert_eq!(cosmo.g_star(), RadiationCosmology::G_STAR_LATE);
        for temp in [1e-5, 3.6e-4, 0.02, 1.0] {
            // t = 1 / (2H)
            let product = cosmo.time(temp) * cosmo.hubble_rate(temp);
            assert!((product - 0.5).abs() < 1e-12, "t·H = {product} at T = {temp}");
        }
        // H ∝ sqrt(g*) T²
        let constants = ParameterSet::default();
        let heavier =
            RadiationCosmology::new(4.0 * cosmo.g_star(), abundances(&constants), &constants)
                .unwrap();
        assert!((heavier.hubble_rate(1e-3) / cosmo.hubble_rate(1e-3) - 2.0).abs() < 1e-12);
        assert!((cosmo.hubble_rate(2e-3) / cosmo.hubble_rate(1e-3) - 4.0).abs() < 1e-12);
    }

    #[test]
    fn test_radiation_inverse() {
        let cosmo = radiation();
        for temp in [1e-5, 3.6e-4, 0.02, 1.0] {
            let back = cosmo.temperature(cosmo.time(temp));
            assert!(((back - temp) / temp).abs() < 1e-12);
        }
    }

    #[test]
    fn test_radiation_scale_factor_today() {
        let constants = ParameterSet::default();
        let cosmo = radiation();
        assert!((cosmo.scale_factor(constants.t0_cmb) - 1.0).abs() < 1e-15);
        assert!((cosmo.scale_factor(1e-3) / cosmo.scale_factor(1e-2) - 10.0).abs() < 1e-12);
    }

    #[test]
    fn test_radiation_rejects_bad_input() {
        let constants = ParameterSet::default();
        assert!(RadiationCosmology::new(0.0, abundances(&constants), &constants).is_err());
        let wrong_rows = Array2::from_elem((3, 1), 1.0);
        assert!(RadiationCosmology::new(3.36, wrong_rows, &constants).is_err());
    }

    fn tabulated_from(cosmo: &RadiationCosmology) -> TabulatedCosmology {
        let constants = ParameterSet::default();
        let temps = log_grid(1e-7, 1.0, 20, 2).unwrap().to_vec();
        // Reverse input order to exercise sorting
        let temps: Vec<f64> = temps.into_iter().rev().collect();
        let a: Vec<f64> = temps.iter().map(|&t| cosmo.scale_factor(t)).collect();
        let t: Vec<f64> = temps.iter().map(|&t| cosmo.time(t)).collect();
        TabulatedCosmology::new(temps, a, t, abundances(&constants), &constants).unwrap()
    }

    #[test]
    fn test_tabulated_reproduces_power_laws() {
        let analytic = radiation();
        let table = tabulated_from(&analytic);
        for temp in [2e-7, 1e-4, 3.3e-3, 0.5] {
            let rel = |x: f64, y: f64| ((x - y) / y).abs();
            assert!(rel(table.scale_factor(temp), analytic.scale_factor(temp)) < 1e-9);
            assert!(rel(table.time(temp), analytic.time(temp)) < 1e-9);
            let time = analytic.time(temp);
            assert!(rel(table.temperature(time), temp) < 1e-9);
        }
    }

    #[test]
    fn test_tabulated_checked_domain() {
        let table = tabulated_from(&radiation());
        assert!(table.checked_scale_factor(1e-3).is_ok());
        match table.checked_time(10.0).unwrap_err() {
            BbnError::DomainError { what, value } => {
                assert_eq!(what, "temperature");
                assert_eq!(value, 10.0);
            }
            other => panic!("Unexpected error: {other:?}"),
        }
        assert!(table.checked_temperature(1e-3).is_err());
        assert!(table.checked_temperature(100.0).is_ok());
    }

    #[test]
    fn test_tabulated_rejects_non_monotone_time() {
        let constants = ParameterSet::default();
        let err = TabulatedCosmology::new(
            vec![1e-3, 1e-2, 1e-1],
            vec![1.0, 0.1, 0.01],
            vec![10.0, 20.0, 5.0],
            abundances(&constants),
            &constants,
        )
        .unwrap_err();
        assert!(matches!(err, BbnError::ConfigError(_)));
    }
}
