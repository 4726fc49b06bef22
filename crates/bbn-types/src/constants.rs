// ─────────────────────────────────────────────────────────────────────
// BBN Injection Models — Constants
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Benchmark values backing [`crate::config::ParameterSet::default`].
//!
//! Natural units throughout: energies and temperatures in MeV, times in s.

use std::f64::consts::PI;

// -- Physical constants --

/// Fine-structure constant.
pub const ALPHA: f64 = 1.0 / 137.036;

/// Electron mass [MeV].
pub const ME: f64 = 0.511;

/// Electron mass squared [MeV²].
pub const ME2: f64 = ME * ME;

/// Classical electron radius [1/MeV].
pub const RE: f64 = ALPHA / ME;

/// Newton's constant [1/MeV²].
pub const GN: f64 = 6.70861e-45;

/// Reduced Planck constant [MeV·s].
pub const HBAR: f64 = 6.582119514e-22;

/// Speed of light [cm/s].
pub const C_SI: f64 = 2.99792458e10;

// -- Mathematical constants --

/// Riemann zeta function at 3.
pub const ZETA3: f64 = 1.202_056_903_159_594_2;

/// π².
pub const PI2: f64 = PI * PI;

// -- Cosmological benchmarks --

/// Dark-matter mass density today [MeV⁴] (Ω_c h² = 0.12).
pub const RHO_D0: f64 = 0.12 * 8.095894680377574e-35;

/// CMB temperature today [MeV].
pub const T0_CMB: f64 = 2.72548 * 8.6173324e-11;

// -- Interpolation tables --

/// log10 bounds of the energy tables [MeV].
pub const E_LOG_RANGE: (f64, f64) = (0.0, 3.0);

/// log10 bounds of the temperature tables [MeV].
pub const T_LOG_RANGE: (f64, f64) = (-6.0, -1.0);

/// Table entries per decade.
pub const NUM_PD: usize = 150;

// -- Algorithm parameters --

/// Number of tracked isotopes.
pub const NY: usize = 9;

/// Minimum injection energy with any nuclear effect [MeV].
/// Must stay below the lowest nucleon-interaction threshold of 1.586627 MeV.
pub const EMIN: f64 = 1.5;

/// Value used for "approximately" zero.
pub const APPROX_ZERO: f64 = 1e-200;

/// Relative accuracy of each integral.
pub const EPS: f64 = 1e-3;

/// Maximal E/T before the Boltzmann factor overflows.
pub const EPHB_T_MAX: f64 = 200.0;

/// Energy grid points per decade for the cascade solution.
pub const NE_PD: usize = 150;

/// Minimal number of energy grid points.
pub const NE_MIN: usize = 10;

/// Temperature grid points per decade for the thermal nuclear rates.
pub const NT_PD: usize = 50;
