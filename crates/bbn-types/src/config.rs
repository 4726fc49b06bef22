// ─────────────────────────────────────────────────────────────────────
// BBN Injection Models — Config
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

use crate::constants;
use crate::error::{BbnError, BbnResult};

/// Process-wide physical and numerical parameters.
///
/// Built once (from defaults or a JSON file) and handed to every scenario.
/// Missing JSON fields fall back to the benchmark values in [`constants`].
/// `me2`, `re` and `pi2` are always derived from `me`, `alpha` and `pi`;
/// values for them in JSON input are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "ParameterInputs")]
pub struct ParameterSet {
    pub alpha: f64,
    pub me: f64,
    /// me² [MeV²], derived.
    pub me2: f64,
    /// alpha / me [1/MeV], derived.
    pub re: f64,
    pub gn: f64,
    pub hbar: f64,
    pub c_si: f64,
    pub zeta3: f64,
    pub pi: f64,
    /// π², derived.
    pub pi2: f64,
    /// Relative accuracy of each integral.
    pub eps: f64,
    pub approx_zero: f64,
    /// Upper cutoff on E/T inside exponentials.
    pub ephb_t_max: f64,
    pub ne_pd: usize,
    pub ne_min: usize,
    pub nt_pd: usize,
    pub num_pd: usize,
    pub e_log_range: (f64, f64),
    pub t_log_range: (f64, f64),
    pub ny: usize,
    /// Injection energies at or below this value leave abundances untouched [MeV].
    pub emin: f64,
    pub rho_d0: f64,
    pub t0_cmb: f64,
}

impl Default for ParameterSet {
    fn default() -> Self {
        ParameterSet {
            alpha: constants::ALPHA,
            me: constants::ME,
            me2: constants::ME2,
            re: constants::RE,
            gn: constants::GN,
            hbar: constants::HBAR,
            c_si: constants::C_SI,
            zeta3: constants::ZETA3,
            pi: PI,
            pi2: constants::PI2,
            eps: constants::EPS,
            approx_zero: constants::APPROX_ZERO,
            ephb_t_max: constants::EPHB_T_MAX,
            ne_pd: constants::NE_PD,
            ne_min: constants::NE_MIN,
            nt_pd: constants::NT_PD,
            num_pd: constants::NUM_PD,
            e_log_range: constants::E_LOG_RANGE,
            t_log_range: constants::T_LOG_RANGE,
            ny: constants::NY,
            emin: constants::EMIN,
            rho_d0: constants::RHO_D0,
            t0_cmb: constants::T0_CMB,
        }
    }
}

/// Independent fields of [`ParameterSet`] as read from JSON.
#[derive(Deserialize)]
#[serde(default)]
struct ParameterInputs {
    alpha: f64,
    me: f64,
    gn: f64,
    hbar: f64,
    c_si: f64,
    zeta3: f64,
    pi: f64,
    eps: f64,
    approx_zero: f64,
    ephb_t_max: f64,
    ne_pd: usize,
    ne_min: usize,
    nt_pd: usize,
    num_pd: usize,
    e_log_range: (f64, f64),
    t_log_range: (f64, f64),
    ny: usize,
    emin: f64,
    rho_d0: f64,
    t0_cmb: f64,
}

impl Default for ParameterInputs {
    fn default() -> Self {
        let d = ParameterSet::default();
        ParameterInputs {
            alpha: d.alpha,
            me: d.me,
            gn: d.gn,
            hbar: d.hbar,
            c_si: d.c_si,
            zeta3: d.zeta3,
            pi: d.pi,
            eps: d.eps,
            approx_zero: d.approx_zero,
            ephb_t_max: d.ephb_t_max,
            ne_pd: d.ne_pd,
            ne_min: d.ne_min,
            nt_pd: d.nt_pd,
            num_pd: d.num_pd,
            e_log_range: d.e_log_range,
            t_log_range: d.t_log_range,
            ny: d.ny,
            emin: d.emin,
            rho_d0: d.rho_d0,
            t0_cmb: d.t0_cmb,
        }
    }
}

impl From<ParameterInputs> for ParameterSet {
    fn from(i: ParameterInputs) -> Self {
        ParameterSet {
            alpha: i.alpha,
            me: i.me,
            me2: 0.0,
            re: 0.0,
            gn: i.gn,
            hbar: i.hbar,
            c_si: i.c_si,
            zeta3: i.zeta3,
            pi: i.pi,
            pi2: 0.0,
            eps: i.eps,
            approx_zero: i.approx_zero,
            ephb_t_max: i.ephb_t_max,
            ne_pd: i.ne_pd,
            ne_min: i.ne_min,
            nt_pd: i.nt_pd,
            num_pd: i.num_pd,
            e_log_range: i.e_log_range,
            t_log_range: i.t_log_range,
            ny: i.ny,
            emin: i.emin,
            rho_d0: i.rho_d0,
            t0_cmb: i.t0_cmb,
        }
        .with_derived()
    }
}

impl ParameterSet {
    /// Recompute `me2`, `re` and `pi2` from `me`, `alpha` and `pi`.
    ///
    /// Needed after overriding those inputs with struct-update syntax.
    pub fn with_derived(mut self) -> Self {
        self.me2 = self.me * self.me;
        self.re = self.alpha / self.me;
        self.pi2 = self.pi * self.pi;
        self
    }

    /// Load from JSON file and validate.
    pub fn from_file(path: &str) -> BbnResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    pub fn from_json_str(json: &str) -> BbnResult<Self> {
        let params: Self = serde_json::from_str(json)?;
        params.validate()?;
        Ok(params)
    }

    pub fn validate(&self) -> BbnResult<()> {
        let positive = [
            ("alpha", self.alpha),
            ("me", self.me),
            ("me2", self.me2),
            ("re", self.re),
            ("gn", self.gn),
            ("hbar", self.hbar),
            ("c_si", self.c_si),
            ("zeta3", self.zeta3),
            ("pi", self.pi),
            ("pi2", self.pi2),
            ("eps", self.eps),
            ("approx_zero", self.approx_zero),
            ("ephb_t_max", self.ephb_t_max),
            ("emin", self.emin),
            ("rho_d0", self.rho_d0),
            ("t0_cmb", self.t0_cmb),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(BbnError::ConfigError(format!(
                    "parameter '{name}' must be finite and > 0, got {value}"
                )));
            }
        }
        for (name, value, expected) in [
            ("me2", self.me2, self.me * self.me),
            ("re", self.re, self.alpha / self.me),
            ("pi2", self.pi2, self.pi * self.pi),
        ] {
            if (value - expected).abs() > 1e-12 * expected.abs() {
                return Err(BbnError::ConfigError(format!(
                    "derived parameter '{name}' is {value}, inputs give {expected}"
                )));
            }
        }
        if self.ny == 0 || self.nt_pd == 0 || self.ne_pd == 0 || self.num_pd == 0 {
            return Err(BbnError::ConfigError(
                "grid densities and isotope count must be non-zero".to_string(),
            ));
        }
        for (name, (lo, hi)) in [
            ("e_log_range", self.e_log_range),
            ("t_log_range", self.t_log_range),
        ] {
            if !(lo.is_finite() && hi.is_finite() && lo < hi) {
                return Err(BbnError::ConfigError(format!(
                    "'{name}' requires min < max, got ({lo}, {hi})"
                )));
            }
        }
        Ok(())
    }

    /// Number of entries of the energy interpolation tables.
    pub fn e_num(&self) -> usize {
        ((self.e_log_range.1 - self.e_log_range.0) * self.num_pd as f64).round() as usize
    }

    /// Number of entries of the temperature interpolation tables.
    pub fn t_num(&self) -> usize {
        ((self.t_log_range.1 - self.t_log_range.0) * self.num_pd as f64).round() as usize
    }
}

/// Parameters of a decaying particle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DecayParams {
    /// Mass [MeV].
    pub mphi: f64,
    /// Lifetime [s].
    pub tau: f64,
    /// Reference temperature at which `n0a` is quoted [MeV].
    pub temp0: f64,
    /// Number density relative to photons at `temp0`.
    pub n0a: f64,
    /// Branching ratio into e+e- pairs.
    pub bree: f64,
    /// Branching ratio into two photons.
    pub braa: f64,
}

/// Parameters of an annihilating dark-matter particle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnnihilationParams {
    /// Mass [MeV].
    pub mchi: f64,
    /// s-wave part of <σv> [cm³/s].
    pub a: f64,
    /// p-wave part of <σv> [cm³/s].
    pub b: f64,
    /// Kinetic decoupling temperature [MeV]. Zero keeps the particles
    /// in kinetic equilibrium with the heat bath.
    #[serde(default)]
    pub tempkd: f64,
    pub bree: f64,
    pub braa: f64,
}

/// Serialized scenario description, tagged by `"model"`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "model", rename_all = "snake_case")]
pub enum ScenarioConfig {
    Decay(DecayParams),
    Annihilation(AnnihilationParams),
}

impl ScenarioConfig {
    pub fn from_file(path: &str) -> BbnResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    pub fn from_json_str(json: &str) -> BbnResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        Ok(config)
    }
}
