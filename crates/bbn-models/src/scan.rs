// ─────────────────────────────────────────────────────────────────────
// BBN Injection Models — Scan
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Parameter scans that amortize one propagator solve over many points.
//!
//! The cascade and the reaction network are linear in the source terms, so
//! a parameter that multiplies every source term (n0a for decays, an overall
//! <σv> scale with fixed s/p ratio for annihilations) rescales the
//! propagator exponent by the same factor. One solve at a reference point
//! then serves the whole scan.

use bbn_types::error::{BbnError, BbnResult};
use ndarray::Array2;
use tracing::{debug, info};

use crate::scenario::Scenario;
use crate::solver::{MatrixGenerator, NuclearReactor};

/// Final abundances at one scan point.
#[derive(Debug, Clone)]
pub struct ScanPoint {
    pub value: f64,
    pub abundances: Array2<f64>,
}

/// Scan a linear normalization parameter.
///
/// `build` must produce scenarios that differ only in `value`, and `value`
/// must multiply all source terms. The first point above threshold with a
/// non-zero value is solved; every other point reuses its propagator
/// rescaled by `value / reference`.
pub fn normalization_scan<F>(
    values: &[f64],
    mut build: F,
    reactor: &dyn NuclearReactor,
    generator: &dyn MatrixGenerator,
) -> BbnResult<Vec<ScanPoint>>
where
    F: FnMut(f64) -> BbnResult<Scenario>,
{
    info!(points = values.len(), "normalization scan starting");

    // Propagator exponent per unit of the scanned parameter
    let mut unit_matp: Option<Array2<f64>> = None;
    let mut points = Vec::with_capacity(values.len());

    for (index, &value) in values.iter().enumerate() {
        if !value.is_finite() || value < 0.0 {
            return Err(BbnError::ConfigError(format!(
                "scan value #{index} must be finite and >= 0, got {value}"
            )));
        }

        let mut scenario = build(value)?;
        if !scenario.is_below_threshold() {
            if let Some(unit) = &unit_matp {
                scenario.set_propagator_buffer(unit * value);
            } else if value == 0.0 {
                let ny = scenario.cosmology().bbn_abundances().nrows();
                scenario.set_propagator_buffer(Array2::zeros((ny, ny)));
            }
        }

        let abundances = scenario.run_disintegration(reactor, generator)?;

        if unit_matp.is_none() && value > 0.0 {
            if let Some(matp) = scenario.propagator_buffer() {
                debug!(index, reference = value, "scan reference propagator solved");
                unit_matp = Some(matp / value);
            }
        }
        debug!(index, value, "scan point done");
        points.push(ScanPoint { value, abundances });
    }

    info!(
        points = points.len(),
        solved = unit_matp.is_some(),
        "normalization scan complete"
    );
    Ok(points)
}

/// Copy the buffered propagator of `from` into `to`.
///
/// Returns `false` when `from` holds no propagator. The same precondition
/// as [`Scenario::set_propagator_buffer`] applies.
pub fn transfer_buffer(from: &Scenario, to: &mut Scenario) -> bool {
    match from.propagator_buffer() {
        Some(matp) => {
            to.set_propagator_buffer(matp.clone());
            true
        }
        None => false,
    }
}
