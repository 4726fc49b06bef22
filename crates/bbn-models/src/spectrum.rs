//! Final-state radiation off a monochromatic e+e- pair.

use bbn_types::config::ParameterSet;

/// Photon spectrum per injected electron, per unit photon energy:
///
/// dN/dE = 1/E0 · α/π · (1 + (1-x)²)/x · ln((1-x)/y),  x = E/E0, y = me²/(4E0²)
///
/// Exactly zero for `x <= 0` and `x >= 1 - y`.
pub fn fsr_photon_kernel(energy: f64, e0: f64, constants: &ParameterSet) -> f64 {
    let y = constants.me2 / (4.0 * e0 * e0);
    if !(energy > 0.0 && energy < e0 * (1.0 - y)) {
        return 0.0;
    }

    let x = energy / e0;
    let log_term = ((1.0 - x) / y).ln();
    // Round-off right at the kinematic edge
    if log_term <= 0.0 {
        return 0.0;
    }

    (constants.alpha / constants.pi) * (1.0 + (1.0 - x).powi(2)) / x * log_term / e0
}
