//! Piecewise power-law (log-log linear) interpolation on sorted tables.

use bbn_types::error::{BbnError, BbnResult};

/// Check that `xs` is strictly increasing and `ys` matches in length with
/// strictly positive entries, as required by [`interp_loglog`].
pub fn validate_loglog_table(xs: &[f64], ys: &[f64]) -> BbnResult<()> {
    if xs.len() < 2 || xs.len() != ys.len() {
        return Err(BbnError::ConfigError(format!(
            "log-log table needs >= 2 matching points, got {} x and {} y",
            xs.len(),
            ys.len()
        )));
    }
    if !xs.iter().chain(ys.iter()).all(|v| v.is_finite() && *v > 0.0) {
        return Err(BbnError::ConfigError(
            "log-log table entries must be finite and > 0".to_string(),
        ));
    }
    if xs.windows(2).any(|w| w[1] <= w[0]) {
        return Err(BbnError::ConfigError(
            "log-log table abscissae must be strictly increasing".to_string(),
        ));
    }
    Ok(())
}

/// Index of the cell containing `x`, clamped to the first/last cell.
fn cell_index(xs: &[f64], x: f64) -> usize {
    let upper = xs.partition_point(|&v| v <= x);
    upper.clamp(1, xs.len() - 1) - 1
}

/// Interpolate `ys(xs)` at `x` linearly in log-log space.
///
/// Outside the table the end segments are extended, i.e. the boundary
/// power law is extrapolated.
pub fn interp_loglog(xs: &[f64], ys: &[f64], x: f64) -> f64 {
    let i = cell_index(xs, x);
    let (lx0, lx1) = (xs[i].ln(), xs[i + 1].ln());
    let (ly0, ly1) = (ys[i].ln(), ys[i + 1].ln());
    let t = (x.ln() - lx0) / (lx1 - lx0);
    (ly0 + t * (ly1 - ly0)).exp()
}
