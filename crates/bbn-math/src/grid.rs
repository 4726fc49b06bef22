// ─────────────────────────────────────────────────────────────────────
// BBN Injection Models — Grid
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Logarithmically spaced grids for energies and temperatures.

use bbn_types::error::{BbnError, BbnResult};
use bbn_types::state::TemperatureRange;
use ndarray::Array1;

/// Log-spaced grid from `min` to `max` (both included) with at least
/// `points_per_decade` points per decade and never fewer than `min_points`.
pub fn log_grid(
    min: f64,
    max: f64,
    points_per_decade: usize,
    min_points: usize,
) -> BbnResult<Array1<f64>> {
    if !(min.is_finite() && max.is_finite()) || min <= 0.0 || min >= max {
        return Err(BbnError::ConfigError(format!(
            "log grid requires 0 < min < max, got ({min}, {max})"
        )));
    }
    if points_per_decade == 0 {
        return Err(BbnError::ConfigError(
            "log grid requires points_per_decade > 0".to_string(),
        ));
    }

    let (lmin, lmax) = (min.log10(), max.log10());
    // Slack keeps exact decade counts from rounding up
    let cells = ((lmax - lmin) * points_per_decade as f64 - 1e-9).ceil() as usize;
    let n = (cells + 1).max(min_points.max(2));

    let mut grid = Array1::logspace(10.0, lmin, lmax, n);
    // Pin the endpoints against round-off in powf
    grid[0] = min;
    grid[n - 1] = max;
    Ok(grid)
}

/// Temperature grid over `range` with `points_per_decade` (typically `nt_pd`).
pub fn temperature_grid(
    range: &TemperatureRange,
    points_per_decade: usize,
) -> BbnResult<Array1<f64>> {
    log_grid(range.min, range.max, points_per_decade, 2)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_grid_endpoints() {
        let g = log_grid(1e-4, 1e-2, 50, 2).unwrap();
        assert_eq!(g.len(), 101);
        assert_eq!(g[0], 1e-4);
        assert_eq!(g[100], 1e-2);
        assert!((g[50] - 1e-3).abs() / 1e-3 < 1e-12);
    }

    #[test]
    fn test_log_grid_min_points() {
        let g = log_grid(1.0, 1.1, 1, 10).unwrap();
        assert_eq!(g.len(), 10);
        for i in 1..g.len() {
            assert!(g[i] > g[i - 1]);
        }
    }

    #[test]
    fn test_log_grid_invalid() {
        assert!(log_grid(1.0, 0.5, 10, 2).is_err());
        assert!(log_grid(0.0, 1.0, 10, 2).is_err());
        assert!(log_grid(1.0, 10.0, 0, 2).is_err());
    }

    #[test]
    fn test_temperature_grid_spans_range() {
        let range = TemperatureRange::new(1e-6, 1e-1).unwrap();
        let g = temperature_grid(&range, 50).unwrap();
        assert_eq!(g.len(), 251);
        assert_eq!(g[0], range.min);
        assert_eq!(g[g.len() - 1], range.max);
    }
}
