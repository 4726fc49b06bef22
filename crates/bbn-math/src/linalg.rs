// ─────────────────────────────────────────────────────────────────────
// BBN Injection Models — Linalg
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Dense linear algebra for the abundance propagator.
//!
//! LU solve with partial pivoting and the matrix exponential by Padé
//! scaling and squaring (Higham 2005, as in `scipy.linalg.expm`).

use bbn_types::error::{BbnError, BbnResult};
use ndarray::Array2;

/// Pivot magnitude below which the system is treated as singular.
const SINGULAR_PIVOT: f64 = 1e-300;

/// Largest 1-norm for which each Padé degree reaches double precision.
const THETA_3: f64 = 1.495585217958292e-2;
const THETA_5: f64 = 2.539398330063230e-1;
const THETA_7: f64 = 9.504178996162932e-1;
const THETA_9: f64 = 2.097847961257068;
const THETA_13: f64 = 5.371920351148152;

const PADE_3: [f64; 4] = [120.0, 60.0, 12.0, 1.0];
const PADE_5: [f64; 6] = [30240.0, 15120.0, 3360.0, 420.0, 30.0, 1.0];
const PADE_7: [f64; 8] = [
    17297280.0, 8648640.0, 1995840.0, 277200.0, 25200.0, 1512.0, 56.0, 1.0,
];
const PADE_9: [f64; 10] = [
    17643225600.0,
    8821612800.0,
    2075673600.0,
    302702400.0,
    30270240.0,
    2162160.0,
    110880.0,
    3960.0,
    90.0,
    1.0,
];
const PADE_13: [f64; 14] = [
    64764752532480000.0,
    32382376266240000.0,
    7771770303897600.0,
    1187353796428800.0,
    129060195264000.0,
    10559470521600.0,
    670442572800.0,
    33522128640.0,
    1323241920.0,
    40840800.0,
    960960.0,
    16380.0,
    182.0,
    1.0,
];

/// Maximum absolute column sum.
pub fn norm_1(a: &Array2<f64>) -> f64 {
    a.columns()
        .into_iter()
        .map(|col| col.iter().map(|v| v.abs()).sum::<f64>())
        .fold(0.0, f64::max)
}

fn require_square(a: &Array2<f64>, what: &str) -> BbnResult<usize> {
    let (m, n) = a.dim();
    if m != n {
        return Err(BbnError::LinAlg(format!(
            "{what} requires a square matrix, got {m}x{n}"
        )));
    }
    if !a.iter().all(|v| v.is_finite()) {
        return Err(BbnError::LinAlg(format!(
            "{what} received non-finite matrix entries"
        )));
    }
    Ok(n)
}

/// Solve A X = B for X by LU decomposition with partial pivoting.
///
/// `b` may carry any number of right-hand-side columns.
pub fn lu_solve(a: &Array2<f64>, b: &Array2<f64>) -> BbnResult<Array2<f64>> {
    let n = require_square(a, "LU solve")?;
    if b.nrows() != n {
        return Err(BbnError::LinAlg(format!(
            "LU solve dimension mismatch: A is {n}x{n}, B has {} rows",
            b.nrows()
        )));
    }

    let mut lu = a.clone();
    let mut x = b.clone();
    let nrhs = x.ncols();

    for k in 0..n {
        // Partial pivoting
        let mut pivot_row = k;
        let mut pivot_abs = lu[[k, k]].abs();
        for r in (k + 1)..n {
            let v = lu[[r, k]].abs();
            if v > pivot_abs {
                pivot_abs = v;
                pivot_row = r;
            }
        }
        if pivot_abs < SINGULAR_PIVOT {
            return Err(BbnError::LinAlg(format!(
                "LU solve: matrix is singular at column {k}"
            )));
        }
        if pivot_row != k {
            for c in 0..n {
                lu.swap([k, c], [pivot_row, c]);
            }
            for c in 0..nrhs {
                x.swap([k, c], [pivot_row, c]);
            }
        }

        // Forward elimination
        let pivot = lu[[k, k]];
        for r in (k + 1)..n {
            let factor = lu[[r, k]] / pivot;
            if factor == 0.0 {
                continue;
            }
            lu[[r, k]] = factor;
            for c in (k + 1)..n {
                lu[[r, c]] -= factor * lu[[k, c]];
            }
            for c in 0..nrhs {
                x[[r, c]] -= factor * x[[k, c]];
            }
        }
    }

    // Back substitution
    for c in 0..nrhs {
        for i in (0..n).rev() {
            let mut sum = x[[i, c]];
            for j in (i + 1)..n {
                sum -= lu[[i, j]] * x[[j, c]];
            }
            x[[i, c]] = sum / lu[[i, i]];
        }
    }

    Ok(x)
}

/// Odd (U) and even (V) parts of a low-degree Padé approximant.
fn pade_low(a: &Array2<f64>, coeffs: &[f64]) -> (Array2<f64>, Array2<f64>) {
    let n = a.nrows();
    let ident = Array2::<f64>::eye(n);
    let a2 = a.dot(a);

    let mut u_inner = &ident * coeffs[1];
    let mut v = &ident * coeffs[0];
    let mut power = ident;
    for k in 1..coeffs.len() / 2 {
        power = power.dot(&a2);
        u_inner = u_inner + &power * coeffs[2 * k + 1];
        v = v + &power * coeffs[2 * k];
    }
    (a.dot(&u_inner), v)
}

/// Degree-13 Padé approximant on a pre-scaled matrix.
fn pade_13(a: &Array2<f64>) -> (Array2<f64>, Array2<f64>) {
    let b = &PADE_13;
    let ident = Array2::<f64>::eye(a.nrows());
    let a2 = a.dot(a);
    let a4 = a2.dot(&a2);
    let a6 = a4.dot(&a2);

    let u_high = &a6 * b[13] + &a4 * b[11] + &a2 * b[9];
    let u_inner = a6.dot(&u_high) + &a6 * b[7] + &a4 * b[5] + &a2 * b[3] + &ident * b[1];
    let u = a.dot(&u_inner);

    let v_high = &a6 * b[12] + &a4 * b[10] + &a2 * b[8];
    let v = a6.dot(&v_high) + &a6 * b[6] + &a4 * b[4] + &a2 * b[2] + &ident * b[0];
    (u, v)
}

/// Matrix exponential of a square matrix.
///
/// Picks the lowest Padé degree that is accurate for the 1-norm of `a`,
/// otherwise scales by 2^-s, applies degree 13 and squares s times.
pub fn expm(a: &Array2<f64>) -> BbnResult<Array2<f64>> {
    let n = require_square(a, "Matrix exponential")?;
    if n == 0 {
        return Ok(Array2::zeros((0, 0)));
    }

    let norm = norm_1(a);
    let low_orders: [(f64, &[f64]); 4] = [
        (THETA_3, &PADE_3),
        (THETA_5, &PADE_5),
        (THETA_7, &PADE_7),
        (THETA_9, &PADE_9),
    ];
    for (theta, coeffs) in low_orders {
        if norm <= theta {
            let (u, v) = pade_low(a, coeffs);
            return lu_solve(&(&v - &u), &(&v + &u));
        }
    }

    let s = ((norm / THETA_13).log2().ceil()).max(0.0) as i32;
    let scaled = a / 2f64.powi(s);
    let (u, v) = pade_13(&scaled);
    let mut result = lu_solve(&(&v - &u), &(&v + &u))?;
    for _ in 0..s {
        result = result.dot(&result);
    }

    if !result.iter().all(|v| v.is_finite()) {
        return Err(BbnError::LinAlg(
            "Matrix exponential overflowed".to_string(),
        ));
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn assert_close(a: &Array2<f64>, b: &Array2<f64>, tol: f64) {
        assert_eq!(a.dim(), b.dim());
        for (x, y) in a.iter().zip(b.iter()) {
            let scale = y.abs().max(1.0);
            assert!((x - y).abs() <= tol * scale, "{x} vs {y}");
        }
    }

    #[test]
    fn test_lu_solve_simple() {
        let a = array![[4.0, 3.0], [6.0, 3.0]];
        let b = array![[10.0], [12.0]];
        let x = lu_solve(&a, &b).unwrap();
        assert!((x[[0, 0]] - 1.0).abs() < 1e-12);
        assert!((x[[1, 0]] - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_lu_solve_needs_pivoting() {
        let a = array![[0.0, 1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 2.0]];
        let b = array![[3.0, 1.0], [5.0, 2.0], [8.0, 4.0]];
        let x = lu_solve(&a, &b).unwrap();
        let expected = array![[5.0, 2.0], [3.0, 1.0], [4.0, 2.0]];
        assert_close(&x, &expected, 1e-12);
    }

    #[test]
    fn test_lu_solve_singular() {
        let a = array![[1.0, 2.0], [2.0, 4.0]];
        let b = array![[1.0], [1.0]];
        let err = lu_solve(&a, &b).unwrap_err();
        assert!(matches!(err, BbnError::LinAlg(_)));
    }

    #[test]
    fn test_expm_zero_is_identity() {
        let z = Array2::<f64>::zeros((9, 9));
        assert_close(&expm(&z).unwrap(), &Array2::eye(9), 1e-15);
    }

    #[test]
    fn test_expm_diagonal() {
        // Spans the low-order and the scaled degree-13 branches
        let diag = [1e-3, -0.2, 0.9, 2.0, -7.5, 30.0];
        let mut a = Array2::zeros((6, 6));
        for (i, d) in diag.iter().enumerate() {
            a[[i, i]] = *d;
        }
        let e = expm(&a).unwrap();
        for (i, d) in diag.iter().enumerate() {
            let expected = d.exp();
            assert!(
                ((e[[i, i]] - expected) / expected).abs() < 1e-12,
                "exp({d}) = {}, expected {expected}",
                e[[i, i]]
            );
        }
    }

    #[test]
    fn test_expm_nilpotent() {
        // exp([[0, t], [0, 0]]) = [[1, t], [0, 1]]
        let a = array![[0.0, 3.5], [0.0, 0.0]];
        let expected = array![[1.0, 3.5], [0.0, 1.0]];
        assert_close(&expm(&a).unwrap(), &expected, 1e-13);
    }

    #[test]
    fn test_expm_rotation() {
        let t: f64 = 1.3;
        let a = array![[0.0, -t], [t, 0.0]];
        let expected = array![[t.cos(), -t.sin()], [t.sin(), t.cos()]];
        assert_close(&expm(&a).unwrap(), &expected, 1e-13);
    }

    #[test]
    fn test_expm_rejects_non_square() {
        let err = expm(&Array2::zeros((2, 3))).unwrap_err();
        assert!(matches!(err, BbnError::LinAlg(_)));
    }

    #[test]
    fn test_expm_rejects_nan() {
        let a = array![[f64::NAN, 0.0], [0.0, 1.0]];
        assert!(expm(&a).is_err());
    }
}
