// ─────────────────────────────────────────────────────────────────────
// Tokamak Neutron Source — Tridiag
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Thomas algorithm for tridiagonal systems.
//!
//! Used by the cubic spline to solve for knot second derivatives.

use tokamak_types::error::{SourceError, SourceResult};

/// Pivots smaller in magnitude than this are treated as singular.
const PIVOT_EPS: f64 = 1e-300;

/// Solve the tridiagonal system A·x = rhs.
///
/// - `sub`: sub-diagonal \[n\] (`sub[0]` unused)
/// - `diag`: main diagonal \[n\]
/// - `sup`: super-diagonal \[n\] (`sup[n-1]` unused)
/// - `rhs`: right-hand side \[n\]
///
/// Fails with `InvalidArgument` on mismatched lengths, an empty system,
/// or a vanishing pivot.
pub fn solve_tridiagonal(
    sub: &[f64],
    diag: &[f64],
    sup: &[f64],
    rhs: &[f64],
) -> SourceResult<Vec<f64>> {
    let n = rhs.len();
    if n == 0 {
        return Err(SourceError::InvalidArgument(
            "tridiagonal system must have at least one row".to_string(),
        ));
    }
    if sub.len() != n || diag.len() != n || sup.len() != n {
        return Err(SourceError::InvalidArgument(format!(
            "tridiagonal band lengths must equal {n}: sub={}, diag={}, sup={}",
            sub.len(),
            diag.len(),
            sup.len()
        )));
    }

    let mut c_prime = vec![0.0; n];
    let mut d_prime = vec![0.0; n];

    // Forward sweep
    let mut pivot = diag[0];
    for i in 0..n {
        if i > 0 {
            pivot = diag[i] - sub[i] * c_prime[i - 1];
        }
        if !pivot.is_finite() || pivot.abs() < PIVOT_EPS {
            return Err(SourceError::InvalidArgument(format!(
                "tridiagonal system is singular at row {i}"
            )));
        }
        if i + 1 < n {
            c_prime[i] = sup[i] / pivot;
        }
        let carried = if i > 0 { sub[i] * d_prime[i - 1] } else { 0.0 };
        d_prime[i] = (rhs[i] - carried) / pivot;
    }

    // Back substitution
    let mut x = d_prime;
    for i in (0..n - 1).rev() {
        x[i] -= c_prime[i] * x[i + 1];
    }
    Ok(x)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_row() {
        let x = solve_tridiagonal(&[0.0], &[4.0], &[0.0], &[2.0]).unwrap();
        assert_eq!(x, vec![0.5]);
    }

    #[test]
    fn test_spline_like_system() {
        // Natural-spline style rows on a uniform grid: [1 4 1] · M = rhs
        let n = 6;
        let sub: Vec<f64> = (0..n).map(|i| if i > 0 { 1.0 } else { 0.0 }).collect();
        let diag = vec![4.0; n];
        let sup: Vec<f64> = (0..n).map(|i| if i < n - 1 { 1.0 } else { 0.0 }).collect();
        let rhs: Vec<f64> = (0..n).map(|i| (i as f64).cos()).collect();

        let x = solve_tridiagonal(&sub, &diag, &sup, &rhs).unwrap();
        for i in 0..n {
            let mut ax = diag[i] * x[i];
            if i > 0 {
                ax += sub[i] * x[i - 1];
            }
            if i < n - 1 {
                ax += sup[i] * x[i + 1];
            }
            assert!((ax - rhs[i]).abs() < 1e-12, "row {i}: {ax} vs {}", rhs[i]);
        }
    }

    #[test]
    fn test_singular_pivot_rejected() {
        let err = solve_tridiagonal(&[0.0, 1.0], &[0.0, 1.0], &[1.0, 0.0], &[1.0, 1.0]);
        assert!(matches!(err, Err(SourceError::InvalidArgument(_))));
    }

    #[test]
    fn test_length_mismatch_rejected() {
        let err = solve_tridiagonal(&[0.0], &[1.0, 1.0], &[0.0, 0.0], &[1.0, 1.0]);
        assert!(matches!(err, Err(SourceError::InvalidArgument(_))));
        assert!(solve_tridiagonal(&[], &[], &[], &[]).is_err());
    }
}
