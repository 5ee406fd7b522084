// ─────────────────────────────────────────────────────────────────────
// Tokamak Neutron Source — Cubic Spline
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Not-a-knot cubic spline interpolation of 1-D tabulated data.
//!
//! The spline is C² with continuous third derivative across the second and
//! penultimate knots, so it reproduces any cubic polynomial exactly. Outside
//! the tabulated range the first/last cubic piece is continued: values there
//! are extrapolated, not measured.

use crate::tridiag::solve_tridiagonal;
use ndarray::{Array1, ArrayView1};
use tokamak_types::error::{SourceError, SourceResult};

/// Minimum knot count for a not-a-knot cubic.
pub const MIN_KNOTS: usize = 4;

/// Immutable cubic interpolant.
///
/// Stores knots, values and knot second derivatives; evaluation is a
/// segment lookup plus one cubic.
#[derive(Debug, Clone, PartialEq)]
pub struct CubicSpline {
    x: Vec<f64>,
    y: Vec<f64>,
    m: Vec<f64>,
}

impl CubicSpline {
    /// Fit through `(x[i], y[i])`. `x` must be strictly increasing.
    pub fn new(x: &[f64], y: &[f64]) -> SourceResult<Self> {
        let n = x.len();
        if n != y.len() {
            return Err(SourceError::InvalidArgument(format!(
                "spline knots and values differ in length: {} vs {}",
                n,
                y.len()
            )));
        }
        if n < MIN_KNOTS {
            return Err(SourceError::InvalidArgument(format!(
                "cubic spline needs at least {MIN_KNOTS} knots, got {n}"
            )));
        }
        if x.iter().chain(y).any(|v| !v.is_finite()) {
            return Err(SourceError::InvalidArgument(
                "spline knots and values must be finite".to_string(),
            ));
        }
        if x.windows(2).any(|w| w[1] <= w[0]) {
            return Err(SourceError::InvalidArgument(
                "spline knots must be strictly increasing".to_string(),
            ));
        }

        let m = not_a_knot_second_derivatives(x, y)?;
        Ok(CubicSpline {
            x: x.to_vec(),
            y: y.to_vec(),
            m,
        })
    }

    /// Knot positions.
    pub fn knots(&self) -> &[f64] {
        &self.x
    }

    /// Tabulated values at the knots.
    pub fn values(&self) -> &[f64] {
        &self.y
    }

    /// Tabulated domain `(x_first, x_last)`.
    pub fn domain(&self) -> (f64, f64) {
        (self.x[0], self.x[self.x.len() - 1])
    }

    /// Evaluate at a single coordinate.
    pub fn eval(&self, t: f64) -> f64 {
        let i = self.segment(t);
        let h = self.x[i + 1] - self.x[i];
        let a = self.x[i + 1] - t;
        let b = t - self.x[i];
        self.m[i] * a * a * a / (6.0 * h)
            + self.m[i + 1] * b * b * b / (6.0 * h)
            + (self.y[i] / h - self.m[i] * h / 6.0) * a
            + (self.y[i + 1] / h - self.m[i + 1] * h / 6.0) * b
    }

    /// Evaluate elementwise; output has the same length as the input.
    pub fn eval_many(&self, t: ArrayView1<f64>) -> Array1<f64> {
        t.mapv(|v| self.eval(v))
    }

    /// Index `i` of the piece `[x[i], x[i+1]]` used for `t`, clamped to
    /// the end pieces for extrapolation.
    fn segment(&self, t: f64) -> usize {
        let last = self.x.len() - 2;
        self.x.partition_point(|&k| k <= t).saturating_sub(1).min(last)
    }
}

/// Second derivatives at the knots under not-a-knot end conditions.
///
/// The two end conditions are substituted into the first and last interior
/// rows so the system for `m[1..n-1]` stays tridiagonal.
fn not_a_knot_second_derivatives(x: &[f64], y: &[f64]) -> SourceResult<Vec<f64>> {
    let n = x.len();
    let h: Vec<f64> = x.windows(2).map(|w| w[1] - w[0]).collect();
    let slope: Vec<f64> = (0..n - 1).map(|i| (y[i + 1] - y[i]) / h[i]).collect();

    let rows = n - 2;
    let mut sub = vec![0.0; rows];
    let mut diag = vec![0.0; rows];
    let mut sup = vec![0.0; rows];
    let mut rhs = vec![0.0; rows];
    for j in 0..rows {
        let i = j + 1;
        sub[j] = h[i - 1];
        diag[j] = 2.0 * (h[i - 1] + h[i]);
        sup[j] = h[i];
        rhs[j] = 6.0 * (slope[i] - slope[i - 1]);
    }

    // m[0] = ((h0 + h1) m[1] - h0 m[2]) / h1
    let (h0, h1) = (h[0], h[1]);
    diag[0] = (h0 + h1) * (h0 + 2.0 * h1) / h1;
    sup[0] = (h1 * h1 - h0 * h0) / h1;

    // m[n-1] = ((ha + hb) m[n-2] - hb m[n-3]) / ha
    let (ha, hb) = (h[n - 3], h[n - 2]);
    sub[rows - 1] = (ha * ha - hb * hb) / ha;
    diag[rows - 1] = (ha + hb) * (2.0 * ha + hb) / ha;

    let interior = solve_tridiagonal(&sub, &diag, &sup, &rhs)?;

    let mut m = vec![0.0; n];
    m[1..n - 1].copy_from_slice(&interior);
    m[0] = ((h0 + h1) * m[1] - h0 * m[2]) / h1;
    m[n - 1] = ((ha + hb) * m[n - 2] - hb * m[n - 3]) / ha;
    Ok(m)
}
