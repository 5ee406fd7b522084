// ─────────────────────────────────────────────────────────────────────
// Tokamak Neutron Source — Plasma Profile
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Continuous plasma profile built from a tabulated flux-surface table.
//!
//! Six independent cubic interpolants of the flux coordinate ψ:
//! minor radius a, shift sh, elongation k, triangularity δ, ion
//! temperature Ti and density N. Flux-surface shape follows
//!   R(ψ, θ) = R_axis + sh(ψ) + a(ψ)·(cos θ − δ(ψ)·sin²θ)
//!   Z(ψ, θ) = Z_axis + a(ψ)·k(ψ)·sin θ
//! with lengths converted from metres to centimetres.

use ndarray::{Array1, ArrayView1, Zip};
use std::path::Path;
use tokamak_math::spline::CubicSpline;
use tokamak_types::constants::M_TO_CM;
use tokamak_types::error::SourceResult;
use tokamak_types::table::ProfileTable;

/// Immutable set of profile interpolants. Safe to share between threads.
///
/// Values for ψ outside the tabulated grid are extrapolated.
#[derive(Debug, Clone, PartialEq)]
pub struct PlasmaProfile {
    psi: Array1<f64>,
    minor_radius: CubicSpline,
    shift: CubicSpline,
    elongation: CubicSpline,
    triangularity: CubicSpline,
    ion_temperature: CubicSpline,
    density: CubicSpline,
}

impl PlasmaProfile {
    pub fn from_table(table: &ProfileTable) -> SourceResult<Self> {
        let c = table.columns();
        let psi = &c.psi;
        Ok(PlasmaProfile {
            psi: Array1::from(psi.clone()),
            minor_radius: CubicSpline::new(psi, &c.minor_radius)?,
            shift: CubicSpline::new(psi, &c.shift)?,
            elongation: CubicSpline::new(psi, &c.elongation)?,
            triangularity: CubicSpline::new(psi, &c.triangularity)?,
            ion_temperature: CubicSpline::new(psi, &c.ion_temperature)?,
            density: CubicSpline::new(psi, &c.density)?,
        })
    }

    /// Load a CSV parametrization (`psi, a, sh, k, delta, Ti, N`).
    pub fn from_file<P: AsRef<Path>>(path: P) -> SourceResult<Self> {
        Self::from_table(&ProfileTable::from_file(path)?)
    }

    /// Tabulated flux grid.
    pub fn psi(&self) -> ArrayView1<'_, f64> {
        self.psi.view()
    }

    /// Minor radius a(ψ) [m].
    pub fn minor_radius(&self) -> &CubicSpline {
        &self.minor_radius
    }

    /// Shift sh(ψ) [m].
    pub fn shift(&self) -> &CubicSpline {
        &self.shift
    }

    pub fn elongation(&self) -> &CubicSpline {
        &self.elongation
    }

    pub fn triangularity(&self) -> &CubicSpline {
        &self.triangularity
    }

    /// Ion temperature Ti(ψ) [keV].
    pub fn ion_temperature(&self) -> &CubicSpline {
        &self.ion_temperature
    }

    /// Density N(ψ) [10^19 m⁻³].
    pub fn density(&self) -> &CubicSpline {
        &self.density
    }

    /// Major-radius coordinate R(ψ, θ) [cm] for an axis at `r_axis` [m].
    pub fn major_radius(&self, psi: f64, theta: f64, r_axis: f64) -> f64 {
        let a = self.minor_radius.eval(psi);
        let delta = self.triangularity.eval(psi);
        let sin_t = theta.sin();
        (r_axis + self.shift.eval(psi) + a * (theta.cos() - delta * sin_t * sin_t)) * M_TO_CM
    }

    /// Vertical coordinate Z(ψ, θ) [cm] for an axis at `z_axis` [m].
    pub fn vertical_position(&self, psi: f64, theta: f64, z_axis: f64) -> f64 {
        (z_axis + self.minor_radius.eval(psi) * self.elongation.eval(psi) * theta.sin()) * M_TO_CM
    }

    /// Batched R(ψ, θ); `psi` and `theta` must have equal length.
    pub fn major_radius_many(
        &self,
        psi: ArrayView1<f64>,
        theta: ArrayView1<f64>,
        r_axis: f64,
    ) -> Array1<f64> {
        Zip::from(&psi)
            .and(&theta)
            .map_collect(|&p, &t| self.major_radius(p, t, r_axis))
    }

    /// Batched Z(ψ, θ); `psi` and `theta` must have equal length.
    pub fn vertical_position_many(
        &self,
        psi: ArrayView1<f64>,
        theta: ArrayView1<f64>,
        z_axis: f64,
    ) -> Array1<f64> {
        Zip::from(&psi)
            .and(&theta)
            .map_collect(|&p, &t| self.vertical_position(p, t, z_axis))
    }
}
