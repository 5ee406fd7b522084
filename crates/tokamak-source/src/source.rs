// ─────────────────────────────────────────────────────────────────────
// Tokamak Neutron Source — Emission Sources
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Ring emission sources for a Monte Carlo transport code.
//!
//! Each sampled point (ψ, R, Z) becomes one axisymmetric ring at radius R
//! and height Z. Its relative strength is I(ψ)·R normalized over the whole
//! batch; the R factor is the toroidal volume element. Energies follow a
//! Muir (Gaussian) spectrum around the DT neutron energy with a width set
//! by the local ion temperature.

use crate::intensity::IntensityModel;
use crate::sampling::{validate_angle_range, GeometrySampler};
use rand::distributions::{Distribution, Uniform};
use rand::Rng;
use rand_distr::Normal;
use serde::Serialize;
use std::f64::consts::PI;
use tokamak_types::constants::{DEFAULT_SAMPLE_SIZE, E_NEUTRON_DT_EV, MUIR_MASS_RATIO};
use tokamak_types::error::{SourceError, SourceResult};

/// keV → eV.
const KEV_TO_EV: f64 = 1e3;

/// Ring in cylindrical coordinates [cm] around `origin`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RingSource {
    pub radius: f64,
    pub z: f64,
    /// Toroidal span `(lo, hi)` [rad].
    pub phi: (f64, f64),
    pub origin: [f64; 3],
}

impl RingSource {
    /// Cartesian point on the ring at a uniform toroidal angle.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> [f64; 3] {
        let phi = self.phi.0 + (self.phi.1 - self.phi.0) * rng.gen::<f64>();
        [
            self.origin[0] + self.radius * phi.cos(),
            self.origin[1] + self.radius * phi.sin(),
            self.origin[2] + self.z,
        ]
    }
}

/// Direction distribution of emitted neutrons.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum AngularDistribution {
    Isotropic,
    Monodirectional { reference_uvw: [f64; 3] },
}

impl AngularDistribution {
    /// Fixed direction; the vector is normalized and must be non-zero.
    pub fn monodirectional(u: f64, v: f64, w: f64) -> SourceResult<Self> {
        let mag = (u * u + v * v + w * w).sqrt();
        if !mag.is_finite() || mag == 0.0 {
            return Err(SourceError::InvalidArgument(format!(
                "direction vector must be finite and non-zero, got ({u}, {v}, {w})"
            )));
        }
        Ok(AngularDistribution::Monodirectional {
            reference_uvw: [u / mag, v / mag, w / mag],
        })
    }

    /// Unit direction vector.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> [f64; 3] {
        match self {
            AngularDistribution::Isotropic => {
                let mu = 2.0 * rng.gen::<f64>() - 1.0;
                let phi = 2.0 * PI * rng.gen::<f64>();
                let s = (1.0 - mu * mu).sqrt();
                [s * phi.cos(), s * phi.sin(), mu]
            }
            AngularDistribution::Monodirectional { reference_uvw } => *reference_uvw,
        }
    }
}

/// Neutron energy spectrum.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum EnergyDistribution {
    /// Muir spectrum: Gaussian around `e0` [eV] with
    /// σ = sqrt(2·e0·kT / m_rat). `kt` is the ion temperature in keV.
    Muir { e0: f64, m_rat: f64, kt: f64 },
}

impl EnergyDistribution {
    /// DT Muir spectrum at ion temperature `kt_kev`.
    pub fn dt_muir(kt_kev: f64) -> Self {
        EnergyDistribution::Muir {
            e0: E_NEUTRON_DT_EV,
            m_rat: MUIR_MASS_RATIO,
            kt: kt_kev,
        }
    }

    /// Spectrum width [eV]. NaN when kT is negative.
    pub fn std_dev_ev(&self) -> f64 {
        match *self {
            EnergyDistribution::Muir { e0, m_rat, kt } => (2.0 * e0 * kt * KEV_TO_EV / m_rat).sqrt(),
        }
    }

    /// Draw an energy [eV].
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> SourceResult<f64> {
        match *self {
            EnergyDistribution::Muir { e0, .. } => {
                let normal = Normal::new(e0, self.std_dev_ev()).map_err(|e| {
                    SourceError::InvalidArgument(format!("Muir spectrum: {e}"))
                })?;
                Ok(normal.sample(rng))
            }
        }
    }
}

/// One ring source with its relative strength.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmissionSource {
    pub space: RingSource,
    pub angle: AngularDistribution,
    pub energy: EnergyDistribution,
    pub strength: f64,
}

impl EmissionSource {
    /// Cartesian birth position [cm].
    pub fn sample_position<R: Rng + ?Sized>(&self, rng: &mut R) -> [f64; 3] {
        self.space.sample(rng)
    }
}

/// Turns sampled geometry and an intensity model into emission sources.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SourceBuilder {
    sampler: GeometrySampler,
    sample_size: usize,
    toroidal_span: (f64, f64),
}

impl SourceBuilder {
    pub fn new(sampler: GeometrySampler) -> Self {
        SourceBuilder {
            sampler,
            sample_size: DEFAULT_SAMPLE_SIZE,
            toroidal_span: (0.0, 2.0 * PI),
        }
    }

    /// Number of ring sources to build. Zero is rejected by `build`.
    pub fn with_sample_size(mut self, n: usize) -> Self {
        self.sample_size = n;
        self
    }

    /// Toroidal span of every ring [rad].
    pub fn with_toroidal_span(mut self, lo: f64, hi: f64) -> SourceResult<Self> {
        validate_angle_range(lo, hi, "toroidal")?;
        self.toroidal_span = (lo, hi);
        Ok(self)
    }

    pub fn sampler(&self) -> &GeometrySampler {
        &self.sampler
    }

    pub fn sample_size(&self) -> usize {
        self.sample_size
    }

    pub fn toroidal_span(&self) -> (f64, f64) {
        self.toroidal_span
    }

    /// Sample the plasma and return one source per sample, in sample order.
    ///
    /// Strengths sum to 1. Samples with zero intensity (e.g. below the
    /// temperature floor) are kept with zero strength.
    pub fn build<R: Rng + ?Sized>(
        &self,
        intensity: &IntensityModel<'_>,
        rng: &mut R,
    ) -> SourceResult<Vec<EmissionSource>> {
        let profile = intensity.profile();
        let points = self.sampler.sample(profile, self.sample_size, rng)?;

        let mut weights = intensity.eval_many(points.psi.view());
        weights *= &points.r;
        let total = weights.sum();
        if !total.is_finite() || total <= 0.0 {
            return Err(SourceError::InvalidArgument(format!(
                "source weights sum to {total}; cannot normalize"
            )));
        }

        let zero = weights.iter().filter(|&&w| w == 0.0).count();
        log::debug!(
            "Built {} sources: weight sum {total:.4e}, {zero} zero-weight",
            weights.len()
        );
        if zero > 0 {
            log::warn!(
                "{zero} of {} sources have zero strength",
                weights.len()
            );
        }

        let kt = profile.ion_temperature().eval_many(points.psi.view());
        let sources = weights
            .iter()
            .zip(points.r.iter())
            .zip(points.z.iter())
            .zip(kt.iter())
            .map(|(((&w, &r), &z), &t)| EmissionSource {
                space: RingSource {
                    radius: r,
                    z,
                    phi: self.toroidal_span,
                    origin: [0.0; 3],
                },
                angle: AngularDistribution::Isotropic,
                energy: EnergyDistribution::dt_muir(t),
                strength: w / total,
            })
            .collect();
        Ok(sources)
    }
}

/// Build `sample_size` ring sources spanning `angles` for a plasma whose
/// magnetic axis is at `magnetic_axis` = (R, Z) metres.
pub fn make_sources<R: Rng + ?Sized>(
    intensity: &IntensityModel<'_>,
    magnetic_axis: (f64, f64),
    angles: (f64, f64),
    sample_size: usize,
    rng: &mut R,
) -> SourceResult<Vec<EmissionSource>> {
    SourceBuilder::new(GeometrySampler::new(magnetic_axis.0, magnetic_axis.1))
        .with_sample_size(sample_size)
        .with_toroidal_span(angles.0, angles.1)?
        .build(intensity, rng)
}

/// Index of a source drawn with probability proportional to its strength.
///
/// `None` for an empty list or one without positive total strength.
/// Zero-strength sources are never selected.
pub fn pick_source<R: Rng + ?Sized>(sources: &[EmissionSource], rng: &mut R) -> Option<usize> {
    let total: f64 = sources.iter().map(|s| s.strength).sum();
    if !total.is_finite() || total <= 0.0 {
        return None;
    }
    let target = Uniform::new(0.0, total).sample(rng);
    let mut acc = 0.0;
    for (i, s) in sources.iter().enumerate() {
        acc += s.strength;
        if acc > target {
            return Some(i);
        }
    }
    // Rounding can leave `acc` just below `target`.
    sources.iter().rposition(|s| s.strength > 0.0)
}
