// ─────────────────────────────────────────────────────────────────────
// Tokamak Neutron Source — Geometry Sampling
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Random emission points in the poloidal cross-section.
//!
//! ψ is drawn from a triangular distribution on [0, 1] peaked at 1. With
//! a(ψ) roughly linear in ψ the flux-surface area element grows like ψ, so
//! this density approximates uniform sampling over the cross-section
//! without an explicit Jacobian weight. θ is uniform over the poloidal
//! range. Each (ψ, θ) pair is mapped to (R, Z) in centimetres.

use crate::profile::PlasmaProfile;
use ndarray::Array1;
use rand::distributions::{Distribution, Uniform};
use rand::Rng;
use rand_distr::Triangular;
use std::f64::consts::PI;
use tokamak_types::error::{SourceError, SourceResult};

/// One batch of sampled points; all arrays have the batch length.
#[derive(Debug, Clone, PartialEq)]
pub struct SampledPoints {
    /// Flux coordinate.
    pub psi: Array1<f64>,
    /// Poloidal angle [rad].
    pub theta: Array1<f64>,
    /// Major-radius coordinate [cm].
    pub r: Array1<f64>,
    /// Vertical coordinate [cm].
    pub z: Array1<f64>,
}

impl SampledPoints {
    pub fn len(&self) -> usize {
        self.psi.len()
    }

    pub fn is_empty(&self) -> bool {
        self.psi.is_empty()
    }
}

/// Samples (ψ, R, Z) triples for a plasma with its magnetic axis at
/// (`r_axis`, `z_axis`) metres.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeometrySampler {
    r_axis: f64,
    z_axis: f64,
    poloidal_range: (f64, f64),
}

impl GeometrySampler {
    /// Sampler over the full poloidal revolution [0, 2π).
    pub fn new(r_axis: f64, z_axis: f64) -> Self {
        GeometrySampler {
            r_axis,
            z_axis,
            poloidal_range: (0.0, 2.0 * PI),
        }
    }

    /// Restrict θ to `[lo, hi)`.
    pub fn with_angles(mut self, lo: f64, hi: f64) -> SourceResult<Self> {
        validate_angle_range(lo, hi, "poloidal")?;
        self.poloidal_range = (lo, hi);
        Ok(self)
    }

    pub fn magnetic_axis(&self) -> (f64, f64) {
        (self.r_axis, self.z_axis)
    }

    pub fn poloidal_range(&self) -> (f64, f64) {
        self.poloidal_range
    }

    /// Draw `n` points. All ψ values are drawn before any θ value, so a
    /// fixed seed reproduces the batch exactly.
    pub fn sample<R: Rng + ?Sized>(
        &self,
        profile: &PlasmaProfile,
        n: usize,
        rng: &mut R,
    ) -> SourceResult<SampledPoints> {
        if n == 0 {
            return Err(SourceError::InvalidArgument(
                "sample count must be > 0".to_string(),
            ));
        }
        let psi_dist = Triangular::new(0.0, 1.0, 1.0).map_err(|e| {
            SourceError::InvalidArgument(format!("flux coordinate distribution: {e}"))
        })?;
        let (lo, hi) = self.poloidal_range;
        let theta_dist = Uniform::new(lo, hi);

        let psi = Array1::from_shape_fn(n, |_| psi_dist.sample(rng));
        let theta = Array1::from_shape_fn(n, |_| theta_dist.sample(rng));

        let r = profile.major_radius_many(psi.view(), theta.view(), self.r_axis);
        let z = profile.vertical_position_many(psi.view(), theta.view(), self.z_axis);

        log::debug!(
            "Sampled {n} emission points: R in [{:.1}, {:.1}] cm",
            r.fold(f64::INFINITY, |a, &b| a.min(b)),
            r.fold(f64::NEG_INFINITY, |a, &b| a.max(b))
        );

        Ok(SampledPoints { psi, theta, r, z })
    }
}

pub(crate) fn validate_angle_range(lo: f64, hi: f64, label: &str) -> SourceResult<()> {
    // The width must be finite too: Uniform panics on an overflowing range.
    if !lo.is_finite() || !hi.is_finite() || lo >= hi || !(hi - lo).is_finite() {
        return Err(SourceError::InvalidArgument(format!(
            "{label} angle range must be finite with lo < hi, got [{lo}, {hi}]"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use tokamak_types::table::{ProfileColumns, ProfileTable};

    fn circular_profile() -> PlasmaProfile {
        let psi = vec![0.0, 0.25, 0.5, 0.75, 1.0];
        let table = ProfileTable::new(ProfileColumns {
            minor_radius: vec![0.3; 5],
            shift: vec![0.0; 5],
            elongation: vec![1.0; 5],
            triangularity: vec![0.0; 5],
            ion_temperature: vec![20.0, 17.0, 12.0, 6.0, 0.5],
            density: vec![10.0; 5],
            psi,
        })
        .unwrap();
        PlasmaProfile::from_table(&table).unwrap()
    }

    #[test]
    fn test_batch_shapes() {
        let profile = circular_profile();
        let mut rng = StdRng::seed_from_u64(7);
        let pts = GeometrySampler::new(6.0, 0.0)
            .sample(&profile, 257, &mut rng)
            .unwrap();
        assert_eq!(pts.len(), 257);
        assert_eq!(pts.theta.len(), 257);
        assert_eq!(pts.r.len(), 257);
        assert_eq!(pts.z.len(), 257);
        assert!(!pts.is_empty());
    }

    #[test]
    fn test_zero_count_rejected() {
        let profile = circular_profile();
        let mut rng = StdRng::seed_from_u64(7);
        let err = GeometrySampler::new(6.0, 0.0).sample(&profile, 0, &mut rng);
        assert!(matches!(err, Err(SourceError::InvalidArgument(_))));
    }

    #[test]
    fn test_points_on_circle() {
        // a ≡ 0.3 m, k ≡ 1, δ ≡ 0: every point lies 30 cm from the axis.
        let profile = circular_profile();
        let mut rng = StdRng::seed_from_u64(11);
        let pts = GeometrySampler::new(6.0, 0.5)
            .sample(&profile, 500, &mut rng)
            .unwrap();
        for i in 0..pts.len() {
            let dr = pts.r[i] - 600.0;
            let dz = pts.z[i] - 50.0;
            assert!(((dr * dr + dz * dz).sqrt() - 30.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_ranges() {
        let profile = circular_profile();
        let mut rng = StdRng::seed_from_u64(3);
        let sampler = GeometrySampler::new(6.0, 0.0)
            .with_angles(0.5, 1.0)
            .unwrap();
        let pts = sampler.sample(&profile, 2000, &mut rng).unwrap();
        assert!(pts.psi.iter().all(|&p| (0.0..=1.0).contains(&p)));
        assert!(pts.theta.iter().all(|&t| (0.5..1.0).contains(&t)));
    }

    #[test]
    fn test_psi_skewed_toward_edge() {
        // Triangular(0, 1, 1) has mean 2/3 and P(ψ < 0.5) = 0.25.
        let profile = circular_profile();
        let mut rng = StdRng::seed_from_u64(2024);
        let pts = GeometrySampler::new(6.0, 0.0)
            .sample(&profile, 20_000, &mut rng)
            .unwrap();
        let mean = pts.psi.mean().unwrap();
        assert!((mean - 2.0 / 3.0).abs() < 0.01, "mean psi = {mean}");
        let below = pts.psi.iter().filter(|&&p| p < 0.5).count() as f64 / 20_000.0;
        assert!((below - 0.25).abs() < 0.015, "P(psi < 0.5) = {below}");
    }

    #[test]
    fn test_deterministic_with_seed() {
        let profile = circular_profile();
        let sampler = GeometrySampler::new(6.2, 0.6);
        let a = sampler
            .sample(&profile, 300, &mut StdRng::seed_from_u64(99))
            .unwrap();
        let b = sampler
            .sample(&profile, 300, &mut StdRng::seed_from_u64(99))
            .unwrap();
        assert_eq!(a, b);
        let c = sampler
            .sample(&profile, 300, &mut StdRng::seed_from_u64(100))
            .unwrap();
        assert_ne!(a.psi, c.psi);
    }

    #[test]
    fn test_invalid_poloidal_range() {
        let s = GeometrySampler::new(6.0, 0.0);
        assert!(s.with_angles(1.0, 1.0).is_err());
        assert!(s.with_angles(2.0, 1.0).is_err());
        assert!(s.with_angles(0.0, f64::INFINITY).is_err());
        assert_eq!(s.poloidal_range(), (0.0, 2.0 * PI));
        assert_eq!(s.magnetic_axis(), (6.0, 0.0));
    }

    #[test]
    fn test_overflowing_range_rejected() {
        // Both ends finite, but hi - lo overflows to infinity.
        let s = GeometrySampler::new(6.2, 0.0);
        assert!(matches!(
            s.with_angles(-1e308, 1e308),
            Err(SourceError::InvalidArgument(_))
        ));
        assert!(matches!(
            s.with_angles(-f64::MAX, f64::MAX),
            Err(SourceError::InvalidArgument(_))
        ));
        // A wide but representable range still samples.
        let profile = circular_profile();
        let pts = s
            .with_angles(-1e300, 1e300)
            .unwrap()
            .sample(&profile, 10, &mut StdRng::seed_from_u64(1))
            .unwrap();
        assert_eq!(pts.len(), 10);
    }
}
