// ─────────────────────────────────────────────────────────────────────
// Tokamak Neutron Source — Reaction Rates
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Bosch-Hale thermal reaction rate ⟨σv⟩ for D-T and D-D.
//!
//! Bosch & Hale, *Improved formulas for fusion cross-sections and thermal
//! reactivities*, Nucl. Fusion 32 (1992) 611.
//!
//!   θ = T / (1 − T(C2 + T(C4 + T·C6)) / (1 + T(C3 + T(C5 + T·C7))))
//!   ξ = (B_G² / 4θ)^(1/3)
//!   ⟨σv⟩ = C1 · θ · sqrt(ξ / (m_r c² · T³)) · exp(−3ξ)   [cm³/s]
//!
//! The D-D(n) fit has no C4, C6, C7 terms; its θ uses the reduced rational
//! form T / (1 − T·C2 / (1 + T(C3 + T·C5))).

use ndarray::{Array1, ArrayView1};
use serde::Serialize;
use tokamak_types::constants::DEFAULT_T_MIN_KEV;
use tokamak_types::error::{SourceError, SourceResult};

/// Rational polynomial in the θ(T) denominator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum ThetaPolynomial {
    /// Full seven-coefficient form (D-T).
    Full {
        c2: f64,
        c3: f64,
        c4: f64,
        c5: f64,
        c6: f64,
        c7: f64,
    },
    /// Reduced form without C4, C6, C7 (D-D).
    Reduced { c2: f64, c3: f64, c5: f64 },
}

impl ThetaPolynomial {
    fn theta(&self, t: f64) -> f64 {
        match *self {
            ThetaPolynomial::Full {
                c2,
                c3,
                c4,
                c5,
                c6,
                c7,
            } => t / (1.0 - (t * (c2 + t * (c4 + t * c6))) / (1.0 + t * (c3 + t * (c5 + t * c7)))),
            ThetaPolynomial::Reduced { c2, c3, c5 } => t / (1.0 - t * c2 / (1.0 + t * (c3 + t * c5))),
        }
    }
}

/// Fit constants of one reaction channel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ReactionCoefficients {
    pub c1: f64,
    pub theta: ThetaPolynomial,
    /// Reduced mass m_r c² [keV].
    pub reduced_mass: f64,
    /// Gamow constant B_G [keV^(1/2)].
    pub gamow: f64,
    /// Default temperature floor [keV]; ⟨σv⟩ is zero below it.
    pub t_min: f64,
}

/// T(d,n)⁴He.
pub const DT_COEFFICIENTS: ReactionCoefficients = ReactionCoefficients {
    c1: 1.17302e-9,
    theta: ThetaPolynomial::Full {
        c2: 1.51361e-2,
        c3: 7.51886e-2,
        c4: 4.60643e-3,
        c5: 1.35000e-2,
        c6: -1.06750e-4,
        c7: 1.36600e-5,
    },
    reduced_mass: 1_124_656.0,
    gamow: 34.3827,
    t_min: DEFAULT_T_MIN_KEV,
};

/// D(d,n)³He.
pub const DD_COEFFICIENTS: ReactionCoefficients = ReactionCoefficients {
    c1: 5.43360e-12,
    theta: ThetaPolynomial::Reduced {
        c2: 5.85778e-3,
        c3: 7.68222e-3,
        c5: -2.96400e-6,
    },
    reduced_mass: 937_814.0,
    gamow: 31.3970,
    t_min: DEFAULT_T_MIN_KEV,
};

/// Reaction channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ReactionVariant {
    DeuteriumTritium,
    DeuteriumDeuterium,
}

impl ReactionVariant {
    pub fn coefficients(self) -> &'static ReactionCoefficients {
        match self {
            ReactionVariant::DeuteriumTritium => &DT_COEFFICIENTS,
            ReactionVariant::DeuteriumDeuterium => &DD_COEFFICIENTS,
        }
    }
}

/// ⟨σv⟩(T) evaluator with a temperature floor.
///
/// Below `t_min` the rate is exactly zero: the fit is not meant for T → 0
/// and θ's denominator becomes unstable there.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReactionRate {
    variant: ReactionVariant,
    coefficients: ReactionCoefficients,
    gamow_sq: f64,
    t_min: f64,
}

impl ReactionRate {
    /// Rate with the variant's default floor.
    pub fn new(variant: ReactionVariant) -> Self {
        Self::build(variant, variant.coefficients().t_min)
    }

    /// Rate with a custom floor overriding the coefficient default; the
    /// floor must be finite and > 0.
    pub fn with_floor(variant: ReactionVariant, t_min: f64) -> SourceResult<Self> {
        if !t_min.is_finite() || t_min <= 0.0 {
            return Err(SourceError::InvalidArgument(format!(
                "minimal temperature must be finite and > 0 keV, got {t_min}"
            )));
        }
        Ok(Self::build(variant, t_min))
    }

    pub fn dt() -> Self {
        Self::new(ReactionVariant::DeuteriumTritium)
    }

    pub fn dd() -> Self {
        Self::new(ReactionVariant::DeuteriumDeuterium)
    }

    fn build(variant: ReactionVariant, t_min: f64) -> Self {
        let coefficients = *variant.coefficients();
        ReactionRate {
            variant,
            coefficients,
            gamow_sq: coefficients.gamow * coefficients.gamow,
            t_min,
        }
    }

    pub fn variant(&self) -> ReactionVariant {
        self.variant
    }

    pub fn coefficients(&self) -> &ReactionCoefficients {
        &self.coefficients
    }

    /// Temperature floor [keV].
    pub fn t_min(&self) -> f64 {
        self.t_min
    }

    /// ⟨σv⟩ [cm³/s] at ion temperature `t_kev`.
    pub fn eval(&self, t_kev: f64) -> f64 {
        // NaN fails this test and propagates.
        if t_kev < self.t_min {
            return 0.0;
        }
        let c = &self.coefficients;
        let theta = c.theta.theta(t_kev);
        let xi = (self.gamow_sq / (4.0 * theta)).cbrt();
        c.c1 * theta * (xi / (c.reduced_mass * t_kev * t_kev * t_kev)).sqrt() * (-3.0 * xi).exp()
    }

    /// Elementwise ⟨σv⟩; the floor test applies per element.
    pub fn eval_many(&self, t_kev: ArrayView1<f64>) -> Array1<f64> {
        t_kev.mapv(|t| self.eval(t))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::array;

    #[test]
    fn test_dt_reference_values() {
        // Bosch-Hale Table VIII, T(d,n)4He [cm³/s].
        let rate = ReactionRate::dt();
        assert_relative_eq!(rate.eval(10.0), 1.136e-16, max_relative = 0.01);
        assert_relative_eq!(rate.eval(20.0), 4.330e-16, max_relative = 0.01);
        assert_relative_eq!(rate.eval(50.0), 8.649e-16, max_relative = 0.01);
    }

    #[test]
    fn test_dd_reference_values() {
        // Bosch-Hale Table VIII, D(d,n)3He [cm³/s].
        let rate = ReactionRate::dd();
        assert_relative_eq!(rate.eval(10.0), 6.022e-19, max_relative = 0.01);
        assert_relative_eq!(rate.eval(50.0), 1.133e-17, max_relative = 0.01);
    }

    #[test]
    fn test_zero_below_floor() {
        for rate in [ReactionRate::dt(), ReactionRate::dd()] {
            assert_eq!(rate.eval(0.0), 0.0);
            assert_eq!(rate.eval(0.099), 0.0);
            assert_eq!(rate.eval(-5.0), 0.0);
            assert!(rate.eval(0.1) > 0.0);
        }
    }

    #[test]
    fn test_default_floor_from_coefficients() {
        for v in [ReactionVariant::DeuteriumTritium, ReactionVariant::DeuteriumDeuterium] {
            assert_eq!(v.coefficients().t_min, 0.1);
            assert_eq!(ReactionRate::new(v).t_min(), v.coefficients().t_min);
        }
    }

    #[test]
    fn test_coefficients_serialize() {
        let json = serde_json::to_value(DT_COEFFICIENTS).unwrap();
        assert_eq!(json["c1"], 1.17302e-9);
        assert_eq!(json["theta"]["Full"]["c7"], 1.36600e-5);
        assert_eq!(json["t_min"], 0.1);

        let json = serde_json::to_value(ReactionVariant::DeuteriumDeuterium.coefficients()).unwrap();
        assert_eq!(json["theta"]["Reduced"]["c5"], -2.96400e-6);
        assert!(json["theta"].get("Full").is_none());

        let variant = serde_json::to_value(ReactionVariant::DeuteriumTritium).unwrap();
        assert_eq!(variant, "DeuteriumTritium");
    }

    #[test]
    fn test_custom_floor() {
        let rate = ReactionRate::with_floor(ReactionVariant::DeuteriumTritium, 2.0).unwrap();
        assert_eq!(rate.eval(1.5), 0.0);
        assert!(rate.eval(2.0) > 0.0);
        assert_eq!(rate.t_min(), 2.0);
    }

    #[test]
    fn test_non_positive_floor_rejected() {
        for t_min in [0.0, -1.0, f64::NAN] {
            let err = ReactionRate::with_floor(ReactionVariant::DeuteriumDeuterium, t_min);
            assert!(matches!(err, Err(SourceError::InvalidArgument(_))));
        }
    }

    #[test]
    fn test_batch_matches_scalar() {
        let rate = ReactionRate::dt();
        let t = array![0.05, 0.1, 1.0, 10.0, 0.0, 35.0];
        let out = rate.eval_many(t.view());
        assert_eq!(out.len(), t.len());
        for (ti, oi) in t.iter().zip(out.iter()) {
            assert_eq!(*oi, rate.eval(*ti));
        }
        assert_eq!(out[0], 0.0);
        assert_eq!(out[4], 0.0);
    }

    #[test]
    fn test_dt_dominates_dd() {
        let dt = ReactionRate::dt();
        let dd = ReactionRate::dd();
        for t in [1.0, 5.0, 10.0, 30.0, 60.0] {
            assert!(dt.eval(t) > 50.0 * dd.eval(t), "T = {t}");
        }
    }

    #[test]
    fn test_variant_coefficients() {
        assert_eq!(ReactionRate::dt().variant(), ReactionVariant::DeuteriumTritium);
        assert!(matches!(
            ReactionRate::dd().coefficients().theta,
            ThetaPolynomial::Reduced { .. }
        ));
        assert_eq!(
            ReactionVariant::DeuteriumTritium.coefficients().gamow,
            34.3827
        );
    }
}
