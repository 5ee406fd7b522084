// ─────────────────────────────────────────────────────────────────────
// Tokamak Neutron Source — Emission Intensity
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Local neutron emission intensity as a function of the flux coordinate.
//!
//!   D-T: I(ψ) = ⟨σv⟩(Ti(ψ)) · N(ψ)² · f·(1 − f)
//!   D-D: I(ψ) = ⟨σv⟩(Ti(ψ)) · N(ψ)² · 0.5
//!
//! f is the deuterium fraction of the fuel ions. The 0.5 for D-D avoids
//! counting each identical pair twice. Raw intensity is in tabulated units
//! (10^19 m⁻³)²·cm³/s; `normalize` rescales it to reactions per m³ per s.

use crate::profile::PlasmaProfile;
use crate::reaction_rate::{ReactionRate, ReactionVariant};
use ndarray::{Array1, ArrayView1};
use tokamak_types::constants::DEFAULT_INTENSITY_COEFFICIENT;
use tokamak_types::error::SourceResult;

/// Combinatorial weight of the colliding populations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Reactants {
    /// Two distinct species mixed with fraction `fraction` of the first.
    /// Not validated; values outside [0, 1] give negative weights.
    TwoSpecies { fraction: f64 },
    /// Both collision partners from one population.
    SingleSpecies,
}

impl Reactants {
    pub fn pair_factor(self) -> f64 {
        match self {
            Reactants::TwoSpecies { fraction } => fraction * (1.0 - fraction),
            Reactants::SingleSpecies => 0.5,
        }
    }
}

/// Emission intensity for a fixed reaction channel over one profile.
#[derive(Debug, Clone)]
pub struct IntensityModel<'p> {
    profile: &'p PlasmaProfile,
    rate: ReactionRate,
    reactants: Reactants,
    coefficient: f64,
}

impl<'p> IntensityModel<'p> {
    /// D-T intensity with deuterium fraction `dt_fraction`.
    pub fn dt(profile: &'p PlasmaProfile, dt_fraction: f64) -> Self {
        IntensityModel {
            profile,
            rate: ReactionRate::dt(),
            reactants: Reactants::TwoSpecies {
                fraction: dt_fraction,
            },
            coefficient: DEFAULT_INTENSITY_COEFFICIENT,
        }
    }

    /// D-D intensity.
    pub fn dd(profile: &'p PlasmaProfile) -> Self {
        IntensityModel {
            profile,
            rate: ReactionRate::dd(),
            reactants: Reactants::SingleSpecies,
            coefficient: DEFAULT_INTENSITY_COEFFICIENT,
        }
    }

    /// Override the unit coefficient used by [`normalize`](Self::normalize).
    pub fn with_coefficient(mut self, coefficient: f64) -> Self {
        self.coefficient = coefficient;
        self
    }

    /// Use a custom temperature floor [keV]; the reaction channel is kept.
    pub fn with_floor(mut self, t_min: f64) -> SourceResult<Self> {
        self.rate = ReactionRate::with_floor(self.rate.variant(), t_min)?;
        Ok(self)
    }

    pub fn profile(&self) -> &'p PlasmaProfile {
        self.profile
    }

    pub fn reaction_rate(&self) -> &ReactionRate {
        &self.rate
    }

    pub fn variant(&self) -> ReactionVariant {
        self.rate.variant()
    }

    pub fn reactants(&self) -> Reactants {
        self.reactants
    }

    pub fn coefficient(&self) -> f64 {
        self.coefficient
    }

    /// Raw intensity at `psi`.
    pub fn eval(&self, psi: f64) -> f64 {
        let n = self.profile.density().eval(psi);
        self.rate.eval(self.profile.ion_temperature().eval(psi)) * n * n * self.reactants.pair_factor()
    }

    /// Raw intensity, elementwise.
    pub fn eval_many(&self, psi: ArrayView1<f64>) -> Array1<f64> {
        let ti = self.profile.ion_temperature().eval_many(psi);
        let n = self.profile.density().eval_many(psi);
        let factor = self.reactants.pair_factor();
        let mut out = self.rate.eval_many(ti.view());
        out.zip_mut_with(&n, |i, &d| *i = *i * d * d * factor);
        out
    }

    /// Rescale a raw intensity to physical units.
    pub fn normalize(&self, raw: f64) -> f64 {
        raw * self.coefficient
    }

    pub fn normalize_many(&self, raw: ArrayView1<f64>) -> Array1<f64> {
        raw.mapv(|v| v * self.coefficient)
    }
}
