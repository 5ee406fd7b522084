// ─────────────────────────────────────────────────────────────────────
// Tokamak Neutron Source — Config
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
use crate::constants::{DEFAULT_INTENSITY_COEFFICIENT, DEFAULT_SAMPLE_SIZE, DEFAULT_T_MIN_KEV};
use crate::error::{SourceError, SourceResult};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::path::Path;

/// Top-level source-generation configuration (JSON).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    /// CSV profile table. Relative paths are resolved by the caller.
    pub profile_path: String,
    #[serde(default = "default_sample_size")]
    pub sample_size: usize,
    pub magnetic_axis: MagneticAxis,
    /// Toroidal span of every ring source [rad].
    #[serde(default = "default_angles")]
    pub angles: [f64; 2],
    pub reaction: ReactionConfig,
    /// Ion temperature floor for ⟨σv⟩ [keV].
    #[serde(default = "default_t_min_kev")]
    pub t_min_kev: f64,
    /// Scale from raw intensity to reactions per m³ per second.
    #[serde(default = "default_intensity_coefficient")]
    pub intensity_coefficient: f64,
    /// RNG seed; entropy-seeded when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

/// Magnetic axis position in the poloidal plane [m].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MagneticAxis {
    #[serde(rename = "R")]
    pub r: f64,
    #[serde(rename = "Z")]
    pub z: f64,
}

/// Reaction channel. Fixed for the lifetime of a source batch.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ReactionConfig {
    /// D-T with the deuterium fraction of the fuel ions.
    Dt { dt_fraction: f64 },
    /// D-D.
    Dd,
}

fn default_sample_size() -> usize {
    DEFAULT_SAMPLE_SIZE
}
fn default_angles() -> [f64; 2] {
    [0.0, 2.0 * PI]
}
fn default_t_min_kev() -> f64 {
    DEFAULT_T_MIN_KEV
}
fn default_intensity_coefficient() -> f64 {
    DEFAULT_INTENSITY_COEFFICIENT
}

impl SourceConfig {
    /// Load and validate a JSON config file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> SourceResult<Self> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        let config: Self = serde_json::from_str(&contents)?;
        config.validate()?;
        log::info!("Loaded source configuration from {:?}", path.as_ref());
        Ok(config)
    }

    /// Reject values that would make source generation ill-defined.
    pub fn validate(&self) -> SourceResult<()> {
        if self.profile_path.trim().is_empty() {
            return Err(SourceError::ConfigError(
                "profile_path must not be empty".to_string(),
            ));
        }
        if self.sample_size == 0 {
            return Err(SourceError::InvalidArgument(
                "sample_size must be > 0".to_string(),
            ));
        }
        if !self.magnetic_axis.r.is_finite() || !self.magnetic_axis.z.is_finite() {
            return Err(SourceError::InvalidArgument(
                "magnetic_axis coordinates must be finite".to_string(),
            ));
        }
        let [lo, hi] = self.angles;
        if !lo.is_finite() || !hi.is_finite() || lo >= hi || !(hi - lo).is_finite() {
            return Err(SourceError::InvalidArgument(format!(
                "angles must be finite with lo < hi, got [{lo}, {hi}]"
            )));
        }
        if !self.t_min_kev.is_finite() || self.t_min_kev <= 0.0 {
            return Err(SourceError::InvalidArgument(format!(
                "t_min_kev must be finite and > 0, got {}",
                self.t_min_kev
            )));
        }
        if !self.intensity_coefficient.is_finite() {
            return Err(SourceError::InvalidArgument(
                "intensity_coefficient must be finite".to_string(),
            ));
        }
        if let ReactionConfig::Dt { dt_fraction } = self.reaction {
            if !(0.0..=1.0).contains(&dt_fraction) {
                return Err(SourceError::InvalidArgument(format!(
                    "dt_fraction must lie in [0, 1], got {dt_fraction}"
                )));
            }
        }
        Ok(())
    }
}
