// ─────────────────────────────────────────────────────────────────────
// Tokamak Neutron Source — Pipeline
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Configuration file → emission sources.

use crate::intensity::IntensityModel;
use crate::profile::PlasmaProfile;
use crate::sampling::GeometrySampler;
use crate::source::{EmissionSource, SourceBuilder};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::Path;
use tokamak_types::config::{ReactionConfig, SourceConfig};
use tokamak_types::error::SourceResult;

/// Build sources for `config`; a relative `profile_path` is taken relative
/// to `base_dir`.
pub fn sources_from_config(
    config: &SourceConfig,
    base_dir: &Path,
) -> SourceResult<Vec<EmissionSource>> {
    config.validate()?;
    let profile = PlasmaProfile::from_file(base_dir.join(&config.profile_path))?;

    let intensity = match config.reaction {
        ReactionConfig::Dt { dt_fraction } => IntensityModel::dt(&profile, dt_fraction),
        ReactionConfig::Dd => IntensityModel::dd(&profile),
    }
    .with_floor(config.t_min_kev)?
    .with_coefficient(config.intensity_coefficient);

    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let [lo, hi] = config.angles;
    let sources = SourceBuilder::new(GeometrySampler::new(
        config.magnetic_axis.r,
        config.magnetic_axis.z,
    ))
    .with_sample_size(config.sample_size)
    .with_toroidal_span(lo, hi)?
    .build(&intensity, &mut rng)?;

    log::info!(
        "Generated {} {:?} sources (seed {:?})",
        sources.len(),
        intensity.variant(),
        config.seed
    );
    Ok(sources)
}

/// Load a JSON configuration and build its sources. The profile path is
/// resolved against the configuration file's directory.
pub fn sources_from_config_file<P: AsRef<Path>>(path: P) -> SourceResult<Vec<EmissionSource>> {
    let path = path.as_ref();
    let config = SourceConfig::from_file(path)?;
    let base_dir = path.parent().unwrap_or_else(|| Path::new("."));
    sources_from_config(&config, base_dir)
}
