// ─────────────────────────────────────────────────────────────────────
// Tokamak Neutron Source — Core
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Parametrized tokamak plasma neutron source.
//!
//! Profile table → interpolated profile → reaction rate and emission
//! intensity → sampled cross-section points → weighted ring sources.

pub mod intensity;
pub mod pipeline;
pub mod power;
pub mod profile;
pub mod reaction_rate;
pub mod sampling;
pub mod source;
