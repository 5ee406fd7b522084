// ─────────────────────────────────────────────────────────────────────
// Tokamak Neutron Source — Fusion Power
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Neutron production rate → fusion power.

use ndarray::{Array1, ArrayView1};
use tokamak_types::constants::{E_FUSION_DT_MEV, Q_ELECTRON};

/// Energy per D-T event [J].
const E_FUSION_DT_J: f64 = E_FUSION_DT_MEV * 1e6 * Q_ELECTRON;

/// Fusion power [W] for a D-T neutron production rate [1/s].
pub fn fusion_power_w(neutron_rate: f64) -> f64 {
    E_FUSION_DT_J * neutron_rate
}

pub fn fusion_power_w_many(neutron_rate: ArrayView1<f64>) -> Array1<f64> {
    neutron_rate.mapv(fusion_power_w)
}
