// ─────────────────────────────────────────────────────────────────────
// Tokamak Neutron Source — Constants
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
/// Elementary charge (C), also J per eV.
pub const Q_ELECTRON: f64 = 1.602176634e-19;

/// Profile lengths are tabulated in metres; the transport code works in cm.
pub const M_TO_CM: f64 = 100.0;

/// Characteristic D-T neutron energy (eV) used as the Muir spectrum centre.
pub const E_NEUTRON_DT_EV: f64 = 14.08e6;

/// Muir spectrum mass ratio (neutron + alpha over neutron, rounded).
pub const MUIR_MASS_RATIO: f64 = 5.0;

/// Energy released per D-T fusion event (MeV) used for power conversion.
pub const E_FUSION_DT_MEV: f64 = 17.1;

/// Tabulated density unit: 10^19 m⁻³.
pub const CONCENTRATION_SCALE: f64 = 1e19;

/// ⟨σv⟩ is evaluated in cm³/s; this converts it to m³/s.
pub const RATE_UNIT_SCALE: f64 = 1e-6;

/// Default coefficient mapping raw intensity to reactions per m³ per second.
pub const DEFAULT_INTENSITY_COEFFICIENT: f64 =
    CONCENTRATION_SCALE * CONCENTRATION_SCALE * RATE_UNIT_SCALE;

/// Ion temperature floor (keV) below which ⟨σv⟩ is taken as zero.
pub const DEFAULT_T_MIN_KEV: f64 = 0.1;

/// Default number of ring sources in a batch.
pub const DEFAULT_SAMPLE_SIZE: usize = 10_000;
