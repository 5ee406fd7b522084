// ─────────────────────────────────────────────────────────────────────
// Tokamak Neutron Source — Property-Based Tests (proptest) for tokamak-types
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Property-based tests for tokamak-types using proptest.
//!
//! Covers: profile table validation (row count, monotone flux coordinate),
//! CSV parsing of generated tables.

use proptest::prelude::*;
use tokamak_types::error::SourceError;
use tokamak_types::table::{ProfileColumns, ProfileTable, MIN_ROWS};

fn columns_from_psi(psi: Vec<f64>) -> ProfileColumns {
    ProfileColumns {
        minor_radius: psi.iter().map(|p| 2.0 * p).collect(),
        shift: psi.iter().map(|p| 0.1 * (1.0 - p)).collect(),
        elongation: vec![1.7; psi.len()],
        triangularity: psi.iter().map(|p| 0.3 * p).collect(),
        ion_temperature: psi.iter().map(|p| 15.0 * (1.0 - p) + 0.5).collect(),
        density: psi.iter().map(|p| 8.0 - 3.0 * p).collect(),
        psi,
    }
}

/// Strictly increasing grid built from positive increments.
fn increasing_grid(steps: &[f64]) -> Vec<f64> {
    let mut acc = 0.0;
    let mut out = vec![0.0];
    for s in steps {
        acc += s;
        out.push(acc);
    }
    out
}

// ── Table Validation Invariants ──────────────────────────────────────

proptest! {
    /// Any strictly increasing grid with >= 4 rows is accepted.
    #[test]
    fn increasing_grid_accepted(steps in prop::collection::vec(0.01f64..0.5, 3..40)) {
        let psi = increasing_grid(&steps);
        let rows = psi.len();
        let table = ProfileTable::new(columns_from_psi(psi)).unwrap();
        prop_assert_eq!(table.len(), rows);
        prop_assert!(table.len() >= MIN_ROWS);
    }

    /// Fewer than 4 rows is always a configuration error.
    #[test]
    fn short_table_rejected(steps in prop::collection::vec(0.01f64..0.5, 0..3)) {
        let psi = increasing_grid(&steps);
        let result = ProfileTable::new(columns_from_psi(psi));
        prop_assert!(matches!(result, Err(SourceError::ConfigError(_))));
    }

    /// Swapping two adjacent flux values breaks monotonicity and is rejected.
    #[test]
    fn swapped_grid_rejected(
        steps in prop::collection::vec(0.01f64..0.5, 3..30),
        at in 0usize..1000,
    ) {
        let mut psi = increasing_grid(&steps);
        let i = at % (psi.len() - 1);
        psi.swap(i, i + 1);
        let result = ProfileTable::new(columns_from_psi(psi));
        prop_assert!(matches!(result, Err(SourceError::ConfigError(_))));
    }

    /// A table written as CSV reads back with the same columns.
    #[test]
    fn csv_reader_matches_columns(steps in prop::collection::vec(0.01f64..0.5, 3..20)) {
        let columns = columns_from_psi(increasing_grid(&steps));
        let mut csv = String::from("psi,a,sh,k,delta,Ti,N\n");
        for i in 0..columns.psi.len() {
            csv.push_str(&format!(
                "{},{},{},{},{},{},{}\n",
                columns.psi[i],
                columns.minor_radius[i],
                columns.shift[i],
                columns.elongation[i],
                columns.triangularity[i],
                columns.ion_temperature[i],
                columns.density[i],
            ));
        }
        let table = ProfileTable::from_reader(csv.as_bytes()).unwrap();
        prop_assert_eq!(table.columns(), &columns);
    }
}
