// ─────────────────────────────────────────────────────────────────────
// Tokamak Neutron Source — Profile Table
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Tabulated flux-surface parametrization of a plasma.
//!
//! One row per flux surface, keyed by the normalized flux coordinate ψ.
//! The CSV header names match the ITER parametrization files:
//! `psi, a, sh, k, delta, Ti, N`.

use crate::error::{SourceError, SourceResult};
use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

pub const COL_PSI: &str = "psi";
pub const COL_MINOR_RADIUS: &str = "a";
pub const COL_SHIFT: &str = "sh";
pub const COL_ELONGATION: &str = "k";
pub const COL_TRIANGULARITY: &str = "delta";
pub const COL_ION_TEMPERATURE: &str = "Ti";
pub const COL_DENSITY: &str = "N";

/// Every column a table must carry, in canonical order.
pub const REQUIRED_COLUMNS: [&str; 7] = [
    COL_PSI,
    COL_MINOR_RADIUS,
    COL_SHIFT,
    COL_ELONGATION,
    COL_TRIANGULARITY,
    COL_ION_TEMPERATURE,
    COL_DENSITY,
];

/// Cubic interpolation needs at least four knots.
pub const MIN_ROWS: usize = 4;

/// Raw column data, before validation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileColumns {
    /// Normalized flux coordinate.
    pub psi: Vec<f64>,
    /// Minor radius a(ψ) [m].
    pub minor_radius: Vec<f64>,
    /// Shafranov shift of the flux surface centre [m].
    pub shift: Vec<f64>,
    /// Elongation k(ψ).
    pub elongation: Vec<f64>,
    /// Triangularity δ(ψ).
    pub triangularity: Vec<f64>,
    /// Ion temperature [keV].
    pub ion_temperature: Vec<f64>,
    /// Density [10^19 m⁻³].
    pub density: Vec<f64>,
}

/// Validated profile table: equal-length finite columns, at least
/// [`MIN_ROWS`] rows, strictly increasing ψ.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileTable {
    columns: ProfileColumns,
}

impl ProfileTable {
    pub fn new(columns: ProfileColumns) -> SourceResult<Self> {
        validate_columns(&columns)?;
        Ok(ProfileTable { columns })
    }

    /// Build from named columns, e.g. the result of a generic table reader.
    ///
    /// Names must match [`REQUIRED_COLUMNS`] exactly; unknown columns are ignored.
    pub fn from_columns<I, S>(named: I) -> SourceResult<Self>
    where
        I: IntoIterator<Item = (S, Vec<f64>)>,
        S: AsRef<str>,
    {
        let mut by_name: BTreeMap<String, Vec<f64>> = named
            .into_iter()
            .map(|(name, values)| (name.as_ref().to_string(), values))
            .collect();

        let mut take = |name: &str| {
            by_name.remove(name).ok_or_else(|| {
                SourceError::ConfigError(format!("profile table is missing required column '{name}'"))
            })
        };

        let columns = ProfileColumns {
            psi: take(COL_PSI)?,
            minor_radius: take(COL_MINOR_RADIUS)?,
            shift: take(COL_SHIFT)?,
            elongation: take(COL_ELONGATION)?,
            triangularity: take(COL_TRIANGULARITY)?,
            ion_temperature: take(COL_ION_TEMPERATURE)?,
            density: take(COL_DENSITY)?,
        };
        Self::new(columns)
    }

    /// Parse a CSV table with a header row.
    pub fn from_reader<R: Read>(reader: R) -> SourceResult<Self> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers = csv_reader.headers()?.clone();
        let mut indices = Vec::with_capacity(REQUIRED_COLUMNS.len());
        for name in REQUIRED_COLUMNS {
            let idx = headers.iter().position(|h| h == name).ok_or_else(|| {
                SourceError::ConfigError(format!("profile table is missing required column '{name}'"))
            })?;
            indices.push((name, idx));
        }

        let mut values: Vec<Vec<f64>> = vec![Vec::new(); REQUIRED_COLUMNS.len()];
        for (row, record) in csv_reader.records().enumerate() {
            let record = record?;
            for (slot, &(name, idx)) in indices.iter().enumerate() {
                let cell = record.get(idx).unwrap_or("");
                let value = cell.parse::<f64>().map_err(|_| {
                    SourceError::ConfigError(format!(
                        "profile table row {}: column '{name}' has non-numeric value '{cell}'",
                        row + 1
                    ))
                })?;
                values[slot].push(value);
            }
        }

        Self::from_columns(REQUIRED_COLUMNS.iter().copied().zip(values))
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> SourceResult<Self> {
        let file = std::fs::File::open(path.as_ref())?;
        let table = Self::from_reader(file)?;
        log::info!(
            "Loaded plasma profile table from {:?} ({} rows)",
            path.as_ref(),
            table.len()
        );
        Ok(table)
    }

    /// Number of flux surfaces.
    pub fn len(&self) -> usize {
        self.columns.psi.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.psi.is_empty()
    }

    pub fn columns(&self) -> &ProfileColumns {
        &self.columns
    }

    pub fn psi(&self) -> &[f64] {
        &self.columns.psi
    }

    /// Look up a column by its CSV header name.
    pub fn column(&self, name: &str) -> Option<&[f64]> {
        let c = &self.columns;
        let values = match name {
            COL_PSI => &c.psi,
            COL_MINOR_RADIUS => &c.minor_radius,
            COL_SHIFT => &c.shift,
            COL_ELONGATION => &c.elongation,
            COL_TRIANGULARITY => &c.triangularity,
            COL_ION_TEMPERATURE => &c.ion_temperature,
            COL_DENSITY => &c.density,
            _ => return None,
        };
        Some(values.as_slice())
    }
}

fn validate_columns(columns: &ProfileColumns) -> SourceResult<()> {
    let rows = columns.psi.len();
    if rows < MIN_ROWS {
        return Err(SourceError::ConfigError(format!(
            "profile table needs at least {MIN_ROWS} rows, got {rows}"
        )));
    }

    let named: [(&str, &[f64]); 7] = [
        (COL_PSI, columns.psi.as_slice()),
        (COL_MINOR_RADIUS, columns.minor_radius.as_slice()),
        (COL_SHIFT, columns.shift.as_slice()),
        (COL_ELONGATION, columns.elongation.as_slice()),
        (COL_TRIANGULARITY, columns.triangularity.as_slice()),
        (COL_ION_TEMPERATURE, columns.ion_temperature.as_slice()),
        (COL_DENSITY, columns.density.as_slice()),
    ];
    for (name, values) in named {
        if values.len() != rows {
            return Err(SourceError::ConfigError(format!(
                "profile column '{name}' has {} rows, expected {rows}",
                values.len()
            )));
        }
        if let Some(i) = values.iter().position(|v| !v.is_finite()) {
            return Err(SourceError::ConfigError(format!(
                "profile column '{name}' row {} is not finite",
                i + 1
            )));
        }
    }

    if let Some(i) = columns.psi.windows(2).position(|w| w[1] <= w[0]) {
        return Err(SourceError::ConfigError(format!(
            "flux coordinate must be strictly increasing: psi[{}]={} followed by psi[{}]={}",
            i,
            columns.psi[i],
            i + 1,
            columns.psi[i + 1]
        )));
    }
    Ok(())
}
