use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

// ---------------------------------------------------------------------------
// MetadataValue – a single cell of the master inventory
// ---------------------------------------------------------------------------

/// A dynamically-typed cell, inferred per value the way a CSV reader would.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum MetadataValue {
    String(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Null,
}

impl fmt::Display for MetadataValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetadataValue::String(s) => write!(f, "{s}"),
            MetadataValue::Integer(i) => write!(f, "{i}"),
            MetadataValue::Float(v) => write!(f, "{v}"),
            MetadataValue::Bool(b) => write!(f, "{b}"),
            MetadataValue::Null => write!(f, ""),
        }
    }
}

impl MetadataValue {
    /// Try to interpret the value as an `f64` for charting.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            MetadataValue::Float(v) => Some(*v),
            MetadataValue::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// MasterTable – the sample inventory
// ---------------------------------------------------------------------------

/// Name of the key column of the master inventory.
pub const CODE_COLUMN: &str = "Code";

/// The master inventory: one row per sample, keyed by [`CODE_COLUMN`].
///
/// Every row has exactly `columns.len()` cells; short CSV rows are padded with
/// [`MetadataValue::Null`] at load time.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MasterTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<MetadataValue>>,
}

impl MasterTable {
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// All values of the `Code` column, in row order. Empty if there is no
    /// such column.
    pub fn codes(&self) -> Vec<String> {
        match self.column_index(CODE_COLUMN) {
            Some(idx) => self.rows.iter().map(|r| r[idx].to_string()).collect(),
            None => Vec::new(),
        }
    }

    /// Cell lookup by row and column name.
    pub fn value(&self, row: usize, column: &str) -> Option<&MetadataValue> {
        let idx = self.column_index(column)?;
        self.rows.get(row).map(|r| &r[idx])
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

// ---------------------------------------------------------------------------
// SpectrumTable – one spectroscopy file
// ---------------------------------------------------------------------------

pub const WAVENUMBER_COLUMN: &str = "Wavenumber";
pub const INTENSITY_COLUMN: &str = "Intensity";
pub const NORMALIZED_COLUMN: &str = "Normalized Intensity";

/// Ordered (wavenumber, intensity) pairs with an optional derived column.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SpectrumTable {
    pub wavenumber: Vec<f64>,
    pub intensity: Vec<f64>,
    /// Set by [`crate::data::normalize::normalize`]; same length as `intensity`.
    pub normalized: Option<Vec<f64>>,
}

impl SpectrumTable {
    pub fn new(wavenumber: Vec<f64>, intensity: Vec<f64>) -> Self {
        debug_assert_eq!(wavenumber.len(), intensity.len());
        SpectrumTable {
            wavenumber,
            intensity,
            normalized: None,
        }
    }

    pub fn len(&self) -> usize {
        self.wavenumber.len()
    }

    pub fn is_empty(&self) -> bool {
        self.wavenumber.is_empty()
    }

    /// Names of the columns present, in display order.
    pub fn column_names(&self) -> Vec<&'static str> {
        let mut names = vec![WAVENUMBER_COLUMN, INTENSITY_COLUMN];
        if self.normalized.is_some() {
            names.push(NORMALIZED_COLUMN);
        }
        names
    }

    /// `[x, y]` points for plotting. Falls back to raw intensity when the
    /// normalized column is requested but absent.
    pub fn points(&self, normalized: bool) -> Vec<[f64; 2]> {
        let y = match (&self.normalized, normalized) {
            (Some(norm), true) => norm,
            _ => &self.intensity,
        };
        self.wavenumber
            .iter()
            .zip(y.iter())
            .map(|(&x, &y)| [x, y])
            .collect()
    }
}

// ---------------------------------------------------------------------------
// SampleCollection – the loaded batch
// ---------------------------------------------------------------------------

/// File name → processed spectrum. Only successfully loaded files are present.
pub type SampleCollection = BTreeMap<String, SpectrumTable>;
