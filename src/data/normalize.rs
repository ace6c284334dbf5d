use serde::{Deserialize, Serialize};

use crate::error::NormalizeError;

use super::model::SpectrumTable;

/// Output range of min-max scaling.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NormRange {
    pub min: f64,
    pub max: f64,
}

impl Default for NormRange {
    fn default() -> Self {
        NormRange { min: 0.0, max: 1.0 }
    }
}

/// Smallest and largest value, ignoring NaN. `None` for an empty slice.
pub fn min_max(values: &[f64]) -> Option<(f64, f64)> {
    if values.is_empty() {
        return None;
    }
    let min = values.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    Some((min, max))
}

/// Min-max scale the intensity column into `range`.
///
/// Returns a new table with `normalized` set; the input is left untouched.
/// Re-normalizing a table recomputes the column from intensity, so the
/// operation is idempotent. Differences are taken on halved values so that
/// finite inputs spanning the whole `f64` range do not overflow.
pub fn normalize(table: &SpectrumTable, range: NormRange) -> Result<SpectrumTable, NormalizeError> {
    let scaled = match min_max(&table.intensity) {
        None => Vec::new(),
        Some((lo, hi)) => {
            if hi == lo {
                return Err(NormalizeError::DegenerateRange { value: lo });
            }
            let span = range.max - range.min;
            let width = hi / 2.0 - lo / 2.0;
            table
                .intensity
                .iter()
                .map(|&v| (v / 2.0 - lo / 2.0) / width * span + range.min)
                .collect()
        }
    };

    Ok(SpectrumTable {
        wavenumber: table.wavenumber.clone(),
        intensity: table.intensity.clone(),
        normalized: Some(scaled),
    })
}
