use crate::error::FetchError;

use super::model::{MasterTable, MetadataValue, SpectrumTable};

// ---------------------------------------------------------------------------
// Master inventory (CSV with header row)
// ---------------------------------------------------------------------------

/// Parse the master inventory.
///
/// Layout: header row with column names, one row per sample. Cell types are
/// inferred per value. Rows shorter than the header are padded with nulls;
/// longer rows are an error.
pub fn parse_master(text: &str) -> Result<MasterTable, FetchError> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(text.as_bytes());

    let columns: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result?;
        if record.len() > columns.len() {
            return Err(FetchError::Parse {
                line: line_of(&record),
                message: format!(
                    "expected {} fields, found {}",
                    columns.len(),
                    record.len()
                ),
            });
        }
        let mut row: Vec<MetadataValue> = record.iter().map(guess_metadata_type).collect();
        row.resize(columns.len(), MetadataValue::Null);
        rows.push(row);
    }

    Ok(MasterTable { columns, rows })
}

fn guess_metadata_type(s: &str) -> MetadataValue {
    let s = s.trim();
    if s.is_empty() {
        return MetadataValue::Null;
    }
    if let Ok(i) = s.parse::<i64>() {
        return MetadataValue::Integer(i);
    }
    if let Ok(f) = s.parse::<f64>() {
        return MetadataValue::Float(f);
    }
    if s == "true" || s == "false" {
        return MetadataValue::Bool(s == "true");
    }
    MetadataValue::String(s.to_string())
}

// ---------------------------------------------------------------------------
// Spectrum files (.dpt: headerless, two numeric columns)
// ---------------------------------------------------------------------------

/// Parse a headerless `wavenumber,intensity` table.
pub fn parse_spectrum(text: &str) -> Result<SpectrumTable, FetchError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let mut wavenumber = Vec::new();
    let mut intensity = Vec::new();

    for result in reader.records() {
        let record = result?;
        // Whitespace-only lines trim down to a single empty field.
        if record.iter().all(str::is_empty) {
            continue;
        }
        let line = line_of(&record);
        if record.len() != 2 {
            return Err(FetchError::Parse {
                line,
                message: format!("expected 2 fields, found {}", record.len()),
            });
        }
        wavenumber.push(parse_number(&record[0], line)?);
        intensity.push(parse_number(&record[1], line)?);
    }

    Ok(SpectrumTable::new(wavenumber, intensity))
}

fn parse_number(tok: &str, line: u64) -> Result<f64, FetchError> {
    tok.parse::<f64>().map_err(|_| FetchError::Parse {
        line,
        message: format!("'{tok}' is not a number"),
    })
}

fn line_of(record: &csv::StringRecord) -> u64 {
    record.position().map(|p| p.line()).unwrap_or(0)
}
