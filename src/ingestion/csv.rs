//! CSV catalog reader.

use std::path::Path;

use crate::error::{IngestionError, IngestionResult};
use crate::types::{Catalog, Column, DataType, Value, VolcanoRecord};

/// Load a CSV file into a [`Catalog`].
///
/// Rules:
///
/// - CSV must have headers.
/// - Headers must contain every catalog column (order can differ, extra columns are ignored).
/// - Each cell is parsed according to its column type; blank cells in required columns fail.
pub fn load_csv_from_path(path: impl AsRef<Path>) -> IngestionResult<Catalog> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)?;
    load_csv_from_reader(&mut rdr)
}

/// Load a catalog from an existing CSV reader.
pub fn load_csv_from_reader<R: std::io::Read>(rdr: &mut csv::Reader<R>) -> IngestionResult<Catalog> {
    let headers = rdr.headers()?.clone();

    // Catalog columns -> CSV column indexes (allows re-ordered CSV columns).
    let mut col_idxs = Vec::with_capacity(Column::ALL.len());
    for column in Column::ALL {
        match headers.iter().position(|h| h.trim() == column.header()) {
            Some(idx) => col_idxs.push(idx),
            None => {
                return Err(IngestionError::SchemaMismatch {
                    message: format!(
                        "missing required column '{column}'. headers={:?}",
                        headers.iter().collect::<Vec<_>>(),
                    ),
                });
            }
        }
    }

    let mut records = Vec::new();
    let mut cells: Vec<Value> = Vec::with_capacity(Column::ALL.len());
    for (row_idx0, result) in rdr.records().enumerate() {
        // 1-based row number for users; +1 again because the header is row 1.
        let user_row = row_idx0 + 2;
        let record = result?;

        cells.clear();
        for (column, &csv_idx) in Column::ALL.iter().zip(col_idxs.iter()) {
            let raw = record.get(csv_idx).unwrap_or("");
            cells.push(parse_cell(user_row, *column, raw)?);
        }
        records.push(VolcanoRecord::from_values(user_row, &cells)?);
    }

    log::debug!("parsed {} csv rows", records.len());
    Ok(Catalog::new(records))
}

fn parse_cell(row: usize, column: Column, raw: &str) -> IngestionResult<Value> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(Value::Null);
    }

    let parse_error = |message: String| IngestionError::ParseError {
        row,
        column: column.header().to_owned(),
        raw: raw.to_owned(),
        message,
    };

    match column.data_type() {
        DataType::Utf8 => Ok(Value::Utf8(trimmed.to_owned())),
        DataType::Int64 => parse_integral(trimmed).map(Value::Int64).map_err(parse_error),
        DataType::Float64 => trimmed
            .parse::<f64>()
            .map(Value::Float64)
            .map_err(|e| parse_error(e.to_string())),
    }
}

/// Integer columns also accept integral floats such as `1234.0`, which spreadsheet exports emit.
fn parse_integral(s: &str) -> Result<i64, String> {
    if let Ok(n) = s.parse::<i64>() {
        return Ok(n);
    }
    match s.parse::<f64>() {
        Ok(f) if f.is_finite() && f.fract() == 0.0 && f.abs() < i64::MAX as f64 => Ok(f as i64),
        Ok(_) => Err("expected an integral number".to_string()),
        Err(e) => Err(e.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_integral_accepts_integral_floats_only() {
        assert_eq!(parse_integral("3776"), Ok(3776));
        assert_eq!(parse_integral("-1234.0"), Ok(-1234));
        assert!(parse_integral("12.5").is_err());
        assert!(parse_integral("high").is_err());
    }

    #[test]
    fn parse_cell_maps_blank_to_null_and_trims() {
        assert_eq!(parse_cell(2, Column::Region, "   ").unwrap(), Value::Null);
        assert_eq!(
            parse_cell(2, Column::Region, "  Andes ").unwrap(),
            Value::Utf8("Andes".to_string())
        );
        assert_eq!(parse_cell(2, Column::Latitude, "-15.78").unwrap(), Value::Float64(-15.78));
    }

    #[test]
    fn parse_cell_reports_row_and_column_on_bad_number() {
        let err = parse_cell(9, Column::Elevation, "tall").unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("row 9"));
        assert!(msg.contains("column 'Elevation (m)'"));
        assert!(msg.contains("raw='tall'"));
    }
}
