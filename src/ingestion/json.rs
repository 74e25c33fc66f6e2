//! JSON catalog reader.
//!
//! Supported inputs:
//! - A JSON array of objects: `[{"Volcano Name": "Fuji", ...}, ...]`
//! - Newline-delimited JSON (NDJSON), one object per line
//!
//! Object keys are the dataset's column headers (e.g. `Elevation (m)`).

use std::fs;
use std::path::Path;

use crate::error::{IngestionError, IngestionResult};
use crate::types::{Catalog, Column, DataType, Value, VolcanoRecord};

/// Load a JSON or NDJSON file into a [`Catalog`].
pub fn load_json_from_path(path: impl AsRef<Path>) -> IngestionResult<Catalog> {
    let text = fs::read_to_string(path)?;
    load_json_from_str(&text)
}

/// Load a catalog from an in-memory JSON or NDJSON string.
pub fn load_json_from_str(input: &str) -> IngestionResult<Catalog> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(IngestionError::SchemaMismatch {
            message: "json input is empty".to_string(),
        });
    }

    // A single document first (array or object), then NDJSON.
    if let Ok(v) = serde_json::from_str::<serde_json::Value>(trimmed) {
        return match v {
            serde_json::Value::Array(items) => load_json_values(&items),
            serde_json::Value::Object(_) => load_json_values(std::slice::from_ref(&v)),
            _ => Err(IngestionError::SchemaMismatch {
                message: "json must be an object, an array of objects, or NDJSON".to_string(),
            }),
        };
    }

    let mut values = Vec::new();
    for (i, line) in trimmed.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let v = serde_json::from_str::<serde_json::Value>(line).map_err(|e| {
            IngestionError::SchemaMismatch {
                message: format!("invalid ndjson at line {}: {}", i + 1, e),
            }
        })?;
        values.push(v);
    }
    load_json_values(&values)
}

fn load_json_values(values: &[serde_json::Value]) -> IngestionResult<Catalog> {
    let mut records = Vec::with_capacity(values.len());
    let mut cells: Vec<Value> = Vec::with_capacity(Column::ALL.len());

    for (idx0, v) in values.iter().enumerate() {
        let row = idx0 + 1;
        let obj = v.as_object().ok_or_else(|| IngestionError::SchemaMismatch {
            message: format!("row {row} is not a json object"),
        })?;

        cells.clear();
        for column in Column::ALL {
            let jv = obj.get(column.header()).ok_or_else(|| IngestionError::SchemaMismatch {
                message: format!("row {row} missing required field '{column}'"),
            })?;
            cells.push(convert_json_value(row, column, jv)?);
        }
        records.push(VolcanoRecord::from_values(row, &cells)?);
    }

    log::debug!("parsed {} json rows", records.len());
    Ok(Catalog::new(records))
}

fn convert_json_value(row: usize, column: Column, v: &serde_json::Value) -> IngestionResult<Value> {
    if v.is_null() {
        return Ok(Value::Null);
    }

    let parse_error = |message: &str| IngestionError::ParseError {
        row,
        column: column.header().to_string(),
        raw: v.to_string(),
        message: message.to_string(),
    };

    match column.data_type() {
        DataType::Utf8 => match v {
            serde_json::Value::String(s) => Ok(Value::Utf8(s.trim().to_string())),
            // Numeric-looking text such as eruption years may arrive as bare numbers.
            serde_json::Value::Number(n) => Ok(Value::Utf8(n.to_string())),
            _ => Err(parse_error("expected string")),
        },
        DataType::Int64 => {
            if let Some(n) = v.as_i64() {
                Ok(Value::Int64(n))
            } else if let Some(f) = v.as_f64().filter(|f| f.fract() == 0.0 && f.abs() < i64::MAX as f64) {
                Ok(Value::Int64(f as i64))
            } else {
                Err(parse_error("expected integer number"))
            }
        }
        DataType::Float64 => v
            .as_f64()
            .map(Value::Float64)
            .ok_or_else(|| parse_error("expected number")),
    }
}
