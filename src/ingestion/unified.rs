//! Unified catalog loading.
//!
//! Most callers should use [`load_catalog`], which reads a dataset file into an in-memory
//! [`crate::types::Catalog`].
//!
//! - If [`LoadOptions::format`] is `None`, the format is inferred from the file extension.
//! - If a [`LoadObserver`] is provided, success/failure/alerts are reported to it.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Serialize;

use crate::error::{IngestionError, IngestionResult};
use crate::types::Catalog;

use super::observability::{LoadContext, LoadObserver, LoadSeverity, LoadStats};
use super::{csv, json};

/// Supported dataset formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DatasetFormat {
    /// Comma-separated values with a header row.
    Csv,
    /// JSON array-of-objects or NDJSON.
    Json,
}

impl DatasetFormat {
    /// Parse a format from a file extension (case-insensitive).
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "csv" => Some(Self::Csv),
            "json" | "ndjson" => Some(Self::Json),
            _ => None,
        }
    }
}

impl std::str::FromStr for DatasetFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_extension(s).ok_or_else(|| format!("unknown dataset format '{s}' (expected csv or json)"))
    }
}

/// Options controlling catalog loading.
#[derive(Clone)]
pub struct LoadOptions {
    /// If `None`, infer the format from the file extension.
    pub format: Option<DatasetFormat>,
    /// Optional observer for logging/alerts.
    pub observer: Option<Arc<dyn LoadObserver>>,
    /// Severity threshold at which `on_alert` is invoked.
    pub alert_at_or_above: LoadSeverity,
}

impl fmt::Debug for LoadOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoadOptions")
            .field("format", &self.format)
            .field("observer_set", &self.observer.is_some())
            .field("alert_at_or_above", &self.alert_at_or_above)
            .finish()
    }
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            format: None,
            observer: None,
            alert_at_or_above: LoadSeverity::Critical,
        }
    }
}

/// Load a volcano catalog from `path`.
///
/// When an observer is configured, this function reports:
///
/// - `on_success` with record and country counts
/// - `on_failure` with a computed severity
/// - `on_alert` when that severity is >= `options.alert_at_or_above`
///
/// ```no_run
/// use volcano_explorer::ingestion::{load_catalog, LoadOptions};
///
/// # fn main() -> Result<(), volcano_explorer::IngestionError> {
/// let catalog = load_catalog("volcanoes.csv", &LoadOptions::default())?;
/// println!("records={}", catalog.len());
/// # Ok(())
/// # }
/// ```
pub fn load_catalog(path: impl AsRef<Path>, options: &LoadOptions) -> IngestionResult<Catalog> {
    let path = path.as_ref();
    let format = match options.format {
        Some(f) => f,
        None => infer_format_from_path(path)?,
    };

    let ctx = LoadContext {
        path: path.to_path_buf(),
        format,
    };

    let result = match format {
        DatasetFormat::Csv => csv::load_csv_from_path(path),
        DatasetFormat::Json => json::load_json_from_path(path),
    };

    if let Some(obs) = options.observer.as_ref() {
        match &result {
            Ok(catalog) => obs.on_success(&ctx, &LoadStats::from_catalog(catalog)),
            Err(e) => {
                let sev = severity_for_error(e);
                obs.on_failure(&ctx, sev, e);
                if sev >= options.alert_at_or_above {
                    obs.on_alert(&ctx, sev, e);
                }
            }
        }
    }

    result
}

fn severity_for_error(e: &IngestionError) -> LoadSeverity {
    match e {
        IngestionError::Io(_) => LoadSeverity::Critical,
        IngestionError::Csv(err) => match err.kind() {
            ::csv::ErrorKind::Io(_) => LoadSeverity::Critical,
            _ => LoadSeverity::Error,
        },
        IngestionError::SchemaMismatch { .. }
        | IngestionError::ParseError { .. }
        | IngestionError::MissingValue { .. } => LoadSeverity::Error,
    }
}

fn infer_format_from_path(path: &Path) -> IngestionResult<DatasetFormat> {
    let ext = path
        .extension()
        .and_then(|s| s.to_str())
        .ok_or_else(|| IngestionError::SchemaMismatch {
            message: format!("cannot infer format: path has no extension ({})", path.display()),
        })?;

    DatasetFormat::from_extension(ext).ok_or_else(|| IngestionError::SchemaMismatch {
        message: format!(
            "cannot infer format from extension '{ext}' for path ({})",
            path.display()
        ),
    })
}

/// An owned load request, handy when the dataset location comes from configuration.
#[derive(Clone)]
pub struct LoadRequest {
    /// Dataset file to load.
    pub path: PathBuf,
    /// Format override, observer and alert threshold.
    pub options: LoadOptions,
}

impl fmt::Debug for LoadRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoadRequest")
            .field("path", &self.path)
            .field("options", &self.options)
            .finish()
    }
}

impl LoadRequest {
    /// Execute the request by calling [`load_catalog`].
    pub fn run(&self) -> IngestionResult<Catalog> {
        load_catalog(&self.path, &self.options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_from_extension_is_case_insensitive() {
        assert_eq!(DatasetFormat::from_extension("CSV"), Some(DatasetFormat::Csv));
        assert_eq!(DatasetFormat::from_extension("ndjson"), Some(DatasetFormat::Json));
        assert_eq!(DatasetFormat::from_extension("xlsx"), None);
    }

    #[test]
    fn infer_format_requires_known_extension() {
        let err = infer_format_from_path(Path::new("volcanoes")).unwrap_err();
        assert!(err.to_string().contains("path has no extension"));
        let err = infer_format_from_path(Path::new("volcanoes.parquet")).unwrap_err();
        assert!(err.to_string().contains("extension 'parquet'"));
    }

    #[test]
    fn io_errors_are_critical() {
        let err = IngestionError::Io(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"));
        assert_eq!(severity_for_error(&err), LoadSeverity::Critical);
        let err = IngestionError::MissingValue {
            row: 2,
            column: "Country".to_string(),
        };
        assert_eq!(severity_for_error(&err), LoadSeverity::Error);
    }
}
