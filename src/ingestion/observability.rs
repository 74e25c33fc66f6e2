//! Load outcome reporting: severities, observer hooks, the `log` observer and the audit file.

use std::collections::BTreeMap;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::{SystemTime, UNIX_EPOCH};

use serde::Serialize;

use crate::error::IngestionError;
use crate::processing::elevation::ELIGIBLE_ABOVE;
use crate::types::Catalog;

use super::unified::DatasetFormat;

/// Severity classification used for observer callbacks and alerting thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LoadSeverity {
    Info,
    Warning,
    /// The load failed (bad columns, bad cells).
    Error,
    /// Infrastructure failure, typically I/O.
    Critical,
}

/// Context about a load attempt.
#[derive(Debug, Clone)]
pub struct LoadContext {
    /// Dataset file that was read.
    pub path: PathBuf,
    /// Format the file was read as.
    pub format: DatasetFormat,
}

/// What a successful load produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadStats {
    /// Number of loaded records.
    pub records: usize,
    /// Records per country, ordered by country name.
    pub country_counts: BTreeMap<String, usize>,
}

impl LoadStats {
    /// Summarize a loaded catalog.
    pub fn from_catalog(catalog: &Catalog) -> Self {
        let country_counts = catalog.reduce_records(BTreeMap::new(), |mut acc, r| {
            *acc.entry(r.country.clone()).or_insert(0) += 1;
            acc
        });
        Self {
            records: catalog.len(),
            country_counts,
        }
    }

    /// Number of distinct countries.
    pub fn countries(&self) -> usize {
        self.country_counts.len()
    }

    /// Countries that can take part in elevation comparisons, sorted.
    pub fn eligible_countries(&self) -> Vec<&str> {
        self.country_counts
            .iter()
            .filter(|&(_, &n)| n > ELIGIBLE_ABOVE)
            .map(|(c, _)| c.as_str())
            .collect()
    }
}

/// Observer interface for load outcomes.
pub trait LoadObserver: Send + Sync {
    /// Called once after a successful load.
    fn on_success(&self, _ctx: &LoadContext, _stats: &LoadStats) {}

    /// Called for every failed load with its severity.
    fn on_failure(&self, _ctx: &LoadContext, _severity: LoadSeverity, _error: &IngestionError) {}

    /// Called when a failure meets the alert threshold.
    ///
    /// Default behavior forwards to [`Self::on_failure`].
    fn on_alert(&self, ctx: &LoadContext, severity: LoadSeverity, error: &IngestionError) {
        self.on_failure(ctx, severity, error)
    }
}

/// A list of observers is itself an observer; every callback reaches each entry in order.
impl LoadObserver for Vec<Arc<dyn LoadObserver>> {
    fn on_success(&self, ctx: &LoadContext, stats: &LoadStats) {
        self.iter().for_each(|o| o.on_success(ctx, stats));
    }

    fn on_failure(&self, ctx: &LoadContext, severity: LoadSeverity, error: &IngestionError) {
        self.iter().for_each(|o| o.on_failure(ctx, severity, error));
    }

    fn on_alert(&self, ctx: &LoadContext, severity: LoadSeverity, error: &IngestionError) {
        self.iter().for_each(|o| o.on_alert(ctx, severity, error));
    }
}

/// Reports load events through the `log` facade.
#[derive(Debug, Default)]
pub struct LogObserver;

impl LoadObserver for LogObserver {
    fn on_success(&self, ctx: &LoadContext, stats: &LoadStats) {
        log::info!(
            "loaded catalog format={:?} path={} records={} countries={} eligible_for_elevation={}",
            ctx.format,
            ctx.path.display(),
            stats.records,
            stats.countries(),
            stats.eligible_countries().len()
        );
    }

    fn on_failure(&self, ctx: &LoadContext, severity: LoadSeverity, error: &IngestionError) {
        log::warn!(
            "catalog load failed severity={:?} format={:?} path={} err={}",
            severity,
            ctx.format,
            ctx.path.display(),
            error
        );
    }

    fn on_alert(&self, ctx: &LoadContext, severity: LoadSeverity, error: &IngestionError) {
        log::error!(
            "[ALERT] catalog load failed severity={:?} format={:?} path={} err={}",
            severity,
            ctx.format,
            ctx.path.display(),
            error
        );
    }
}

/// Kind of event recorded in the audit file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AuditEvent {
    Loaded,
    Failed,
    Alert,
}

/// One line of the audit file.
///
/// A successful load records what the explorer will offer: per-country counts and the countries
/// eligible for elevation comparison. Failures record severity and the error text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AuditEntry<'a> {
    /// Seconds since the Unix epoch.
    pub at: u64,
    /// What happened.
    pub event: AuditEvent,
    /// Dataset path as given.
    pub path: String,
    /// Format the dataset was read as.
    pub format: DatasetFormat,
    /// Set for failures.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub severity: Option<LoadSeverity>,
    /// Set for successful loads.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub records: Option<usize>,
    /// Records per country; set for successful loads.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country_counts: Option<&'a BTreeMap<String, usize>>,
    /// Countries eligible for elevation comparison; set for successful loads.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub eligible_countries: Option<Vec<&'a str>>,
    /// Error text; set for failures.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<'a> AuditEntry<'a> {
    fn new(event: AuditEvent, ctx: &LoadContext) -> Self {
        Self {
            at: SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_secs())
                .unwrap_or_default(),
            event,
            path: ctx.path.display().to_string(),
            format: ctx.format,
            severity: None,
            records: None,
            country_counts: None,
            eligible_countries: None,
            error: None,
        }
    }

    /// Entry for a successful load.
    pub fn loaded(ctx: &LoadContext, stats: &'a LoadStats) -> Self {
        Self {
            records: Some(stats.records),
            country_counts: Some(&stats.country_counts),
            eligible_countries: Some(stats.eligible_countries()),
            ..Self::new(AuditEvent::Loaded, ctx)
        }
    }

    /// Entry for a failed load (`event` is `Failed` or `Alert`).
    pub fn failed(event: AuditEvent, ctx: &LoadContext, severity: LoadSeverity, error: &IngestionError) -> Self {
        Self {
            severity: Some(severity),
            error: Some(error.to_string()),
            ..Self::new(event, ctx)
        }
    }
}

/// Appends one JSON object per load event to a local audit file.
#[derive(Debug)]
pub struct AuditFileObserver {
    path: PathBuf,
    lock: Mutex<()>,
}

impl AuditFileObserver {
    /// Writes are best-effort: a failure to open or write the file is logged and otherwise ignored.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            lock: Mutex::new(()),
        }
    }

    /// Location of the audit file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn record(&self, entry: &AuditEntry<'_>) {
        let line = match serde_json::to_string(entry) {
            Ok(line) => line,
            Err(e) => {
                log::warn!("could not serialize audit entry: {e}");
                return;
            }
        };
        let _guard = self.lock.lock().ok();
        let written = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .and_then(|mut f| writeln!(f, "{line}"));
        if let Err(e) = written {
            log::warn!("could not append to audit log {}: {e}", self.path.display());
        }
    }
}

impl LoadObserver for AuditFileObserver {
    fn on_success(&self, ctx: &LoadContext, stats: &LoadStats) {
        self.record(&AuditEntry::loaded(ctx, stats));
    }

    fn on_failure(&self, ctx: &LoadContext, severity: LoadSeverity, error: &IngestionError) {
        self.record(&AuditEntry::failed(AuditEvent::Failed, ctx, severity, error));
    }

    fn on_alert(&self, ctx: &LoadContext, severity: LoadSeverity, error: &IngestionError) {
        self.record(&AuditEntry::failed(AuditEvent::Alert, ctx, severity, error));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::VolcanoRecord;

    fn ctx() -> LoadContext {
        LoadContext {
            path: PathBuf::from("volcanoes.csv"),
            format: DatasetFormat::Csv,
        }
    }

    #[test]
    fn stats_count_countries_and_eligibility() {
        let mut records: Vec<VolcanoRecord> = (0..10).map(|i| VolcanoRecord::new(format!("j{i}"), "Japan", 100)).collect();
        records.push(VolcanoRecord::new("Etna", "Italy", 3295));
        let stats = LoadStats::from_catalog(&Catalog::new(records));

        assert_eq!(stats.records, 11);
        assert_eq!(stats.countries(), 2);
        assert_eq!(stats.country_counts.get("Japan"), Some(&10));
        assert_eq!(stats.eligible_countries(), vec!["Japan"]);
    }

    #[test]
    fn loaded_entry_serializes_domain_fields_only() {
        let stats = LoadStats {
            records: 3,
            country_counts: BTreeMap::from([("Chile".to_string(), 3)]),
        };
        let v = serde_json::to_value(AuditEntry::loaded(&ctx(), &stats)).unwrap();
        assert_eq!(v["event"], "loaded");
        assert_eq!(v["format"], "csv");
        assert_eq!(v["country_counts"]["Chile"], 3);
        assert_eq!(v["eligible_countries"], serde_json::json!([]));
        assert!(v.get("severity").is_none());
        assert!(v.get("error").is_none());
    }

    #[test]
    fn failed_entry_carries_severity_and_error() {
        let err = IngestionError::MissingValue {
            row: 4,
            column: "Country".to_string(),
        };
        let v = serde_json::to_value(AuditEntry::failed(AuditEvent::Alert, &ctx(), LoadSeverity::Error, &err)).unwrap();
        assert_eq!(v["event"], "alert");
        assert_eq!(v["severity"], "error");
        assert_eq!(v["error"], "missing required value at row 4 column 'Country'");
        assert!(v.get("records").is_none());
    }
}
