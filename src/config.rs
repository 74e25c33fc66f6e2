//! Session configuration.
//!
//! [`ExplorerConfig::default`] describes a plain run against `volcanoes.csv` in the working
//! directory. The binary overrides fields from command-line flags and the `VOLCANO_DATASET` /
//! `VOLCANO_AUDIT_LOG` environment variables.

use std::path::PathBuf;
use std::sync::Arc;

use crate::explorer::{Explorer, DEFAULT_RANK};
use crate::ingestion::{
    AuditFileObserver, DatasetFormat, LoadObserver, LoadOptions, LoadRequest, LoadSeverity, LogObserver,
};
use crate::processing::TieBreak;
use crate::render::{OutputFormat, Renderer, TextOptions};
use crate::types::Catalog;

/// Dataset read when no path is configured.
pub const DEFAULT_DATASET: &str = "volcanoes.csv";

/// Everything a session needs besides the catalog itself.
#[derive(Debug, Clone, PartialEq)]
pub struct ExplorerConfig {
    /// Dataset file to load.
    pub dataset: PathBuf,
    /// If `None`, inferred from the dataset extension.
    pub format: Option<DatasetFormat>,
    /// Text or JSON output.
    pub output: OutputFormat,
    /// Width in characters of the longest bar in text output.
    pub bar_width: usize,
    /// Rank used by the counting chart when none is requested.
    pub default_rank: usize,
    /// Ordering of equal counts in rankings.
    pub tie_break: TieBreak,
    /// Maximum rows shown by the Home table; `None` shows all.
    pub table_limit: Option<usize>,
    /// Append load outcomes to this file when set.
    pub audit_log: Option<PathBuf>,
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            dataset: PathBuf::from(DEFAULT_DATASET),
            format: None,
            output: OutputFormat::Text,
            bar_width: TextOptions::default().bar_width,
            default_rank: DEFAULT_RANK,
            tie_break: TieBreak::default(),
            table_limit: None,
            audit_log: None,
        }
    }
}

impl ExplorerConfig {
    /// Load options with a [`LogObserver`], plus an [`AuditFileObserver`] when an audit log is set.
    pub fn load_request(&self) -> LoadRequest {
        let mut observers: Vec<Arc<dyn LoadObserver>> = vec![Arc::new(LogObserver)];
        if let Some(path) = &self.audit_log {
            observers.push(Arc::new(AuditFileObserver::new(path)));
        }

        LoadRequest {
            path: self.dataset.clone(),
            options: LoadOptions {
                format: self.format,
                observer: Some(Arc::new(observers)),
                alert_at_or_above: LoadSeverity::Critical,
            },
        }
    }

    /// Renderer for the configured output format; bars are at least one character wide.
    pub fn renderer(&self) -> Renderer {
        Renderer::new(
            self.output,
            TextOptions {
                bar_width: self.bar_width.max(1),
            },
        )
    }

    /// Wrap a loaded catalog in a session using this configuration.
    pub fn explorer(&self, catalog: Catalog) -> Explorer {
        Explorer::new(catalog)
            .with_tie_break(self.tie_break)
            .with_default_rank(self.default_rank)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cfg = ExplorerConfig::default();
        assert_eq!(cfg.dataset, PathBuf::from("volcanoes.csv"));
        assert_eq!(cfg.default_rank, 5);
        assert_eq!(cfg.bar_width, 40);
        assert_eq!(cfg.tie_break, TieBreak::FirstSeen);
    }

    #[test]
    fn load_request_carries_format_and_observer() {
        let cfg = ExplorerConfig {
            dataset: PathBuf::from("data/volcanoes.json"),
            format: Some(DatasetFormat::Json),
            ..Default::default()
        };
        let req = cfg.load_request();
        assert_eq!(req.path, PathBuf::from("data/volcanoes.json"));
        assert_eq!(req.options.format, Some(DatasetFormat::Json));
        assert!(req.options.observer.is_some());
    }

    #[test]
    fn renderer_never_uses_zero_width_bars() {
        let cfg = ExplorerConfig {
            bar_width: 0,
            ..Default::default()
        };
        assert_eq!(cfg.renderer().text.bar_width, 1);
    }
}
