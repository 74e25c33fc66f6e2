//! Dataset loading.
//!
//! Most callers should use [`load_catalog`] (from [`unified`]) which:
//!
//! - auto-detects the format by file extension (or you can override via [`LoadOptions`])
//! - reads the file into an in-memory [`crate::types::Catalog`]
//! - optionally reports success/failure/alerts to a [`LoadObserver`]
//!
//! Format-specific readers live under [`csv`] and [`json`].

pub mod csv;
pub mod json;
pub mod observability;
pub mod unified;

pub use observability::{
    AuditEntry, AuditEvent, AuditFileObserver, LoadContext, LoadObserver, LoadSeverity, LoadStats, LogObserver,
};
pub use unified::{load_catalog, DatasetFormat, LoadOptions, LoadRequest};
