//! `volcano-explorer` loads a static volcano catalog into memory and answers three kinds of
//! questions about it:
//!
//! - **Map**: where are one country's volcanoes? ([`processing::geo`])
//! - **Counting bar chart**: which countries, rock types or volcano types are most common?
//!   ([`processing::ranking`])
//! - **Elevation bar chart**: how do mean/max/min elevations compare across 2-5 countries?
//!   ([`processing::elevation`])
//!
//! The catalog is read once ([`ingestion::load_catalog`]) and never mutated. Each request is a
//! full, synchronous recomputation; the only memoized result is the per-country map view
//! ([`cache::MapCache`]).
//!
//! ## Dataset
//!
//! CSV (`.csv`) or JSON (`.json` array-of-objects, `.ndjson`), with the column headers
//! `Volcano Number`, `Volcano Name`, `Country`, `Primary Volcano Type`, `Activity Evidence`,
//! `Last Known Eruption`, `Region`, `Subregion`, `Latitude`, `Longitude`, `Elevation (m)`,
//! `Dominant Rock Type`, `Tectonic Setting`.
//!
//! ## Quick example
//!
//! ```no_run
//! use volcano_explorer::explorer::{ElevationOutcome, Explorer};
//! use volcano_explorer::ingestion::{load_catalog, LoadOptions};
//! use volcano_explorer::types::CategoricalField;
//!
//! # fn main() -> Result<(), volcano_explorer::IngestionError> {
//! let catalog = load_catalog("volcanoes.csv", &LoadOptions::default())?;
//! let mut explorer = Explorer::new(catalog);
//!
//! let top = explorer.counting_chart(CategoricalField::DominantRockType, Some(10));
//! println!("{}", top.title);
//!
//! let map = explorer.map("Japan");
//! println!("{} markers", map.markers.len());
//!
//! match explorer.elevation_chart(&["Chile", "Japan", "Indonesia"]) {
//!     ElevationOutcome::Chart(chart) => println!("{} groups", chart.groups.len()),
//!     other => {
//!         if let Some(notice) = other.notice() {
//!             println!("{}", notice.guidance);
//!         }
//!     }
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`ingestion`]: CSV/JSON readers, format inference, load observers
//! - [`types`]: records, columns and the catalog
//! - [`processing`]: filter/reduce primitives and the three components
//! - [`explorer`]: the session facade, one method per mode
//! - [`views`] / [`render`]: view models and their text/JSON rendering
//! - [`cache`]: keyed view cache
//! - [`config`]: session configuration
//! - [`error`]: error types

pub mod cache;
pub mod config;
pub mod error;
pub mod explorer;
pub mod ingestion;
pub mod processing;
pub mod render;
pub mod types;
pub mod views;

pub use error::{IngestionError, IngestionResult};
