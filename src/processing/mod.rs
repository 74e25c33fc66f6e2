//! In-memory computations over a loaded [`crate::types::Catalog`].
//!
//! Every function here is stateless: it reads the shared catalog plus user-selected parameters
//! and returns a display-ready aggregate.
//!
//! - [`ranking`]: frequency ranking of a categorical field (count, sort, truncate)
//! - [`geo`]: records of one country projected for the map
//! - [`elevation`]: mean/max/min elevation for 2-5 eligible countries
//! - [`filter()`] and [`reduce()`]: the primitives the above are built on
//!
//! ## Example
//!
//! ```rust
//! use volcano_explorer::processing::{elevation, ranking, TieBreak};
//! use volcano_explorer::types::{Catalog, CategoricalField, VolcanoRecord};
//!
//! let mut records = Vec::new();
//! for i in 0..12 {
//!     records.push(VolcanoRecord::new(format!("a{i}"), "Chile", 1000 + i));
//!     records.push(VolcanoRecord::new(format!("b{i}"), "Peru", 2000 + i));
//! }
//! records.push(VolcanoRecord::new("c", "Bolivia", 5000));
//! let catalog = Catalog::new(records);
//!
//! let top = ranking::rank_values(&catalog, CategoricalField::Country, 2, TieBreak::Alphabetical);
//! assert_eq!(top[0].value, "Chile");
//! assert_eq!(top[0].count, 12);
//!
//! let stats = elevation::aggregate(&catalog, &["Peru", "Chile", "Bolivia"]);
//! assert_eq!(stats.len(), 2); // Bolivia has too few records
//! assert_eq!(stats[0].country, "Chile");
//! assert_eq!(stats[0].max_m, 1011);
//! ```

pub mod elevation;
pub mod filter;
pub mod geo;
pub mod ranking;
pub mod reduce;

pub use elevation::{ElevationSummary, SelectionGuidance};
pub use filter::{filter, filter_by_country};
pub use geo::MapPoint;
pub use ranking::{RankedValue, TieBreak};
pub use reduce::{reduce, ReduceOp};
