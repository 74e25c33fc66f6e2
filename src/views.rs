//! Display-ready view models.
//!
//! These carry everything a chart or map widget needs and nothing else. They serialize to JSON
//! for external charting tools and render to text through [`crate::render`].

use serde::Serialize;

use crate::processing::elevation::ELIGIBLE_ABOVE;
use crate::processing::geo::{self, MapPoint};
use crate::processing::{ElevationSummary, RankedValue, SelectionGuidance};
use crate::types::{Catalog, CategoricalField, Column};

/// The full catalog as a table (Home mode).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableView {
    /// Column headers, in dataset order.
    pub columns: Vec<String>,
    /// One entry per shown record, cells in header order.
    pub rows: Vec<Vec<String>>,
    /// Row count before any display limit.
    pub total_rows: usize,
}

impl TableView {
    /// Tabulate `catalog`, keeping at most `limit` rows when set.
    pub fn from_catalog(catalog: &Catalog, limit: Option<usize>) -> Self {
        let take = limit.unwrap_or(usize::MAX);
        Self {
            columns: Column::ALL.iter().map(|c| c.header().to_string()).collect(),
            rows: catalog
                .iter()
                .take(take)
                .map(|r| Column::ALL.iter().map(|&c| r.display_value(c)).collect())
                .collect(),
            total_rows: catalog.len(),
        }
    }
}

/// A latitude/longitude pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GeoPosition {
    /// Degrees north.
    pub latitude: f64,
    /// Degrees east.
    pub longitude: f64,
}

/// A map point plus the tooltip shown on hover.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapMarker {
    /// Position and identity of the volcano.
    #[serde(flatten)]
    pub point: MapPoint,
    /// Text shown when hovering the marker.
    pub tooltip: String,
}

/// Point map of one country's volcanoes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapView {
    /// `Map of {country} Volcanos`.
    pub header: String,
    /// Country as selected.
    pub country: String,
    /// Mean position of the markers; `None` when the country has no volcanoes.
    pub center: Option<GeoPosition>,
    /// Initial zoom level.
    pub zoom: u8,
    /// Initial pitch in degrees.
    pub pitch: u8,
    /// One marker per volcano, in catalog order.
    pub markers: Vec<MapMarker>,
}

impl MapView {
    /// Zoom used for every country map.
    pub const ZOOM: u8 = 4;
    /// Pitch used for every country map.
    pub const PITCH: u8 = 0;

    /// Map of `country` built from its located points.
    pub fn new(country: &str, points: Vec<MapPoint>) -> Self {
        let center = geo::centroid(&points).map(|(latitude, longitude)| GeoPosition { latitude, longitude });
        let markers = points
            .into_iter()
            .map(|point| MapMarker {
                tooltip: tooltip_for(&point),
                point,
            })
            .collect();
        Self {
            header: format!("Map of {country} Volcanos"),
            country: country.to_string(),
            center,
            zoom: Self::ZOOM,
            pitch: Self::PITCH,
            markers,
        }
    }
}

fn tooltip_for(point: &MapPoint) -> String {
    format!(
        "Volcano Name: {} | Last Known Eruption: {}",
        point.name,
        point.last_known_eruption.as_deref().unwrap_or("Unknown")
    )
}

/// Ranked frequency bar chart (Counting Bar Chart mode).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarChartView {
    /// `Top {rank} Volcano Counts for {label}`.
    pub title: String,
    /// Field label.
    pub x_label: String,
    /// Always `Count`.
    pub y_label: String,
    /// Effective rank after clamping.
    pub rank: usize,
    /// Upper bound of the rank control: the number of distinct values.
    pub max_rank: usize,
    /// Ranked values, most frequent first.
    pub bars: Vec<RankedValue>,
}

impl BarChartView {
    /// Chart for `field` with already ranked and truncated `bars`.
    pub fn new(field: CategoricalField, rank: usize, max_rank: usize, bars: Vec<RankedValue>) -> Self {
        Self {
            title: format!("Top {rank} Volcano Counts for {}", field.label()),
            x_label: field.label().to_string(),
            y_label: "Count".to_string(),
            rank,
            max_rank,
            bars,
        }
    }
}

/// Grouped bar chart of elevation statistics (Elevation Bar Chart mode).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupedBarChartView {
    /// Chart title.
    pub title: String,
    /// Series names, one bar per series in each group.
    pub series: Vec<String>,
    /// One group per country, ordered by country name.
    pub groups: Vec<ElevationSummary>,
}

impl GroupedBarChartView {
    /// Series shown for each country.
    pub const SERIES: [&'static str; 3] = ["Average Elevation", "Max Elevation", "Min Elevation"];

    /// Chart over already aggregated groups.
    pub fn new(groups: Vec<ElevationSummary>) -> Self {
        Self {
            title: "Aggregate Information for Selected Countries' Elevation".to_string(),
            series: Self::SERIES.iter().map(|s| s.to_string()).collect(),
            groups,
        }
    }
}

/// A message shown in place of a chart when a request cannot be answered as asked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NoticeView {
    /// Message shown in place of the chart.
    pub guidance: String,
    /// Selected values that were refused.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub rejected: Vec<String>,
    /// Values that may be selected instead.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub choices: Vec<String>,
}

impl NoticeView {
    /// Elevation selection naming countries outside the eligible set.
    pub fn ineligible_countries(rejected: Vec<String>, choices: Vec<String>) -> Self {
        Self {
            guidance: format!(
                "Only countries with more than {ELIGIBLE_ABOVE} volcanoes can be compared; not eligible: {}",
                rejected.join(", ")
            ),
            rejected,
            choices,
        }
    }
}

impl From<SelectionGuidance> for NoticeView {
    fn from(guidance: SelectionGuidance) -> Self {
        Self {
            guidance: guidance.message().to_string(),
            rejected: Vec::new(),
            choices: Vec::new(),
        }
    }
}
