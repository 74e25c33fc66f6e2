//! Per-country geographic selection for the map view.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::types::Catalog;

use super::filter::filter_by_country;

/// The projection of a record the map needs: position plus tooltip fields.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapPoint {
    /// Volcano name.
    pub name: String,
    /// `None` when the dataset leaves it blank.
    pub last_known_eruption: Option<String>,
    /// Country the point belongs to.
    pub country: String,
    /// Degrees east.
    pub longitude: f64,
    /// Degrees north.
    pub latitude: f64,
}

/// Records of exactly `country`, projected to [`MapPoint`]s in catalog order.
///
/// An unknown country yields an empty list.
pub fn locate(catalog: &Catalog, country: &str) -> Vec<MapPoint> {
    filter_by_country(catalog, country)
        .iter()
        .map(|r| MapPoint {
            name: r.name.clone(),
            last_known_eruption: r.last_known_eruption.clone(),
            country: r.country.clone(),
            longitude: r.longitude,
            latitude: r.latitude,
        })
        .collect()
}

/// Distinct countries, sorted.
pub fn country_choices(catalog: &Catalog) -> Vec<String> {
    catalog
        .iter()
        .map(|r| r.country.as_str())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

/// Mean `(latitude, longitude)` of the points, or `None` when there are none.
pub fn centroid(points: &[MapPoint]) -> Option<(f64, f64)> {
    if points.is_empty() {
        return None;
    }
    let n = points.len() as f64;
    let (lat, lon) = points
        .iter()
        .fold((0.0, 0.0), |(lat, lon), p| (lat + p.latitude, lon + p.longitude));
    Some((lat / n, lon / n))
}
