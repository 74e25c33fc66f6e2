//! Elevation comparison across countries.
//!
//! Only countries with more than [`ELIGIBLE_ABOVE`] records take part. Callers pick 2 to 5 of
//! them; [`check_selection`] turns any other count into a [`SelectionGuidance`] message instead
//! of an aggregation.

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use serde::Serialize;

use crate::types::{Catalog, VolcanoRecord};

use super::reduce::{reduce, ReduceOp};

/// A country is eligible when it has strictly more records than this.
pub const ELIGIBLE_ABOVE: usize = 9;
/// Fewest countries a comparison accepts.
pub const MIN_SELECTION: usize = 2;
/// Most countries a comparison accepts.
pub const MAX_SELECTION: usize = 5;

/// Elevation statistics for one country, in meters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ElevationSummary {
    /// Country name as it appears in the catalog.
    pub country: String,
    /// Mean truncated toward zero.
    pub mean_m: i64,
    /// Highest elevation.
    pub max_m: i64,
    /// Lowest elevation.
    pub min_m: i64,
}

/// Why a country selection was not aggregated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionGuidance {
    NoneSelected,
    NeedOneMore,
    TooMany,
}

impl SelectionGuidance {
    /// Text shown to the user instead of a chart.
    pub fn message(self) -> &'static str {
        match self {
            SelectionGuidance::NoneSelected => "Please select at least 2 countries",
            SelectionGuidance::NeedOneMore => "Please select at least 1 more country",
            SelectionGuidance::TooMany => "Please remove countries to have 5 maximum",
        }
    }
}

impl fmt::Display for SelectionGuidance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

fn country_counts(catalog: &Catalog) -> HashMap<&str, usize> {
    catalog.reduce_records(HashMap::new(), |mut acc, r| {
        *acc.entry(r.country.as_str()).or_insert(0) += 1;
        acc
    })
}

/// Countries with more than [`ELIGIBLE_ABOVE`] records, sorted.
pub fn eligible_countries(catalog: &Catalog) -> Vec<String> {
    let mut out: Vec<String> = country_counts(catalog)
        .into_iter()
        .filter(|&(_, n)| n > ELIGIBLE_ABOVE)
        .map(|(c, _)| c.to_string())
        .collect();
    out.sort();
    out
}

/// Enforce the 2..=5 bound on a selection.
///
/// Duplicates count once; the returned list keeps first-selection order.
pub fn check_selection<S: AsRef<str>>(selection: &[S]) -> Result<Vec<String>, SelectionGuidance> {
    let mut unique: Vec<String> = Vec::with_capacity(selection.len());
    for s in selection {
        let s = s.as_ref();
        if !unique.iter().any(|u| u == s) {
            unique.push(s.to_string());
        }
    }

    match unique.len() {
        0 => Err(SelectionGuidance::NoneSelected),
        n if n < MIN_SELECTION => Err(SelectionGuidance::NeedOneMore),
        n if n > MAX_SELECTION => Err(SelectionGuidance::TooMany),
        _ => Ok(unique),
    }
}

/// Mean/max/min elevation for each requested country.
///
/// Countries that are not eligible (or absent) are left out silently. Output is ordered by
/// country name, not by the order of `countries`.
pub fn aggregate<S: AsRef<str>>(catalog: &Catalog, countries: &[S]) -> Vec<ElevationSummary> {
    let counts = country_counts(catalog);
    let wanted = |country: &str| {
        countries.iter().any(|c| c.as_ref() == country)
            && counts.get(country).is_some_and(|&n| n > ELIGIBLE_ABOVE)
    };

    let mut groups: BTreeMap<&str, Vec<&VolcanoRecord>> = BTreeMap::new();
    for record in catalog.iter().filter(|r| wanted(r.country.as_str())) {
        groups.entry(record.country.as_str()).or_default().push(record);
    }

    let out: Vec<ElevationSummary> = groups
        .into_iter()
        .filter_map(|(country, records)| {
            Some(ElevationSummary {
                country: country.to_string(),
                mean_m: reduce(records.iter().copied(), ReduceOp::Mean)?,
                max_m: reduce(records.iter().copied(), ReduceOp::Max)?,
                min_m: reduce(records.iter().copied(), ReduceOp::Min)?,
            })
        })
        .collect();

    log::debug!(
        "elevation aggregate requested={} returned={}",
        countries.len(),
        out.len()
    );
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn repeat(country: &str, elevations: &[i64], times: usize) -> Vec<VolcanoRecord> {
        (0..times)
            .flat_map(move |_| elevations.iter().map(move |&e| VolcanoRecord::new("v", country, e)))
            .collect()
    }

    /// A: 15 records over [100, 200, 300]; B: 12 over [50, 150]; C: 9 records; D: 10 records.
    fn sample_catalog() -> Catalog {
        let mut records = Vec::new();
        records.extend(repeat("B", &[50, 150], 6));
        records.extend(repeat("A", &[100, 200, 300], 5));
        records.extend(repeat("C", &[1000], 9));
        records.extend(repeat("D", &[-10, 7], 5));
        Catalog::new(records)
    }

    #[test]
    fn aggregate_matches_known_statistics() {
        let out = aggregate(&sample_catalog(), &["A", "B"]);
        assert_eq!(
            out,
            vec![
                ElevationSummary { country: "A".to_string(), mean_m: 200, max_m: 300, min_m: 100 },
                ElevationSummary { country: "B".to_string(), mean_m: 100, max_m: 150, min_m: 50 },
            ]
        );
    }

    #[test]
    fn aggregate_orders_by_country_not_selection() {
        let out = aggregate(&sample_catalog(), &["D", "B", "A"]);
        let names: Vec<&str> = out.iter().map(|s| s.country.as_str()).collect();
        assert_eq!(names, vec!["A", "B", "D"]);
    }

    #[test]
    fn aggregate_skips_countries_with_nine_or_fewer_records() {
        let out = aggregate(&sample_catalog(), &["A", "C"]);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].country, "A");
    }

    #[test]
    fn aggregate_truncates_negative_mean_toward_zero() {
        let out = aggregate(&sample_catalog(), &["D", "A"]);
        let d = out.iter().find(|s| s.country == "D").unwrap();
        // (-10 * 5 + 7 * 5) / 10 = -1.5
        assert_eq!(d.mean_m, -1);
        assert!(d.min_m <= d.mean_m && d.mean_m <= d.max_m);
    }

    #[test]
    fn eligible_countries_require_more_than_nine_records() {
        assert_eq!(eligible_countries(&sample_catalog()), vec!["A", "B", "D"]);
    }

    #[test]
    fn check_selection_guidance() {
        let none: [&str; 0] = [];
        assert_eq!(check_selection(&none), Err(SelectionGuidance::NoneSelected));
        assert_eq!(check_selection(&["A"]), Err(SelectionGuidance::NeedOneMore));
        assert_eq!(check_selection(&["A", "A"]), Err(SelectionGuidance::NeedOneMore));
        assert_eq!(
            check_selection(&["A", "B", "C", "D", "E", "F"]),
            Err(SelectionGuidance::TooMany)
        );
        assert_eq!(
            check_selection(&["B", "A", "B"]),
            Ok(vec!["B".to_string(), "A".to_string()])
        );
    }

    #[test]
    fn guidance_messages() {
        assert_eq!(
            SelectionGuidance::NeedOneMore.to_string(),
            "Please select at least 1 more country"
        );
        assert_eq!(
            SelectionGuidance::TooMany.message(),
            "Please remove countries to have 5 maximum"
        );
    }
}
