//! Frequency ranking of a categorical field.

use std::cmp::Reverse;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::types::{Catalog, CategoricalField};

/// How values with equal counts are ordered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TieBreak {
    /// Keep the order in which values first appear in the catalog.
    #[default]
    FirstSeen,
    /// Ascending by value.
    Alphabetical,
}

impl fmt::Display for TieBreak {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TieBreak::FirstSeen => "first-seen",
            TieBreak::Alphabetical => "alphabetical",
        })
    }
}

impl FromStr for TieBreak {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "first-seen" | "first" | "stable" => Ok(Self::FirstSeen),
            "alphabetical" | "alpha" => Ok(Self::Alphabetical),
            other => Err(format!("unknown tie-break '{other}' (expected first-seen or alphabetical)")),
        }
    }
}

/// One bar of a frequency ranking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankedValue {
    /// The field value, e.g. a country or rock type.
    pub value: String,
    /// Number of records carrying it.
    pub count: usize,
}

/// Count every distinct value of `field`, most frequent first.
///
/// Blank values of optional fields are skipped.
pub fn count_values(catalog: &Catalog, field: CategoricalField, tie_break: TieBreak) -> Vec<RankedValue> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut counts: Vec<(&str, usize)> = Vec::new();

    for value in catalog.iter().filter_map(|r| field.value_of(r)) {
        match index.get(value) {
            Some(&i) => counts[i].1 += 1,
            None => {
                index.insert(value, counts.len());
                counts.push((value, 1));
            }
        }
    }

    // Both sorts are stable, so FirstSeen falls out of insertion order.
    match tie_break {
        TieBreak::FirstSeen => counts.sort_by_key(|&(_, n)| Reverse(n)),
        TieBreak::Alphabetical => counts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0))),
    }

    counts
        .into_iter()
        .map(|(value, count)| RankedValue {
            value: value.to_string(),
            count,
        })
        .collect()
}

/// Number of distinct non-blank values of `field`.
pub fn distinct_count(catalog: &Catalog, field: CategoricalField) -> usize {
    catalog
        .iter()
        .filter_map(|r| field.value_of(r))
        .collect::<std::collections::HashSet<_>>()
        .len()
}

/// The top `rank` values of `field`; length is `min(rank, distinct values)`.
pub fn rank_values(
    catalog: &Catalog,
    field: CategoricalField,
    rank: usize,
    tie_break: TieBreak,
) -> Vec<RankedValue> {
    let mut ranked = count_values(catalog, field, tie_break);
    ranked.truncate(rank);
    log::debug!(
        "ranked field={} rank={} returned={}",
        field.label(),
        rank,
        ranked.len()
    );
    ranked
}

/// Clamp a requested rank into `1..=distinct`; `0` when there is nothing to rank.
pub fn clamp_rank(requested: usize, distinct: usize) -> usize {
    if distinct == 0 {
        0
    } else {
        requested.clamp(1, distinct)
    }
}
