//! Record filtering for [`crate::types::Catalog`].

use crate::types::{Catalog, VolcanoRecord};

/// Returns a new [`Catalog`] containing only records for which `predicate` returns `true`.
///
/// This is a convenience wrapper around [`Catalog::filter_records`].
pub fn filter<F>(catalog: &Catalog, predicate: F) -> Catalog
where
    F: FnMut(&VolcanoRecord) -> bool,
{
    catalog.filter_records(predicate)
}

/// Records whose country equals `country` exactly (case-sensitive), in input order.
pub fn filter_by_country(catalog: &Catalog, country: &str) -> Catalog {
    filter(catalog, |r| r.country == country)
}
