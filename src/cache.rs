//! Keyed memoization of rendered views.
//!
//! Entries live for the lifetime of the cache and are never invalidated: the catalog they are
//! built from is immutable once loaded.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::Arc;

use crate::views::MapView;

/// Hit/miss counters for a [`ViewCache`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Distinct keys cached.
    pub entries: usize,
    /// Lookups served from the cache.
    pub hits: u64,
    /// Lookups that built a new view.
    pub misses: u64,
}

/// A process-lifetime cache from rendering parameters to a built view.
#[derive(Debug)]
pub struct ViewCache<K, V> {
    entries: HashMap<K, Arc<V>>,
    hits: u64,
    misses: u64,
}

impl<K, V> Default for ViewCache<K, V> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
            hits: 0,
            misses: 0,
        }
    }
}

impl<K: Eq + Hash, V> ViewCache<K, V> {
    /// An empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached view for `key`, building it with `build` on first use.
    pub fn get_or_insert_with<F>(&mut self, key: K, build: F) -> Arc<V>
    where
        F: FnOnce(&K) -> V,
    {
        if let Some(v) = self.entries.get(&key) {
            self.hits += 1;
            return Arc::clone(v);
        }
        self.misses += 1;
        let view = Arc::new(build(&key));
        self.entries.insert(key, Arc::clone(&view));
        view
    }

    /// Cached view for `key`, without building or counting a lookup.
    pub fn get(&self, key: &K) -> Option<Arc<V>> {
        self.entries.get(key).cloned()
    }

    /// Number of cached views.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when nothing has been cached yet.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Current entry count and hit/miss counters.
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            entries: self.entries.len(),
            hits: self.hits,
            misses: self.misses,
        }
    }
}

/// Rendering parameters of a map view.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MapKey {
    /// Country exactly as selected (case-sensitive).
    pub country: String,
}

impl MapKey {
    /// Key for one country's map.
    pub fn new(country: impl Into<String>) -> Self {
        Self {
            country: country.into(),
        }
    }
}

/// Cache of per-country map views.
pub type MapCache = ViewCache<MapKey, MapView>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_once_per_key() {
        let mut cache: ViewCache<MapKey, String> = ViewCache::new();
        let mut builds = 0;

        let a = cache.get_or_insert_with(MapKey::new("Chile"), |k| {
            builds += 1;
            format!("map of {}", k.country)
        });
        let b = cache.get_or_insert_with(MapKey::new("Chile"), |_| {
            builds += 1;
            String::new()
        });

        assert_eq!(builds, 1);
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(*b, "map of Chile");
        assert_eq!(
            cache.stats(),
            CacheStats {
                entries: 1,
                hits: 1,
                misses: 1
            }
        );
    }

    #[test]
    fn distinct_keys_get_distinct_entries() {
        let mut cache: ViewCache<MapKey, usize> = ViewCache::new();
        cache.get_or_insert_with(MapKey::new("Chile"), |k| k.country.len());
        cache.get_or_insert_with(MapKey::new("Peru"), |k| k.country.len());
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.get(&MapKey::new("Peru")).as_deref(), Some(&4));
        assert_eq!(cache.get(&MapKey::new("Japan")), None);
    }
}
