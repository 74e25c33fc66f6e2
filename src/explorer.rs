//! Session facade: one method per mode, each a full recomputation from the shared catalog.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::cache::{CacheStats, MapCache, MapKey};
use crate::processing::elevation::{self, SelectionGuidance};
use crate::processing::{geo, ranking, TieBreak};
use crate::types::{Catalog, CategoricalField};
use crate::views::{BarChartView, GroupedBarChartView, MapView, NoticeView, TableView};

/// Rank used when the caller does not pick one.
pub const DEFAULT_RANK: usize = 5;

/// The explorer's top-level modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Home,
    Map,
    CountingBarChart,
    ElevationBarChart,
}

impl Mode {
    /// Every mode, in menu order.
    pub const ALL: [Mode; 4] = [
        Mode::Home,
        Mode::Map,
        Mode::CountingBarChart,
        Mode::ElevationBarChart,
    ];

    /// Name shown in the mode menu.
    pub fn label(self) -> &'static str {
        match self {
            Mode::Home => "Home",
            Mode::Map => "Map",
            Mode::CountingBarChart => "Counting Bar Chart",
            Mode::ElevationBarChart => "Elevation Bar Chart",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Mode::ALL
            .into_iter()
            .find(|m| m.label().to_ascii_lowercase() == wanted)
            .ok_or_else(|| format!("unknown mode '{s}'"))
    }
}

/// Result of an elevation comparison request.
#[derive(Debug, Clone, PartialEq)]
pub enum ElevationOutcome {
    /// The selection was out of bounds; nothing was computed.
    Guidance(SelectionGuidance),
    /// Some selected countries are not in [`Explorer::elevation_country_choices`].
    Ineligible {
        /// The offending names, in selection order.
        rejected: Vec<String>,
        /// The eligible countries.
        choices: Vec<String>,
    },
    Chart(GroupedBarChartView),
}

impl ElevationOutcome {
    /// The message to show instead of a chart, if any.
    pub fn notice(&self) -> Option<NoticeView> {
        match self {
            ElevationOutcome::Guidance(guidance) => Some(NoticeView::from(*guidance)),
            ElevationOutcome::Ineligible { rejected, choices } => {
                Some(NoticeView::ineligible_countries(rejected.clone(), choices.clone()))
            }
            ElevationOutcome::Chart(_) => None,
        }
    }
}

/// An exploration session over one immutable catalog.
///
/// The only state written after construction is the map view cache.
#[derive(Debug)]
pub struct Explorer {
    catalog: Arc<Catalog>,
    map_cache: MapCache,
    tie_break: TieBreak,
    default_rank: usize,
}

impl Explorer {
    /// Start a session over `catalog` with default settings.
    pub fn new(catalog: impl Into<Arc<Catalog>>) -> Self {
        Self {
            catalog: catalog.into(),
            map_cache: MapCache::new(),
            tie_break: TieBreak::default(),
            default_rank: DEFAULT_RANK,
        }
    }

    /// Set how equal counts are ordered in counting charts.
    pub fn with_tie_break(mut self, tie_break: TieBreak) -> Self {
        self.tie_break = tie_break;
        self
    }

    /// Set the rank used when a counting chart request has none.
    pub fn with_default_rank(mut self, rank: usize) -> Self {
        self.default_rank = rank;
        self
    }

    /// The catalog this session explores.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Home: the whole catalog as a table.
    pub fn home(&self, limit: Option<usize>) -> TableView {
        TableView::from_catalog(&self.catalog, limit)
    }

    /// Countries offered by the map selector.
    pub fn map_country_choices(&self) -> Vec<String> {
        geo::country_choices(&self.catalog)
    }

    /// Map of one country's volcanoes, built once per country and then served from cache.
    pub fn map(&mut self, country: &str) -> Arc<MapView> {
        let catalog = &self.catalog;
        self.map_cache.get_or_insert_with(MapKey::new(country), |key| {
            log::debug!("building map view for {}", key.country);
            MapView::new(&key.country, geo::locate(catalog, &key.country))
        })
    }

    /// Hit/miss counters of the map view cache.
    pub fn map_cache_stats(&self) -> CacheStats {
        self.map_cache.stats()
    }

    /// Upper bound of the rank control for `field`.
    pub fn max_rank(&self, field: CategoricalField) -> usize {
        ranking::distinct_count(&self.catalog, field)
    }

    /// Ranked frequency chart; `rank` defaults to [`DEFAULT_RANK`] and is clamped into range.
    pub fn counting_chart(&self, field: CategoricalField, rank: Option<usize>) -> BarChartView {
        let max_rank = self.max_rank(field);
        let rank = ranking::clamp_rank(rank.unwrap_or(self.default_rank), max_rank);
        let bars = ranking::rank_values(&self.catalog, field, rank, self.tie_break);
        BarChartView::new(field, rank, max_rank, bars)
    }

    /// Countries offered by the elevation selector.
    pub fn elevation_country_choices(&self) -> Vec<String> {
        elevation::eligible_countries(&self.catalog)
    }

    /// Elevation comparison, or guidance when the selection is not 2 to 5 eligible countries.
    ///
    /// The count bound is checked first; names are then matched exactly (case-sensitive) against
    /// [`Self::elevation_country_choices`].
    pub fn elevation_chart<S: AsRef<str>>(&self, selection: &[S]) -> ElevationOutcome {
        let countries = match elevation::check_selection(selection) {
            Ok(countries) => countries,
            Err(guidance) => {
                log::debug!("elevation selection rejected: {guidance}");
                return ElevationOutcome::Guidance(guidance);
            }
        };

        let choices = self.elevation_country_choices();
        let rejected: Vec<String> = countries
            .iter()
            .filter(|c| !choices.contains(c))
            .cloned()
            .collect();
        if !rejected.is_empty() {
            log::debug!("elevation selection has ineligible countries: {rejected:?}");
            return ElevationOutcome::Ineligible { rejected, choices };
        }

        ElevationOutcome::Chart(GroupedBarChartView::new(elevation::aggregate(&self.catalog, &countries)))
    }
}
