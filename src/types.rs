//! Core data model: the volcano catalog and its tabular schema.
//!
//! Readers parse every cell into a typed [`Value`] according to its [`Column`], then assemble a
//! [`VolcanoRecord`]. The full dataset is an ordered, immutable [`Catalog`].

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::{IngestionError, IngestionResult};

/// Logical data type for a catalog column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataType {
    /// 64-bit signed integer.
    Int64,
    /// 64-bit floating point number.
    Float64,
    /// UTF-8 string.
    Utf8,
}

/// A column of the volcano dataset, in file order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Column {
    VolcanoNumber,
    VolcanoName,
    Country,
    PrimaryVolcanoType,
    ActivityEvidence,
    LastKnownEruption,
    Region,
    Subregion,
    Latitude,
    Longitude,
    Elevation,
    DominantRockType,
    TectonicSetting,
}

impl Column {
    /// Every column, in dataset order.
    pub const ALL: [Column; 13] = [
        Column::VolcanoNumber,
        Column::VolcanoName,
        Column::Country,
        Column::PrimaryVolcanoType,
        Column::ActivityEvidence,
        Column::LastKnownEruption,
        Column::Region,
        Column::Subregion,
        Column::Latitude,
        Column::Longitude,
        Column::Elevation,
        Column::DominantRockType,
        Column::TectonicSetting,
    ];

    /// Header text used by the dataset file (exact, case-sensitive).
    pub fn header(self) -> &'static str {
        match self {
            Column::VolcanoNumber => "Volcano Number",
            Column::VolcanoName => "Volcano Name",
            Column::Country => "Country",
            Column::PrimaryVolcanoType => "Primary Volcano Type",
            Column::ActivityEvidence => "Activity Evidence",
            Column::LastKnownEruption => "Last Known Eruption",
            Column::Region => "Region",
            Column::Subregion => "Subregion",
            Column::Latitude => "Latitude",
            Column::Longitude => "Longitude",
            Column::Elevation => "Elevation (m)",
            Column::DominantRockType => "Dominant Rock Type",
            Column::TectonicSetting => "Tectonic Setting",
        }
    }

    /// Type cells of this column are parsed as.
    pub fn data_type(self) -> DataType {
        match self {
            Column::VolcanoNumber | Column::Elevation => DataType::Int64,
            Column::Latitude | Column::Longitude => DataType::Float64,
            _ => DataType::Utf8,
        }
    }

    /// Required columns reject blank cells at load time.
    pub fn is_required(self) -> bool {
        matches!(
            self,
            Column::VolcanoNumber
                | Column::VolcanoName
                | Column::Country
                | Column::Latitude
                | Column::Longitude
                | Column::Elevation
        )
    }

    /// Position of this column in [`Column::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.header())
    }
}

/// A single typed cell, as produced by a reader.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Blank cell / JSON `null`.
    Null,
    Int64(i64),
    Float64(f64),
    Utf8(String),
}

/// One volcano's full attribute set.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct VolcanoRecord {
    /// Catalog identifier of the volcano.
    #[serde(rename = "Volcano Number")]
    pub number: i64,
    /// Volcano name.
    #[serde(rename = "Volcano Name")]
    pub name: String,
    /// Country name, matched exactly by the map and elevation modes.
    #[serde(rename = "Country")]
    pub country: String,
    /// Primary volcano type, e.g. `Stratovolcano`.
    #[serde(rename = "Primary Volcano Type")]
    pub primary_type: Option<String>,
    /// Evidence of activity, e.g. `Eruption Observed`.
    #[serde(rename = "Activity Evidence")]
    pub activity_evidence: Option<String>,
    /// Last known eruption as written in the dataset, e.g. `1707 CE`.
    #[serde(rename = "Last Known Eruption")]
    pub last_known_eruption: Option<String>,
    /// Geographic region.
    #[serde(rename = "Region")]
    pub region: Option<String>,
    /// Geographic subregion.
    #[serde(rename = "Subregion")]
    pub subregion: Option<String>,
    /// Degrees north.
    #[serde(rename = "Latitude")]
    pub latitude: f64,
    /// Degrees east.
    #[serde(rename = "Longitude")]
    pub longitude: f64,
    /// Summit elevation in meters.
    #[serde(rename = "Elevation (m)")]
    pub elevation_m: i64,
    /// Dominant rock type, e.g. `Andesite / Basaltic Andesite`.
    #[serde(rename = "Dominant Rock Type")]
    pub dominant_rock_type: Option<String>,
    /// Tectonic setting.
    #[serde(rename = "Tectonic Setting")]
    pub tectonic_setting: Option<String>,
}

impl VolcanoRecord {
    /// Create a record with the fields every component relies on; optional text fields are unset.
    pub fn new(name: impl Into<String>, country: impl Into<String>, elevation_m: i64) -> Self {
        Self {
            name: name.into(),
            country: country.into(),
            elevation_m,
            ..Default::default()
        }
    }

    /// Assemble a record from cells ordered like [`Column::ALL`].
    ///
    /// `row` is the user-facing row number used in error messages.
    pub fn from_values(row: usize, values: &[Value]) -> IngestionResult<Self> {
        if values.len() != Column::ALL.len() {
            return Err(IngestionError::SchemaMismatch {
                message: format!(
                    "row {row} has {} cells, expected {}",
                    values.len(),
                    Column::ALL.len()
                ),
            });
        }
        let cell = |c: Column| &values[c.index()];

        Ok(Self {
            number: required_int(row, Column::VolcanoNumber, cell(Column::VolcanoNumber))?,
            name: required_text(row, Column::VolcanoName, cell(Column::VolcanoName))?,
            country: required_text(row, Column::Country, cell(Column::Country))?,
            primary_type: optional_text(row, Column::PrimaryVolcanoType, cell(Column::PrimaryVolcanoType))?,
            activity_evidence: optional_text(row, Column::ActivityEvidence, cell(Column::ActivityEvidence))?,
            last_known_eruption: optional_text(row, Column::LastKnownEruption, cell(Column::LastKnownEruption))?,
            region: optional_text(row, Column::Region, cell(Column::Region))?,
            subregion: optional_text(row, Column::Subregion, cell(Column::Subregion))?,
            latitude: required_float(row, Column::Latitude, cell(Column::Latitude))?,
            longitude: required_float(row, Column::Longitude, cell(Column::Longitude))?,
            elevation_m: required_int(row, Column::Elevation, cell(Column::Elevation))?,
            dominant_rock_type: optional_text(row, Column::DominantRockType, cell(Column::DominantRockType))?,
            tectonic_setting: optional_text(row, Column::TectonicSetting, cell(Column::TectonicSetting))?,
        })
    }

    /// Display text for one column; absent optional values render as an empty string.
    pub fn display_value(&self, column: Column) -> String {
        let opt = |v: &Option<String>| v.clone().unwrap_or_default();
        match column {
            Column::VolcanoNumber => self.number.to_string(),
            Column::VolcanoName => self.name.clone(),
            Column::Country => self.country.clone(),
            Column::PrimaryVolcanoType => opt(&self.primary_type),
            Column::ActivityEvidence => opt(&self.activity_evidence),
            Column::LastKnownEruption => opt(&self.last_known_eruption),
            Column::Region => opt(&self.region),
            Column::Subregion => opt(&self.subregion),
            Column::Latitude => self.latitude.to_string(),
            Column::Longitude => self.longitude.to_string(),
            Column::Elevation => self.elevation_m.to_string(),
            Column::DominantRockType => opt(&self.dominant_rock_type),
            Column::TectonicSetting => opt(&self.tectonic_setting),
        }
    }
}

fn type_error(row: usize, column: Column, v: &Value, expected: &str) -> IngestionError {
    IngestionError::ParseError {
        row,
        column: column.header().to_string(),
        raw: format!("{v:?}"),
        message: format!("expected {expected}"),
    }
}

fn required_text(row: usize, column: Column, v: &Value) -> IngestionResult<String> {
    match optional_text(row, column, v)? {
        Some(s) => Ok(s),
        None => Err(IngestionError::MissingValue {
            row,
            column: column.header().to_string(),
        }),
    }
}

fn optional_text(row: usize, column: Column, v: &Value) -> IngestionResult<Option<String>> {
    match v {
        Value::Null => Ok(None),
        Value::Utf8(s) if s.is_empty() => Ok(None),
        Value::Utf8(s) => Ok(Some(s.clone())),
        other => Err(type_error(row, column, other, "text")),
    }
}

fn required_int(row: usize, column: Column, v: &Value) -> IngestionResult<i64> {
    match v {
        Value::Int64(n) => Ok(*n),
        Value::Null => Err(IngestionError::MissingValue {
            row,
            column: column.header().to_string(),
        }),
        other => Err(type_error(row, column, other, "integer")),
    }
}

fn required_float(row: usize, column: Column, v: &Value) -> IngestionResult<f64> {
    match v {
        Value::Float64(n) => Ok(*n),
        Value::Int64(n) => Ok(*n as f64),
        Value::Null => Err(IngestionError::MissingValue {
            row,
            column: column.header().to_string(),
        }),
        other => Err(type_error(row, column, other, "number")),
    }
}

/// A categorical field the frequency ranking can count over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CategoricalField {
    Country,
    DominantRockType,
    PrimaryVolcanoType,
}

impl CategoricalField {
    /// Selector options, in menu order.
    pub const ALL: [CategoricalField; 3] = [
        CategoricalField::Country,
        CategoricalField::DominantRockType,
        CategoricalField::PrimaryVolcanoType,
    ];

    /// Label shown in selectors and chart titles.
    pub fn label(self) -> &'static str {
        match self {
            CategoricalField::Country => "Countries",
            CategoricalField::DominantRockType => "Dominant Rock Type",
            CategoricalField::PrimaryVolcanoType => "Primary Volcano Type",
        }
    }

    /// The record's value for this field, or `None` when blank.
    pub fn value_of(self, record: &VolcanoRecord) -> Option<&str> {
        match self {
            CategoricalField::Country => Some(record.country.as_str()),
            CategoricalField::DominantRockType => record.dominant_rock_type.as_deref(),
            CategoricalField::PrimaryVolcanoType => record.primary_type.as_deref(),
        }
    }
}

impl fmt::Display for CategoricalField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for CategoricalField {
    type Err = String;

    /// Accepts the display label or a short kebab-case name (case-insensitive).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "country" | "countries" => Ok(Self::Country),
            "rock" | "dominant-rock-type" | "dominant rock type" => Ok(Self::DominantRockType),
            "type" | "primary-volcano-type" | "primary volcano type" => Ok(Self::PrimaryVolcanoType),
            other => Err(format!(
                "unknown field '{other}' (expected country, dominant-rock-type or primary-volcano-type)"
            )),
        }
    }
}

/// The full dataset: an ordered sequence of records, never mutated after load.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    records: Vec<VolcanoRecord>,
}

impl Catalog {
    /// Wrap records in load order.
    pub fn new(records: Vec<VolcanoRecord>) -> Self {
        Self { records }
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True when the catalog has no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// All records, in load order.
    pub fn records(&self) -> &[VolcanoRecord] {
        &self.records
    }

    /// Iterate records in load order.
    pub fn iter(&self) -> std::slice::Iter<'_, VolcanoRecord> {
        self.records.iter()
    }

    /// Create a new catalog containing only records that match `predicate`, in input order.
    pub fn filter_records<F>(&self, mut predicate: F) -> Self
    where
        F: FnMut(&VolcanoRecord) -> bool,
    {
        let records = self
            .records
            .iter()
            .filter(|r| predicate(*r))
            .cloned()
            .collect();
        Self { records }
    }

    /// Fold all records into an accumulator value.
    ///
    /// The accumulator may borrow from the records.
    pub fn reduce_records<'a, A, F>(&'a self, init: A, reducer: F) -> A
    where
        F: FnMut(A, &'a VolcanoRecord) -> A,
    {
        self.records.iter().fold(init, reducer)
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a VolcanoRecord;
    type IntoIter = std::slice::Iter<'a, VolcanoRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
