#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Aggregation result types handed to the rendering layer.
//!
//! Each view payload is either a state-keyed set of values with a color
//! domain, or a short ranked list. Missing data is always an explicit
//! `None`, never a zero or a placeholder string.

use birth_map_records_models::{DemographicTotals, Sex};
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumIter, EnumString};

/// One accumulated group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateRow<K, V> {
    /// Group key.
    pub key: K,
    /// Accumulated value.
    pub value: V,
}

/// Value range for a color scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorDomain<V> {
    /// Smallest value.
    pub min: V,
    /// Largest value.
    pub max: V,
}

impl<V: PartialOrd + Copy> ColorDomain<V> {
    /// Computes `{min, max}` over `values`, ignoring incomparable values
    /// such as `NaN`.
    ///
    /// Returns `None` when there is nothing to range over.
    pub fn from_values(values: impl IntoIterator<Item = V>) -> Option<Self> {
        values
            .into_iter()
            .filter(|v| v.partial_cmp(v).is_some())
            .fold(None, |domain: Option<Self>, v| {
                Some(domain.map_or(Self { min: v, max: v }, |d| Self {
                    min: if v < d.min { v } else { d.min },
                    max: if v > d.max { v } else { d.max },
                }))
            })
    }
}

/// Meteorological season of a birth month.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
)]
#[strum(ascii_case_insensitive)]
pub enum Season {
    /// March, April, May.
    Spring,
    /// June, July, August.
    Summer,
    /// September, October, November.
    Autumn,
    /// December, January, February.
    Winter,
}

impl Season {
    /// Season for a 1-based month, or `None` outside 1-12.
    #[must_use]
    pub const fn from_month(month: u8) -> Option<Self> {
        match month {
            3..=5 => Some(Self::Spring),
            6..=8 => Some(Self::Summer),
            9..=11 => Some(Self::Autumn),
            12 | 1 | 2 => Some(Self::Winter),
            _ => None,
        }
    }

    /// Months belonging to this season, in calendar order of the season.
    #[must_use]
    pub const fn months(self) -> [u8; 3] {
        match self {
            Self::Spring => [3, 4, 5],
            Self::Summer => [6, 7, 8],
            Self::Autumn => [9, 10, 11],
            Self::Winter => [12, 1, 2],
        }
    }
}

/// A state and its value, if it has one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StateValue<V> {
    /// Two-digit FIPS code.
    pub fips: String,
    /// Postal abbreviation.
    pub abbr: String,
    /// Display name.
    pub name: String,
    /// `None` when the dataset has nothing for this state.
    pub value: Option<V>,
}

/// A source key that did not match any state, with how many records used it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnmatchedKey {
    /// Key as written in the dataset.
    pub key: String,
    /// Number of records carrying it.
    pub records: u64,
}

/// State-keyed values for a choropleth map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChoroplethView<V> {
    /// What the values describe (e.g. the selected year).
    pub label: String,
    /// One entry per known state, in cross-reference order.
    pub states: Vec<StateValue<V>>,
    /// Range of the values present, `None` when no state has data.
    pub domain: Option<ColorDomain<V>>,
    /// Aggregated keys with no matching state.
    pub unmatched: Vec<UnmatchedKey>,
}

/// One state's share of births in a season.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeasonShare {
    /// Two-digit FIPS code.
    pub fips: String,
    /// Postal abbreviation.
    pub abbr: String,
    /// Display name.
    pub name: String,
    /// Births in the season, summed over every year.
    pub season_births: u64,
    /// Births in the whole year, summed over every year.
    pub total_births: u64,
    /// `season_births / total_births * 100`, `None` without births.
    pub share_percent: Option<f64>,
    /// Season births divided by the number of years in the data.
    pub avg_births_per_year: Option<f64>,
}

/// Seasonal birth share map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeasonView {
    /// Selected season.
    pub season: Season,
    /// One entry per known state.
    pub states: Vec<SeasonShare>,
    /// Range of the shares present.
    pub domain: Option<ColorDomain<f64>>,
}

/// One state's population breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DemographicState {
    /// Two-digit FIPS code.
    pub fips: String,
    /// Postal abbreviation.
    pub abbr: String,
    /// Display name.
    pub name: String,
    /// `None` when the dataset has no rows for this state.
    pub totals: Option<DemographicTotals>,
}

/// Demographic map, colored by total population.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DemographicsView {
    /// One entry per known state.
    pub states: Vec<DemographicState>,
    /// Range of total population.
    pub domain: Option<ColorDomain<u64>>,
    /// State names that did not join.
    pub unmatched: Vec<UnmatchedKey>,
}

/// A ranked name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NameCount {
    /// Given name.
    pub name: String,
    /// Sex, when the ranking distinguishes it.
    pub sex: Option<Sex>,
    /// Summed count.
    pub count: u64,
}

/// Top names for one state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StateTopNames {
    /// Two-digit FIPS code.
    pub fips: String,
    /// Postal abbreviation.
    pub abbr: String,
    /// Display name.
    pub name: String,
    /// Highest counts first; `None` when the state has no name data.
    pub top: Option<Vec<NameCount>>,
}

/// Per-state top names for one year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopNamesView {
    /// Selected year.
    pub year: i32,
    /// One entry per known state.
    pub states: Vec<StateTopNames>,
    /// Abbreviations in the name data with no matching state.
    pub unmatched: Vec<UnmatchedKey>,
}

/// Most popular names across the whole dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PopularNamesView {
    /// Highest counts first.
    pub names: Vec<NameCount>,
    /// Largest count, for the chart axis.
    pub domain: Option<ColorDomain<u64>>,
}

/// One year of a name's trend line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendPoint {
    /// Calendar year.
    pub year: i32,
    /// Babies given the name that year; zero when the name is absent.
    pub count: u64,
}

/// A name's counts over the year range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NameSeries {
    /// Given name.
    pub name: String,
    /// One point per year of the range.
    pub points: Vec<TrendPoint>,
}

/// Trend lines for a state's most popular names of one sex.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NameTrendView {
    /// Upper-cased abbreviation requested.
    pub state_abbr: String,
    /// Display name, `None` when the abbreviation is unknown.
    pub state_name: Option<String>,
    /// Selected sex.
    pub sex: Sex,
    /// First year of the range.
    pub first_year: Option<i32>,
    /// Last year of the range.
    pub last_year: Option<i32>,
    /// One series per top name, most popular first.
    pub series: Vec<NameSeries>,
    /// Range of the yearly counts across all series.
    pub domain: Option<ColorDomain<u64>>,
}

/// An entry of the state picker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StateOption {
    /// Abbreviation as found in the name data.
    pub abbr: String,
    /// Display name, `None` when the abbreviation is unknown.
    pub full_name: Option<String>,
}
