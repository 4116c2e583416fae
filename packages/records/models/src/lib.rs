#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Typed records for the birth, baby-name and demographic datasets.
//!
//! Every numeric field is parsed before a record is built, so nothing
//! downstream ever sees raw text where a number belongs.

use std::ops::AddAssign;

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Sex recorded on a baby-name row.
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
    AsRefStr,
)]
pub enum Sex {
    /// Recorded as `F`.
    #[serde(rename = "F")]
    #[strum(serialize = "F", ascii_case_insensitive)]
    Female,
    /// Recorded as `M`.
    #[serde(rename = "M")]
    #[strum(serialize = "M", ascii_case_insensitive)]
    Male,
}

/// Monthly birth count for one state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BirthRecord {
    /// Two-digit zero-padded state FIPS code.
    pub state_fips: String,
    /// Calendar year.
    pub year: i32,
    /// Month, 1-12.
    pub month: u8,
    /// Number of births.
    pub births: u64,
}

/// Count of babies given a name in one state and year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NameRecord {
    /// Upper-cased two-letter state abbreviation.
    pub state_abbr: String,
    /// Calendar year.
    pub year: i32,
    /// Given name as spelled in the source.
    pub name: String,
    /// Number of babies.
    pub count: u64,
    /// Sex of the babies counted.
    pub sex: Sex,
}

/// Population breakdown columns of the demographic dataset.
///
/// Summed field-by-field when rows for the same state are combined.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DemographicTotals {
    /// Total population.
    pub total: u64,
    /// Male population.
    pub male: u64,
    /// Female population.
    pub female: u64,
    /// White alone.
    pub white: u64,
    /// Black or African American alone.
    pub black: u64,
    /// Hispanic or Latino.
    pub hispanic: u64,
}

impl AddAssign for DemographicTotals {
    fn add_assign(&mut self, rhs: Self) {
        self.total += rhs.total;
        self.male += rhs.male;
        self.female += rhs.female;
        self.white += rhs.white;
        self.black += rhs.black;
        self.hispanic += rhs.hispanic;
    }
}

/// One demographic row, keyed by free-text state name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DemographicRecord {
    /// State name as written in the source.
    pub state_name: String,
    /// Population columns.
    pub totals: DemographicTotals,
}
