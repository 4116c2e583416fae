#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! State identity types shared by the loaders and the aggregation views.
//!
//! A state shows up under three encodings across the source datasets: the
//! postal abbreviation, the two-digit FIPS code, and the full name. The
//! two-digit FIPS code is the canonical key everywhere downstream.

pub mod fips;

use serde::{Deserialize, Serialize};

/// One row of the state cross-reference table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StateEntry {
    /// Two-letter postal abbreviation (e.g. "CA").
    pub abbr: String,
    /// Two-digit zero-padded FIPS code (e.g. "06").
    pub fips: String,
    /// Display name (e.g. "California").
    pub name: String,
    /// Trimmed, lowercased display name used for joins on free-text names.
    pub name_key: String,
}

/// Normalizes a free-text state name for joining: trims, lowercases and
/// collapses internal whitespace runs to a single space.
#[must_use]
pub fn normalize(name: &str) -> String {
    name.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

impl StateEntry {
    /// Creates an entry, deriving the normalized name key.
    #[must_use]
    pub fn new(abbr: impl Into<String>, fips: impl Into<String>, name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            abbr: abbr.into(),
            fips: fips.into(),
            name_key: normalize(&name),
            name,
        }
    }
}
