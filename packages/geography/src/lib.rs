#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! State boundary loading and the state key cross-reference.
//!
//! Parses the state boundary `GeoJSON` collection the maps are drawn from
//! and builds [`StateXref`], the one table every dataset join goes
//! through. Datasets keyed by abbreviation, FIPS code, or free-text name
//! all resolve to the two-digit FIPS code here.

pub mod boundaries;
pub mod xref;

pub use boundaries::{BoundaryCollection, StateBoundary, parse_boundaries};
pub use xref::StateXref;

use thiserror::Error;

/// Errors that can occur during geography operations.
#[derive(Debug, Error)]
pub enum GeoError {
    /// `GeoJSON` parsing failed.
    #[error("GeoJSON error: {0}")]
    GeoJson(#[from] geojson::Error),

    /// The document parsed but was not a feature collection.
    #[error("Conversion error: {message}")]
    Conversion {
        /// Description of what went wrong.
        message: String,
    },
}

