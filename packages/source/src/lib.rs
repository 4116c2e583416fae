#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Dataset configuration, fetching and assembly.
//!
//! A [`config::DatasetConfig`] names where the birth, name, demographic and
//! boundary files live. [`fetch::fetch_all`] reads them concurrently and
//! [`dataset::load_dataset`] parses the result into an analytics
//! [`Dataset`](birth_map_analytics::Dataset).

pub mod config;
pub mod dataset;
pub mod fetch;
pub mod retry;

use std::path::PathBuf;

use birth_map_geography::GeoError;
use birth_map_records::LoadError;

/// Errors reading a dataset's raw text.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Server answered with a non-success status.
    #[error("{url} returned HTTP {status}")]
    Status {
        /// Requested URL.
        url: String,
        /// Response status code.
        status: u16,
    },

    /// Local file could not be read.
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        /// File that failed.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
}

/// Errors loading the configuration file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("Failed to read config {}: {source}", path.display())]
    Io {
        /// Config path.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// The TOML was malformed or missing required keys.
    #[error("Invalid config: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Errors that abort a dataset load.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// A file could not be fetched.
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// A tabular file could not be parsed.
    #[error("Failed to load {dataset} data: {source}")]
    Load {
        /// Which dataset failed (`"births"`, `"names"`, ...).
        dataset: &'static str,
        /// Underlying error.
        #[source]
        source: LoadError,
    },

    /// The boundary file was not valid GeoJSON.
    #[error(transparent)]
    Geo(#[from] GeoError),
}
