//! TOML dataset configuration.
//!
//! The default configuration is baked into the binary via [`include_str!`];
//! a file passed on the command line replaces it.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Configuration embedded at compile time.
const DEFAULT_CONFIG: &str = include_str!("../datasets.toml");

/// Where a file is read from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DataLocation {
    /// Local file.
    Path(PathBuf),
    /// `http://` or `https://` URL.
    Url(String),
}

impl From<String> for DataLocation {
    fn from(value: String) -> Self {
        if value.starts_with("http://") || value.starts_with("https://") {
            Self::Url(value)
        } else {
            Self::Path(PathBuf::from(value))
        }
    }
}

impl From<&str> for DataLocation {
    fn from(value: &str) -> Self {
        Self::from(value.to_string())
    }
}

impl From<DataLocation> for String {
    fn from(value: DataLocation) -> Self {
        value.to_string()
    }
}

impl fmt::Display for DataLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Path(path) => write!(f, "{}", path.display()),
            Self::Url(url) => f.write_str(url),
        }
    }
}

impl DataLocation {
    /// Resolves a relative path against `base`. URLs and absolute paths are
    /// returned unchanged.
    #[must_use]
    pub fn relative_to(self, base: &Path) -> Self {
        match self {
            Self::Path(path) if path.is_relative() => Self::Path(base.join(path)),
            other => other,
        }
    }
}

/// Input files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetLocations {
    /// Monthly births per state.
    pub births: DataLocation,
    /// Baby-name counts.
    pub names: DataLocation,
    /// Population by state; the demographic view is empty without it.
    #[serde(default)]
    pub demographics: Option<DataLocation>,
    /// State boundary `GeoJSON`.
    pub boundaries: DataLocation,
    /// Fail on the first malformed row instead of skipping it.
    #[serde(default)]
    pub strict: bool,
}

/// Default view parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewDefaults {
    /// Year shown first on the births map.
    pub default_year: i32,
    /// Names listed per state.
    pub top_names_per_state: usize,
    /// Names in the overall ranking.
    pub top_names_overall: usize,
    /// Names charted in a state trend.
    pub trend_top_names: usize,
}

impl Default for ViewDefaults {
    fn default() -> Self {
        Self {
            default_year: 2006,
            top_names_per_state: 3,
            top_names_overall: 10,
            trend_top_names: 5,
        }
    }
}

/// Top-level `datasets.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetConfig {
    pub datasets: DatasetLocations,
    #[serde(default)]
    pub views: ViewDefaults,
}

impl DatasetConfig {
    /// Parses a configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Toml`] if the text is not a valid config.
    pub fn parse(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::de::from_str(text)?)
    }

    /// The configuration compiled into the binary.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Toml`] if the embedded file is malformed.
    pub fn embedded() -> Result<Self, ConfigError> {
        Self::parse(DEFAULT_CONFIG)
    }

    /// Reads a configuration file. Relative dataset paths are resolved
    /// against the file's directory.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read or parsed.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::parse(&text)?;
        let base = path.parent().unwrap_or_else(|| Path::new(""));
        log::debug!("Loaded config from {}", path.display());
        Ok(config.relative_to(base))
    }

    /// Resolves every relative dataset path against `base`.
    #[must_use]
    pub fn relative_to(mut self, base: &Path) -> Self {
        let d = self.datasets;
        self.datasets = DatasetLocations {
            births: d.births.relative_to(base),
            names: d.names.relative_to(base),
            demographics: d.demographics.map(|l| l.relative_to(base)),
            boundaries: d.boundaries.relative_to(base),
            strict: d.strict,
        };
        self
    }
}
