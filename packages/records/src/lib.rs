#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! CSV record loading.
//!
//! Turns raw delimited text into typed records. Each record type declares
//! a field schema; every cell is parsed against it and a cell that fails
//! to parse either excludes its row or falls back to zero, depending on
//! the field. Key fields (state, year, month, name, sex) exclude the row;
//! measure fields (births, counts, population columns) fall back to zero.

pub mod loader;
pub mod records;
pub mod schema;

pub use loader::{LoadOptions, LoadReport, Rejection, TabularRecord, load_records};
pub use schema::{FieldKind, FieldSpec, FieldValue, InvalidPolicy, Row};

use thiserror::Error;

/// A cell that could not be parsed as its field's kind.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("field '{field}' has invalid value {value:?} (expected {expected})")]
pub struct ParseError {
    /// Field name from the schema.
    pub field: String,
    /// Raw cell text.
    pub value: String,
    /// Kind the field expects.
    pub expected: FieldKind,
}

impl ParseError {
    /// Creates a parse error for `field`.
    #[must_use]
    pub fn new(field: impl Into<String>, value: impl Into<String>, expected: FieldKind) -> Self {
        Self {
            field: field.into(),
            value: value.into(),
            expected,
        }
    }
}

/// Errors that abort a whole load.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The CSV reader failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// The header row lacks a column the schema needs.
    #[error("Missing column '{field}'")]
    MissingColumn {
        /// Canonical name of the missing column.
        field: String,
    },

    /// A row was rejected while loading in strict mode.
    #[error("Line {line}: {source}")]
    Parse {
        /// 1-based line number in the source text.
        line: u64,
        /// The underlying cell error.
        #[source]
        source: ParseError,
    },
}
