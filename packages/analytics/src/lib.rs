#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Aggregation and ranking engine behind the birth maps and name charts.
//!
//! Every view is a pure function of an immutable [`Dataset`]: records are
//! grouped with [`aggregate`], ranked with [`rank`], and given a color
//! domain with [`domain`]. [`session::Session`] adds memoization keyed by
//! dataset version and guards against stale recomputation.

pub mod aggregate;
pub mod cache;
pub mod domain;
pub mod guard;
pub mod rank;
pub mod session;
pub mod views;

pub use cache::{ViewCache, ViewParams, ViewPayload};
pub use guard::{RecomputeGuard, Ticket};
pub use session::Session;

use birth_map_geography::{BoundaryCollection, StateXref};
use birth_map_records_models::{BirthRecord, DemographicRecord, NameRecord};
use thiserror::Error;

/// Errors that can occur during analytics operations.
#[derive(Debug, Error)]
pub enum AnalyticsError {
    /// A color domain was required but there were no values.
    #[error("No values to compute a domain over")]
    EmptyDomain,
}

/// Everything loaded for one session. Never mutated after construction.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    /// Monthly birth counts.
    pub births: Vec<BirthRecord>,
    /// Baby-name counts.
    pub names: Vec<NameRecord>,
    /// Demographic rows; empty when no demographic file is configured.
    pub demographics: Vec<DemographicRecord>,
    /// State boundaries the maps are drawn from.
    pub boundaries: BoundaryCollection,
    /// State cross-reference built from `boundaries`.
    pub xref: StateXref,
}

impl Dataset {
    /// Assembles a dataset and builds its cross-reference. Falls back to
    /// the built-in state table if the boundary collection identified no
    /// states.
    #[must_use]
    pub fn new(
        births: Vec<BirthRecord>,
        names: Vec<NameRecord>,
        demographics: Vec<DemographicRecord>,
        boundaries: BoundaryCollection,
    ) -> Self {
        let xref = if boundaries.states.is_empty() {
            log::warn!("Boundary collection has no states, using the built-in state table");
            StateXref::builtin()
        } else {
            StateXref::from_boundaries(&boundaries)
        };

        Self {
            births,
            names,
            demographics,
            boundaries,
            xref,
        }
    }
}
