//! Per-visualization pipelines.
//!
//! Each function rebuilds its aggregate from scratch over the dataset's
//! records and joins the result to the state cross-reference. States with
//! no data come back with an explicit `None`.

pub mod births;
pub mod demographics;
pub mod names;
pub mod seasons;

use birth_map_analytics_models::{StateValue, UnmatchedKey};
use birth_map_geography::StateXref;

use crate::aggregate::Aggregate;

/// One [`StateValue`] per cross-reference entry, looking each state up in
/// an aggregate keyed by FIPS code.
pub(crate) fn join_states<V: Clone>(
    xref: &StateXref,
    by_fips: &Aggregate<String, V>,
) -> Vec<StateValue<V>> {
    xref.iter()
        .map(|entry| StateValue {
            fips: entry.fips.clone(),
            abbr: entry.abbr.clone(),
            name: entry.name.clone(),
            value: by_fips.get(entry.fips.as_str()).cloned(),
        })
        .collect()
}

/// Turns a per-key record count into [`UnmatchedKey`]s, logging each one.
pub(crate) fn report_unmatched(what: &str, misses: Aggregate<String, u64>) -> Vec<UnmatchedKey> {
    misses
        .into_rows()
        .into_iter()
        .map(|row| {
            log::warn!(
                "No state matches {what} {:?} ({} records skipped)",
                row.key,
                row.value
            );
            UnmatchedKey {
                key: row.key,
                records: row.value,
            }
        })
        .collect()
}

#[cfg(test)]
pub(crate) mod fixtures {
    use birth_map_geography_models::StateEntry;
    use birth_map_records_models::{
        BirthRecord, DemographicRecord, DemographicTotals, NameRecord, Sex,
    };

    use crate::Dataset;
    use birth_map_geography::StateXref;

    pub fn birth(state: &str, year: i32, month: u8, births: u64) -> BirthRecord {
        BirthRecord {
            state_fips: state.to_string(),
            year,
            month,
            births,
        }
    }

    pub fn name(state: &str, year: i32, name: &str, count: u64, sex: Sex) -> NameRecord {
        NameRecord {
            state_abbr: state.to_string(),
            year,
            name: name.to_string(),
            count,
            sex,
        }
    }

    pub fn demographic(state: &str, total: u64) -> DemographicRecord {
        DemographicRecord {
            state_name: state.to_string(),
            totals: DemographicTotals {
                total,
                ..Default::default()
            },
        }
    }

    /// California, New York and Texas only.
    pub fn dataset() -> Dataset {
        Dataset {
            xref: StateXref::from_entries([
                StateEntry::new("CA", "06", "California"),
                StateEntry::new("NY", "36", "New York"),
                StateEntry::new("TX", "48", "Texas"),
            ]),
            ..Dataset::default()
        }
    }
}
