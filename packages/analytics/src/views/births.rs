//! Births by year and state.

use std::collections::BTreeSet;

use birth_map_analytics_models::{ChoroplethView, ColorDomain};
use birth_map_records_models::BirthRecord;

use crate::{
    Dataset,
    aggregate::{Aggregate, count_by, nested_sum_by, sum_by},
    views::{join_states, report_unmatched},
};

/// Births summed per `(year, state FIPS)`.
#[must_use]
pub fn births_by_year_state(births: &[BirthRecord]) -> Aggregate<(i32, String), u64> {
    sum_by(births, |r| (r.year, r.state_fips.clone()), |r| r.births)
}

/// Births summed per year, then per state FIPS within the year.
#[must_use]
pub fn births_by_year(births: &[BirthRecord]) -> Aggregate<i32, Aggregate<String, u64>> {
    nested_sum_by(births, |r| r.year, |r| r.state_fips.clone(), |r| r.births)
}

/// Distinct years present, ascending.
#[must_use]
pub fn years(births: &[BirthRecord]) -> Vec<i32> {
    births
        .iter()
        .map(|r| r.year)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Range of every `(year, state)` total across all years, for a color
/// scale that stays fixed while the year changes. Totals for FIPS codes
/// outside the cross-reference are left out.
#[must_use]
pub fn global_birth_domain(dataset: &Dataset) -> Option<ColorDomain<u64>> {
    let by_year_state = births_by_year_state(&dataset.births);
    ColorDomain::from_values(
        by_year_state
            .iter()
            .filter(|((_, fips), _)| dataset.xref.get(fips).is_some())
            .map(|(_, &births)| births),
    )
}

/// State birth totals for one year.
#[must_use]
pub fn choropleth_for_year(dataset: &Dataset, year: i32) -> ChoroplethView<u64> {
    let by_state = sum_by(
        dataset.births.iter().filter(|r| r.year == year),
        |r| r.state_fips.clone(),
        |r| r.births,
    );

    let misses = count_by(
        dataset
            .births
            .iter()
            .filter(|r| r.year == year && dataset.xref.get(&r.state_fips).is_none()),
        |r| r.state_fips.clone(),
    );

    let states = join_states(&dataset.xref, &by_state);
    let domain = ColorDomain::from_values(states.iter().filter_map(|s| s.value));
    let unmatched = report_unmatched("FIPS", misses);

    ChoroplethView {
        label: year.to_string(),
        states,
        domain,
        unmatched,
    }
}
