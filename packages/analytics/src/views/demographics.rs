//! Population totals per state, joined onto boundaries by state name.

use birth_map_analytics_models::{ColorDomain, DemographicState, DemographicsView};
use birth_map_geography_models::normalize;

use crate::{
    Dataset,
    aggregate::{count_by, sum_by_filtered},
    views::report_unmatched,
};

/// Population totals per state, joined by full state name.
#[must_use]
pub fn demographics_view(dataset: &Dataset) -> DemographicsView {
    let xref = &dataset.xref;
    let (by_fips, skipped) = sum_by_filtered(
        &dataset.demographics,
        |r| xref.fips_for_name(&r.state_name).map(str::to_string),
        |r| r.totals,
    );

    let unmatched = if skipped > 0 {
        report_unmatched(
            "state name",
            count_by(
                dataset
                    .demographics
                    .iter()
                    .filter(|r| xref.fips_for_name(&r.state_name).is_none()),
                |r| normalize(&r.state_name),
            ),
        )
    } else {
        Vec::new()
    };

    let states: Vec<DemographicState> = xref
        .iter()
        .map(|entry| DemographicState {
            fips: entry.fips.clone(),
            abbr: entry.abbr.clone(),
            name: entry.name.clone(),
            totals: by_fips.get(entry.fips.as_str()).copied(),
        })
        .collect();

    let domain = ColorDomain::from_values(states.iter().filter_map(|s| s.totals.map(|t| t.total)));

    DemographicsView {
        states,
        domain,
        unmatched,
    }
}
