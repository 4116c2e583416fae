//! Baby-name rankings and trends.

use std::cmp::Ordering;

use birth_map_analytics_models::{
    ColorDomain, NameCount, NameSeries, NameTrendView, PopularNamesView, StateOption,
    StateTopNames, TopNamesView, TrendPoint,
};
use birth_map_records_models::{NameRecord, Sex};

use crate::{
    Dataset,
    aggregate::{count_by, partition_by_filtered, sum_by},
    rank::top_n,
    views::report_unmatched,
};

/// The `n` most common `(name, sex)` pairs in each state for `year`.
///
/// Name rows are keyed by abbreviation; rows whose abbreviation is not in
/// the cross-reference are left out and reported.
#[must_use]
pub fn top_names_by_state(dataset: &Dataset, year: i32, n: usize) -> TopNamesView {
    let xref = &dataset.xref;
    let in_year = || dataset.names.iter().filter(move |r| r.year == year);

    let (by_fips, skipped) =
        partition_by_filtered(in_year(), |r| xref.to_fips(&r.state_abbr).map(str::to_string));

    let unmatched = if skipped > 0 {
        report_unmatched(
            "abbreviation",
            count_by(
                in_year().filter(|r| xref.to_fips(&r.state_abbr).is_none()),
                |r| r.state_abbr.clone(),
            ),
        )
    } else {
        Vec::new()
    };

    let states = xref
        .iter()
        .map(|entry| StateTopNames {
            fips: entry.fips.clone(),
            abbr: entry.abbr.clone(),
            name: entry.name.clone(),
            top: by_fips.get(entry.fips.as_str()).map(|bucket| {
                let counts = sum_by(bucket.iter().copied(), |r| (r.name.clone(), r.sex), |r| {
                    r.count
                });
                top_n(&counts, n)
                    .into_iter()
                    .map(|row| NameCount {
                        name: row.key.0,
                        sex: Some(row.key.1),
                        count: row.value,
                    })
                    .collect()
            }),
        })
        .collect();

    TopNamesView {
        year,
        states,
        unmatched,
    }
}

/// The `n` most common names across every state, year and sex.
#[must_use]
pub fn popular_names(dataset: &Dataset, n: usize) -> PopularNamesView {
    let counts = sum_by(&dataset.names, |r| r.name.clone(), |r| r.count);
    let names: Vec<NameCount> = top_n(&counts, n)
        .into_iter()
        .map(|row| NameCount {
            name: row.key,
            sex: None,
            count: row.value,
        })
        .collect();
    let domain = ColorDomain::from_values(names.iter().map(|n| n.count));

    PopularNamesView { names, domain }
}

/// Year-by-year counts for the `n` most common names of one sex in one
/// state. Years in the range where a name does not appear count as zero.
#[must_use]
pub fn name_trend(dataset: &Dataset, state_abbr: &str, sex: Sex, n: usize) -> NameTrendView {
    let state_abbr = state_abbr.trim().to_ascii_uppercase();
    let rows: Vec<&NameRecord> = dataset
        .names
        .iter()
        .filter(|r| r.sex == sex && r.state_abbr.eq_ignore_ascii_case(&state_abbr))
        .collect();

    let first_year = rows.iter().map(|r| r.year).min();
    let last_year = rows.iter().map(|r| r.year).max();

    let totals = sum_by(rows.iter().copied(), |r| r.name.clone(), |r| r.count);
    let series: Vec<NameSeries> = match (first_year, last_year) {
        (Some(first), Some(last)) => top_n(&totals, n)
            .into_iter()
            .map(|row| {
                let by_year = sum_by(
                    rows.iter().copied().filter(|r| r.name == row.key),
                    |r| r.year,
                    |r| r.count,
                );
                NameSeries {
                    points: (first..=last)
                        .map(|year| TrendPoint {
                            year,
                            count: by_year.get(&year).copied().unwrap_or(0),
                        })
                        .collect(),
                    name: row.key,
                }
            })
            .collect(),
        _ => Vec::new(),
    };

    if series.is_empty() {
        log::debug!("No {sex} names recorded for {state_abbr}");
    }

    let domain = ColorDomain::from_values(
        series
            .iter()
            .flat_map(|s| s.points.iter().map(|p| p.count)),
    );

    NameTrendView {
        state_name: dataset.xref.to_full_name(&state_abbr).map(str::to_string),
        state_abbr,
        sex,
        first_year,
        last_year,
        series,
        domain,
    }
}

/// States present in the name data, sorted by full name. Unknown
/// abbreviations sort last.
#[must_use]
pub fn state_options(dataset: &Dataset) -> Vec<StateOption> {
    let present = count_by(&dataset.names, |r| r.state_abbr.to_ascii_uppercase());

    let mut options: Vec<StateOption> = present
        .keys()
        .map(|abbr| StateOption {
            abbr: abbr.clone(),
            full_name: dataset.xref.to_full_name(abbr).map(str::to_string),
        })
        .collect();

    options.sort_by(|a, b| {
        match (&a.full_name, &b.full_name) {
            (Some(x), Some(y)) => x.cmp(y),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }
        .then_with(|| a.abbr.cmp(&b.abbr))
    });

    options
}
