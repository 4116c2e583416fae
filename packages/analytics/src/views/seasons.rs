//! Seasonal birth shares.

use birth_map_analytics_models::{ColorDomain, Season, SeasonShare, SeasonView};
use birth_map_records_models::BirthRecord;

use crate::{
    Dataset,
    aggregate::{Aggregate, sum_by, sum_by_filtered},
    views::births::years,
};

/// Births summed per `(season, state FIPS)` over every year. Records with a
/// month outside 1-12 are skipped.
#[must_use]
pub fn births_by_season(births: &[BirthRecord]) -> Aggregate<(Season, String), u64> {
    let (agg, skipped) = sum_by_filtered(
        births,
        |r| Season::from_month(r.month).map(|s| (s, r.state_fips.clone())),
        |r| r.births,
    );
    if skipped > 0 {
        log::warn!("Skipped {skipped} birth records with no season");
    }
    agg
}

#[allow(clippy::cast_precision_loss)]
fn percent(part: u64, whole: u64) -> Option<f64> {
    (whole > 0).then(|| part as f64 / whole as f64 * 100.0)
}

/// Each state's share of its births falling in `season`.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn season_view(dataset: &Dataset, season: Season) -> SeasonView {
    let by_season = births_by_season(&dataset.births);
    let totals = sum_by(&dataset.births, |r| r.state_fips.clone(), |r| r.births);
    let year_count = years(&dataset.births).len();

    let states: Vec<SeasonShare> = dataset
        .xref
        .iter()
        .map(|entry| {
            let season_births = by_season
                .get(&(season, entry.fips.clone()))
                .copied()
                .unwrap_or(0);
            let total_births = totals.get(entry.fips.as_str()).copied().unwrap_or(0);
            let share_percent = percent(season_births, total_births);

            SeasonShare {
                fips: entry.fips.clone(),
                abbr: entry.abbr.clone(),
                name: entry.name.clone(),
                season_births,
                total_births,
                share_percent,
                avg_births_per_year: (share_percent.is_some() && year_count > 0)
                    .then(|| season_births as f64 / year_count as f64),
            }
        })
        .collect();

    let domain = ColorDomain::from_values(states.iter().filter_map(|s| s.share_percent));

    SeasonView {
        season,
        states,
        domain,
    }
}
