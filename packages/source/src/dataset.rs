//! Turns fetched text into a [`Dataset`].

use birth_map_analytics::Dataset;
use birth_map_geography::parse_boundaries;
use birth_map_records::{LoadOptions, TabularRecord, load_records};
use birth_map_records_models::{BirthRecord, DemographicRecord, NameRecord};

use crate::{SourceError, config::DatasetLocations, fetch::RawBundle, fetch::fetch_all};

fn load<R: TabularRecord>(
    dataset: &'static str,
    text: &str,
    options: LoadOptions,
) -> Result<Vec<R>, SourceError> {
    let report =
        load_records::<R>(text, options).map_err(|source| SourceError::Load { dataset, source })?;

    if !report.rejected.is_empty() {
        log::warn!(
            "{dataset}: {} rows rejected, {} loaded",
            report.rejected.len(),
            report.records.len()
        );
    }

    Ok(report.records)
}

/// Parses every file of a fetched bundle.
///
/// # Errors
///
/// Returns [`SourceError`] if a CSV lacks a required column, a row is
/// malformed in strict mode, or the boundary file is not `GeoJSON`.
pub fn parse_bundle(bundle: &RawBundle, options: LoadOptions) -> Result<Dataset, SourceError> {
    let births = load::<BirthRecord>("births", &bundle.births, options)?;
    let names = load::<NameRecord>("names", &bundle.names, options)?;
    let demographics = match &bundle.demographics {
        Some(text) => load::<DemographicRecord>("demographics", text, options)?,
        None => Vec::new(),
    };
    let boundaries = parse_boundaries(&bundle.boundaries)?;

    log::info!(
        "Loaded {} birth rows, {} name rows, {} demographic rows, {} states",
        births.len(),
        names.len(),
        demographics.len(),
        boundaries.states.len()
    );

    Ok(Dataset::new(births, names, demographics, boundaries))
}

/// Fetches and parses every configured file.
///
/// # Errors
///
/// Returns [`SourceError`] if any fetch or parse fails.
pub async fn load_dataset(
    client: &reqwest::Client,
    locations: &DatasetLocations,
) -> Result<Dataset, SourceError> {
    let bundle = fetch_all(client, locations).await?;
    parse_bundle(
        &bundle,
        LoadOptions {
            strict: locations.strict,
        },
    )
}
