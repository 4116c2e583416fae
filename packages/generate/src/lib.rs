#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Writes birth map view payloads for the rendering layer.
//!
//! Loads the configured dataset once, builds views through a
//! [`Session`], and writes them as camelCase JSON. Choropleth views can
//! also be written as a `GeoJSON` `FeatureCollection` with the value joined
//! onto each state's boundary.

pub mod features;

use std::io::Write as _;
use std::path::Path;

use birth_map_analytics::Session;
use birth_map_analytics::cache::{ViewParams, ViewPayload};
use birth_map_analytics::views::births::{choropleth_for_year, global_birth_domain, years};
use birth_map_analytics_models::{ColorDomain, Season};
use birth_map_records_models::Sex;
use birth_map_source::config::{DatasetConfig, ViewDefaults};
use birth_map_source::dataset::load_dataset;
use serde::Serialize;
use strum::IntoEnumIterator as _;

/// Errors that can occur while generating output.
#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    /// Loading the dataset failed.
    #[error(transparent)]
    Source(#[from] birth_map_source::SourceError),

    /// Writing output failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serializing output failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Year range and births color scale shared by every year of the map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub years: Vec<i32>,
    pub default_year: i32,
    pub birth_domain: Option<ColorDomain<u64>>,
}

/// Fetches and parses the configured dataset into a new session.
///
/// # Errors
///
/// Returns [`GenerateError::Source`] if any file fails to load.
pub async fn load_session(config: &DatasetConfig) -> Result<Session, GenerateError> {
    let client = reqwest::Client::new();
    let dataset = load_dataset(&client, &config.datasets).await?;
    Ok(Session::new(dataset))
}

/// Writes `value` as pretty JSON to `output`, or to stdout when `None`.
///
/// # Errors
///
/// Returns [`GenerateError`] if serialization or the write fails.
pub fn write_json<T: Serialize + ?Sized>(
    value: &T,
    output: Option<&Path>,
) -> Result<(), GenerateError> {
    let json = serde_json::to_string_pretty(value)?;

    if let Some(path) = output {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json + "\n")?;
        log::info!("Wrote {}", path.display());
    } else {
        let mut stdout = std::io::stdout().lock();
        writeln!(stdout, "{json}")?;
    }

    Ok(())
}

/// Builds the summary of the loaded births data.
#[must_use]
pub fn summary(session: &Session, views: &ViewDefaults) -> Summary {
    let dataset = session.dataset();
    Summary {
        years: years(&dataset.births),
        default_year: views.default_year,
        birth_domain: global_birth_domain(dataset),
    }
}

/// Writes the births choropleth for `year` as a joined `FeatureCollection`.
///
/// # Errors
///
/// Returns [`GenerateError`] if serialization or the write fails.
pub fn write_choropleth_geojson(
    session: &Session,
    year: i32,
    output: Option<&Path>,
) -> Result<(), GenerateError> {
    let dataset = session.dataset();
    let view = choropleth_for_year(dataset, year);
    let collection = features::joined_collection(dataset, &view.states)?;
    write_json(&collection, output)
}

fn write_view(
    session: &Session,
    params: &ViewParams,
    path: &Path,
) -> Result<std::sync::Arc<ViewPayload>, GenerateError> {
    let payload = session.view(params);
    write_json(payload.as_ref(), Some(path))?;
    Ok(payload)
}

/// Writes every view into `out_dir`: the summary, the births map for each
/// year, every season, demographics, top names for each year, the overall
/// ranking, the state list and name trends for each listed state and sex.
///
/// Returns the number of files written.
///
/// # Errors
///
/// Returns [`GenerateError`] on the first failed write.
pub fn write_all(
    session: &Session,
    views: &ViewDefaults,
    out_dir: &Path,
) -> Result<usize, GenerateError> {
    std::fs::create_dir_all(out_dir)?;
    let mut written = 0;

    let summary = summary(session, views);
    write_json(&summary, Some(&out_dir.join("summary.json")))?;
    written += 1;

    for &year in &summary.years {
        write_view(
            session,
            &ViewParams::Choropleth { year },
            &out_dir.join(format!("births-{year}.json")),
        )?;
        write_choropleth_geojson(
            session,
            year,
            Some(&out_dir.join(format!("births-{year}.geojson"))),
        )?;
        write_view(
            session,
            &ViewParams::TopNames {
                year,
                limit: views.top_names_per_state,
            },
            &out_dir.join(format!("top-names-{year}.json")),
        )?;
        written += 3;
    }

    for season in Season::iter() {
        let slug = season.as_ref().to_lowercase();
        write_view(
            session,
            &ViewParams::Seasons { season },
            &out_dir.join(format!("season-{slug}.json")),
        )?;
        written += 1;
    }

    write_view(
        session,
        &ViewParams::Demographics,
        &out_dir.join("demographics.json"),
    )?;
    write_view(
        session,
        &ViewParams::PopularNames {
            limit: views.top_names_overall,
        },
        &out_dir.join("popular-names.json"),
    )?;
    let states = write_view(session, &ViewParams::States, &out_dir.join("states.json"))?;
    written += 3;

    if let ViewPayload::States(options) = states.as_ref() {
        for option in options {
            for sex in [Sex::Female, Sex::Male] {
                write_view(
                    session,
                    &ViewParams::NameTrend {
                        state: option.abbr.clone(),
                        sex,
                        limit: views.trend_top_names,
                    },
                    &out_dir.join(format!("name-trend-{}-{sex}.json", option.abbr)),
                )?;
                written += 1;
            }
        }
    }

    log::info!("Wrote {written} files to {}", out_dir.display());
    Ok(written)
}

#[cfg(test)]
mod tests {
    use birth_map_analytics::Dataset;
    use birth_map_geography::parse_boundaries;
    use birth_map_records_models::{BirthRecord, NameRecord};

    use super::*;

    fn session() -> Session {
        let boundaries = parse_boundaries(
            r#"{"type": "FeatureCollection", "features": [
                {"type": "Feature", "properties": {"STUSPS": "CA", "STATEFP": "06", "NAME": "California"}, "geometry": null}
            ]}"#,
        )
        .unwrap();
        let births = vec![
            BirthRecord {
                state_fips: "06".to_string(),
                year: 2006,
                month: 5,
                births: 40,
            },
            BirthRecord {
                state_fips: "06".to_string(),
                year: 2007,
                month: 8,
                births: 60,
            },
        ];
        let names = vec![NameRecord {
            state_abbr: "CA".to_string(),
            year: 2006,
            name: "Emma".to_string(),
            count: 9,
            sex: Sex::Female,
        }];
        Session::new(Dataset::new(births, names, Vec::new(), boundaries))
    }

    #[test]
    fn summary_spans_all_years() {
        let summary = summary(&session(), &ViewDefaults::default());
        assert_eq!(summary.years, [2006, 2007]);
        assert_eq!(summary.birth_domain, Some(ColorDomain { min: 40, max: 60 }));
    }

    #[test]
    fn writes_every_view() {
        let dir = std::env::temp_dir().join("birth_map_generate_all");
        let _ = std::fs::remove_dir_all(&dir);

        let written = write_all(&session(), &ViewDefaults::default(), &dir).unwrap();
        // summary + 3 per year + 4 seasons + 3 singles + 2 trends for CA
        assert_eq!(written, 1 + 3 * 2 + 4 + 3 + 2);
        assert!(dir.join("births-2007.geojson").exists());
        assert!(dir.join("season-winter.json").exists());
        assert!(dir.join("name-trend-CA-F.json").exists());

        let text = std::fs::read_to_string(dir.join("births-2006.json")).unwrap();
        let json: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(json["states"][0]["value"], 40);
        std::fs::remove_dir_all(&dir).ok();
    }
}
