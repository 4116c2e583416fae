//! State boundary collection parsing.
//!
//! Reads a `GeoJSON` `FeatureCollection` of US states. Each feature is
//! expected to carry `STUSPS`, `STATEFP` and `NAME` properties (Census
//! cartographic boundary naming); some boundary files only carry a
//! lowercase `name`, so that is accepted for the display name too.

use birth_map_geography_models::{
    StateEntry,
    fips::{abbr_to_fips, name_to_fips, pad_fips, state_abbr, state_name},
};
use geojson::{Feature, FeatureCollection, GeoJson, Geometry};

use crate::GeoError;

const ABBR_KEYS: &[&str] = &["STUSPS", "stusps"];
const FIPS_KEYS: &[&str] = &["STATEFP", "statefp", "STATE"];
const NAME_KEYS: &[&str] = &["NAME", "name"];

/// A state feature with its resolved identity and original geometry.
#[derive(Debug, Clone)]
pub struct StateBoundary {
    /// Resolved identifiers.
    pub entry: StateEntry,
    /// Geometry as read from the file, passed through untouched.
    pub geometry: Option<Geometry>,
}

/// Every identifiable state feature from a boundary file.
#[derive(Debug, Clone, Default)]
pub struct BoundaryCollection {
    /// States in file order.
    pub states: Vec<StateBoundary>,
    /// Number of features skipped because no identifier could be resolved.
    pub skipped: usize,
}

/// Parses a boundary `FeatureCollection`.
///
/// Features missing an abbreviation or FIPS code are completed from the
/// built-in state table when the identifiers they do carry match it.
/// Features that still cannot be identified are skipped with a warning.
///
/// # Errors
///
/// Returns [`GeoError`] if the text is not valid `GeoJSON` or is not a
/// feature collection.
pub fn parse_boundaries(text: &str) -> Result<BoundaryCollection, GeoError> {
    let geojson = text.parse::<GeoJson>()?;
    let GeoJson::FeatureCollection(collection) = geojson else {
        return Err(GeoError::Conversion {
            message: "boundary file is not a FeatureCollection".to_string(),
        });
    };

    Ok(from_feature_collection(collection))
}

fn from_feature_collection(collection: FeatureCollection) -> BoundaryCollection {
    let mut out = BoundaryCollection::default();

    for (idx, feature) in collection.features.into_iter().enumerate() {
        let Some(entry) = identify(&feature) else {
            log::warn!("Skipping boundary feature {idx}: no recognizable state identifier");
            out.skipped += 1;
            continue;
        };

        out.states.push(StateBoundary {
            entry,
            geometry: feature.geometry,
        });
    }

    log::info!(
        "Loaded {} state boundaries ({} skipped)",
        out.states.len(),
        out.skipped
    );

    out
}

/// Reads the first present property among `keys` as a trimmed string.
/// Numeric properties are accepted so that `STATEFP: 6` works.
fn string_property(feature: &Feature, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| match feature.property(key)? {
        serde_json::Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        serde_json::Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

fn identify(feature: &Feature) -> Option<StateEntry> {
    let abbr = string_property(feature, ABBR_KEYS).map(|a| a.to_uppercase());
    let name = string_property(feature, NAME_KEYS);

    let fips = string_property(feature, FIPS_KEYS)
        .and_then(|f| pad_fips(&f))
        .or_else(|| abbr.as_deref().and_then(abbr_to_fips).map(str::to_string))
        .or_else(|| name.as_deref().and_then(name_to_fips).map(str::to_string))?;

    let abbr = abbr.or_else(|| state_abbr(&fips).map(str::to_string))?;
    let name = name.or_else(|| state_name(&fips).map(str::to_string))?;

    Some(StateEntry::new(abbr, fips, name))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "type": "FeatureCollection",
        "features": [
            {
                "type": "Feature",
                "properties": { "STUSPS": "CA", "STATEFP": "06", "NAME": "California" },
                "geometry": { "type": "Point", "coordinates": [-119.4, 36.7] }
            },
            {
                "type": "Feature",
                "properties": { "STUSPS": "ny", "STATEFP": 36, "NAME": "New York" },
                "geometry": null
            },
            {
                "type": "Feature",
                "properties": { "name": "Texas" },
                "geometry": null
            },
            {
                "type": "Feature",
                "properties": { "name": "Atlantis" },
                "geometry": null
            }
        ]
    }"#;

    #[test]
    fn parses_complete_features() {
        let collection = parse_boundaries(SAMPLE).unwrap();
        let ca = &collection.states[0];
        assert_eq!(ca.entry.abbr, "CA");
        assert_eq!(ca.entry.fips, "06");
        assert_eq!(ca.entry.name, "California");
        assert!(ca.geometry.is_some());
    }

    #[test]
    fn pads_numeric_fips_and_uppercases_abbr() {
        let collection = parse_boundaries(SAMPLE).unwrap();
        let ny = &collection.states[1];
        assert_eq!(ny.entry.abbr, "NY");
        assert_eq!(ny.entry.fips, "36");
    }

    #[test]
    fn completes_name_only_features_from_builtin_table() {
        let collection = parse_boundaries(SAMPLE).unwrap();
        let tx = &collection.states[2];
        assert_eq!(tx.entry.abbr, "TX");
        assert_eq!(tx.entry.fips, "48");
        assert_eq!(tx.entry.name_key, "texas");
    }

    #[test]
    fn skips_unidentifiable_features() {
        let collection = parse_boundaries(SAMPLE).unwrap();
        assert_eq!(collection.states.len(), 3);
        assert_eq!(collection.skipped, 1);
    }

    #[test]
    fn rejects_non_collection() {
        let err = parse_boundaries(r#"{"type": "Point", "coordinates": [0.0, 0.0]}"#).unwrap_err();
        assert!(matches!(err, GeoError::Conversion { .. }));
    }

    #[test]
    fn rejects_malformed_json() {
        assert!(parse_boundaries("{ not json").is_err());
    }
}
