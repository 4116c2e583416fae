//! Boundary features joined with view values.

use birth_map_analytics::Dataset;
use birth_map_analytics_models::StateValue;
use geojson::{Feature, FeatureCollection, JsonObject};
use serde::Serialize;

/// One feature per boundary state, carrying `STUSPS`, `STATEFP`, `NAME` and
/// the joined `value` (`null` when the state has no data).
///
/// # Errors
///
/// Returns an error if a value cannot be converted to JSON.
pub fn joined_collection<V: Serialize>(
    dataset: &Dataset,
    states: &[StateValue<V>],
) -> Result<FeatureCollection, serde_json::Error> {
    let features = dataset
        .boundaries
        .states
        .iter()
        .map(|boundary| {
            let entry = &boundary.entry;
            let value = states
                .iter()
                .find(|s| s.fips == entry.fips)
                .and_then(|s| s.value.as_ref());

            let mut properties = JsonObject::new();
            properties.insert("STUSPS".to_string(), entry.abbr.clone().into());
            properties.insert("STATEFP".to_string(), entry.fips.clone().into());
            properties.insert("NAME".to_string(), entry.name.clone().into());
            properties.insert("value".to_string(), serde_json::to_value(value)?);

            Ok(Feature {
                bbox: None,
                geometry: boundary.geometry.clone(),
                id: None,
                properties: Some(properties),
                foreign_members: None,
            })
        })
        .collect::<Result<Vec<_>, serde_json::Error>>()?;

    Ok(FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    })
}

#[cfg(test)]
mod tests {
    use birth_map_analytics::views::births::choropleth_for_year;
    use birth_map_geography::parse_boundaries;
    use birth_map_records_models::BirthRecord;

    use super::*;

    #[test]
    fn states_without_data_get_null() {
        let boundaries = parse_boundaries(
            r#"{
                "type": "FeatureCollection",
                "features": [
                    {"type": "Feature", "properties": {"STUSPS": "CA", "STATEFP": "06", "NAME": "California"}, "geometry": null},
                    {"type": "Feature", "properties": {"STUSPS": "NY", "STATEFP": "36", "NAME": "New York"}, "geometry": null}
                ]
            }"#,
        )
        .unwrap();
        let births = vec![BirthRecord {
            state_fips: "06".to_string(),
            year: 2006,
            month: 1,
            births: 12,
        }];
        let dataset = Dataset::new(births, Vec::new(), Vec::new(), boundaries);
        let view = choropleth_for_year(&dataset, 2006);

        let collection = joined_collection(&dataset, &view.states).unwrap();
        assert_eq!(collection.features.len(), 2);
        assert_eq!(collection.features[0].property("value"), Some(&12.into()));
        assert_eq!(
            collection.features[1].property("value"),
            Some(&serde_json::Value::Null)
        );
        assert_eq!(collection.features[1].property("STUSPS"), Some(&"NY".into()));
    }
}
