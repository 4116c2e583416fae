//! Schemas for the birth, baby-name and demographic datasets.

use birth_map_geography_models::fips::pad_fips;
use birth_map_records_models::{
    BirthRecord, DemographicRecord, DemographicTotals, NameRecord, Sex,
};

use crate::{FieldKind, FieldSpec, ParseError, Row, TabularRecord};

/// Birth data: `State` holds a 1-2 digit FIPS code.
const BIRTH_SCHEMA: &[FieldSpec] = &[
    FieldSpec::key("State", FieldKind::Text),
    FieldSpec::key("Year", FieldKind::Integer),
    FieldSpec::key("Month", FieldKind::Integer),
    FieldSpec::measure("stateBirths").with_aliases(&["Births", "births"]),
];

/// Baby names: the state column is `State` in most exports and `STUSPS`
/// in the one taken straight from the boundary attributes.
const NAME_SCHEMA: &[FieldSpec] = &[
    FieldSpec::key("State", FieldKind::Text).with_aliases(&["STUSPS"]),
    FieldSpec::key("Year", FieldKind::Integer),
    FieldSpec::key("Name", FieldKind::Text),
    FieldSpec::measure("Count"),
    FieldSpec::key("Sex", FieldKind::Text),
];

const DEMOGRAPHIC_SCHEMA: &[FieldSpec] = &[
    FieldSpec::key("State", FieldKind::Text),
    FieldSpec::measure("Total Population"),
    FieldSpec::measure("Male Population"),
    FieldSpec::measure("Female Population"),
    FieldSpec::measure("White Alone"),
    FieldSpec::measure("Black or African American Alone"),
    FieldSpec::measure("Hispanic or Latino"),
];

fn year(row: &Row<'_>, idx: usize) -> Result<i32, ParseError> {
    let raw = row.integer(idx)?;
    i32::try_from(raw).map_err(|_| ParseError::new("Year", raw.to_string(), FieldKind::Integer))
}

impl TabularRecord for BirthRecord {
    fn schema() -> &'static [FieldSpec] {
        BIRTH_SCHEMA
    }

    fn from_row(row: &Row<'_>) -> Result<Self, ParseError> {
        let state = row.text(0)?;
        let state_fips =
            pad_fips(state).ok_or_else(|| ParseError::new("State", state, FieldKind::Text))?;

        let month = row.integer(2)?;
        let month = u8::try_from(month)
            .ok()
            .filter(|m| (1..=12).contains(m))
            .ok_or_else(|| ParseError::new("Month", month.to_string(), FieldKind::Integer))?;

        Ok(Self {
            state_fips,
            year: year(row, 1)?,
            month,
            births: row.count(3)?,
        })
    }
}

impl TabularRecord for NameRecord {
    fn schema() -> &'static [FieldSpec] {
        NAME_SCHEMA
    }

    fn from_row(row: &Row<'_>) -> Result<Self, ParseError> {
        let state = row.text(0)?;
        if state.len() != 2 || !state.bytes().all(|b| b.is_ascii_alphabetic()) {
            return Err(ParseError::new("State", state, FieldKind::Text));
        }

        let sex = row.text(4)?;
        let sex = sex
            .parse::<Sex>()
            .map_err(|_| ParseError::new("Sex", sex, FieldKind::Text))?;

        Ok(Self {
            state_abbr: state.to_ascii_uppercase(),
            year: year(row, 1)?,
            name: row.text(2)?.to_string(),
            count: row.count(3)?,
            sex,
        })
    }
}

impl TabularRecord for DemographicRecord {
    fn schema() -> &'static [FieldSpec] {
        DEMOGRAPHIC_SCHEMA
    }

    fn from_row(row: &Row<'_>) -> Result<Self, ParseError> {
        Ok(Self {
            state_name: row.text(0)?.to_string(),
            totals: DemographicTotals {
                total: row.count(1)?,
                male: row.count(2)?,
                female: row.count(3)?,
                white: row.count(4)?,
                black: row.count(5)?,
                hispanic: row.count(6)?,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{LoadOptions, load_records};

    #[test]
    fn loads_birth_rows_and_pads_fips() {
        let text = "State,Year,Month,stateBirths\n6,2006,3,100\n06,2006,4,50\n";
        let report = load_records::<BirthRecord>(text, LoadOptions::default()).unwrap();
        assert_eq!(report.records.len(), 2);
        assert!(report.records.iter().all(|r| r.state_fips == "06"));
        assert_eq!(report.records[0].month, 3);
        assert_eq!(report.records[1].births, 50);
    }

    #[test]
    fn rejects_bad_birth_keys() {
        let text = "State,Year,Month,stateBirths\n\
                    CA,2006,3,100\n\
                    6,2006,13,100\n\
                    6,20x6,1,100\n\
                    6,2006,1,lots\n";
        let report = load_records::<BirthRecord>(text, LoadOptions::default()).unwrap();
        assert_eq!(report.rejected.len(), 3);
        let fields: Vec<_> = report.rejected.iter().map(|r| r.error.field.as_str()).collect();
        assert_eq!(fields, ["State", "Month", "Year"]);
        assert_eq!(report.records.len(), 1);
        assert_eq!(report.records[0].births, 0);
    }

    #[test]
    fn loads_name_rows_with_stusps_header() {
        let text = "STUSPS,Year,Name,Count,Sex\nca,2006,Emma,300,f\n";
        let report = load_records::<NameRecord>(text, LoadOptions::default()).unwrap();
        let r = &report.records[0];
        assert_eq!(r.state_abbr, "CA");
        assert_eq!(r.sex, Sex::Female);
        assert_eq!(r.count, 300);
    }

    #[test]
    fn rejects_unknown_sex_and_long_state() {
        let text = "State,Year,Name,Count,Sex\nCA,2006,Emma,300,X\nCAL,2006,Emma,300,F\n";
        let report = load_records::<NameRecord>(text, LoadOptions::default()).unwrap();
        assert!(report.records.is_empty());
        assert_eq!(report.rejected.len(), 2);
    }

    #[test]
    fn loads_demographic_columns() {
        let text = "State,Total Population,Male Population,Female Population,\
                    White Alone,Black or African American Alone,Hispanic or Latino\n\
                    Texas,100,48,52,60,12,40\n";
        let report = load_records::<DemographicRecord>(text, LoadOptions::default()).unwrap();
        let r = &report.records[0];
        assert_eq!(r.state_name, "Texas");
        assert_eq!(r.totals.total, 100);
        assert_eq!(r.totals.hispanic, 40);
    }
}
