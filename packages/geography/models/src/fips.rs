//! US state FIPS code utilities.
//!
//! Provides mappings between two-digit FIPS codes, two-letter state
//! abbreviations, and full state names for the 50 US states + DC. Boundary
//! files are the primary source of these identifiers; this table fills in
//! whatever a boundary feature leaves out.

/// `(fips, abbreviation, name)` for the 50 states + DC, ordered by FIPS code.
pub const STATES: &[(&str, &str, &str)] = &[
    ("01", "AL", "Alabama"),
    ("02", "AK", "Alaska"),
    ("04", "AZ", "Arizona"),
    ("05", "AR", "Arkansas"),
    ("06", "CA", "California"),
    ("08", "CO", "Colorado"),
    ("09", "CT", "Connecticut"),
    ("10", "DE", "Delaware"),
    ("11", "DC", "District of Columbia"),
    ("12", "FL", "Florida"),
    ("13", "GA", "Georgia"),
    ("15", "HI", "Hawaii"),
    ("16", "ID", "Idaho"),
    ("17", "IL", "Illinois"),
    ("18", "IN", "Indiana"),
    ("19", "IA", "Iowa"),
    ("20", "KS", "Kansas"),
    ("21", "KY", "Kentucky"),
    ("22", "LA", "Louisiana"),
    ("23", "ME", "Maine"),
    ("24", "MD", "Maryland"),
    ("25", "MA", "Massachusetts"),
    ("26", "MI", "Michigan"),
    ("27", "MN", "Minnesota"),
    ("28", "MS", "Mississippi"),
    ("29", "MO", "Missouri"),
    ("30", "MT", "Montana"),
    ("31", "NE", "Nebraska"),
    ("32", "NV", "Nevada"),
    ("33", "NH", "New Hampshire"),
    ("34", "NJ", "New Jersey"),
    ("35", "NM", "New Mexico"),
    ("36", "NY", "New York"),
    ("37", "NC", "North Carolina"),
    ("38", "ND", "North Dakota"),
    ("39", "OH", "Ohio"),
    ("40", "OK", "Oklahoma"),
    ("41", "OR", "Oregon"),
    ("42", "PA", "Pennsylvania"),
    ("44", "RI", "Rhode Island"),
    ("45", "SC", "South Carolina"),
    ("46", "SD", "South Dakota"),
    ("47", "TN", "Tennessee"),
    ("48", "TX", "Texas"),
    ("49", "UT", "Utah"),
    ("50", "VT", "Vermont"),
    ("51", "VA", "Virginia"),
    ("53", "WA", "Washington"),
    ("54", "WV", "West Virginia"),
    ("55", "WI", "Wisconsin"),
    ("56", "WY", "Wyoming"),
];

/// Zero-pads a state FIPS code to two digits (`"6"` -> `"06"`).
///
/// Returns `None` unless the trimmed input is one or two ASCII digits.
#[must_use]
pub fn pad_fips(raw: &str) -> Option<String> {
    let raw = raw.trim();
    if raw.is_empty() || raw.len() > 2 || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some(format!("{raw:0>2}"))
}

/// Maps a two-digit FIPS code to the two-letter state abbreviation.
#[must_use]
pub fn state_abbr(fips: &str) -> Option<&'static str> {
    STATES
        .iter()
        .find(|(code, _, _)| *code == fips)
        .map(|(_, abbr, _)| *abbr)
}

/// Maps a two-digit FIPS code to the full state name.
#[must_use]
pub fn state_name(fips: &str) -> Option<&'static str> {
    STATES
        .iter()
        .find(|(code, _, _)| *code == fips)
        .map(|(_, _, name)| *name)
}

/// Maps a two-letter state abbreviation (any case) to the FIPS code.
#[must_use]
pub fn abbr_to_fips(abbr: &str) -> Option<&'static str> {
    let abbr = abbr.trim();
    STATES
        .iter()
        .find(|(_, code, _)| code.eq_ignore_ascii_case(abbr))
        .map(|(fips, _, _)| *fips)
}

/// Maps a full state name (any case, surrounding whitespace ignored) to the
/// FIPS code.
#[must_use]
pub fn name_to_fips(name: &str) -> Option<&'static str> {
    let name = name.trim();
    STATES
        .iter()
        .find(|(_, _, full)| full.eq_ignore_ascii_case(name))
        .map(|(fips, _, _)| *fips)
}
