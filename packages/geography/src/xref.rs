//! State key cross-reference.
//!
//! Built once per dataset from the boundary collection. Every lookup on an
//! unknown key returns `None`; callers decide how to show missing data.

use std::collections::HashMap;

use birth_map_geography_models::{
    StateEntry,
    fips::{STATES, pad_fips},
    normalize,
};

use crate::BoundaryCollection;

/// Bidirectional lookup between state abbreviations, FIPS codes and names.
#[derive(Debug, Clone, Default)]
pub struct StateXref {
    entries: Vec<StateEntry>,
    by_abbr: HashMap<String, usize>,
    by_fips: HashMap<String, usize>,
    by_name: HashMap<String, usize>,
}

impl StateXref {
    /// Builds the table from entries in order. FIPS codes are zero-padded
    /// to two digits. When two entries share a FIPS code, abbreviation or
    /// name key, the first one wins.
    #[must_use]
    pub fn from_entries(entries: impl IntoIterator<Item = StateEntry>) -> Self {
        let mut xref = Self::default();

        for mut entry in entries {
            if let Some(padded) = pad_fips(&entry.fips) {
                entry.fips = padded;
            }

            if xref.by_fips.contains_key(&entry.fips) {
                log::warn!(
                    "Duplicate state FIPS {} ({}), keeping the first entry",
                    entry.fips,
                    entry.name
                );
                continue;
            }

            let idx = xref.entries.len();
            xref.by_fips.insert(entry.fips.clone(), idx);
            xref.by_abbr.entry(entry.abbr.to_uppercase()).or_insert(idx);
            xref.by_name.entry(entry.name_key.clone()).or_insert(idx);
            xref.entries.push(entry);
        }

        xref
    }

    /// Builds the table from a parsed boundary collection.
    #[must_use]
    pub fn from_boundaries(boundaries: &BoundaryCollection) -> Self {
        Self::from_entries(boundaries.states.iter().map(|s| s.entry.clone()))
    }

    /// Builds the table from the built-in 50 states + DC list.
    #[must_use]
    pub fn builtin() -> Self {
        Self::from_entries(
            STATES
                .iter()
                .map(|(fips, abbr, name)| StateEntry::new(*abbr, *fips, *name)),
        )
    }

    /// Two-digit FIPS code for an abbreviation.
    #[must_use]
    pub fn to_fips(&self, abbr: &str) -> Option<&str> {
        self.by_abbr(abbr).map(|e| e.fips.as_str())
    }

    /// Display name for an abbreviation.
    #[must_use]
    pub fn to_full_name(&self, abbr: &str) -> Option<&str> {
        self.by_abbr(abbr).map(|e| e.name.as_str())
    }

    /// Abbreviation for a FIPS code. Unpadded codes are accepted.
    #[must_use]
    pub fn abbr_for_fips(&self, fips: &str) -> Option<&str> {
        self.get(fips).map(|e| e.abbr.as_str())
    }

    /// FIPS code for a free-text state name.
    #[must_use]
    pub fn fips_for_name(&self, name: &str) -> Option<&str> {
        self.by_name
            .get(&normalize(name))
            .map(|&idx| self.entries[idx].fips.as_str())
    }

    /// Entry for a FIPS code. Unpadded codes are accepted.
    #[must_use]
    pub fn get(&self, fips: &str) -> Option<&StateEntry> {
        let fips = pad_fips(fips)?;
        self.by_fips.get(&fips).map(|&idx| &self.entries[idx])
    }

    /// Resolves a key in any of the three encodings: numeric keys are
    /// treated as FIPS codes, two-letter keys as abbreviations, and
    /// anything else (or an unmatched two-letter key) as a name.
    #[must_use]
    pub fn resolve(&self, key: &str) -> Option<&StateEntry> {
        let key = key.trim();
        if pad_fips(key).is_some() {
            return self.get(key);
        }
        if key.len() == 2
            && let Some(entry) = self.by_abbr(key)
        {
            return Some(entry);
        }
        self.by_name
            .get(&normalize(key))
            .map(|&idx| &self.entries[idx])
    }

    /// All entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &StateEntry> {
        self.entries.iter()
    }

    /// Number of states in the table.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table has no states.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn by_abbr(&self, abbr: &str) -> Option<&StateEntry> {
        self.by_abbr
            .get(&abbr.trim().to_uppercase())
            .map(|&idx| &self.entries[idx])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse_boundaries;

    fn sample() -> StateXref {
        StateXref::from_entries([
            StateEntry::new("CA", "06", "California"),
            StateEntry::new("NY", "36", "New York"),
        ])
    }

    #[test]
    fn to_fips_finds_known_abbreviation() {
        let collection = parse_boundaries(
            r#"{"type":"FeatureCollection","features":[
                {"type":"Feature","geometry":null,
                 "properties":{"STUSPS":"CA","STATEFP":"06","NAME":"California"}}
            ]}"#,
        )
        .unwrap();
        let xref = StateXref::from_boundaries(&collection);
        assert_eq!(xref.to_fips("CA"), Some("06"));
    }

    #[test]
    fn to_fips_misses_unknown_abbreviation() {
        assert_eq!(sample().to_fips("ZZ"), None);
    }

    #[test]
    fn lookups_ignore_case_and_whitespace() {
        let xref = sample();
        assert_eq!(xref.to_fips(" ny"), Some("36"));
        assert_eq!(xref.to_full_name("ca"), Some("California"));
        assert_eq!(xref.fips_for_name("  NEW YORK "), Some("36"));
    }

    #[test]
    fn get_accepts_unpadded_fips() {
        let xref = sample();
        assert_eq!(xref.get("6").map(|e| e.abbr.as_str()), Some("CA"));
        assert_eq!(xref.abbr_for_fips("36"), Some("NY"));
        assert_eq!(xref.get("99"), None);
    }

    #[test]
    fn unpadded_entry_codes_are_padded() {
        let xref = StateXref::from_entries([StateEntry::new("CA", "6", "California")]);
        assert_eq!(xref.to_fips("CA"), Some("06"));
        assert_eq!(xref.get("06").map(|e| e.fips.as_str()), Some("06"));
        assert_eq!(xref.get("6").map(|e| e.abbr.as_str()), Some("CA"));
    }

    #[test]
    fn resolve_handles_every_encoding() {
        let xref = sample();
        for key in ["06", "6", "CA", "ca", "California", "california "] {
            assert_eq!(
                xref.resolve(key).map(|e| e.fips.as_str()),
                Some("06"),
                "failed for {key:?}"
            );
        }
        assert!(xref.resolve("Nowhere").is_none());
    }

    #[test]
    fn first_duplicate_fips_wins() {
        let xref = StateXref::from_entries([
            StateEntry::new("CA", "06", "California"),
            StateEntry::new("XX", "06", "Other"),
        ]);
        assert_eq!(xref.len(), 1);
        assert_eq!(xref.to_fips("XX"), None);
    }

    #[test]
    fn builtin_covers_all_states() {
        let xref = StateXref::builtin();
        assert_eq!(xref.len(), 51);
        assert_eq!(xref.to_fips("DC"), Some("11"));
        assert_eq!(xref.to_full_name("WY"), Some("Wyoming"));
    }
}
