//! Field schemas and typed row values.
//!
//! A schema is an ordered list of [`FieldSpec`]s. Each spec names the CSV
//! column (plus any aliases the source files use), the kind of value it
//! holds, and what to do when the text does not parse.

use strum_macros::Display;

use crate::ParseError;

/// Kind of value a column holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "snake_case")]
pub enum FieldKind {
    /// Non-empty free text.
    Text,
    /// Signed whole number.
    Integer,
    /// Non-negative whole number.
    Count,
    /// Finite floating-point number.
    Float,
}

/// What the loader does with a value that does not parse as its kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidPolicy {
    /// Exclude the whole row and record the rejection.
    Reject,
    /// Substitute zero (or an empty string for text) and keep the row.
    Zero,
}

/// One column of a schema.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    /// Canonical header name.
    pub name: &'static str,
    /// Other header names accepted for the same column.
    pub aliases: &'static [&'static str],
    /// Expected value kind.
    pub kind: FieldKind,
    /// Handling for values that fail to parse.
    pub on_invalid: InvalidPolicy,
}

impl FieldSpec {
    /// A column that rejects the row when invalid.
    #[must_use]
    pub const fn key(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            aliases: &[],
            kind,
            on_invalid: InvalidPolicy::Reject,
        }
    }

    /// A column that falls back to zero when invalid.
    #[must_use]
    pub const fn measure(name: &'static str) -> Self {
        Self {
            name,
            aliases: &[],
            kind: FieldKind::Count,
            on_invalid: InvalidPolicy::Zero,
        }
    }

    /// Adds header aliases.
    #[must_use]
    pub const fn with_aliases(mut self, aliases: &'static [&'static str]) -> Self {
        self.aliases = aliases;
        self
    }

    /// Whether `header` names this column, optionally ignoring ASCII case.
    #[must_use]
    pub fn matches(&self, header: &str, ignore_case: bool) -> bool {
        std::iter::once(&self.name)
            .chain(self.aliases)
            .any(|candidate| {
                if ignore_case {
                    candidate.eq_ignore_ascii_case(header)
                } else {
                    *candidate == header
                }
            })
    }

    /// Parses raw cell text as this field's kind.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError`] if the text is empty or does not parse.
    pub fn parse(&self, raw: &str) -> Result<FieldValue, ParseError> {
        let raw = raw.trim();
        let invalid = || ParseError::new(self.name, raw, self.kind);

        match self.kind {
            FieldKind::Text => {
                if raw.is_empty() {
                    Err(invalid())
                } else {
                    Ok(FieldValue::Text(raw.to_string()))
                }
            }
            FieldKind::Integer => parse_whole(raw).map(FieldValue::Integer).ok_or_else(invalid),
            FieldKind::Count => parse_whole(raw)
                .and_then(|n| u64::try_from(n).ok())
                .map(FieldValue::Count)
                .ok_or_else(invalid),
            FieldKind::Float => raw
                .parse::<f64>()
                .ok()
                .filter(|f| f.is_finite())
                .map(FieldValue::Float)
                .ok_or_else(invalid),
        }
    }

    /// The value substituted under [`InvalidPolicy::Zero`].
    #[must_use]
    pub const fn zero(&self) -> FieldValue {
        match self.kind {
            FieldKind::Text => FieldValue::Text(String::new()),
            FieldKind::Integer => FieldValue::Integer(0),
            FieldKind::Count => FieldValue::Count(0),
            FieldKind::Float => FieldValue::Float(0.0),
        }
    }
}

/// Accepts `"100"` and also `"100.0"`, which spreadsheet exports produce.
#[allow(clippy::cast_possible_truncation)]
fn parse_whole(raw: &str) -> Option<i64> {
    if let Ok(n) = raw.parse::<i64>() {
        return Some(n);
    }
    let f = raw.parse::<f64>().ok()?;
    (f.is_finite() && f.fract() == 0.0 && f.abs() < 9.0e15).then_some(f as i64)
}

/// A parsed cell.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// Text cell.
    Text(String),
    /// Signed integer cell.
    Integer(i64),
    /// Non-negative integer cell.
    Count(u64),
    /// Float cell.
    Float(f64),
}

/// A row whose cells have all been parsed against a schema.
#[derive(Debug)]
pub struct Row<'a> {
    schema: &'a [FieldSpec],
    values: Vec<FieldValue>,
}

impl<'a> Row<'a> {
    pub(crate) const fn new(schema: &'a [FieldSpec], values: Vec<FieldValue>) -> Self {
        Self { schema, values }
    }

    fn mismatch(&self, idx: usize, expected: FieldKind) -> ParseError {
        let name = self.schema.get(idx).map_or("?", |f| f.name);
        let value = self
            .values
            .get(idx)
            .map(|v| format!("{v:?}"))
            .unwrap_or_default();
        ParseError::new(name, &value, expected)
    }

    /// Text value of column `idx`.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError`] if the column is not a text column.
    pub fn text(&self, idx: usize) -> Result<&str, ParseError> {
        match self.values.get(idx) {
            Some(FieldValue::Text(s)) => Ok(s),
            _ => Err(self.mismatch(idx, FieldKind::Text)),
        }
    }

    /// Integer value of column `idx`.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError`] if the column is not an integer column.
    pub fn integer(&self, idx: usize) -> Result<i64, ParseError> {
        match self.values.get(idx) {
            Some(FieldValue::Integer(n)) => Ok(*n),
            _ => Err(self.mismatch(idx, FieldKind::Integer)),
        }
    }

    /// Count value of column `idx`.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError`] if the column is not a count column.
    pub fn count(&self, idx: usize) -> Result<u64, ParseError> {
        match self.values.get(idx) {
            Some(FieldValue::Count(n)) => Ok(*n),
            _ => Err(self.mismatch(idx, FieldKind::Count)),
        }
    }

    /// Float value of column `idx`.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError`] if the column is not a float column.
    pub fn float(&self, idx: usize) -> Result<f64, ParseError> {
        match self.values.get(idx) {
            Some(FieldValue::Float(f)) => Ok(*f),
            _ => Err(self.mismatch(idx, FieldKind::Float)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_each_kind() {
        assert_eq!(
            FieldSpec::key("s", FieldKind::Text).parse(" CA ").unwrap(),
            FieldValue::Text("CA".to_string())
        );
        assert_eq!(
            FieldSpec::key("y", FieldKind::Integer).parse("-7").unwrap(),
            FieldValue::Integer(-7)
        );
        assert_eq!(
            FieldSpec::measure("c").parse("100.0").unwrap(),
            FieldValue::Count(100)
        );
        assert_eq!(
            FieldSpec::key("f", FieldKind::Float).parse("2.5").unwrap(),
            FieldValue::Float(2.5)
        );
    }

    #[test]
    fn rejects_unparseable_values() {
        assert!(FieldSpec::measure("c").parse("abc").is_err());
        assert!(FieldSpec::measure("c").parse("-1").is_err());
        assert!(FieldSpec::measure("c").parse("1.5").is_err());
        assert!(FieldSpec::key("f", FieldKind::Float).parse("NaN").is_err());
        assert!(FieldSpec::key("s", FieldKind::Text).parse("   ").is_err());
    }

    #[test]
    fn parse_error_names_field_and_value() {
        let err = FieldSpec::measure("stateBirths").parse("n/a").unwrap_err();
        assert_eq!(err.field, "stateBirths");
        assert_eq!(err.value, "n/a");
        assert_eq!(err.expected, FieldKind::Count);
    }

    #[test]
    fn matches_aliases() {
        let spec = FieldSpec::key("State", FieldKind::Text).with_aliases(&["STUSPS"]);
        assert!(spec.matches("STUSPS", false));
        assert!(!spec.matches("state", false));
        assert!(spec.matches("state", true));
    }

    #[test]
    fn row_accessors_check_kind() {
        let schema = [
            FieldSpec::key("Name", FieldKind::Text),
            FieldSpec::measure("Count"),
        ];
        let row = Row::new(
            &schema,
            vec![FieldValue::Text("Emma".to_string()), FieldValue::Count(5)],
        );
        assert_eq!(row.text(0).unwrap(), "Emma");
        assert_eq!(row.count(1).unwrap(), 5);
        assert!(row.integer(0).is_err());
        assert!(row.text(9).is_err());
    }
}
