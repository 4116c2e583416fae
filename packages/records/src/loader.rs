//! Schema-driven CSV loading.

use crate::{FieldSpec, InvalidPolicy, LoadError, ParseError, Row};

/// Record types that can be built from a schema-checked row.
pub trait TabularRecord: Sized {
    /// Ordered column schema. Column indices passed to [`Row`] accessors in
    /// [`TabularRecord::from_row`] refer to positions in this slice.
    fn schema() -> &'static [FieldSpec];

    /// Builds the record, applying any record-level validation.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError`] if a value is well-formed for its kind but not
    /// valid for the record (e.g. month 13).
    fn from_row(row: &Row<'_>) -> Result<Self, ParseError>;
}

/// Loader behavior switches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadOptions {
    /// Fail the whole load on the first rejected row instead of reporting it.
    pub strict: bool,
}

/// A row excluded from the load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejection {
    /// 1-based line number in the source text (the header is line 1).
    pub line: u64,
    /// Why the row was excluded.
    pub error: ParseError,
}

/// Records loaded from one file plus the rows that were excluded.
#[derive(Debug, Clone)]
pub struct LoadReport<R> {
    /// Successfully built records in file order.
    pub records: Vec<R>,
    /// Excluded rows in file order.
    pub rejected: Vec<Rejection>,
}

impl<R> Default for LoadReport<R> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            rejected: Vec::new(),
        }
    }
}

/// Maps each schema field to its column index in the header. Exact header
/// matches win over case-insensitive ones.
fn resolve_columns(
    schema: &[FieldSpec],
    headers: &csv::StringRecord,
) -> Result<Vec<usize>, LoadError> {
    schema
        .iter()
        .map(|field| {
            headers
                .iter()
                .position(|h| field.matches(h.trim(), false))
                .or_else(|| headers.iter().position(|h| field.matches(h.trim(), true)))
                .ok_or_else(|| LoadError::MissingColumn {
                    field: field.name.to_string(),
                })
        })
        .collect()
}

/// Parses every cell of one data row. Returns the first cell error for
/// fields whose policy is [`InvalidPolicy::Reject`].
fn parse_cells(
    schema: &[FieldSpec],
    columns: &[usize],
    record: &csv::StringRecord,
    line: u64,
) -> Result<Vec<crate::FieldValue>, ParseError> {
    schema
        .iter()
        .zip(columns)
        .map(|(field, &col)| {
            let raw = record.get(col).unwrap_or("");
            match field.parse(raw) {
                Ok(value) => Ok(value),
                Err(e) if field.on_invalid == InvalidPolicy::Zero => {
                    log::debug!("Line {line}: {e}, using zero");
                    Ok(field.zero())
                }
                Err(e) => Err(e),
            }
        })
        .collect()
}

/// Loads typed records from CSV text whose first row is a header.
///
/// Columns are located by name, so column order and extra columns in the
/// file do not matter.
///
/// # Errors
///
/// Returns [`LoadError`] if the CSV is malformed, a schema column is
/// missing from the header, or (in strict mode) any row is rejected.
pub fn load_records<R: TabularRecord>(
    text: &str,
    options: LoadOptions,
) -> Result<LoadReport<R>, LoadError> {
    let schema = R::schema();
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let columns = resolve_columns(schema, reader.headers()?)?;
    let mut report = LoadReport::default();

    for result in reader.records() {
        let record = result?;
        if record.iter().all(str::is_empty) {
            continue;
        }
        let line = record.position().map_or(0, csv::Position::line);

        let built = parse_cells(schema, &columns, &record, line)
            .and_then(|values| R::from_row(&Row::new(schema, values)));

        match built {
            Ok(r) => report.records.push(r),
            Err(error) if options.strict => return Err(LoadError::Parse { line, source: error }),
            Err(error) => {
                log::warn!("Rejected line {line}: {error}");
                report.rejected.push(Rejection { line, error });
            }
        }
    }

    log::info!(
        "Loaded {} records ({} rejected)",
        report.records.len(),
        report.rejected.len()
    );

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FieldKind;

    #[derive(Debug, PartialEq)]
    struct Pair {
        key: String,
        amount: u64,
    }

    impl TabularRecord for Pair {
        fn schema() -> &'static [FieldSpec] {
            const SCHEMA: &[FieldSpec] = &[
                FieldSpec::key("Key", FieldKind::Text).with_aliases(&["Id"]),
                FieldSpec::measure("Amount"),
            ];
            SCHEMA
        }

        fn from_row(row: &Row<'_>) -> Result<Self, ParseError> {
            Ok(Self {
                key: row.text(0)?.to_string(),
                amount: row.count(1)?,
            })
        }
    }

    #[test]
    fn loads_by_header_name() {
        let report =
            load_records::<Pair>("Extra,Amount,Key\nx,5,a\ny,7,b\n", LoadOptions::default())
                .unwrap();
        assert_eq!(
            report.records,
            vec![
                Pair {
                    key: "a".to_string(),
                    amount: 5
                },
                Pair {
                    key: "b".to_string(),
                    amount: 7
                },
            ]
        );
        assert!(report.rejected.is_empty());
    }

    #[test]
    fn invalid_measure_becomes_zero() {
        let report =
            load_records::<Pair>("Key,Amount\na,oops\nb,\n", LoadOptions::default()).unwrap();
        assert_eq!(report.records.len(), 2);
        assert!(report.records.iter().all(|p| p.amount == 0));
    }

    #[test]
    fn invalid_key_rejects_row_with_line_number() {
        let report =
            load_records::<Pair>("Key,Amount\na,1\n,2\nc,3\n", LoadOptions::default()).unwrap();
        assert_eq!(report.records.len(), 2);
        assert_eq!(report.rejected.len(), 1);
        assert_eq!(report.rejected[0].line, 3);
        assert_eq!(report.rejected[0].error.field, "Key");
    }

    #[test]
    fn strict_mode_fails_on_rejection() {
        let err = load_records::<Pair>(
            "Key,Amount\n,2\n",
            LoadOptions { strict: true },
        )
        .unwrap_err();
        assert!(matches!(err, LoadError::Parse { line: 2, .. }));
    }

    #[test]
    fn missing_column_is_an_error() {
        let err = load_records::<Pair>("Key\na\n", LoadOptions::default()).unwrap_err();
        assert!(matches!(err, LoadError::MissingColumn { field } if field == "Amount"));
    }

    #[test]
    fn header_alias_and_case_fallback() {
        let report = load_records::<Pair>("id,AMOUNT\nz,9\n", LoadOptions::default()).unwrap();
        assert_eq!(report.records[0].key, "z");
        assert_eq!(report.records[0].amount, 9);
    }

    #[test]
    fn short_rows_use_field_policy() {
        let report = load_records::<Pair>("Key,Amount\nq\n", LoadOptions::default()).unwrap();
        assert_eq!(report.records[0].amount, 0);
    }
}
