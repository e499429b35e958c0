//! Raw NEPLAN tables.
//!
//! Both NEPLAN files are tab-separated with a header row of column codes.
//! The whole file is read into memory, decoded as ISO-8859-1 and split into
//! typed cells: the numeric columns the caller names hold decimal-comma
//! numbers, every other column holds text, whatever its code. Blank cells
//! are null in both kinds.

use std::collections::HashMap;
use std::fs;
use std::io::Read;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use neplan_core::ConvertError;

use crate::helpers::{decode_latin1, parse_decimal_comma};

#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(Option<String>),
    Number(Option<f64>),
}

/// One data row. Cells are addressed by column code.
#[derive(Debug, Clone)]
pub struct RawRow {
    line: usize,
    columns: Arc<HashMap<String, usize>>,
    cells: Vec<Cell>,
}

impl RawRow {
    /// 1-based line of the row in its source file
    pub fn line(&self) -> usize {
        self.line
    }

    pub fn cell(&self, code: &str) -> Option<&Cell> {
        let idx = self.columns.get(code)?;
        self.cells.get(*idx)
    }

    /// Non-null text value of a text column.
    pub fn text(&self, code: &str) -> Option<&str> {
        match self.cell(code)? {
            Cell::Text(value) => value.as_deref(),
            Cell::Number(_) => None,
        }
    }

    /// Owned copy of [`RawRow::text`], for building records.
    pub fn text_owned(&self, code: &str) -> Option<String> {
        self.text(code).map(str::to_string)
    }

    /// Non-null value of a numeric column.
    pub fn number(&self, code: &str) -> Option<f64> {
        match self.cell(code)? {
            Cell::Number(value) => *value,
            Cell::Text(_) => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct RawTable {
    headers: Vec<String>,
    rows: Vec<RawRow>,
}

impl RawTable {
    /// Read a whole NEPLAN file from disk, parsing `numeric_columns` as
    /// numbers.
    pub fn read(path: &Path, numeric_columns: &[&str]) -> Result<Self> {
        let bytes = fs::read(path)
            .with_context(|| format!("reading NEPLAN file '{}'; ensure file exists", path.display()))?;
        Self::from_bytes(&bytes, numeric_columns)
            .with_context(|| format!("parsing NEPLAN file '{}'", path.display()))
    }

    pub fn from_bytes(bytes: &[u8], numeric_columns: &[&str]) -> Result<Self> {
        Self::from_reader(bytes, numeric_columns)
    }

    pub fn from_reader<R: Read>(reader: R, numeric_columns: &[&str]) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(b'\t')
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        let headers: Vec<String> = reader
            .byte_headers()
            .context("reading header row")?
            .iter()
            .map(|h| decode_latin1(h).trim().to_string())
            .collect();

        let mut index = HashMap::with_capacity(headers.len());
        for (i, name) in headers.iter().enumerate() {
            index.entry(name.clone()).or_insert(i);
        }
        let columns = Arc::new(index);
        let numeric: Vec<bool> = headers
            .iter()
            .map(|h| numeric_columns.contains(&h.as_str()))
            .collect();

        let mut rows = Vec::new();
        for record in reader.byte_records() {
            let record = record.context("reading data row")?;
            let line = record
                .position()
                .map(|p| p.line() as usize)
                .unwrap_or(rows.len() + 2);

            let mut cells = Vec::with_capacity(headers.len());
            for (i, is_numeric) in numeric.iter().enumerate() {
                let raw = record.get(i).map(decode_latin1).unwrap_or_default();
                let cell = if *is_numeric {
                    let value =
                        parse_decimal_comma(&raw).map_err(|_| ConvertError::MalformedNumber {
                            column: headers[i].clone(),
                            line,
                            value: raw.clone(),
                        })?;
                    Cell::Number(value)
                } else if raw.is_empty() {
                    Cell::Text(None)
                } else {
                    Cell::Text(Some(raw))
                };
                cells.push(cell);
            }

            rows.push(RawRow {
                line,
                columns: Arc::clone(&columns),
                cells,
            });
        }

        Ok(Self { headers, rows })
    }

    pub fn rows(&self) -> &[RawRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Fail with [`ConvertError::MissingColumn`] on the first absent code.
    pub fn require_columns(&self, codes: &[&str]) -> Result<(), ConvertError> {
        match codes
            .iter()
            .find(|code| !self.headers.iter().any(|h| h.as_str() == **code))
        {
            Some(missing) => Err(ConvertError::MissingColumn {
                column: missing.to_string(),
            }),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_latin1_and_decimal_comma() {
        let data = b"id\tc1\tr1\n1\tSt\xfctz\t0,5\n";
        let table = RawTable::from_bytes(data, &["id", "r1"]).unwrap();
        assert_eq!(table.len(), 1);
        let row = &table.rows()[0];
        assert_eq!(row.number("id"), Some(1.0));
        assert_eq!(row.text("c1"), Some("Stütz"));
        assert_eq!(row.number("r1"), Some(0.5));
        assert_eq!(row.line(), 2);
    }

    #[test]
    fn blank_and_short_rows_are_null() {
        let data = b"c1\tc2\tr1\nK1\t\t\nK2\n";
        let table = RawTable::from_bytes(data, &["r1"]).unwrap();
        let rows = table.rows();
        assert_eq!(rows[0].text("c2"), None);
        assert_eq!(rows[0].number("r1"), None);
        assert_eq!(rows[1].text("c1"), Some("K2"));
        assert_eq!(rows[1].text("c2"), None);
    }

    #[test]
    fn malformed_number_reports_column_and_line() {
        let data = b"c1\tr7\nK1\t1,0\nK2\tabc\n";
        let err = RawTable::from_bytes(data, &["r7"]).unwrap_err();
        match err.downcast_ref::<ConvertError>() {
            Some(ConvertError::MalformedNumber {
                column,
                line,
                value,
            }) => {
                assert_eq!(column, "r7");
                assert_eq!(*line, 3);
                assert_eq!(value, "abc");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn unlisted_columns_stay_text() {
        let data = b"c1\tr1\tr9\nK1\t0,5\tn/a\n";
        let table = RawTable::from_bytes(data, &["r1"]).unwrap();
        let row = &table.rows()[0];
        assert_eq!(row.number("r1"), Some(0.5));
        assert_eq!(row.text("r9"), Some("n/a"));
        assert_eq!(row.number("r9"), None);
    }

    #[test]
    fn require_columns_names_first_missing() {
        let table = RawTable::from_bytes(b"c1\tr1\n", &[]).unwrap();
        assert!(table.is_empty());
        assert!(table.require_columns(&["c1", "r1"]).is_ok());
        assert_eq!(
            table.require_columns(&["c1", "r7", "r8"]),
            Err(ConvertError::MissingColumn {
                column: "r7".to_string()
            })
        );
    }

    #[test]
    fn unknown_code_reads_as_null() {
        let table = RawTable::from_bytes(b"c1\nK1\n", &[]).unwrap();
        assert_eq!(table.rows()[0].text("c9"), None);
        assert_eq!(table.rows()[0].number("c1"), None);
    }
}
