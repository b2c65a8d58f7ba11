//! Tabular taxonomy sources.
//!
//! A [`Table`] is an already-parsed grid of string cells with a header row.
//! CSV input is parsed with the first row as header:
//! ```csv
//! SFDR Indicator,Datapoint Name,Keywords
//! GHG emissions,Scope 1,"scope 1, direct emissions"
//! ```

use std::io::Read;
use std::path::Path;

use csv::ReaderBuilder;

use crate::error::{Result, TermscopeError};

/// A header row plus data rows of string cells.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    /// Build a table from headers and rows. Rows may be shorter than the
    /// header; missing cells read as empty.
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Table { headers, rows }
    }

    /// Parse CSV from any reader.
    ///
    /// Cells are trimmed and rows may have differing lengths.
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self> {
        let mut reader = ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(reader);

        let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
        if headers.iter().all(|h| h.is_empty()) {
            return Err(TermscopeError::schema("CSV header is empty"));
        }

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record?;
            rows.push(record.iter().map(str::to_string).collect());
        }

        Ok(Table { headers, rows })
    }

    /// Parse CSV held in a string.
    pub fn from_csv_str(input: &str) -> Result<Self> {
        Self::from_csv_reader(input.as_bytes())
    }

    /// Parse a CSV file.
    pub fn from_csv_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        Self::from_csv_reader(file)
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Index of the column named `name`.
    pub fn column(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Number of data rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Cell at (`row`, `column`), or `""` if the row is short.
    pub fn cell(&self, row: usize, column: usize) -> &str {
        self.rows
            .get(row)
            .and_then(|r| r.get(column))
            .map(String::as_str)
            .unwrap_or("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_csv_basic_parsing() {
        let table = Table::from_csv_str("a,b,c\n1,2,3\n4,5,6").unwrap();
        assert_eq!(table.headers(), &["a", "b", "c"]);
        assert_eq!(table.len(), 2);
        assert_eq!(table.cell(1, 2), "6");
        assert_eq!(table.column("b"), Some(1));
        assert_eq!(table.column("z"), None);
    }

    #[test]
    fn test_csv_quoted_fields() {
        let table = Table::from_csv_str(
            "Datapoint Name,Keywords\n\"Scope 1, direct\",\"scope 1, direct emissions\"",
        )
        .unwrap();
        assert_eq!(table.cell(0, 0), "Scope 1, direct");
        assert_eq!(table.cell(0, 1), "scope 1, direct emissions");
    }

    #[test]
    fn test_csv_with_trim_and_ragged_rows() {
        let table = Table::from_csv_str("a, b , c\n  x  , y\n").unwrap();
        assert_eq!(table.headers(), &["a", "b", "c"]);
        assert_eq!(table.cell(0, 0), "x");
        assert_eq!(table.cell(0, 1), "y");
        assert_eq!(table.cell(0, 2), "");
        assert_eq!(table.cell(5, 0), "");
    }

    #[test]
    fn test_csv_empty_input() {
        assert!(Table::from_csv_str("").is_err());
    }
}
