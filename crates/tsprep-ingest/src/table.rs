//! Raw text CSV tables.
//!
//! Every cell is kept as the exact text found in the file; type coercion is
//! left to later stages.

use std::path::Path;

use csv::{ReaderBuilder, StringRecord};

use crate::error::{IngestError, Result};

/// A header plus rows of raw text cells.
///
/// Every row has exactly `headers.len()` cells.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CsvTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl CsvTable {
    /// Build a table from in-memory values, padding short rows.
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        let width = headers.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, String::new());
                row
            })
            .collect();
        Self { headers, rows }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Index of the first column named `name`.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|header| header == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    /// Cell values of the first column named `name`.
    pub fn column(&self, name: &str) -> Option<Vec<&str>> {
        let idx = self.column_index(name)?;
        Some(self.rows.iter().map(|row| row[idx].as_str()).collect())
    }
}

/// Trimmed header name; blank cells are named `Unnamed: <position>`.
fn normalize_header(position: usize, raw: &str) -> String {
    let name = raw.trim_matches('\u{feff}').trim();
    if name.is_empty() {
        format!("Unnamed: {position}")
    } else {
        name.to_string()
    }
}

fn reader_for(path: &Path) -> Result<csv::Reader<std::fs::File>> {
    ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .map_err(|e| IngestError::from_csv(path, &e))
}

fn parse_headers(path: &Path, record: &StringRecord) -> Result<Vec<String>> {
    if record.is_empty() {
        return Err(IngestError::EmptyCsv {
            path: path.to_path_buf(),
        });
    }
    if record
        .iter()
        .all(|raw| raw.trim_matches('\u{feff}').trim().is_empty())
    {
        return Err(IngestError::NoHeaderDetected {
            path: path.to_path_buf(),
        });
    }
    Ok(record
        .iter()
        .enumerate()
        .map(|(position, raw)| normalize_header(position, raw))
        .collect())
}

/// Reads a whole CSV file as raw text.
///
/// Rows shorter than the header are padded with empty cells. A row longer
/// than the header makes the whole file unreadable.
pub fn read_csv_table(path: &Path) -> Result<CsvTable> {
    let mut reader = reader_for(path)?;
    let header_record = reader
        .headers()
        .map_err(|e| IngestError::from_csv(path, &e))?
        .clone();
    let headers = parse_headers(path, &header_record)?;
    let width = headers.len();

    let mut rows = Vec::new();
    for (idx, record) in reader.records().enumerate() {
        let record = record.map_err(|e| IngestError::from_csv(path, &e))?;
        if record.len() > width {
            return Err(IngestError::RaggedRecord {
                path: path.to_path_buf(),
                record: idx as u64 + 1,
                expected: width,
                found: record.len(),
            });
        }
        let mut row: Vec<String> = record.iter().map(str::to_string).collect();
        row.resize(width, String::new());
        rows.push(row);
    }

    tracing::debug!(
        path = %path.display(),
        columns = width,
        rows = rows.len(),
        "read csv table"
    );
    Ok(CsvTable { headers, rows })
}
