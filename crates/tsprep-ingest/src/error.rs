//! Error types for CSV ingestion.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while listing or reading input files.
#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
    /// Directory not found or not a directory.
    #[error("directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    /// CSV file not found.
    #[error("CSV file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to read directory entries.
    #[error("failed to read directory {path}: {source}")]
    DirectoryRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to open or read a file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // === CSV Parsing Errors ===
    /// The CSV reader rejected the file.
    #[error("failed to parse CSV {path}: {message}")]
    CsvParse { path: PathBuf, message: String },

    /// A record has more fields than the header.
    #[error("record {record} in {path} has {found} fields, header has {expected}")]
    RaggedRecord {
        path: PathBuf,
        record: u64,
        expected: usize,
        found: usize,
    },

    /// CSV file has no header row.
    #[error("CSV file is empty: {path}")]
    EmptyCsv { path: PathBuf },

    /// Header row has no usable column names.
    #[error("could not detect header row in {path}")]
    NoHeaderDetected { path: PathBuf },
}

impl IngestError {
    pub(crate) fn from_csv(path: &std::path::Path, error: &csv::Error) -> Self {
        if let csv::ErrorKind::Io(io) = error.kind() {
            if io.kind() == std::io::ErrorKind::NotFound {
                return Self::FileNotFound {
                    path: path.to_path_buf(),
                };
            }
        }
        Self::CsvParse {
            path: path.to_path_buf(),
            message: error.to_string(),
        }
    }
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = IngestError::FileNotFound {
            path: PathBuf::from("/path/to/file.csv"),
        };
        assert_eq!(err.to_string(), "CSV file not found: /path/to/file.csv");
    }

    #[test]
    fn test_ragged_record_display() {
        let err = IngestError::RaggedRecord {
            path: PathBuf::from("a.csv"),
            record: 3,
            expected: 2,
            found: 4,
        };
        assert_eq!(
            err.to_string(),
            "record 3 in a.csv has 4 fields, header has 2"
        );
    }
}
