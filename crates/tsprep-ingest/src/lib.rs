//! Input discovery and CSV loading.
//!
//! Input tables are read as raw text: no type inference, no trimming of
//! cells. Header names are trimmed and a UTF-8 BOM is stripped.
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use tsprep_ingest::{list_csv_files, read_csv_table};
//!
//! for path in list_csv_files(Path::new("raw_data"))? {
//!     let table = read_csv_table(&path)?;
//!     println!("{}: {} rows", path.display(), table.row_count());
//! }
//! ```

mod discovery;
mod error;
mod table;

// === Error Types ===
pub use error::{IngestError, Result};

// === CSV Reading ===
pub use table::{CsvTable, read_csv_table};

// === File Discovery ===
pub use discovery::list_csv_files;
