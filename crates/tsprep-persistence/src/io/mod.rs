//! File I/O for run artifacts.
//!
//! This module handles:
//! - Atomic writes (temp file + rename) for every artifact
//! - Saving and loading transform state with format validation
//! - JSON manifest and run report
//! - Output tables as CSV
//! - Source file hashing

mod atomic;
mod hash;
mod json;
mod load;
mod save;
mod table;

pub use atomic::write_atomic;
pub use hash::{compute_file_hash, fingerprint};
pub use json::{
    MANIFEST_FILE_NAME, REPORT_FILE_NAME, load_manifest, load_report, write_manifest, write_report,
};
pub use load::load_state;
pub use save::{STATE_FILE_NAME, save_state};
pub use table::write_frame_csv;
