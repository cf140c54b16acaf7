//! Persistent artifacts of a preprocessing run.
//!
//! - `global_features.json`: the feature manifest, a JSON array of names
//! - `scalers_and_encoders.bin`: the fitted transform state
//! - `run_report.json`: per-file outcomes
//! - the per-file output tables
//!
//! Every file is written atomically (temp file + rename).
//!
//! # State File Format
//!
//! ```text
//! +------------------+
//! | Magic: "TSP\x01" | 4 bytes - file identification
//! +------------------+
//! | Version: 1       | 4 bytes - u32 little-endian schema version
//! +------------------+
//! | rkyv Payload     | Variable
//! +------------------+
//! ```

mod convert;
mod error;
mod io;
mod types;

pub use convert::{FromSnapshot, ToSnapshot, restore_state};
pub use error::{PersistenceError, Result};
pub use io::{
    MANIFEST_FILE_NAME, REPORT_FILE_NAME, STATE_FILE_NAME, compute_file_hash, fingerprint,
    load_manifest, load_report, load_state, save_state, write_atomic,
    write_frame_csv, write_manifest, write_report,
};
pub use types::{
    CURRENT_SCHEMA_VERSION, EncoderPolicySnapshot, EncoderSnapshot, MAGIC_BYTES, PolicySnapshot,
    ScalerPolicySnapshot, ScalerSnapshot, SourceFingerprint, StateFile,
};
