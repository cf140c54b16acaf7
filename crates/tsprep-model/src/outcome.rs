//! Per-file and per-run outcome types.

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::columns::GlobalFeatures;
use crate::options::PipelineOptions;

/// Stage of the per-file state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileStage {
    Read,
    Validate,
    Normalize,
    Transform,
    Balance,
    Write,
}

impl FileStage {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Read => "read",
            Self::Validate => "validate",
            Self::Normalize => "normalize",
            Self::Transform => "transform",
            Self::Balance => "balance",
            Self::Write => "write",
        }
    }
}

impl fmt::Display for FileStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A file that made it through every stage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WrittenFile {
    pub source: PathBuf,
    /// `None` when the run did not touch disk.
    pub output: Option<PathBuf>,
    pub rows_in: usize,
    /// Rows removed because their timestamp did not parse.
    pub rows_dropped: usize,
    pub rows_out: usize,
    /// Output row count per encoded label.
    pub class_counts: BTreeMap<u32, usize>,
}

/// Terminal state of one input file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum FileOutcome {
    Written(WrittenFile),
    Skipped {
        source: PathBuf,
        stage: FileStage,
        reason: String,
    },
}

impl FileOutcome {
    pub fn source(&self) -> &PathBuf {
        match self {
            Self::Written(written) => &written.source,
            Self::Skipped { source, .. } => source,
        }
    }

    pub fn is_written(&self) -> bool {
        matches!(self, Self::Written(_))
    }
}

/// Everything a run did, in input order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    pub options: PipelineOptions,
    pub global_features: GlobalFeatures,
    /// Files left out of the feature union because they could not be read.
    pub unreadable: Vec<PathBuf>,
    /// File whose feature distribution fitted the scaler.
    pub scaler_fitted_on: Option<PathBuf>,
    pub files: Vec<FileOutcome>,
}

impl RunReport {
    pub fn written_count(&self) -> usize {
        self.files.iter().filter(|file| file.is_written()).count()
    }

    pub fn skipped_count(&self) -> usize {
        self.files.len() - self.written_count()
    }

    pub fn has_skipped(&self) -> bool {
        self.skipped_count() > 0
    }
}
