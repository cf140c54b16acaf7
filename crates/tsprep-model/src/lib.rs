//! Shared types for time-series CSV preprocessing.
//!
//! - **columns**: mandatory column names and the immutable [`GlobalFeatures`] set
//! - **options**: per-field fit policies and run options
//! - **outcome**: per-file terminal states and the run report

pub mod columns;
pub mod options;
pub mod outcome;

pub use columns::{
    CATEGORICAL_COLUMNS, DATE_COLUMN, GlobalFeatures, LABEL_COLUMN, MANDATORY_COLUMNS,
    TIME_COLUMN, TIMESTAMP_COLUMN, TRAILING_COLUMNS, TYPE_COLUMN, is_mandatory, is_reserved,
};
pub use options::{
    AuxAlignment, DEFAULT_OUTPUT_PREFIX, DEFAULT_SEED, EncoderPolicy, PipelineOptions,
    ScalerPolicy, TransformPolicy,
};
pub use outcome::{FileOutcome, FileStage, RunReport, WrittenFile};
