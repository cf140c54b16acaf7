//! Error types for normalization, transforms and balancing.

use polars::prelude::PolarsError;
use thiserror::Error;

/// Per-file failures raised while normalizing or transforming a table.
#[derive(Debug, Error)]
pub enum TransformError {
    /// One or more mandatory columns are absent.
    #[error("missing mandatory columns: {}", missing.join(", "))]
    MissingColumns { missing: Vec<String> },

    /// The scaler was asked to fit on a table with no rows.
    #[error("cannot fit scaler on an empty table")]
    EmptyFit,

    /// A feature the scaler was fit on is not in the table.
    #[error("feature column '{column}' not found in table")]
    FeatureMismatch { column: String },

    /// Stored scaler parameters do not line up with its feature list.
    #[error("scaler has {features} features but {values} {kind} values")]
    ScalerShape {
        features: usize,
        values: usize,
        kind: &'static str,
    },

    /// A frozen transform was requested before the scaler was fit.
    #[error("scaler has not been fitted")]
    ScalerNotFitted,

    /// A frozen transform was requested before this column's encoder was fit.
    #[error("no fitted encoder for column '{column}'")]
    EncoderNotFitted { column: String },

    /// A frozen encoder met a category outside its vocabulary.
    #[error("unseen category '{value}' in column '{column}'")]
    UnseenCategory { column: String, value: String },

    /// Failed DataFrame operation.
    #[error("DataFrame operation failed: {0}")]
    DataFrame(#[from] PolarsError),
}

/// Failures of the class balancer.
#[derive(Debug, Error)]
pub enum BalanceError {
    /// No samples to oversample.
    #[error("cannot oversample an empty table")]
    EmptyInput,

    /// A label value is missing.
    #[error("label is null at row {row}")]
    NullLabel { row: usize },

    /// Failed DataFrame operation.
    #[error("DataFrame operation failed: {0}")]
    DataFrame(#[from] PolarsError),
}

/// Result type for transform operations.
pub type Result<T> = std::result::Result<T, TransformError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_columns_lists_names() {
        let err = TransformError::MissingColumns {
            missing: vec!["date".to_string(), "type".to_string()],
        };
        assert_eq!(err.to_string(), "missing mandatory columns: date, type");
    }

    #[test]
    fn polars_errors_convert() {
        let polars_err = PolarsError::ColumnNotFound("feat1".into());
        let err: TransformError = polars_err.into();
        assert!(matches!(err, TransformError::DataFrame(_)));
    }
}
