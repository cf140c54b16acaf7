//! Cross-file normalization of labeled time-series tables.
//!
//! The stages, in the order a run applies them:
//!
//! - **schema**: union of all feature columns across the input files
//! - **normalize**: per-file validation, timestamp derivation and reindexing
//! - **state**: min-max scaler and label encoders fitted per [`TransformPolicy`]
//! - **balance**: seeded random oversampling to the majority class count
//!
//! [`TransformPolicy`]: tsprep_model::TransformPolicy

pub mod balance;
pub mod encoder;
pub mod error;
pub mod frame;
pub mod normalize;
pub mod scaler;
pub mod schema;
pub mod state;
pub mod timestamp;

pub use balance::{Balanced, RandomOverSampler};
pub use encoder::LabelEncoder;
pub use error::{BalanceError, Result, TransformError};
pub use normalize::{NormalizedTable, coerce_feature, missing_mandatory, normalize_table};
pub use scaler::MinMaxScaler;
pub use schema::{SchemaUnion, unify_schema};
pub use state::{TransformState, Transformed};
pub use timestamp::{format_timestamp, parse_timestamp};
