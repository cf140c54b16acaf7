//! Root state file type.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use rkyv::{Archive, Deserialize, Serialize};

use super::{EncoderSnapshot, PolicySnapshot, ScalerSnapshot, SourceFingerprint};

/// Everything needed to replay a run's transforms on new files.
///
/// This is the top-level type serialized to `scalers_and_encoders.bin`.
#[derive(Debug, Clone, PartialEq, Archive, Serialize, Deserialize)]
pub struct StateFile {
    /// Schema version (for future migrations).
    pub schema_version: u32,

    /// When the state was written (RFC 3339).
    pub created_at: String,

    /// Sorted global feature names.
    pub global_features: Vec<String>,

    /// Fitted scaler; absent when no file produced a non-empty table.
    pub scaler: Option<ScalerSnapshot>,

    /// Encoders keyed by column (`label`, `type`).
    pub encoders: BTreeMap<String, EncoderSnapshot>,

    /// Fit policies of the run.
    pub policies: PolicySnapshot,

    /// Input file the scaler was fitted on.
    pub scaler_fitted_on: Option<SourceFingerprint>,
}

impl StateFile {
    /// Create an empty state file for `global_features`.
    pub fn new(global_features: Vec<String>, policies: PolicySnapshot) -> Self {
        Self {
            schema_version: super::CURRENT_SCHEMA_VERSION,
            created_at: Utc::now().to_rfc3339(),
            global_features,
            scaler: None,
            encoders: BTreeMap::new(),
            policies,
            scaler_fitted_on: None,
        }
    }

    /// Update the creation timestamp.
    pub fn touch(&mut self) {
        self.created_at = Utc::now().to_rfc3339();
    }

    /// Parse the created_at timestamp.
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(&self.created_at)
            .ok()
            .map(|dt| dt.with_timezone(&Utc))
    }
}
