//! Scaler, encoder and policy snapshots.

use rkyv::{Archive, Deserialize, Serialize};

/// Fitted min-max parameters, one entry per feature.
#[derive(Debug, Clone, PartialEq, Archive, Serialize, Deserialize)]
pub struct ScalerSnapshot {
    pub features: Vec<String>,
    pub data_min: Vec<f64>,
    pub data_max: Vec<f64>,
}

/// Encoder vocabulary; a class's code is its position.
#[derive(Debug, Clone, PartialEq, Eq, Archive, Serialize, Deserialize)]
#[rkyv(compare(PartialEq))]
pub struct EncoderSnapshot {
    pub classes: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Archive, Serialize, Deserialize)]
#[rkyv(compare(PartialEq))]
pub enum ScalerPolicySnapshot {
    #[default]
    FitOnce,
    FitPerFile,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Archive, Serialize, Deserialize)]
#[rkyv(compare(PartialEq))]
pub enum EncoderPolicySnapshot {
    #[default]
    FitPerFile,
    FitOnce,
    Extend,
}

/// Fit policies the state was produced with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Archive, Serialize, Deserialize)]
#[rkyv(compare(PartialEq))]
pub struct PolicySnapshot {
    pub scaler: ScalerPolicySnapshot,
    pub encoder: EncoderPolicySnapshot,
}

/// Identity of the input file that fitted the scaler.
#[derive(Debug, Clone, PartialEq, Eq, Archive, Serialize, Deserialize)]
#[rkyv(compare(PartialEq))]
pub struct SourceFingerprint {
    /// File name, without directory.
    pub file_name: String,

    /// SHA-256 of the file content, hex encoded.
    pub sha256: String,

    /// File size in bytes.
    pub file_size: u64,
}

impl SourceFingerprint {
    pub fn new(file_name: impl Into<String>, sha256: impl Into<String>, file_size: u64) -> Self {
        Self {
            file_name: file_name.into(),
            sha256: sha256.into(),
            file_size,
        }
    }
}
