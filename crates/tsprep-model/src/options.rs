//! Configuration options for a preprocessing run.

use serde::{Deserialize, Serialize};

/// Default RNG seed for oversampling.
pub const DEFAULT_SEED: u64 = 42;

/// Default prefix for per-file outputs of a fitting run.
pub const DEFAULT_OUTPUT_PREFIX: &str = "preprocessed_";

/// When the min-max scaler is (re)fit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScalerPolicy {
    /// Fit on the first non-empty file, then only transform.
    #[default]
    FitOnce,
    /// Refit on every non-empty file. Outputs are not comparable across files.
    FitPerFile,
}

/// When label encoders are (re)fit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EncoderPolicy {
    /// Refit on every file; the latest file's vocabulary replaces the mapping.
    #[default]
    FitPerFile,
    /// Fit on the first file; unseen categories later on are an error.
    FitOnce,
    /// Fit on the first file; unseen categories get new codes appended.
    Extend,
}

/// How auxiliary columns are reattached after oversampling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AuxAlignment {
    /// Every output row carries the auxiliary values of its source row.
    #[default]
    Provenance,
    /// Auxiliary values are aligned to the first N positions of the input.
    ///
    /// Rows appended by oversampling past the input height get nulls.
    Positional,
}

/// Fit policies for the transform state, one flag per field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TransformPolicy {
    pub scaler: ScalerPolicy,
    pub encoder: EncoderPolicy,
}

/// Options controlling a preprocessing run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineOptions {
    /// Scaler and encoder fit policies.
    pub transform: TransformPolicy,

    /// Auxiliary column handling in the class balancer.
    pub aux_alignment: AuxAlignment,

    /// Seed for the oversampling RNG.
    pub seed: u64,

    /// Prefix prepended to each input file name to name its output.
    pub output_prefix: String,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            transform: TransformPolicy::default(),
            aux_alignment: AuxAlignment::default(),
            seed: DEFAULT_SEED,
            output_prefix: DEFAULT_OUTPUT_PREFIX.to_string(),
        }
    }
}

impl PipelineOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_scaler_policy(mut self, policy: ScalerPolicy) -> Self {
        self.transform.scaler = policy;
        self
    }

    #[must_use]
    pub fn with_encoder_policy(mut self, policy: EncoderPolicy) -> Self {
        self.transform.encoder = policy;
        self
    }

    #[must_use]
    pub fn with_aux_alignment(mut self, alignment: AuxAlignment) -> Self {
        self.aux_alignment = alignment;
        self
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    #[must_use]
    pub fn with_output_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.output_prefix = prefix.into();
        self
    }
}
