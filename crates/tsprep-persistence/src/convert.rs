//! Conversion traits between runtime transform types and persistence types.
//!
//! The scaler is the one type that cannot be restored infallibly: its stored
//! parameters must line up with its feature list. It is rebuilt through
//! [`restore_state`] instead of [`FromSnapshot`].

use std::collections::BTreeMap;
use std::path::Path;

use tsprep_model::{EncoderPolicy, GlobalFeatures, ScalerPolicy, TransformPolicy};
use tsprep_transform::{LabelEncoder, MinMaxScaler, TransformState};

use crate::error::{PersistenceError, Result};
use crate::types::{
    EncoderPolicySnapshot, EncoderSnapshot, PolicySnapshot, ScalerPolicySnapshot, ScalerSnapshot,
    SourceFingerprint, StateFile,
};

/// Trait for types that can be converted to a persistence snapshot.
pub trait ToSnapshot {
    /// The snapshot type.
    type Snapshot;

    /// Convert to a snapshot for persistence.
    fn to_snapshot(&self) -> Self::Snapshot;
}

/// Trait for types that can be created from a persistence snapshot.
pub trait FromSnapshot: Sized {
    /// The snapshot type.
    type Snapshot;

    /// Create from a snapshot.
    fn from_snapshot(snapshot: Self::Snapshot) -> Self;
}

impl ToSnapshot for MinMaxScaler {
    type Snapshot = ScalerSnapshot;

    fn to_snapshot(&self) -> ScalerSnapshot {
        ScalerSnapshot {
            features: self.features().to_vec(),
            data_min: self.data_min().to_vec(),
            data_max: self.data_max().to_vec(),
        }
    }
}

impl ToSnapshot for LabelEncoder {
    type Snapshot = EncoderSnapshot;

    fn to_snapshot(&self) -> EncoderSnapshot {
        EncoderSnapshot {
            classes: self.classes().to_vec(),
        }
    }
}

impl FromSnapshot for LabelEncoder {
    type Snapshot = EncoderSnapshot;

    fn from_snapshot(snapshot: EncoderSnapshot) -> Self {
        LabelEncoder::from_classes(snapshot.classes)
    }
}

impl ToSnapshot for TransformPolicy {
    type Snapshot = PolicySnapshot;

    fn to_snapshot(&self) -> PolicySnapshot {
        PolicySnapshot {
            scaler: match self.scaler {
                ScalerPolicy::FitOnce => ScalerPolicySnapshot::FitOnce,
                ScalerPolicy::FitPerFile => ScalerPolicySnapshot::FitPerFile,
            },
            encoder: match self.encoder {
                EncoderPolicy::FitPerFile => EncoderPolicySnapshot::FitPerFile,
                EncoderPolicy::FitOnce => EncoderPolicySnapshot::FitOnce,
                EncoderPolicy::Extend => EncoderPolicySnapshot::Extend,
            },
        }
    }
}

impl FromSnapshot for TransformPolicy {
    type Snapshot = PolicySnapshot;

    fn from_snapshot(snapshot: PolicySnapshot) -> Self {
        TransformPolicy {
            scaler: match snapshot.scaler {
                ScalerPolicySnapshot::FitOnce => ScalerPolicy::FitOnce,
                ScalerPolicySnapshot::FitPerFile => ScalerPolicy::FitPerFile,
            },
            encoder: match snapshot.encoder {
                EncoderPolicySnapshot::FitPerFile => EncoderPolicy::FitPerFile,
                EncoderPolicySnapshot::FitOnce => EncoderPolicy::FitOnce,
                EncoderPolicySnapshot::Extend => EncoderPolicy::Extend,
            },
        }
    }
}

impl StateFile {
    /// Snapshot a run's final transform state.
    pub fn from_state(
        features: &GlobalFeatures,
        state: &TransformState,
        scaler_fitted_on: Option<SourceFingerprint>,
    ) -> Self {
        let mut file = StateFile::new(features.names().to_vec(), state.policy().to_snapshot());
        file.scaler = state.scaler().map(ToSnapshot::to_snapshot);
        file.encoders = state
            .encoders()
            .iter()
            .map(|(column, encoder)| (column.clone(), encoder.to_snapshot()))
            .collect();
        file.scaler_fitted_on = scaler_fitted_on;
        file
    }
}

/// Rebuild the feature set and transform state stored in `file`.
///
/// `path` is only used for error reporting.
pub fn restore_state(file: StateFile, path: &Path) -> Result<(GlobalFeatures, TransformState)> {
    let features = GlobalFeatures::from(file.global_features);

    let scaler = match file.scaler {
        Some(snapshot) => {
            if snapshot.features.as_slice() != features.names() {
                return Err(PersistenceError::InvalidFormat {
                    path: path.to_path_buf(),
                    reason: "scaler features do not match the global feature set".to_string(),
                });
            }
            let scaler =
                MinMaxScaler::from_parts(snapshot.features, snapshot.data_min, snapshot.data_max)
                    .map_err(|e| PersistenceError::InvalidFormat {
                        path: path.to_path_buf(),
                        reason: e.to_string(),
                    })?;
            Some(scaler)
        }
        None => None,
    };

    let encoders: BTreeMap<String, LabelEncoder> = file
        .encoders
        .into_iter()
        .map(|(column, snapshot)| (column, LabelEncoder::from_snapshot(snapshot)))
        .collect();

    let state = TransformState::from_parts(
        TransformPolicy::from_snapshot(file.policies),
        scaler,
        encoders,
    );
    Ok((features, state))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fitted_state() -> (GlobalFeatures, TransformState) {
        let features = GlobalFeatures::from_columns(["feat1", "feat2"]);
        let scaler = MinMaxScaler::from_parts(
            features.names().to_vec(),
            vec![0.0, -1.0],
            vec![10.0, 1.0],
        )
        .unwrap();
        let encoders = BTreeMap::from([
            ("label".to_string(), LabelEncoder::fit(&["normal", "attack"])),
            ("type".to_string(), LabelEncoder::fit(&["tcp"])),
        ]);
        let policy = TransformPolicy {
            encoder: EncoderPolicy::Extend,
            ..TransformPolicy::default()
        };
        (features, TransformState::from_parts(policy, Some(scaler), encoders))
    }

    #[test]
    fn state_survives_snapshot_and_restore() {
        let (features, state) = fitted_state();
        let file = StateFile::from_state(&features, &state, None);
        assert_eq!(file.policies.encoder, EncoderPolicySnapshot::Extend);
        assert_eq!(file.encoders["label"].classes, ["attack", "normal"]);

        let (restored_features, restored) = restore_state(file, Path::new("s.bin")).unwrap();
        assert_eq!(restored_features, features);
        assert_eq!(restored.scaler(), state.scaler());
        assert_eq!(restored.encoders(), state.encoders());
        assert_eq!(restored.policy(), state.policy());
    }

    #[test]
    fn mismatched_scaler_is_rejected() {
        let (features, state) = fitted_state();
        let mut file = StateFile::from_state(&features, &state, None);
        file.global_features = vec!["other".to_string()];

        let err = restore_state(file, Path::new("s.bin")).unwrap_err();
        assert!(matches!(err, PersistenceError::InvalidFormat { .. }));
    }
}
