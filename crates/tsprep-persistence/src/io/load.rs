//! Transform state loading.

use std::fs;
use std::path::Path;

use rkyv::util::AlignedVec;

use crate::error::{PersistenceError, Result};
use crate::types::{CURRENT_SCHEMA_VERSION, MAGIC_BYTES, StateFile};

/// Load transform state written by [`save_state`](crate::save_state).
pub fn load_state(path: &Path) -> Result<StateFile> {
    let bytes = fs::read(path).map_err(|e| PersistenceError::io("read", path, e))?;
    let state = parse_state_bytes(&bytes, path)?;
    tracing::info!(path = %path.display(), "loaded transform state");
    Ok(state)
}

fn parse_state_bytes(bytes: &[u8], path: &Path) -> Result<StateFile> {
    // magic (4) + version (4) + some payload
    if bytes.len() < 12 {
        return Err(PersistenceError::InvalidFormat {
            path: path.to_path_buf(),
            reason: "File too small".to_string(),
        });
    }

    if bytes[0..4] != MAGIC_BYTES {
        return Err(PersistenceError::InvalidFormat {
            path: path.to_path_buf(),
            reason: "Not a tsprep state file (invalid magic bytes)".to_string(),
        });
    }

    let version = u32::from_le_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]);
    if version > CURRENT_SCHEMA_VERSION {
        return Err(PersistenceError::UnsupportedVersion {
            found: version,
            max_supported: CURRENT_SCHEMA_VERSION,
            path: path.to_path_buf(),
        });
    }

    // The payload sits at offset 8 of the file buffer; rkyv needs it aligned.
    let mut payload: AlignedVec<16> = AlignedVec::with_capacity(bytes.len() - 8);
    payload.extend_from_slice(&bytes[8..]);

    rkyv::from_bytes::<StateFile, rkyv::rancor::Error>(&payload).map_err(|e| {
        PersistenceError::Deserialization {
            source: Box::new(std::io::Error::other(format!(
                "rkyv deserialization failed: {e}"
            ))),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::save::save_state;
    use crate::types::{PolicySnapshot, ScalerSnapshot, SourceFingerprint};
    use tempfile::tempdir;

    #[test]
    fn test_load_state_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("state.bin");

        let mut state = StateFile::new(vec!["feat1".into()], PolicySnapshot::default());
        state.scaler = Some(ScalerSnapshot {
            features: vec!["feat1".into()],
            data_min: vec![1.0],
            data_max: vec![3.0],
        });
        state.scaler_fitted_on = Some(SourceFingerprint::new("a.csv", "ab12", 10));
        save_state(&mut state, &path).unwrap();

        let loaded = load_state(&path).unwrap();
        assert_eq!(loaded, state);
        assert!(loaded.created_at().is_some());
    }

    #[test]
    fn test_load_invalid_magic() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("invalid.bin");
        fs::write(&path, b"NOT_A_STATE_FILE_DATA").unwrap();

        let result = load_state(&path);
        assert!(matches!(
            result,
            Err(PersistenceError::InvalidFormat { .. })
        ));
    }

    #[test]
    fn test_load_unsupported_version() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("future.bin");

        let mut bytes = Vec::new();
        bytes.extend_from_slice(&MAGIC_BYTES);
        bytes.extend_from_slice(&999u32.to_le_bytes());
        bytes.extend_from_slice(&[0u8; 100]);
        fs::write(&path, bytes).unwrap();

        let result = load_state(&path);
        assert!(matches!(
            result,
            Err(PersistenceError::UnsupportedVersion { .. })
        ));
    }

    #[test]
    fn test_load_truncated_payload() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("short.bin");

        let mut bytes = Vec::new();
        bytes.extend_from_slice(&MAGIC_BYTES);
        bytes.extend_from_slice(&1u32.to_le_bytes());
        bytes.extend_from_slice(&[0xFFu8; 4]);
        fs::write(&path, bytes).unwrap();

        assert!(matches!(
            load_state(&path),
            Err(PersistenceError::Deserialization { .. })
        ));
    }
}
