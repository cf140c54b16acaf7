//! Transform state saving.

use std::path::Path;

use crate::error::{PersistenceError, Result};
use crate::io::atomic::write_atomic;
use crate::types::{CURRENT_SCHEMA_VERSION, MAGIC_BYTES, StateFile};

/// File name of the transform state inside an output directory.
pub const STATE_FILE_NAME: &str = "scalers_and_encoders.bin";

/// Save transform state atomically.
pub fn save_state(state: &mut StateFile, path: &Path) -> Result<()> {
    state.touch();
    let bytes = serialize_state(state)?;
    write_atomic(path, &bytes)?;
    tracing::info!(path = %path.display(), "saved transform state");
    Ok(())
}

/// Serialize state to bytes.
///
/// Format:
/// - 4 bytes: Magic ("TSP\x01")
/// - 4 bytes: Schema version (u32 little-endian)
/// - N bytes: rkyv payload
fn serialize_state(state: &StateFile) -> Result<Vec<u8>> {
    let rkyv_bytes = rkyv::to_bytes::<rkyv::rancor::Error>(state).map_err(|e| {
        PersistenceError::Serialization {
            source: Box::new(std::io::Error::other(format!(
                "rkyv serialization failed: {e}"
            ))),
        }
    })?;

    let mut output = Vec::with_capacity(8 + rkyv_bytes.len());
    output.extend_from_slice(&MAGIC_BYTES);
    output.extend_from_slice(&CURRENT_SCHEMA_VERSION.to_le_bytes());
    output.extend_from_slice(&rkyv_bytes);
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PolicySnapshot;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn saved_file_starts_with_header() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(STATE_FILE_NAME);

        let mut state = StateFile::new(vec!["feat1".into()], PolicySnapshot::default());
        save_state(&mut state, &path).unwrap();

        let bytes = fs::read(&path).unwrap();
        assert_eq!(&bytes[0..4], &MAGIC_BYTES);
        assert_eq!(&bytes[4..8], &1u32.to_le_bytes());
    }
}
