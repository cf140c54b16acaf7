//! Persistence types for transform state serialization.
//!
//! These types are plain rkyv-serializable snapshots of the runtime
//! transform types.

mod snapshot;
mod state;

pub use snapshot::{
    EncoderPolicySnapshot, EncoderSnapshot, PolicySnapshot, ScalerPolicySnapshot, ScalerSnapshot,
    SourceFingerprint,
};
pub use state::StateFile;

/// Current schema version.
///
/// Increment this when making breaking changes to the state format.
/// The loader will reject files with version > CURRENT_SCHEMA_VERSION.
pub const CURRENT_SCHEMA_VERSION: u32 = 1;

/// Magic bytes at the start of state files.
///
/// Format: "TSP" + version byte (0x01 for v1)
pub const MAGIC_BYTES: [u8; 4] = [b'T', b'S', b'P', 0x01];
