//! Feature manifest and run report.

use std::fs;
use std::path::Path;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tsprep_model::{GlobalFeatures, RunReport};

use crate::error::{PersistenceError, Result};
use crate::io::atomic::write_atomic;

/// File name of the global feature manifest inside an output directory.
pub const MANIFEST_FILE_NAME: &str = "global_features.json";

/// File name of the run report inside an output directory.
pub const REPORT_FILE_NAME: &str = "run_report.json";

fn write_json<T: Serialize>(value: &T, path: &Path) -> Result<()> {
    let mut bytes = serde_json::to_vec_pretty(value).map_err(|source| PersistenceError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    bytes.push(b'\n');
    write_atomic(path, &bytes)
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let bytes = fs::read(path).map_err(|e| PersistenceError::io("read", path, e))?;
    serde_json::from_slice(&bytes).map_err(|source| PersistenceError::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// Write the feature list as a JSON array of strings.
pub fn write_manifest(features: &GlobalFeatures, path: &Path) -> Result<()> {
    write_json(features, path)?;
    tracing::info!(path = %path.display(), features = features.len(), "wrote feature manifest");
    Ok(())
}

pub fn load_manifest(path: &Path) -> Result<GlobalFeatures> {
    read_json(path)
}

pub fn write_report(report: &RunReport, path: &Path) -> Result<()> {
    write_json(report, path)?;
    tracing::info!(path = %path.display(), "wrote run report");
    Ok(())
}

pub fn load_report(path: &Path) -> Result<RunReport> {
    read_json(path)
}
