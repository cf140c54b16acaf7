//! Global feature discovery across all input files.

use std::fmt::Display;
use std::path::{Path, PathBuf};

use tsprep_model::GlobalFeatures;

/// Outcome of the schema pass.
#[derive(Debug, Clone, Default)]
pub struct SchemaUnion {
    /// Sorted union of all non-reserved columns.
    pub features: GlobalFeatures,
    /// Files that could not be read, with the reason.
    pub unreadable: Vec<(PathBuf, String)>,
}

/// Compute the global feature set from the columns of every readable file.
///
/// `read_columns` returns a file's column names. A file it fails on is
/// logged and left out of the union; the pass never aborts.
pub fn unify_schema<P, F, E>(paths: &[P], mut read_columns: F) -> SchemaUnion
where
    P: AsRef<Path>,
    F: FnMut(&Path) -> Result<Vec<String>, E>,
    E: Display,
{
    let mut columns: Vec<String> = Vec::new();
    let mut unreadable = Vec::new();

    for path in paths {
        let path = path.as_ref();
        match read_columns(path) {
            Ok(names) => columns.extend(names),
            Err(error) => {
                tracing::warn!(
                    file = %path.display(),
                    error = %error,
                    "excluding unreadable file from feature union"
                );
                unreadable.push((path.to_path_buf(), error.to_string()));
            }
        }
    }

    let features = GlobalFeatures::from_columns(columns);
    tracing::info!(
        file_count = paths.len(),
        unreadable = unreadable.len(),
        feature_count = features.len(),
        "global feature set computed"
    );
    SchemaUnion {
        features,
        unreadable,
    }
}
