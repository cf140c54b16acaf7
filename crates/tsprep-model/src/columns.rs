//! Column names and the global feature set.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Raw date column (e.g. `05-Jan-21`).
pub const DATE_COLUMN: &str = "date";
/// Raw time-of-day column (e.g. `10:20:30`).
pub const TIME_COLUMN: &str = "time";
/// Class label column, the oversampling target.
pub const LABEL_COLUMN: &str = "label";
/// Auxiliary categorical column carried alongside the label.
pub const TYPE_COLUMN: &str = "type";
/// Derived timestamp column.
pub const TIMESTAMP_COLUMN: &str = "timestamp";

/// Columns every input file must contain.
pub const MANDATORY_COLUMNS: [&str; 4] = [DATE_COLUMN, TIME_COLUMN, LABEL_COLUMN, TYPE_COLUMN];

/// Categorical columns replaced by integer codes.
pub const CATEGORICAL_COLUMNS: [&str; 2] = [LABEL_COLUMN, TYPE_COLUMN];

/// Columns appended after the features in every output table.
pub const TRAILING_COLUMNS: [&str; 3] = [LABEL_COLUMN, TYPE_COLUMN, TIMESTAMP_COLUMN];

/// Returns true if `name` is one of the mandatory input columns.
pub fn is_mandatory(name: &str) -> bool {
    MANDATORY_COLUMNS.contains(&name)
}

/// Returns true if `name` can never be a feature (mandatory or derived).
pub fn is_reserved(name: &str) -> bool {
    is_mandatory(name) || name == TIMESTAMP_COLUMN
}

/// Sorted, deduplicated set of feature column names shared by all outputs.
///
/// Built once from the union of every readable input header. There is no
/// mutating API: a run works against a single immutable instance.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct GlobalFeatures {
    names: Vec<String>,
}

impl GlobalFeatures {
    /// Build the feature set from any number of column names.
    ///
    /// Reserved columns are removed; the rest is sorted and deduplicated.
    pub fn from_columns<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let unique: BTreeSet<String> = columns
            .into_iter()
            .map(|name| name.as_ref().to_string())
            .filter(|name| !is_reserved(name))
            .collect();
        Self {
            names: unique.into_iter().collect(),
        }
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names
            .binary_search_by(|probe| probe.as_str().cmp(name))
            .is_ok()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    /// Full output column order: features, then `label`, `type`, `timestamp`.
    pub fn output_columns(&self) -> Vec<String> {
        self.names
            .iter()
            .cloned()
            .chain(TRAILING_COLUMNS.iter().map(|name| (*name).to_string()))
            .collect()
    }
}

impl From<Vec<String>> for GlobalFeatures {
    fn from(names: Vec<String>) -> Self {
        Self::from_columns(names)
    }
}

impl From<GlobalFeatures> for Vec<String> {
    fn from(features: GlobalFeatures) -> Self {
        features.names
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn union_drops_mandatory_and_sorts() {
        let features =
            GlobalFeatures::from_columns(["time", "zeta", "label", "alpha", "date", "type", "zeta"]);
        assert_eq!(features.len(), 2);
        assert_eq!(features.names(), ["alpha", "zeta"]);
        assert!(features.contains("zeta"));
        assert!(!features.contains("label"));
    }

    #[test]
    fn derived_timestamp_is_not_a_feature() {
        let features = GlobalFeatures::from_columns(["timestamp", "feat1"]);
        assert_eq!(features.names(), ["feat1"]);
    }

    #[test]
    fn output_columns_append_trailing() {
        let features = GlobalFeatures::from_columns(["feat2", "feat1"]);
        assert_eq!(
            features.output_columns(),
            vec!["feat1", "feat2", "label", "type", "timestamp"]
        );
    }
}
