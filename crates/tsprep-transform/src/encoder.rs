//! Label encoding for categorical columns.

use std::collections::{BTreeMap, BTreeSet};

use crate::error::{Result, TransformError};

/// Maps category strings to dense `u32` codes.
///
/// A freshly fit encoder assigns codes in sorted order of its classes.
/// [`LabelEncoder::extend`] appends new classes after the existing ones.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelEncoder {
    classes: Vec<String>,
    index: BTreeMap<String, u32>,
}

impl LabelEncoder {
    /// Fit on the unique values of `values`, sorted.
    pub fn fit<S: AsRef<str>>(values: &[S]) -> Self {
        let unique: BTreeSet<&str> = values.iter().map(AsRef::as_ref).collect();
        Self::from_classes(unique.into_iter().map(str::to_string).collect())
    }

    /// Rebuild an encoder from its class list; code = position.
    ///
    /// Duplicate classes keep their first position.
    pub fn from_classes(classes: Vec<String>) -> Self {
        let mut encoder = Self::default();
        for class in classes {
            encoder.push(class);
        }
        encoder
    }

    fn push(&mut self, class: String) {
        if self.index.contains_key(&class) {
            return;
        }
        let code = u32::try_from(self.classes.len()).unwrap_or(u32::MAX);
        self.index.insert(class.clone(), code);
        self.classes.push(class);
    }

    /// Append classes of `values` not seen yet, sorted among themselves.
    ///
    /// Existing codes never change. Returns the number of new classes.
    pub fn extend<S: AsRef<str>>(&mut self, values: &[S]) -> usize {
        let unseen: BTreeSet<&str> = values
            .iter()
            .map(AsRef::as_ref)
            .filter(|value| !self.index.contains_key(*value))
            .collect();
        let added = unseen.len();
        for class in unseen {
            self.push(class.to_string());
        }
        added
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    pub fn code_of(&self, value: &str) -> Option<u32> {
        self.index.get(value).copied()
    }

    /// Encode `values` of `column`; an unseen category is an error.
    pub fn encode<S: AsRef<str>>(&self, column: &str, values: &[S]) -> Result<Vec<u32>> {
        values
            .iter()
            .map(|value| {
                let value = value.as_ref();
                self.code_of(value)
                    .ok_or_else(|| TransformError::UnseenCategory {
                        column: column.to_string(),
                        value: value.to_string(),
                    })
            })
            .collect()
    }
}
