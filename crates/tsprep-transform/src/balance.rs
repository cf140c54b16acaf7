//! Class balancing by random oversampling.

use std::collections::BTreeMap;

use polars::prelude::{Column, DataFrame, IdxCa, IdxSize};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tsprep_model::{AuxAlignment, DEFAULT_SEED, LABEL_COLUMN, TIMESTAMP_COLUMN, TYPE_COLUMN};

use crate::error::BalanceError;
use crate::frame::{code_values, optional_string_values};

/// A class-balanced table.
#[derive(Debug, Clone)]
pub struct Balanced {
    pub frame: DataFrame,
    /// Output row count per label code.
    pub class_counts: BTreeMap<u32, usize>,
    /// Rows appended by oversampling.
    pub appended: usize,
}

/// Random oversampler with replacement.
///
/// Output rows are the input rows in order, followed, for each minority class
/// in ascending code order, by `majority - count` rows drawn uniformly from
/// that class. Every class ends with the majority count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RandomOverSampler {
    seed: u64,
    alignment: AuxAlignment,
}

impl Default for RandomOverSampler {
    fn default() -> Self {
        Self::new(DEFAULT_SEED)
    }
}

impl RandomOverSampler {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            alignment: AuxAlignment::default(),
        }
    }

    #[must_use]
    pub fn with_alignment(mut self, alignment: AuxAlignment) -> Self {
        self.alignment = alignment;
        self
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn alignment(&self) -> AuxAlignment {
        self.alignment
    }

    /// Source row index of every output row.
    pub fn sample_indices(&self, labels: &[u32]) -> Vec<usize> {
        let mut members: BTreeMap<u32, Vec<usize>> = BTreeMap::new();
        for (row, &label) in labels.iter().enumerate() {
            members.entry(label).or_default().push(row);
        }
        let majority = members.values().map(Vec::len).max().unwrap_or(0);

        let mut rng = StdRng::seed_from_u64(self.seed);
        let mut indices: Vec<usize> = (0..labels.len()).collect();
        indices.reserve(majority * members.len() - labels.len());
        for rows in members.values() {
            for _ in rows.len()..majority {
                indices.push(rows[rng.gen_range(0..rows.len())]);
            }
        }
        indices
    }

    /// Oversample `frame` on its encoded `label` column.
    pub fn fit_resample(&self, frame: &DataFrame) -> Result<Balanced, BalanceError> {
        let labels = code_values(frame, LABEL_COLUMN)?
            .into_iter()
            .enumerate()
            .map(|(row, label)| label.ok_or(BalanceError::NullLabel { row }))
            .collect::<Result<Vec<u32>, _>>()?;
        if labels.is_empty() {
            return Err(BalanceError::EmptyInput);
        }

        let indices = self.sample_indices(&labels);
        let appended = indices.len() - labels.len();
        let mut class_counts: BTreeMap<u32, usize> = BTreeMap::new();
        for &idx in &indices {
            *class_counts.entry(labels[idx]).or_default() += 1;
        }

        let take: Vec<IdxSize> = indices.iter().map(|&idx| idx as IdxSize).collect();
        let mut balanced = frame.take(&IdxCa::from_vec("idx".into(), take))?;

        if self.alignment == AuxAlignment::Positional && appended > 0 {
            let mut types = code_values(frame, TYPE_COLUMN)?;
            types.resize(indices.len(), None);
            balanced.with_column(Column::new(TYPE_COLUMN.into(), types))?;

            let mut timestamps = optional_string_values(frame, TIMESTAMP_COLUMN)?;
            timestamps.resize(indices.len(), None);
            balanced.with_column(Column::new(TIMESTAMP_COLUMN.into(), timestamps))?;
        }

        tracing::debug!(
            rows_in = labels.len(),
            rows_out = balanced.height(),
            appended,
            classes = class_counts.len(),
            "classes balanced"
        );

        Ok(Balanced {
            frame: balanced,
            class_counts,
            appended,
        })
    }
}
