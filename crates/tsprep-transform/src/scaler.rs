//! Min-max feature scaling.

use polars::prelude::{Column, DataFrame};
use tsprep_model::GlobalFeatures;

use crate::error::{Result, TransformError};
use crate::frame::f64_values;

/// Per-feature min-max scaler.
///
/// Maps each feature to `(x - min) / (max - min)`. A feature whose range is
/// zero uses a range of `1`, so a constant column maps to `0`. Values outside
/// the fitted range are not clipped.
#[derive(Debug, Clone, PartialEq)]
pub struct MinMaxScaler {
    features: Vec<String>,
    data_min: Vec<f64>,
    data_max: Vec<f64>,
}

impl MinMaxScaler {
    /// Fit on the feature columns of `frame`.
    pub fn fit(frame: &DataFrame, features: &GlobalFeatures) -> Result<Self> {
        if frame.height() == 0 {
            return Err(TransformError::EmptyFit);
        }

        let mut data_min = Vec::with_capacity(features.len());
        let mut data_max = Vec::with_capacity(features.len());
        for feature in features.iter() {
            if frame.column(feature).is_err() {
                return Err(TransformError::FeatureMismatch {
                    column: feature.to_string(),
                });
            }
            let values = f64_values(frame, feature)?;
            let (min, max) = values
                .iter()
                .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
                    (lo.min(v), hi.max(v))
                });
            data_min.push(min);
            data_max.push(max);
        }

        Ok(Self {
            features: features.names().to_vec(),
            data_min,
            data_max,
        })
    }

    /// Rebuild a scaler from stored parameters.
    pub fn from_parts(features: Vec<String>, data_min: Vec<f64>, data_max: Vec<f64>) -> Result<Self> {
        for (values, kind) in [(&data_min, "min"), (&data_max, "max")] {
            if values.len() != features.len() {
                return Err(TransformError::ScalerShape {
                    features: features.len(),
                    values: values.len(),
                    kind,
                });
            }
        }
        Ok(Self {
            features,
            data_min,
            data_max,
        })
    }

    pub fn features(&self) -> &[String] {
        &self.features
    }

    pub fn data_min(&self) -> &[f64] {
        &self.data_min
    }

    pub fn data_max(&self) -> &[f64] {
        &self.data_max
    }

    /// Scale a single value of feature `idx`.
    pub fn scale(&self, idx: usize, value: f64) -> f64 {
        let min = self.data_min[idx];
        let range = self.data_max[idx] - min;
        let range = if range == 0.0 { 1.0 } else { range };
        (value - min) / range
    }

    /// Replace every fitted feature column of `frame` with its scaled values.
    pub fn transform(&self, frame: &mut DataFrame) -> Result<()> {
        for (idx, feature) in self.features.iter().enumerate() {
            if frame.column(feature).is_err() {
                return Err(TransformError::FeatureMismatch {
                    column: feature.clone(),
                });
            }
            let scaled: Vec<f64> = f64_values(frame, feature)?
                .into_iter()
                .map(|value| self.scale(idx, value))
                .collect();
            frame.with_column(Column::new(feature.as_str().into(), scaled))?;
        }
        Ok(())
    }
}
