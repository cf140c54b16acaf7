//! Fitted transform state shared across the files of one run.

use std::collections::BTreeMap;

use polars::prelude::{Column, DataFrame};
use tsprep_model::{CATEGORICAL_COLUMNS, EncoderPolicy, GlobalFeatures, ScalerPolicy, TransformPolicy};

use crate::encoder::LabelEncoder;
use crate::error::{Result, TransformError};
use crate::frame::string_values;
use crate::scaler::MinMaxScaler;

/// A transformed table.
#[derive(Debug, Clone)]
pub struct Transformed {
    /// Features scaled, `label` and `type` replaced by `u32` codes.
    pub frame: DataFrame,
    /// True if this table fitted (or refitted) the scaler.
    pub scaler_fitted: bool,
}

/// Scaler and per-column encoders, fitted according to a [`TransformPolicy`].
///
/// Owned by the run session and passed by `&mut` to each file's transform.
/// State is only committed once a file's transform has fully succeeded.
#[derive(Debug, Clone, Default)]
pub struct TransformState {
    policy: TransformPolicy,
    scaler: Option<MinMaxScaler>,
    encoders: BTreeMap<String, LabelEncoder>,
}

impl TransformState {
    pub fn new(policy: TransformPolicy) -> Self {
        Self {
            policy,
            scaler: None,
            encoders: BTreeMap::new(),
        }
    }

    /// Restore previously fitted state.
    pub fn from_parts(
        policy: TransformPolicy,
        scaler: Option<MinMaxScaler>,
        encoders: BTreeMap<String, LabelEncoder>,
    ) -> Self {
        Self {
            policy,
            scaler,
            encoders,
        }
    }

    pub fn policy(&self) -> TransformPolicy {
        self.policy
    }

    pub fn scaler(&self) -> Option<&MinMaxScaler> {
        self.scaler.as_ref()
    }

    pub fn encoders(&self) -> &BTreeMap<String, LabelEncoder> {
        &self.encoders
    }

    pub fn encoder(&self, column: &str) -> Option<&LabelEncoder> {
        self.encoders.get(column)
    }

    pub fn is_fitted(&self) -> bool {
        self.scaler.is_some()
    }

    /// Fit as the policy dictates, then transform `frame`.
    ///
    /// An empty table fits nothing: its code columns are emptied and the state
    /// is left untouched.
    pub fn fit_transform(
        &mut self,
        mut frame: DataFrame,
        features: &GlobalFeatures,
    ) -> Result<Transformed> {
        if frame.height() == 0 {
            for column in CATEGORICAL_COLUMNS {
                frame.with_column(Column::new(column.into(), Vec::<u32>::new()))?;
            }
            return Ok(Transformed {
                frame,
                scaler_fitted: false,
            });
        }

        let refit = match self.policy.scaler {
            ScalerPolicy::FitOnce => self.scaler.is_none(),
            ScalerPolicy::FitPerFile => true,
        };
        let fitted_scaler = if refit {
            Some(MinMaxScaler::fit(&frame, features)?)
        } else {
            None
        };
        let scaler = fitted_scaler
            .as_ref()
            .or(self.scaler.as_ref())
            .ok_or(TransformError::ScalerNotFitted)?;
        scaler.transform(&mut frame)?;

        let mut encoders = BTreeMap::new();
        for column in CATEGORICAL_COLUMNS {
            let values = string_values(&frame, column)?;
            let encoder = match (self.policy.encoder, self.encoders.get(column)) {
                (EncoderPolicy::FitOnce, Some(existing)) => existing.clone(),
                (EncoderPolicy::Extend, Some(existing)) => {
                    let mut extended = existing.clone();
                    let added = extended.extend(&values);
                    if added > 0 {
                        tracing::debug!(column, added, "extended encoder vocabulary");
                    }
                    extended
                }
                _ => LabelEncoder::fit(&values),
            };
            let codes = encoder.encode(column, &values)?;
            frame.with_column(Column::new(column.into(), codes))?;
            encoders.insert(column.to_string(), encoder);
        }

        if let Some(scaler) = fitted_scaler {
            tracing::info!(features = scaler.features().len(), "scaler fitted");
            self.scaler = Some(scaler);
        }
        self.encoders.extend(encoders);

        Ok(Transformed {
            frame,
            scaler_fitted: refit,
        })
    }

    /// Apply the fitted state without fitting anything.
    pub fn transform(&self, mut frame: DataFrame) -> Result<DataFrame> {
        let scaler = self.scaler.as_ref().ok_or(TransformError::ScalerNotFitted)?;
        scaler.transform(&mut frame)?;

        for column in CATEGORICAL_COLUMNS {
            let encoder = self
                .encoders
                .get(column)
                .ok_or_else(|| TransformError::EncoderNotFitted {
                    column: column.to_string(),
                })?;
            let values = string_values(&frame, column)?;
            let codes = encoder.encode(column, &values)?;
            frame.with_column(Column::new(column.into(), codes))?;
        }
        Ok(frame)
    }
}
