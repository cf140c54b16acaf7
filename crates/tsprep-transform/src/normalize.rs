//! Row normalization: mandatory column validation, timestamp derivation and
//! reindexing onto the global feature set.

use polars::prelude::{Column, DataFrame};
use tsprep_ingest::CsvTable;
use tsprep_model::{
    DATE_COLUMN, GlobalFeatures, LABEL_COLUMN, MANDATORY_COLUMNS, TIME_COLUMN, TIMESTAMP_COLUMN,
    TYPE_COLUMN, is_mandatory,
};

use crate::error::{Result, TransformError};
use crate::timestamp::{format_timestamp, parse_timestamp};

/// A table conformant to the global schema.
#[derive(Debug, Clone)]
pub struct NormalizedTable {
    /// Columns: global features (`f64`), `label`, `type`, `timestamp` (text).
    pub frame: DataFrame,
    /// Rows in the raw table.
    pub rows_in: usize,
    /// Rows dropped because `date` + `time` did not parse.
    pub rows_dropped: usize,
    /// Columns present in the raw table but outside the output schema.
    pub discarded_columns: Vec<String>,
}

impl NormalizedTable {
    pub fn height(&self) -> usize {
        self.frame.height()
    }

    pub fn is_empty(&self) -> bool {
        self.frame.height() == 0
    }
}

/// Parse one raw feature cell. Anything that is not a finite number is `0.0`.
pub fn coerce_feature(raw: &str) -> f64 {
    match raw.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => value,
        _ => 0.0,
    }
}

/// Mandatory columns absent from `table`, sorted.
pub fn missing_mandatory(table: &CsvTable) -> Vec<String> {
    let mut missing: Vec<String> = MANDATORY_COLUMNS
        .iter()
        .filter(|name| !table.has_column(name))
        .map(|name| (*name).to_string())
        .collect();
    missing.sort();
    missing
}

/// Map a raw table onto `features ++ [label, type, timestamp]`.
///
/// Rows whose timestamp does not parse are dropped. Features absent from the
/// table are filled with `0.0`; unparseable cells become `0.0` as well.
pub fn normalize_table(table: &CsvTable, features: &GlobalFeatures) -> Result<NormalizedTable> {
    let missing = missing_mandatory(table);
    if !missing.is_empty() {
        return Err(TransformError::MissingColumns { missing });
    }

    let column = |name: &str| {
        table
            .column_index(name)
            .ok_or_else(|| TransformError::MissingColumns {
                missing: vec![name.to_string()],
            })
    };
    let date_idx = column(DATE_COLUMN)?;
    let time_idx = column(TIME_COLUMN)?;
    let label_idx = column(LABEL_COLUMN)?;
    let type_idx = column(TYPE_COLUMN)?;

    let mut kept_rows = Vec::with_capacity(table.row_count());
    let mut timestamps = Vec::with_capacity(table.row_count());
    for (row_idx, row) in table.rows.iter().enumerate() {
        if let Some(ts) = parse_timestamp(&row[date_idx], &row[time_idx]) {
            kept_rows.push(row_idx);
            timestamps.push(format_timestamp(&ts));
        }
    }
    let rows_in = table.row_count();
    let rows_dropped = rows_in - kept_rows.len();

    let mut columns = Vec::with_capacity(features.len() + 3);
    for feature in features.iter() {
        let values: Vec<f64> = match table.column_index(feature) {
            Some(idx) => kept_rows
                .iter()
                .map(|&row| coerce_feature(&table.rows[row][idx]))
                .collect(),
            None => vec![0.0; kept_rows.len()],
        };
        columns.push(Column::new(feature.into(), values));
    }

    let text_column = |idx: usize| -> Vec<&str> {
        kept_rows
            .iter()
            .map(|&row| table.rows[row][idx].as_str())
            .collect()
    };
    columns.push(Column::new(LABEL_COLUMN.into(), text_column(label_idx)));
    columns.push(Column::new(TYPE_COLUMN.into(), text_column(type_idx)));
    columns.push(Column::new(TIMESTAMP_COLUMN.into(), timestamps));

    let discarded_columns: Vec<String> = table
        .headers
        .iter()
        .filter(|name| !is_mandatory(name) && !features.contains(name))
        .cloned()
        .collect();
    if !discarded_columns.is_empty() {
        tracing::debug!(
            count = discarded_columns.len(),
            columns = ?discarded_columns,
            "discarding columns outside the global schema"
        );
    }

    let frame = DataFrame::new(columns)?;
    tracing::debug!(rows_in, rows_dropped, rows_out = frame.height(), "table normalized");

    Ok(NormalizedTable {
        frame,
        rows_in,
        rows_dropped,
        discarded_columns,
    })
}
