//! Typed column extraction from normalized frames.

use polars::prelude::{DataFrame, PolarsResult};

/// Values of a float column; nulls read as `0.0`.
pub fn f64_values(frame: &DataFrame, name: &str) -> PolarsResult<Vec<f64>> {
    let series = frame.column(name)?.as_materialized_series();
    Ok(series
        .f64()?
        .into_iter()
        .map(|value| value.unwrap_or(0.0))
        .collect())
}

/// Values of a text column; nulls read as the empty string.
pub fn string_values(frame: &DataFrame, name: &str) -> PolarsResult<Vec<String>> {
    let series = frame.column(name)?.as_materialized_series();
    Ok(series
        .str()?
        .into_iter()
        .map(|value| value.unwrap_or_default().to_string())
        .collect())
}

/// Values of an encoded (code) column.
pub fn code_values(frame: &DataFrame, name: &str) -> PolarsResult<Vec<Option<u32>>> {
    let series = frame.column(name)?.as_materialized_series();
    Ok(series.u32()?.into_iter().collect())
}

/// Values of an optional text column.
pub fn optional_string_values(frame: &DataFrame, name: &str) -> PolarsResult<Vec<Option<String>>> {
    let series = frame.column(name)?.as_materialized_series();
    Ok(series
        .str()?
        .into_iter()
        .map(|value| value.map(str::to_string))
        .collect())
}

/// Column names in frame order.
pub fn column_names(frame: &DataFrame) -> Vec<String> {
    frame
        .get_column_names()
        .into_iter()
        .map(ToString::to_string)
        .collect()
}
