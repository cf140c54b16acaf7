//! Output tables as CSV.

use std::path::Path;

use polars::prelude::{CsvWriter, DataFrame, SerWriter};

use crate::error::{PersistenceError, Result};
use crate::io::atomic::write_atomic;

/// Write `frame` with a header row. Nulls are written as empty cells.
pub fn write_frame_csv(frame: &mut DataFrame, path: &Path) -> Result<()> {
    let mut buffer = Vec::new();
    CsvWriter::new(&mut buffer)
        .include_header(true)
        .finish(frame)
        .map_err(|source| PersistenceError::Csv {
            path: path.to_path_buf(),
            source,
        })?;
    write_atomic(path, &buffer)?;
    tracing::debug!(path = %path.display(), rows = frame.height(), "wrote table");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::Column;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn writes_header_and_rows() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("preprocessed_a.csv");
        let mut frame = DataFrame::new(vec![
            Column::new("feat1".into(), vec![0.5, 1.0]),
            Column::new("label".into(), vec![0u32, 1]),
            Column::new("type".into(), vec![Some(2u32), None]),
            Column::new("timestamp".into(), vec![Some("2021-01-05 10:20:30"), None]),
        ])
        .unwrap();

        write_frame_csv(&mut frame, &path).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("feat1,label,type,timestamp"));
        assert_eq!(lines.next(), Some("0.5,0,2,2021-01-05 10:20:30"));
        assert!(lines.next().unwrap().ends_with(",1,,"));
    }
}
