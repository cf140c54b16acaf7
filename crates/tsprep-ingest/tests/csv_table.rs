use std::fs;

use tempfile::TempDir;
use tsprep_ingest::{IngestError, list_csv_files, read_csv_table};

#[test]
fn reads_every_listed_file_in_name_order() {
    let dir = TempDir::new().expect("create temp dir");
    fs::write(
        dir.path().join("b.csv"),
        "date,time,label,type,feat2\n01-Jan-21,00:00:00,x,t,2\n",
    )
    .expect("write b");
    fs::write(
        dir.path().join("a.csv"),
        "date,time,label,type,feat1\n01-Jan-21,00:00:00,x,t,1\n",
    )
    .expect("write a");

    let files = list_csv_files(dir.path()).expect("list files");
    let tables: Vec<_> = files
        .iter()
        .map(|path| read_csv_table(path).expect("read table"))
        .collect();

    assert_eq!(tables[0].headers.last().map(String::as_str), Some("feat1"));
    assert_eq!(tables[1].headers.last().map(String::as_str), Some("feat2"));
    assert_eq!(tables[0].row_count(), 1);
    assert_eq!(tables[0].column("feat1").expect("feat1"), vec!["1"]);
}

#[test]
fn header_only_file_has_no_rows() {
    let dir = TempDir::new().expect("create temp dir");
    let path = dir.path().join("empty_body.csv");
    fs::write(&path, "date,time,label,type\n").expect("write file");

    let table = read_csv_table(&path).expect("read table");
    assert_eq!(table.headers.len(), 4);
    assert_eq!(table.row_count(), 0);
}

#[test]
fn blank_header_is_rejected() {
    let dir = TempDir::new().expect("create temp dir");
    let path = dir.path().join("blank.csv");
    fs::write(&path, " , \n1,2\n").expect("write file");

    let result = read_csv_table(&path);
    assert!(matches!(result, Err(IngestError::NoHeaderDetected { .. })));
}
