//! End-to-end tests for fitting and replay runs.

use std::fs;
use std::path::Path;

use tempfile::TempDir;
use tsprep_cli::pipeline::{ApplyConfig, RunConfig, apply_pipeline, run_pipeline};
use tsprep_ingest::read_csv_table;
use tsprep_model::{FileOutcome, FileStage, PipelineOptions};
use tsprep_persistence::{
    MANIFEST_FILE_NAME, REPORT_FILE_NAME, STATE_FILE_NAME, load_manifest, load_report, load_state,
};

fn write(dir: &Path, name: &str, content: &str) {
    fs::write(dir.join(name), content).expect("write input file");
}

fn seed_inputs(dir: &Path) {
    write(
        dir,
        "a.csv",
        "date,time,label,type,feat1\n\
         05-Jan-21,10:00:00,normal,tcp,10\n\
         05-Jan-21,10:00:01,attack,udp,20\n\
         05-Jan-21,10:00:02,normal,tcp,30\n\
         31-Foo-99,99:99:99,attack,tcp,40\n",
    );
    write(
        dir,
        "b.csv",
        "date,time,label,type,feat2\n\
         06-Jan-21,08:00:00,normal,tcp,1\n\
         06-Jan-21,08:00:01,zeta,tcp,3\n",
    );
    write(dir, "c_missing.csv", "date,label,feat3\n05-Jan-21,normal,1\n");
    write(
        dir,
        "d_bad_ts.csv",
        "date,time,label,type,feat1\nbad,bad,normal,tcp,1\n",
    );
}

fn run_config(input: &Path, output: &Path) -> RunConfig {
    RunConfig {
        input_dir: input.to_path_buf(),
        output_dir: output.to_path_buf(),
        options: PipelineOptions::default(),
        dry_run: false,
    }
}

fn floats(table: &tsprep_ingest::CsvTable, column: &str) -> Vec<f64> {
    table
        .column(column)
        .expect("column present")
        .iter()
        .map(|cell| cell.parse::<f64>().expect("numeric cell"))
        .collect()
}

#[test]
fn fitting_run_writes_every_artifact() {
    let input = TempDir::new().expect("input dir");
    let output = TempDir::new().expect("output dir");
    seed_inputs(input.path());

    let report = run_pipeline(&run_config(input.path(), output.path())).expect("run");

    assert_eq!(report.global_features.names(), ["feat1", "feat2", "feat3"]);
    assert_eq!(report.written_count(), 2);
    assert_eq!(report.skipped_count(), 2);
    assert_eq!(
        report.scaler_fitted_on.as_deref(),
        Some(input.path().join("a.csv").as_path())
    );

    let stages: Vec<Option<FileStage>> = report
        .files
        .iter()
        .map(|outcome| match outcome {
            FileOutcome::Written(_) => None,
            FileOutcome::Skipped { stage, .. } => Some(*stage),
        })
        .collect();
    assert_eq!(
        stages,
        vec![None, None, Some(FileStage::Validate), Some(FileStage::Balance)]
    );

    let a = read_csv_table(&output.path().join("preprocessed_a.csv")).expect("read a");
    assert_eq!(
        a.headers,
        vec!["feat1", "feat2", "feat3", "label", "type", "timestamp"]
    );
    assert_eq!(a.row_count(), 4);
    assert_eq!(floats(&a, "feat1")[..3], [0.0, 0.5, 1.0]);
    assert_eq!(
        a.column("timestamp").expect("timestamp")[..3],
        ["2021-01-05 10:00:00", "2021-01-05 10:00:01", "2021-01-05 10:00:02"]
    );

    let b = read_csv_table(&output.path().join("preprocessed_b.csv")).expect("read b");
    assert_eq!(b.headers, report.global_features.output_columns());
    assert_eq!(floats(&b, "feat1"), vec![-0.5, -0.5]);
    assert!(!output.path().join("preprocessed_c_missing.csv").exists());
    assert!(!output.path().join("preprocessed_d_bad_ts.csv").exists());

    let manifest = load_manifest(&output.path().join(MANIFEST_FILE_NAME)).expect("manifest");
    assert_eq!(manifest, report.global_features);

    let state = load_state(&output.path().join(STATE_FILE_NAME)).expect("state");
    assert_eq!(
        state.scaler_fitted_on.map(|source| source.file_name),
        Some("a.csv".to_string())
    );
    assert_eq!(state.encoders["label"].classes, ["normal", "zeta"]);

    let saved = load_report(&output.path().join(REPORT_FILE_NAME)).expect("report");
    assert_eq!(saved.files.len(), 4);
}

#[test]
fn dry_run_writes_nothing() {
    let input = TempDir::new().expect("input dir");
    let scratch = TempDir::new().expect("scratch dir");
    seed_inputs(input.path());
    let output = scratch.path().join("out");

    let mut config = run_config(input.path(), &output);
    config.dry_run = true;
    let report = run_pipeline(&config).expect("dry run");

    assert_eq!(report.written_count(), 2);
    assert!(!output.exists());
    assert!(report.files.iter().all(|outcome| match outcome {
        FileOutcome::Written(written) => written.output.is_none(),
        FileOutcome::Skipped { .. } => true,
    }));
}

#[test]
fn unparseable_file_is_excluded_from_features_and_skipped() {
    let input = TempDir::new().expect("input dir");
    let output = TempDir::new().expect("output dir");
    write(
        input.path(),
        "a.csv",
        "date,time,label,type,feat1\n05-Jan-21,10:00:00,normal,tcp,1\n",
    );
    write(
        input.path(),
        "z_ragged.csv",
        "date,time,label,type,zfeat\n05-Jan-21,10:00:00,normal,tcp,1,extra,cells\n",
    );

    let report = run_pipeline(&run_config(input.path(), output.path())).expect("run");

    assert_eq!(report.global_features.names(), ["feat1"]);
    assert_eq!(report.unreadable, vec![input.path().join("z_ragged.csv")]);
    assert!(matches!(
        &report.files[1],
        FileOutcome::Skipped { stage: FileStage::Read, .. }
    ));
}

#[test]
fn replay_applies_frozen_state_without_balancing() {
    let input = TempDir::new().expect("input dir");
    let fitted = TempDir::new().expect("fitted dir");
    seed_inputs(input.path());
    run_pipeline(&run_config(input.path(), fitted.path())).expect("fitting run");

    let fresh = TempDir::new().expect("fresh input dir");
    let applied = TempDir::new().expect("applied dir");
    write(
        fresh.path(),
        "e.csv",
        "date,time,label,type,feat1,feat2\n\
         07-Jan-21,09:00:00,zeta,tcp,20,2\n\
         07-Jan-21,09:00:01,zeta,tcp,30,0\n",
    );
    write(
        fresh.path(),
        "f.csv",
        "date,time,label,type,feat1\n07-Jan-21,09:00:00,attack,tcp,20\n",
    );

    let report = apply_pipeline(&ApplyConfig {
        input_dir: fresh.path().to_path_buf(),
        output_dir: applied.path().to_path_buf(),
        state_dir: fitted.path().to_path_buf(),
        output_prefix: "applied_".to_string(),
    })
    .expect("apply");

    assert_eq!(report.written_count(), 1);
    assert!(matches!(
        &report.files[1],
        FileOutcome::Skipped { stage: FileStage::Transform, reason, .. } if reason.contains("attack")
    ));

    let e = read_csv_table(&applied.path().join("applied_e.csv")).expect("read e");
    assert_eq!(e.row_count(), 2);
    assert_eq!(floats(&e, "feat1"), vec![0.5, 1.0]);
    assert_eq!(floats(&e, "feat2"), vec![2.0, 0.0]);
    assert_eq!(e.column("label").expect("label"), vec!["1", "1"]);
    assert!(applied.path().join(REPORT_FILE_NAME).exists());
    assert!(!applied.path().join(STATE_FILE_NAME).exists());
}

#[test]
fn replay_without_state_fails() {
    let empty = TempDir::new().expect("empty dir");
    let output = TempDir::new().expect("output dir");
    let result = apply_pipeline(&ApplyConfig {
        input_dir: empty.path().to_path_buf(),
        output_dir: output.path().to_path_buf(),
        state_dir: empty.path().to_path_buf(),
        output_prefix: "applied_".to_string(),
    });
    assert!(result.is_err());
}
