//! Run orchestration with an explicit per-file state machine.
//!
//! A fitting run goes through these stages:
//! 1. **Discover**: list the input CSV files in name order
//! 2. **Schema**: union of all feature columns, persisted as the manifest
//! 3. **Per file**: Read, Validate, Normalize, Transform, Balance, Write
//! 4. **Persist**: final transform state and the run report
//!
//! A replay run loads a persisted manifest and state and applies them
//! frozen, without balancing.
//!
//! A file that fails a stage is recorded as skipped at that stage and the run
//! moves on. Only failures of the run's own artifacts are fatal.

use std::collections::BTreeMap;
use std::fmt::Display;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use polars::prelude::DataFrame;
use tracing::{debug, info, info_span, warn};

use tsprep_ingest::{list_csv_files, read_csv_table};
use tsprep_model::{
    FileOutcome, FileStage, GlobalFeatures, LABEL_COLUMN, PipelineOptions, RunReport, WrittenFile,
};
use tsprep_persistence::{
    MANIFEST_FILE_NAME, REPORT_FILE_NAME, STATE_FILE_NAME, StateFile, fingerprint, load_manifest,
    load_state, restore_state, save_state, write_frame_csv, write_manifest, write_report,
};
use tsprep_transform::frame::code_values;
use tsprep_transform::{
    RandomOverSampler, TransformError, TransformState, missing_mandatory, normalize_table,
    unify_schema,
};

/// Default output prefix of a replay run.
pub const DEFAULT_APPLY_PREFIX: &str = "applied_";

/// Inputs of a fitting run.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    pub options: PipelineOptions,
    /// Process everything but write nothing.
    pub dry_run: bool,
}

/// Inputs of a replay run.
#[derive(Debug, Clone)]
pub struct ApplyConfig {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    /// Output directory of an earlier fitting run.
    pub state_dir: PathBuf,
    pub output_prefix: String,
}

/// Why a file left the state machine early.
#[derive(Debug)]
struct StageFailure {
    stage: FileStage,
    reason: String,
}

trait AtStage<T> {
    fn at(self, stage: FileStage) -> std::result::Result<T, StageFailure>;
}

impl<T, E: Display> AtStage<T> for std::result::Result<T, E> {
    fn at(self, stage: FileStage) -> std::result::Result<T, StageFailure> {
        self.map_err(|error| StageFailure {
            stage,
            reason: error.to_string(),
        })
    }
}

enum Mode {
    /// Fit per policy and oversample.
    Fit(RandomOverSampler),
    /// Apply the loaded state unchanged; no oversampling.
    Replay,
}

/// Session-scoped state of one run.
///
/// The transform state lives here and is only ever mutated through
/// [`Session::process_file`], one file at a time.
struct Session {
    features: GlobalFeatures,
    state: TransformState,
    mode: Mode,
    output_dir: PathBuf,
    output_prefix: String,
    dry_run: bool,
    scaler_fitted_on: Option<PathBuf>,
}

impl Session {
    fn output_path(&self, source: &Path) -> PathBuf {
        let name = source
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        self.output_dir
            .join(format!("{}{}", self.output_prefix, name))
    }

    fn process_file(&mut self, path: &Path) -> FileOutcome {
        let span = info_span!("process_file", file = %path.display());
        let _guard = span.enter();
        let start = Instant::now();

        match self.run_stages(path) {
            Ok(written) => {
                info!(
                    rows_in = written.rows_in,
                    rows_dropped = written.rows_dropped,
                    rows_out = written.rows_out,
                    duration_ms = start.elapsed().as_millis(),
                    "file processed"
                );
                FileOutcome::Written(written)
            }
            Err(failure) => {
                warn!(
                    stage = %failure.stage,
                    reason = %failure.reason,
                    duration_ms = start.elapsed().as_millis(),
                    "file skipped"
                );
                FileOutcome::Skipped {
                    source: path.to_path_buf(),
                    stage: failure.stage,
                    reason: failure.reason,
                }
            }
        }
    }

    fn run_stages(&mut self, path: &Path) -> std::result::Result<WrittenFile, StageFailure> {
        let table = read_csv_table(path).at(FileStage::Read)?;

        let missing = missing_mandatory(&table);
        if !missing.is_empty() {
            return Err(TransformError::MissingColumns { missing }).at(FileStage::Validate);
        }

        let normalized = normalize_table(&table, &self.features).at(FileStage::Normalize)?;
        let rows_in = normalized.rows_in;
        let rows_dropped = normalized.rows_dropped;

        let frame = match &self.mode {
            Mode::Fit(sampler) => {
                let transformed = self
                    .state
                    .fit_transform(normalized.frame, &self.features)
                    .at(FileStage::Transform)?;
                if transformed.scaler_fitted {
                    info!("scaler fitted on this file");
                    self.scaler_fitted_on = Some(path.to_path_buf());
                }
                sampler
                    .fit_resample(&transformed.frame)
                    .at(FileStage::Balance)?
                    .frame
            }
            Mode::Replay => self
                .state
                .transform(normalized.frame)
                .at(FileStage::Transform)?,
        };

        let class_counts = class_counts(&frame).at(FileStage::Balance)?;
        let mut frame = frame
            .select(self.features.output_columns())
            .at(FileStage::Write)?;
        let output = if self.dry_run {
            None
        } else {
            let output = self.output_path(path);
            write_frame_csv(&mut frame, &output).at(FileStage::Write)?;
            Some(output)
        };

        Ok(WrittenFile {
            source: path.to_path_buf(),
            output,
            rows_in,
            rows_dropped,
            rows_out: frame.height(),
            class_counts,
        })
    }
}

fn class_counts(frame: &DataFrame) -> Result<BTreeMap<u32, usize>> {
    let mut counts = BTreeMap::new();
    for code in code_values(frame, LABEL_COLUMN)?.into_iter().flatten() {
        *counts.entry(code).or_default() += 1;
    }
    Ok(counts)
}

fn create_output_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir).with_context(|| format!("create output directory {}", dir.display()))
}

/// Fit transforms over every file of `config.input_dir` and write balanced outputs.
///
/// Per-file failures are recorded in the report. Errors are returned only for
/// the run's own inputs and artifacts.
pub fn run_pipeline(config: &RunConfig) -> Result<RunReport> {
    let run_span = info_span!("run", input = %config.input_dir.display());
    let _run_guard = run_span.enter();
    let start = Instant::now();

    let files = list_csv_files(&config.input_dir)
        .with_context(|| format!("list csv files in {}", config.input_dir.display()))?;
    info!(file_count = files.len(), "discovered input files");

    // Full parse: a file whose body cannot be read contributes no columns.
    let union = unify_schema(&files, |path| read_csv_table(path).map(|table| table.headers));
    let features = union.features;

    if !config.dry_run {
        create_output_dir(&config.output_dir)?;
        write_manifest(&features, &config.output_dir.join(MANIFEST_FILE_NAME))
            .context("write feature manifest")?;
    }

    let options = &config.options;
    let sampler = RandomOverSampler::new(options.seed).with_alignment(options.aux_alignment);
    let mut session = Session {
        features,
        state: TransformState::new(options.transform),
        mode: Mode::Fit(sampler),
        output_dir: config.output_dir.clone(),
        output_prefix: options.output_prefix.clone(),
        dry_run: config.dry_run,
        scaler_fitted_on: None,
    };
    let outcomes: Vec<FileOutcome> = files
        .iter()
        .map(|path| session.process_file(path))
        .collect();

    let report = RunReport {
        input_dir: config.input_dir.clone(),
        output_dir: config.output_dir.clone(),
        options: options.clone(),
        global_features: session.features.clone(),
        unreadable: union.unreadable.into_iter().map(|(path, _)| path).collect(),
        scaler_fitted_on: session.scaler_fitted_on.clone(),
        files: outcomes,
    };

    if config.dry_run {
        info!("dry run: no files written");
    } else {
        if !session.state.is_fitted() {
            warn!("no file produced rows; saving state without a fitted scaler");
        }
        let source = session
            .scaler_fitted_on
            .as_deref()
            .map(fingerprint)
            .transpose()
            .context("fingerprint scaler source")?;
        let mut state_file = StateFile::from_state(&session.features, &session.state, source);
        save_state(&mut state_file, &config.output_dir.join(STATE_FILE_NAME))
            .context("save transform state")?;
        write_report(&report, &config.output_dir.join(REPORT_FILE_NAME))
            .context("write run report")?;
    }

    info!(
        written = report.written_count(),
        skipped = report.skipped_count(),
        duration_ms = start.elapsed().as_millis(),
        "run complete"
    );
    Ok(report)
}

/// Apply a persisted manifest and transform state to every file of
/// `config.input_dir`, without fitting or balancing.
pub fn apply_pipeline(config: &ApplyConfig) -> Result<RunReport> {
    let run_span = info_span!("apply", input = %config.input_dir.display());
    let _run_guard = run_span.enter();
    let start = Instant::now();

    let manifest = load_manifest(&config.state_dir.join(MANIFEST_FILE_NAME))
        .context("load feature manifest")?;
    let state_path = config.state_dir.join(STATE_FILE_NAME);
    let state_file = load_state(&state_path).context("load transform state")?;
    let fitted_on = state_file
        .scaler_fitted_on
        .as_ref()
        .map(|source| PathBuf::from(&source.file_name));
    let (features, state) = restore_state(state_file, &state_path)?;
    if features != manifest {
        anyhow::bail!(
            "feature manifest and transform state in {} disagree",
            config.state_dir.display()
        );
    }
    debug!(features = features.len(), "restored transform state");

    let files = list_csv_files(&config.input_dir)
        .with_context(|| format!("list csv files in {}", config.input_dir.display()))?;
    create_output_dir(&config.output_dir)?;

    let options = PipelineOptions::new()
        .with_scaler_policy(state.policy().scaler)
        .with_encoder_policy(state.policy().encoder)
        .with_output_prefix(config.output_prefix.clone());
    let mut session = Session {
        features,
        state,
        mode: Mode::Replay,
        output_dir: config.output_dir.clone(),
        output_prefix: config.output_prefix.clone(),
        dry_run: false,
        scaler_fitted_on: fitted_on,
    };
    let outcomes: Vec<FileOutcome> = files
        .iter()
        .map(|path| session.process_file(path))
        .collect();

    let report = RunReport {
        input_dir: config.input_dir.clone(),
        output_dir: config.output_dir.clone(),
        options,
        global_features: session.features,
        unreadable: Vec::new(),
        scaler_fitted_on: session.scaler_fitted_on,
        files: outcomes,
    };
    write_report(&report, &config.output_dir.join(REPORT_FILE_NAME))
        .context("write run report")?;

    info!(
        written = report.written_count(),
        skipped = report.skipped_count(),
        duration_ms = start.elapsed().as_millis(),
        "apply complete"
    );
    Ok(report)
}
