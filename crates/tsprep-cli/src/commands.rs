use anyhow::{Context, Result};
use tsprep_model::{PipelineOptions, RunReport};
use tsprep_persistence::{StateFile, load_state};

use tsprep_cli::pipeline::{ApplyConfig, RunConfig, apply_pipeline, run_pipeline};

use crate::cli::{ApplyArgs, InspectArgs, RunArgs};

pub fn run_fit(args: &RunArgs) -> Result<(RunConfig, RunReport)> {
    let options = PipelineOptions::new()
        .with_scaler_policy(args.scaler_policy.into())
        .with_encoder_policy(args.encoder_policy.into())
        .with_aux_alignment(args.aux_alignment.into())
        .with_seed(args.seed)
        .with_output_prefix(args.prefix.clone());
    let config = RunConfig {
        input_dir: args.input_dir.clone(),
        output_dir: args.output_dir.clone(),
        options,
        dry_run: args.dry_run,
    };
    let report = run_pipeline(&config)?;
    Ok((config, report))
}

pub fn run_apply(args: &ApplyArgs) -> Result<RunReport> {
    let config = ApplyConfig {
        input_dir: args.input_dir.clone(),
        output_dir: args.output_dir.clone(),
        state_dir: args.state_dir.clone(),
        output_prefix: args.prefix.clone(),
    };
    apply_pipeline(&config)
}

pub fn run_inspect(args: &InspectArgs) -> Result<StateFile> {
    load_state(&args.state_file)
        .with_context(|| format!("load state file {}", args.state_file.display()))
}
