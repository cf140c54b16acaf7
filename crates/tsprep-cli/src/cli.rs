//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use tsprep_model::{AuxAlignment, DEFAULT_OUTPUT_PREFIX, DEFAULT_SEED, EncoderPolicy, ScalerPolicy};

use tsprep_cli::pipeline::DEFAULT_APPLY_PREFIX;

#[derive(Parser)]
#[command(
    name = "tsprep",
    version,
    about = "Normalize labeled time-series CSV files into one shared schema",
    long_about = "Normalize a directory of labeled time-series CSV files.\n\n\
                  Unifies feature columns across files, scales features with a single\n\
                  fitted min-max scaler, encodes categorical columns and oversamples\n\
                  minority classes."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Fit transforms over a directory and write balanced outputs.
    Run(RunArgs),

    /// Replay a previous run's fitted transforms on new files.
    Apply(ApplyArgs),

    /// Print the contents of a transform state file.
    Inspect(InspectArgs),
}

#[derive(Parser)]
pub struct RunArgs {
    /// Directory containing the input CSV files.
    #[arg(value_name = "INPUT_DIR")]
    pub input_dir: PathBuf,

    /// Directory for outputs, manifest, state and report.
    #[arg(value_name = "OUTPUT_DIR")]
    pub output_dir: PathBuf,

    /// When the min-max scaler is fitted.
    #[arg(long = "scaler-policy", value_enum, default_value = "fit-once")]
    pub scaler_policy: ScalerPolicyArg,

    /// When the label/type encoders are fitted.
    ///
    /// `fit-per-file` refits on every file, so codes are only meaningful
    /// within one output file. `fit-once` and `extend` keep codes stable
    /// across files.
    #[arg(long = "encoder-policy", value_enum, default_value = "fit-per-file")]
    pub encoder_policy: EncoderPolicyArg,

    /// How `type` and `timestamp` follow oversampled rows.
    #[arg(long = "aux-alignment", value_enum, default_value = "provenance")]
    pub aux_alignment: AuxAlignmentArg,

    /// Seed for the oversampling RNG.
    #[arg(long = "seed", default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Prefix prepended to each input file name.
    #[arg(long = "prefix", value_name = "PREFIX", default_value = DEFAULT_OUTPUT_PREFIX)]
    pub prefix: String,

    /// Process every file but write nothing.
    #[arg(long = "dry-run")]
    pub dry_run: bool,
}

#[derive(Parser)]
pub struct ApplyArgs {
    /// Directory containing the input CSV files.
    #[arg(value_name = "INPUT_DIR")]
    pub input_dir: PathBuf,

    /// Directory for outputs and report.
    #[arg(value_name = "OUTPUT_DIR")]
    pub output_dir: PathBuf,

    /// Output directory of an earlier `tsprep run`.
    #[arg(long = "state-dir", value_name = "DIR")]
    pub state_dir: PathBuf,

    /// Prefix prepended to each input file name.
    #[arg(long = "prefix", value_name = "PREFIX", default_value = DEFAULT_APPLY_PREFIX)]
    pub prefix: String,
}

#[derive(Parser)]
pub struct InspectArgs {
    /// Path to a `scalers_and_encoders.bin` file.
    #[arg(value_name = "STATE_FILE")]
    pub state_file: PathBuf,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ScalerPolicyArg {
    FitOnce,
    FitPerFile,
}

impl From<ScalerPolicyArg> for ScalerPolicy {
    fn from(arg: ScalerPolicyArg) -> Self {
        match arg {
            ScalerPolicyArg::FitOnce => Self::FitOnce,
            ScalerPolicyArg::FitPerFile => Self::FitPerFile,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum EncoderPolicyArg {
    FitPerFile,
    FitOnce,
    Extend,
}

impl From<EncoderPolicyArg> for EncoderPolicy {
    fn from(arg: EncoderPolicyArg) -> Self {
        match arg {
            EncoderPolicyArg::FitPerFile => Self::FitPerFile,
            EncoderPolicyArg::FitOnce => Self::FitOnce,
            EncoderPolicyArg::Extend => Self::Extend,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum AuxAlignmentArg {
    Provenance,
    Positional,
}

impl From<AuxAlignmentArg> for AuxAlignment {
    fn from(arg: AuxAlignmentArg) -> Self {
        match arg {
            AuxAlignmentArg::Provenance => Self::Provenance,
            AuxAlignmentArg::Positional => Self::Positional,
        }
    }
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn run_defaults() {
        let cli = Cli::try_parse_from(["tsprep", "run", "in", "out"]).unwrap();
        let Command::Run(args) = cli.command else {
            panic!("expected run");
        };
        assert_eq!(ScalerPolicy::from(args.scaler_policy), ScalerPolicy::FitOnce);
        assert_eq!(EncoderPolicy::from(args.encoder_policy), EncoderPolicy::FitPerFile);
        assert_eq!(AuxAlignment::from(args.aux_alignment), AuxAlignment::Provenance);
        assert_eq!(args.seed, 42);
        assert_eq!(args.prefix, "preprocessed_");
        assert!(!args.dry_run);
    }

    #[test]
    fn apply_requires_state_dir() {
        assert!(Cli::try_parse_from(["tsprep", "apply", "in", "out"]).is_err());
        let cli =
            Cli::try_parse_from(["tsprep", "apply", "in", "out", "--state-dir", "prev"]).unwrap();
        let Command::Apply(args) = cli.command else {
            panic!("expected apply");
        };
        assert_eq!(args.prefix, "applied_");
    }

    #[test]
    fn policies_parse_kebab_case() {
        let cli = Cli::try_parse_from([
            "tsprep",
            "run",
            "in",
            "out",
            "--encoder-policy",
            "extend",
            "--aux-alignment",
            "positional",
            "--scaler-policy",
            "fit-per-file",
        ])
        .unwrap();
        let Command::Run(args) = cli.command else {
            panic!("expected run");
        };
        assert_eq!(EncoderPolicy::from(args.encoder_policy), EncoderPolicy::Extend);
        assert_eq!(AuxAlignment::from(args.aux_alignment), AuxAlignment::Positional);
        assert_eq!(ScalerPolicy::from(args.scaler_policy), ScalerPolicy::FitPerFile);
    }
}
