use anyhow::ensure;
use clap::Args;
use log::info;
use serde::Serialize;
use std::path::PathBuf;

use crate::cli::core::{check_required_filename, describe_threads, AFTER_HELP, FULL_VERSION};
use crate::data_types::engine_mode::EngineMode;

#[derive(Args, Clone, Default, Serialize)]
#[clap(author, about,
    after_help = &**AFTER_HELP
)]
pub struct BatchSettings {
    #[clap(skip)]
    nwsim_version: String,

    /// Input table; pairs need `seq1`, `seq2` (and optional `label`) columns
    #[clap(required = true)]
    #[clap(short = 'i')]
    #[clap(long = "input")]
    #[clap(value_name = "TSV")]
    #[clap(help_heading = Some("Input/Output"))]
    pub input_filename: PathBuf,

    /// Output score table (.csv is comma delimited, otherwise tab; .gz is compressed)
    #[clap(required = true)]
    #[clap(short = 'o')]
    #[clap(long = "output")]
    #[clap(value_name = "TSV")]
    #[clap(help_heading = Some("Input/Output"))]
    pub output_filename: PathBuf,

    /// Optional output debug folder
    #[clap(long = "output-debug")]
    #[clap(value_name = "DIR")]
    #[clap(help_heading = Some("Input/Output"))]
    pub debug_folder: Option<PathBuf>,

    /// Treats the input as `label`, `sequence` rows and scores every unordered pair
    #[clap(long = "all-vs-all")]
    #[clap(help_heading = Some("Input/Output"))]
    pub all_vs_all: bool,

    /// Edit distance engine
    #[clap(long = "engine")]
    #[clap(value_name = "ENGINE")]
    #[clap(help_heading = Some("Scoring parameters"))]
    #[clap(default_value = "sequential")]
    pub engine: EngineMode,

    /// Minimum number of diagonal cells per task for the parallel engine
    #[clap(long = "min-chunk-size")]
    #[clap(value_name = "INT")]
    #[clap(help_heading = Some("Scoring parameters"))]
    #[clap(default_value = "256")]
    #[clap(hide = true)]
    pub min_chunk_size: usize,

    /// Number of threads to use for scoring (0 = all available)
    #[clap(long = "threads")]
    #[clap(value_name = "THREADS")]
    #[clap(default_value = "0")]
    pub threads: usize,

    /// Enable verbose output.
    #[clap(short = 'v')]
    #[clap(long = "verbose")]
    #[clap(action = clap::ArgAction::Count)]
    pub verbosity: u8,

    // Debug options that are generally hidden and just for quick testing
    /// Skips a number of pairs (debug only)
    #[clap(hide = true)]
    #[clap(long = "skip")]
    #[clap(default_value = "0")]
    pub skip_pairs: usize,

    /// Takes a number of pairs (debug only); 0 means all
    #[clap(hide = true)]
    #[clap(long = "take")]
    #[clap(default_value = "0")]
    pub take_pairs: usize,
}

pub fn check_batch_settings(mut settings: BatchSettings) -> anyhow::Result<BatchSettings> {
    // hard code the version in
    settings.nwsim_version = FULL_VERSION.clone();
    info!("nwsim version: {:?}", &settings.nwsim_version);
    info!("Sub-command: batch");
    info!("Inputs:");

    check_required_filename(&settings.input_filename, "Input table")?;
    info!("\tInput table: {:?}", &settings.input_filename);
    info!("\tInput layout: {}", if settings.all_vs_all { "all-vs-all sequences" } else { "explicit pairs" });

    info!("Outputs:");
    info!("\tScore table: {:?}", &settings.output_filename);
    if let Some(debug_folder) = settings.debug_folder.as_ref() {
        info!("\tDebug folder: {debug_folder:?}");
    }

    info!("Scoring parameters:");
    info!("\tEngine: {}", settings.engine);
    ensure!(settings.min_chunk_size > 0, "--min-chunk-size must be >0");
    info!("\tMinimum chunk size: {}", settings.min_chunk_size);

    // 0 is just a sentinel for everything
    if settings.take_pairs == 0 {
        settings.take_pairs = usize::MAX;
    }
    info!("Processing threads: {}", describe_threads(settings.threads));

    Ok(settings)
}
