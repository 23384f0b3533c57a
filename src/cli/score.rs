use anyhow::ensure;
use clap::Args;
use log::info;
use serde::Serialize;
use std::path::PathBuf;

use crate::cli::core::{describe_threads, AFTER_HELP, FULL_VERSION};
use crate::data_types::engine_mode::EngineMode;

#[derive(Args, Clone, Default, Serialize)]
#[clap(author, about,
    after_help = &**AFTER_HELP
)]
pub struct ScoreSettings {
    #[clap(skip)]
    nwsim_version: String,

    /// First sequence
    #[clap(required = true)]
    #[clap(short = 'a')]
    #[clap(long = "seq-a")]
    #[clap(value_name = "SEQ")]
    #[clap(help_heading = Some("Input/Output"))]
    #[clap(allow_hyphen_values = true)]
    pub seq_a: String,

    /// Second sequence
    #[clap(required = true)]
    #[clap(short = 'b')]
    #[clap(long = "seq-b")]
    #[clap(value_name = "SEQ")]
    #[clap(help_heading = Some("Input/Output"))]
    #[clap(allow_hyphen_values = true)]
    pub seq_b: String,

    /// Optional JSON file for the score report (gzipped if it ends with .gz)
    #[clap(long = "output-json")]
    #[clap(value_name = "JSON")]
    #[clap(help_heading = Some("Input/Output"))]
    pub output_json: Option<PathBuf>,

    /// Optional output debug folder
    #[clap(long = "output-debug")]
    #[clap(value_name = "DIR")]
    #[clap(help_heading = Some("Input/Output"))]
    pub debug_folder: Option<PathBuf>,

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

    /// Number of threads for the parallel engine (0 = all available)
    #[clap(long = "threads")]
    #[clap(value_name = "THREADS")]
    #[clap(default_value = "0")]
    pub threads: usize,

    /// Enable verbose output.
    #[clap(short = 'v')]
    #[clap(long = "verbose")]
    #[clap(action = clap::ArgAction::Count)]
    pub verbosity: u8,
}

pub fn check_score_settings(mut settings: ScoreSettings) -> anyhow::Result<ScoreSettings> {
    // hard code the version in
    settings.nwsim_version = FULL_VERSION.clone();
    info!("nwsim version: {:?}", &settings.nwsim_version);
    info!("Sub-command: score");
    info!("Inputs:");
    info!("\tSequence A: {} symbols", settings.seq_a.chars().count());
    info!("\tSequence B: {} symbols", settings.seq_b.chars().count());

    info!("Outputs:");
    info!("\tJSON: {:?}", &settings.output_json);
    if let Some(debug_folder) = settings.debug_folder.as_ref() {
        info!("\tDebug folder: {debug_folder:?}");
    }

    info!("Scoring parameters:");
    info!("\tEngine: {}", settings.engine);
    ensure!(settings.min_chunk_size > 0, "--min-chunk-size must be >0");
    info!("\tMinimum chunk size: {}", settings.min_chunk_size);
    info!("Processing threads: {}", describe_threads(settings.threads));

    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_score_settings() {
        let settings = ScoreSettings {
            seq_a: "kitten".to_string(),
            seq_b: "sitting".to_string(),
            min_chunk_size: 256,
            ..Default::default()
        };
        let checked = check_score_settings(settings).unwrap();
        assert_eq!(checked.nwsim_version, *FULL_VERSION);

        let bad = ScoreSettings {
            min_chunk_size: 0,
            ..Default::default()
        };
        assert!(check_score_settings(bad).is_err());
    }
}
