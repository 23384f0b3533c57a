use anyhow::bail;
use clap::{Parser, Subcommand};
use chrono::Datelike;
use lazy_static::lazy_static;
use std::path::Path;

use crate::cli::batch::BatchSettings;
use crate::cli::score::ScoreSettings;

lazy_static! {
    /// Stores the full version string we plan to use, which is generated in build.rs
    /// # Examples
    /// * `0.3.1-6bb9635-dirty` - while on a dirty branch
    /// * `0.3.1-6bb9635` - with a fresh commit
    pub static ref FULL_VERSION: String = format!("{}-{}", env!("CARGO_PKG_VERSION"), env!("VERGEN_GIT_DESCRIBE"));

    /// Shared after help string containing the legalese.
    pub static ref AFTER_HELP: String = format!("Copyright (C) 2023-{}     nwsim contributors
This program comes with ABSOLUTELY NO WARRANTY; see the MIT license for details.", chrono::Utc::now().year());
}

#[derive(Parser)]
#[clap(author,
    version = &**FULL_VERSION,
    about,
    after_help = &**AFTER_HELP)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands
}

/// nwsim, edit distance and similarity scoring via Needleman-Wunsch.
/// Select a subcommand to see more usage information:
#[derive(Subcommand)]
pub enum Commands {
    /// Scores a single pair of sequences provided on the command line
    Score(Box<ScoreSettings>),
    /// Scores every pair from a TSV/CSV file
    Batch(Box<BatchSettings>)
}

pub fn get_cli() -> Cli {
    Cli::parse()
}

/// Checks if a file exists and will otherwise exit
/// # Arguments
/// * `filename` - the file path to check for
/// * `label` - the label to use for error messages
pub fn check_required_filename(filename: &Path, label: &str) -> anyhow::Result<()> {
    if !filename.exists() {
        bail!("{} does not exist: \"{}\"", label, filename.display());
    }

    // file exists
    Ok(())
}

/// Logs the shared thread setting, 0 is a sentinel for rayon's default
/// # Arguments
/// * `threads` - the user provided thread count
pub fn describe_threads(threads: usize) -> String {
    if threads == 0 {
        "all available".to_string()
    } else {
        threads.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_score() {
        let cli = Cli::try_parse_from(["nwsim", "score", "-a", "kitten", "-b", "sitting", "--engine", "parallel", "-vv"]).unwrap();
        match cli.command {
            Commands::Score(settings) => {
                assert_eq!(settings.seq_a, "kitten");
                assert_eq!(settings.seq_b, "sitting");
                assert_eq!(settings.engine, crate::data_types::engine_mode::EngineMode::Parallel);
                assert_eq!(settings.verbosity, 2);
            },
            Commands::Batch(_) => panic!("expected score subcommand")
        }
    }

    #[test]
    fn test_parse_batch() {
        let cli = Cli::try_parse_from(["nwsim", "batch", "-i", "pairs.tsv", "-o", "scores.tsv", "--all-vs-all", "--threads", "4"]).unwrap();
        match cli.command {
            Commands::Batch(settings) => {
                assert!(settings.all_vs_all);
                assert_eq!(settings.threads, 4);
                assert_eq!(settings.engine, crate::data_types::engine_mode::EngineMode::Sequential);
            },
            Commands::Score(_) => panic!("expected batch subcommand")
        }
    }

    #[test]
    fn test_check_required_filename() {
        assert!(check_required_filename(Path::new("/definitely/not/here.tsv"), "Input").is_err());
        assert!(check_required_filename(&std::env::temp_dir(), "Temp").is_ok());
    }

    #[test]
    fn test_describe_threads() {
        assert_eq!(describe_threads(0), "all available");
        assert_eq!(describe_threads(8), "8");
    }
}
