use indicatif::{ParallelProgressIterator, ProgressStyle};
use log::{LevelFilter, debug, error, info, warn};
use rayon::prelude::*;
use std::path::Path;
use std::time::Instant;

use nwsim::cli::batch::{BatchSettings, check_batch_settings};
use nwsim::cli::core::{Commands, get_cli};
use nwsim::cli::score::{ScoreSettings, check_score_settings};
use nwsim::data_types::similarity_report::SimilarityReport;
use nwsim::parsing::sequence_pairs::{SequencePair, load_all_vs_all, load_sequence_pairs};
use nwsim::similarity::{ScoreConfig, ScoreConfigBuilder, SimilarityScorer};
use nwsim::util::json_io::save_json;
use nwsim::util::progress_bar::get_progress_style;
use nwsim::writers::score_writer::ScoreWriter;

/// Sets up logging before anything else gets checked
fn init_logging(verbosity: u8) {
    let filter_level: LevelFilter = match verbosity {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace
    };
    env_logger::builder()
        .format_timestamp_millis()
        .filter_level(filter_level)
        .init();
}

/// Sizes the global rayon pool, 0 lets rayon pick
fn init_thread_pool(threads: usize) {
    match rayon::ThreadPoolBuilder::new().num_threads(threads).build_global() {
        Ok(()) => {},
        Err(e) => {
            error!("Error while building thread pool: {e}");
            std::process::exit(exitcode::OSERR);
        }
    };
}

/// Creates the debug folder if specified and saves the CLI options into it
fn save_debug_settings<T: serde::Serialize>(debug_folder: Option<&Path>, settings: &T) {
    if let Some(debug_folder) = debug_folder {
        info!("Creating debug folder at {debug_folder:?}...");
        match std::fs::create_dir_all(debug_folder) {
            Ok(()) => {},
            Err(e) => {
                error!("Error while creating debug folder: {e}");
                std::process::exit(exitcode::IOERR);
            }
        }

        let cli_json = debug_folder.join("cli_settings.json");
        info!("Saving CLI options to {cli_json:?}...");
        if let Err(e) = save_json(settings, &cli_json) {
            error!("Error while saving CLI options: {e}");
            std::process::exit(exitcode::IOERR);
        }
    }
}

/// Builds the scorer; the global pool is already sized so no dedicated pool is requested
fn build_scorer(config: ScoreConfig) -> SimilarityScorer {
    match SimilarityScorer::new(config) {
        Ok(s) => s,
        Err(e) => {
            error!("Error while building scorer: {e}");
            std::process::exit(exitcode::SOFTWARE);
        }
    }
}

fn run_score(settings: ScoreSettings) {
    // start the timer
    let start_time = Instant::now();
    init_logging(settings.verbosity);

    let settings = match check_score_settings(settings) {
        Ok(s) => s,
        Err(e) => {
            error!("Error while verifying settings: {e:#}");
            std::process::exit(exitcode::CONFIG);
        }
    };

    init_thread_pool(settings.threads);
    save_debug_settings(settings.debug_folder.as_deref(), &settings);

    let score_config = match ScoreConfigBuilder::default()
        .mode(settings.engine)
        .min_chunk_size(settings.min_chunk_size)
        .build() {
        Ok(sc) => sc,
        Err(e) => {
            error!("Error while building score config: {e:?}");
            std::process::exit(exitcode::SOFTWARE);
        }
    };
    let scorer = build_scorer(score_config);

    info!("Scoring sequences...");
    let report = scorer.score_str(&settings.seq_a, &settings.seq_b);
    info!("Edit distance: {}", report.distance());
    info!("Similarity: {:.4}%", report.percentage());
    if report.is_exact_match() {
        info!("Sequences are identical, engine was skipped.");
    }

    match serde_json::to_string_pretty(&report) {
        Ok(text) => println!("{text}"),
        Err(e) => {
            error!("Error while serializing report: {e}");
            std::process::exit(exitcode::SOFTWARE);
        }
    }

    if let Some(json_fn) = settings.output_json.as_deref() {
        info!("Saving report to {json_fn:?}...");
        if let Err(e) = save_json(&report, json_fn) {
            error!("Error while saving report: {e:#}");
            std::process::exit(exitcode::IOERR);
        }
    }

    info!("Scoring completed in {} seconds.", start_time.elapsed().as_secs_f64());
}

fn run_batch(settings: BatchSettings) {
    // start the timer
    let start_time = Instant::now();
    init_logging(settings.verbosity);

    let settings = match check_batch_settings(settings) {
        Ok(s) => s,
        Err(e) => {
            error!("Error while verifying settings: {e:#}");
            std::process::exit(exitcode::CONFIG);
        }
    };

    init_thread_pool(settings.threads);
    save_debug_settings(settings.debug_folder.as_deref(), &settings);

    // load all of the pairs up front; this is single-threaded
    info!("Loading sequence pairs from {:?}...", settings.input_filename);
    let load_result = if settings.all_vs_all {
        load_all_vs_all(&settings.input_filename)
    } else {
        load_sequence_pairs(&settings.input_filename)
    };
    let all_pairs: Vec<SequencePair> = match load_result {
        Ok(pairs) => pairs,
        Err(e) => {
            error!("Error while loading sequence pairs: {e:#}");
            std::process::exit(exitcode::IOERR);
        }
    };
    info!("Loaded {} pairs.", all_pairs.len());

    // check if we're in debug mode
    let skip_count = settings.skip_pairs;
    let take_count = settings.take_pairs;
    if skip_count != 0 || take_count != usize::MAX {
        warn!("Debug run detected, output may be truncated.");
        warn!("Pairs to skip: {skip_count}");
        warn!("Pairs to process: {take_count}");
    }
    let all_pairs: Vec<SequencePair> = all_pairs.into_iter()
        .skip(skip_count)
        .take(take_count)
        .collect();

    let score_config = match ScoreConfigBuilder::default()
        .mode(settings.engine)
        .min_chunk_size(settings.min_chunk_size)
        .build() {
        Ok(sc) => sc,
        Err(e) => {
            error!("Error while building score config: {e:?}");
            std::process::exit(exitcode::SOFTWARE);
        }
    };
    let scorer = build_scorer(score_config);

    // run the parallel iterator to score them, collect preserves input order
    let style = get_progress_style("pairs").unwrap_or_else(|e| {
        warn!("Falling back to the default progress bar: {e}");
        ProgressStyle::default_bar()
    });
    info!("Scoring pairs...");
    let all_results: Vec<(SequencePair, SimilarityReport)> = all_pairs.into_par_iter()
        .map(|pair| {
            let report = scorer.score_str(pair.seq_a(), pair.seq_b());
            debug!("{} => {report:?}", pair.label());
            (pair, report)
        })
        .progress_with_style(style)
        .collect();
    info!("Pair scoring complete, saving all outputs...");

    let mut score_writer = match ScoreWriter::new(&settings.output_filename) {
        Ok(sw) => sw,
        Err(e) => {
            error!("Error while creating score writer: {e:#}");
            std::process::exit(exitcode::IOERR);
        }
    };

    let mut exact_pairs = 0;
    let mut total_similarity = 0.0;
    for (pair, report) in all_results.iter() {
        if let Err(e) = score_writer.write_score(pair, report) {
            error!("Error while writing scores: {e:#}");
            std::process::exit(exitcode::IOERR);
        }
        if report.is_exact_match() {
            exact_pairs += 1;
        }
        total_similarity += report.percentage();
    }
    if let Err(e) = score_writer.finish() {
        error!("Error while finalizing scores: {e:#}");
        std::process::exit(exitcode::IOERR);
    }

    let num_pairs = all_results.len();
    info!("Scored pairs: {num_pairs}");
    info!("\tExact matches: {exact_pairs}");
    if num_pairs > 0 {
        info!("\tMean similarity: {:.4}%", total_similarity / num_pairs as f64);
    }
    info!("Batch completed in {} seconds.", start_time.elapsed().as_secs_f64());
}

fn main() {
    let cli = get_cli();
    match cli.command {
        Commands::Score(settings) => {
            run_score(*settings);
        },
        Commands::Batch(settings) => {
            run_batch(*settings);
        }
    }

    info!("Process finished successfully.");
}
