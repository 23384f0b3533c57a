/*!
# Similarity module
Wraps the edit distance engines into a bounded similarity percentage.

The percentage is `(1 - distance / max(len(a), len(b))) * 100`, which is always in [0, 100] because the unit-cost edit distance never exceeds the length of the longer sequence.
Identical sequences short-circuit to 100 without running an engine, which also covers two empty sequences.

## Example usage
```rust
use nwsim::similarity::{string_similarity_percentage, ScoreConfigBuilder, SimilarityScorer};
use nwsim::data_types::engine_mode::EngineMode;

assert_eq!(string_similarity_percentage("abc", "abcd", false), 75.0);
assert_eq!(string_similarity_percentage("abcdef", "abc", true), 50.0);

let config = ScoreConfigBuilder::default()
    .mode(EngineMode::Parallel)
    .threads(2)
    .build().unwrap();
let scorer = SimilarityScorer::new(config).unwrap();
let report = scorer.score_str("kitten", "sitting");
assert_eq!(report.distance(), 3);
```
*/

use derive_builder::Builder;
use log::debug;

use crate::alignment::parallel::DEFAULT_MIN_CHUNK_SIZE;
use crate::data_types::engine_mode::EngineMode;
use crate::data_types::similarity_report::SimilarityReport;

#[derive(thiserror::Error, Debug)]
pub enum SimilarityError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("failed to build thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

/// Controls how a `SimilarityScorer` computes distances
#[derive(Builder, Clone, Copy, Debug)]
#[builder(default, build_fn(validate = "Self::validate"))]
pub struct ScoreConfig {
    /// The engine used for every non-identical pair
    mode: EngineMode,
    /// Minimum number of diagonal cells per rayon task in parallel mode
    min_chunk_size: usize,
    /// If set, parallel work runs inside a dedicated pool with this many threads instead of the current pool
    #[builder(setter(strip_option))]
    threads: Option<usize>,
}

impl Default for ScoreConfig {
    fn default() -> Self {
        Self {
            mode: EngineMode::Sequential,
            min_chunk_size: DEFAULT_MIN_CHUNK_SIZE,
            threads: None
        }
    }
}

impl ScoreConfigBuilder {
    fn validate(&self) -> Result<(), String> {
        if self.min_chunk_size == Some(0) {
            return Err("min_chunk_size must be >0".to_string());
        }
        Ok(())
    }
}

impl ScoreConfig {
    pub fn mode(&self) -> EngineMode {
        self.mode
    }

    pub fn min_chunk_size(&self) -> usize {
        self.min_chunk_size
    }

    pub fn threads(&self) -> Option<usize> {
        self.threads
    }
}

/// Reusable scorer that applies one `ScoreConfig` to many sequence pairs.
/// Each call is independent; the only state is the optional dedicated thread pool.
pub struct SimilarityScorer {
    /// The configuration used for every call
    config: ScoreConfig,
    /// Dedicated pool, only present if `threads` was configured
    thread_pool: Option<rayon::ThreadPool>
}

impl SimilarityScorer {
    /// Creates a new scorer, building the dedicated thread pool if requested.
    /// # Arguments
    /// * `config` - the scoring configuration
    /// # Errors
    /// * if `threads` is set to 0
    /// * if rayon fails to build the pool
    pub fn new(config: ScoreConfig) -> Result<Self, SimilarityError> {
        let thread_pool = match config.threads {
            Some(0) => {
                return Err(SimilarityError::InvalidArgument("threads must be >0".to_string()));
            },
            Some(num_threads) => {
                debug!("Building dedicated scoring pool with {num_threads} threads");
                Some(rayon::ThreadPoolBuilder::new().num_threads(num_threads).build()?)
            },
            None => None
        };
        Ok(Self {
            config,
            thread_pool
        })
    }

    pub fn config(&self) -> ScoreConfig {
        self.config
    }

    /// Scores two sequences with the configured engine
    /// # Arguments
    /// * `a` - the first sequence
    /// * `b` - the second sequence
    pub fn score<T: PartialEq + Sync>(&self, a: &[T], b: &[T]) -> SimilarityReport {
        score_sequences(a, b, self.config.mode, self.config.min_chunk_size, self.thread_pool.as_ref())
    }

    /// Scores two strings, comparing them symbol by symbol as `char`s
    pub fn score_str(&self, s1: &str, s2: &str) -> SimilarityReport {
        let a: Vec<char> = s1.chars().collect();
        let b: Vec<char> = s2.chars().collect();
        self.score(&a, &b)
    }
}

/// Shared implementation for all of the scoring entry points
fn score_sequences<T: PartialEq + Sync>(
    a: &[T], b: &[T], mode: EngineMode, min_chunk: usize, thread_pool: Option<&rayon::ThreadPool>
) -> SimilarityReport {
    if a == b {
        debug!("Identical sequences of length {}, skipping {mode} engine", a.len());
        return SimilarityReport::new_exact(a.len(), mode);
    }

    let distance = match (mode, thread_pool) {
        (EngineMode::Parallel, Some(pool)) => pool.install(|| mode.edit_distance(a, b, min_chunk)),
        _ => mode.edit_distance(a, b, min_chunk)
    };
    SimilarityReport::new(a.len(), b.len(), distance, mode)
}

/// Computes the full similarity report for two sequences on the current rayon pool
/// # Arguments
/// * `a` - the first sequence
/// * `b` - the second sequence
/// * `mode` - the engine to use if the sequences are not identical
pub fn similarity_report<T: PartialEq + Sync>(a: &[T], b: &[T], mode: EngineMode) -> SimilarityReport {
    score_sequences(a, b, mode, DEFAULT_MIN_CHUNK_SIZE, None)
}

/// Calculates the similarity percentage between two sequences, in [0, 100].
/// # Arguments
/// * `a` - the first sequence
/// * `b` - the second sequence
/// * `use_parallel` - if true, uses the wavefront engine instead of the sequential one
pub fn similarity_percentage<T: PartialEq + Sync>(a: &[T], b: &[T], use_parallel: bool) -> f64 {
    similarity_percentage_with_mode(a, b, EngineMode::from_parallel_flag(use_parallel))
}

/// Same as `similarity_percentage`, but with an explicit engine mode
pub fn similarity_percentage_with_mode<T: PartialEq + Sync>(a: &[T], b: &[T], mode: EngineMode) -> f64 {
    similarity_report(a, b, mode).percentage()
}

/// Edit distance between two strings, compared as `char`s
pub fn string_edit_distance(s1: &str, s2: &str, mode: EngineMode) -> usize {
    let a: Vec<char> = s1.chars().collect();
    let b: Vec<char> = s2.chars().collect();
    mode.edit_distance(&a, &b, DEFAULT_MIN_CHUNK_SIZE)
}

/// Similarity percentage between two strings, compared as `char`s
pub fn string_similarity_percentage(s1: &str, s2: &str, use_parallel: bool) -> f64 {
    let a: Vec<char> = s1.chars().collect();
    let b: Vec<char> = s2.chars().collect();
    similarity_percentage(&a, &b, use_parallel)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx_eq::assert_approx_eq;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    const MODES: [EngineMode; 2] = [EngineMode::Sequential, EngineMode::Parallel];

    fn random_string(rng: &mut StdRng, max_len: usize) -> String {
        // small alphabet with a multi-byte symbol so matches are common
        let alphabet = ['a', 'b', 'c', 'é'];
        let len = rng.gen_range(0..=max_len);
        (0..len).map(|_| alphabet[rng.gen_range(0..alphabet.len())]).collect()
    }

    #[test]
    fn test_distance_scenarios() {
        let scenarios = [
            ("", "", 0),
            ("abc", "", 3),
            ("", "xyz", 3),
            ("kitten", "sitting", 3),
            ("kitten", "kitten", 0),
            ("abc", "def", 3),
            ("abcdef", "abc", 3),
            ("abc", "abcd", 1),
        ];
        for mode in MODES {
            for (s1, s2, expected) in scenarios {
                assert_eq!(string_edit_distance(s1, s2, mode), expected, "{mode}: {s1:?} vs {s2:?}");
            }
        }
    }

    #[test]
    fn test_percentage_scenarios() {
        let scenarios = [
            ("", "", 100.0),
            ("abc", "", 0.0),
            ("", "xyz", 0.0),
            ("kitten", "kitten", 100.0),
            ("abc", "def", 0.0),
            ("abcdef", "abc", 50.0),
            ("abc", "abcd", 75.0),
        ];
        for use_parallel in [false, true] {
            for (s1, s2, expected) in scenarios {
                assert_eq!(string_similarity_percentage(s1, s2, use_parallel), expected, "{s1:?} vs {s2:?}");
            }

            let kitten = string_similarity_percentage("kitten", "sitting", use_parallel);
            assert_approx_eq!(kitten, (1.0 - 3.0 / 7.0) * 100.0);
            assert!((kitten - 57.1428).abs() < 0.001);
        }
    }

    #[test]
    fn test_generic_sequences() {
        let v1: Vec<u8> = vec![0, 1, 2, 4, 5];
        let v2: Vec<u8> = vec![0, 1, 3, 4, 5];
        assert_eq!(similarity_percentage(&v1, &v2, false), 80.0);
        assert_eq!(similarity_percentage(&v1, &v2, true), 80.0);
        assert_eq!(similarity_percentage::<u8>(&[], &[], true), 100.0);

        // multi-byte symbols count once
        assert_eq!(string_edit_distance("café", "cafe", EngineMode::Sequential), 1);
        assert_eq!(string_similarity_percentage("naïve", "naive", true), 80.0);
    }

    #[test]
    fn test_similarity_report() {
        let report = similarity_report(b"ACGTACGT", b"ACGTCCGT", EngineMode::Parallel);
        assert_eq!(report.distance(), 1);
        assert_eq!(report.percentage(), 87.5);
        assert_eq!(report.mode(), EngineMode::Parallel);
        assert!(!report.is_exact_match());

        let report = similarity_report(b"ACGT", b"ACGT", EngineMode::Parallel);
        assert!(report.is_exact_match());
        assert_eq!(report.percentage(), 100.0);
    }

    #[test]
    fn test_properties_random() {
        let mut rng = StdRng::seed_from_u64(2024);
        for _ in 0..100 {
            let x: Vec<char> = random_string(&mut rng, 24).chars().collect();
            let y: Vec<char> = random_string(&mut rng, 24).chars().collect();
            let z: Vec<char> = random_string(&mut rng, 24).chars().collect();

            for mode in MODES {
                let dxy = mode.edit_distance(&x, &y, 1);
                let dyx = mode.edit_distance(&y, &x, 1);
                let dxz = mode.edit_distance(&x, &z, 1);
                let dyz = mode.edit_distance(&y, &z, 1);

                // identity
                assert_eq!(mode.edit_distance(&x, &x, 1), 0);
                // symmetry
                assert_eq!(dxy, dyx);
                // bounds
                assert!(x.len().abs_diff(y.len()) <= dxy);
                assert!(dxy <= x.len().max(y.len()));
                // triangle inequality
                assert!(dxz <= dxy + dyz);

                // percentage stays in range
                let pct = similarity_percentage_with_mode(&x, &y, mode);
                assert!((0.0..=100.0).contains(&pct), "{pct}");
            }

            // equivalence of engines
            assert_eq!(
                crate::alignment::edit_distance(&x, &y),
                crate::alignment::edit_distance_parallel_with_chunk(&x, &y, 1)
            );
        }
    }

    #[test]
    fn test_config_builder() {
        let config = ScoreConfigBuilder::default().build().unwrap();
        assert_eq!(config.mode(), EngineMode::Sequential);
        assert_eq!(config.min_chunk_size(), DEFAULT_MIN_CHUNK_SIZE);
        assert_eq!(config.threads(), None);

        let config = ScoreConfigBuilder::default()
            .mode(EngineMode::Parallel)
            .min_chunk_size(8)
            .threads(3)
            .build().unwrap();
        assert_eq!(config.mode(), EngineMode::Parallel);
        assert_eq!(config.min_chunk_size(), 8);
        assert_eq!(config.threads(), Some(3));

        assert!(ScoreConfigBuilder::default().min_chunk_size(0).build().is_err());
    }

    #[test]
    fn test_scorer() {
        for mode in MODES {
            let config = ScoreConfigBuilder::default()
                .mode(mode)
                .threads(2)
                .build().unwrap();
            let scorer = SimilarityScorer::new(config).unwrap();
            assert_eq!(scorer.config().mode(), mode);

            let report = scorer.score_str("kitten", "sitting");
            assert_eq!(report.distance(), 3);
            assert_eq!(report.mode(), mode);
            assert_approx_eq!(report.percentage(), (1.0 - 3.0 / 7.0) * 100.0);

            let report = scorer.score(b"abc", b"abc");
            assert!(report.is_exact_match());
        }
    }

    #[test]
    fn test_scorer_invalid_threads() {
        let config = ScoreConfigBuilder::default()
            .threads(0)
            .build().unwrap();
        let result = SimilarityScorer::new(config);
        assert!(matches!(result, Err(SimilarityError::InvalidArgument(_))));
    }
}
