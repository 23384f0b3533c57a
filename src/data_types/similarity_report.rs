use serde::Serialize;

use crate::data_types::engine_mode::EngineMode;

/// Intended to capture everything we know about a single similarity computation
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct SimilarityReport {
    /// Number of symbols in the first sequence
    len_a: usize,
    /// Number of symbols in the second sequence
    len_b: usize,
    /// Unit-cost edit distance between the two sequences
    distance: usize,
    /// Similarity percentage in [0, 100]
    percentage: f64,
    /// The engine that was selected for this computation
    mode: EngineMode,
    /// If true, the sequences were identical and no engine was invoked
    exact_match: bool
}

impl SimilarityReport {
    /// Constructor for a computed distance, this also does the normalization
    /// # Arguments
    /// * `len_a` - length of the first sequence
    /// * `len_b` - length of the second sequence
    /// * `distance` - edit distance reported by the engine
    /// * `mode` - the engine that produced `distance`
    pub fn new(len_a: usize, len_b: usize, distance: usize, mode: EngineMode) -> Self {
        Self {
            len_a,
            len_b,
            distance,
            percentage: normalize_distance(distance, len_a, len_b),
            mode,
            exact_match: false
        }
    }

    /// Constructor for the identical-sequence shortcut
    /// # Arguments
    /// * `len` - length of both sequences
    /// * `mode` - the engine that would have been used
    pub fn new_exact(len: usize, mode: EngineMode) -> Self {
        Self {
            len_a: len,
            len_b: len,
            distance: 0,
            percentage: 100.0,
            mode,
            exact_match: true
        }
    }

    // getters
    pub fn len_a(&self) -> usize {
        self.len_a
    }

    pub fn len_b(&self) -> usize {
        self.len_b
    }

    pub fn distance(&self) -> usize {
        self.distance
    }

    pub fn percentage(&self) -> f64 {
        self.percentage
    }

    pub fn mode(&self) -> EngineMode {
        self.mode
    }

    pub fn is_exact_match(&self) -> bool {
        self.exact_match
    }
}

/// Converts an edit distance into a similarity percentage relative to the longer sequence.
/// The maximum length is computed before any floating point division.
/// Both lengths at 0 are mapped to 100.0, since two empty sequences are identical.
/// # Arguments
/// * `distance` - the edit distance, which is never larger than `max(len_a, len_b)`
/// * `len_a` - length of the first sequence
/// * `len_b` - length of the second sequence
pub fn normalize_distance(distance: usize, len_a: usize, len_b: usize) -> f64 {
    let max_len = len_a.max(len_b);
    if max_len == 0 {
        return 100.0;
    }
    debug_assert!(distance <= max_len);
    (1.0 - distance as f64 / max_len as f64) * 100.0
}
