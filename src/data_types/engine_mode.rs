use serde::Serialize;
use strum_macros::EnumString;

/// Selects which edit distance engine computes the distance
#[derive(Clone, Copy, Default, Debug, Eq, PartialEq, strum_macros::Display, EnumString, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum EngineMode {
    /// Row-major fill on the calling thread
    #[default]
    #[strum(ascii_case_insensitive, serialize = "sequential")]
    #[clap(name = "sequential")]
    Sequential,
    /// Anti-diagonal wavefront fill on the rayon pool
    #[strum(ascii_case_insensitive, serialize = "parallel")]
    #[clap(name = "parallel")]
    Parallel,
}

impl EngineMode {
    /// Maps the boolean `use_parallel` flag of the public API onto a mode
    pub fn from_parallel_flag(use_parallel: bool) -> Self {
        if use_parallel {
            EngineMode::Parallel
        } else {
            EngineMode::Sequential
        }
    }

    /// Computes the edit distance with the selected engine
    /// # Arguments
    /// * `a` - the first sequence
    /// * `b` - the second sequence
    /// * `min_chunk` - minimum cells per rayon task, ignored by the sequential engine
    pub fn edit_distance<T: PartialEq + Sync>(&self, a: &[T], b: &[T], min_chunk: usize) -> usize {
        match self {
            EngineMode::Sequential => crate::alignment::edit_distance(a, b),
            EngineMode::Parallel => crate::alignment::edit_distance_parallel_with_chunk(a, b, min_chunk)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_parse_and_display() {
        assert_eq!(EngineMode::from_str("sequential").unwrap(), EngineMode::Sequential);
        assert_eq!(EngineMode::from_str("PARALLEL").unwrap(), EngineMode::Parallel);
        assert!(EngineMode::from_str("wavefront").is_err());

        assert_eq!(EngineMode::Sequential.to_string(), "sequential");
        assert_eq!(EngineMode::Parallel.to_string(), "parallel");
        assert_eq!(serde_json::to_string(&EngineMode::Parallel).unwrap(), "\"parallel\"");
    }

    #[test]
    fn test_from_parallel_flag() {
        assert_eq!(EngineMode::from_parallel_flag(false), EngineMode::Sequential);
        assert_eq!(EngineMode::from_parallel_flag(true), EngineMode::Parallel);
        assert_eq!(EngineMode::default(), EngineMode::Sequential);
    }

    #[test]
    fn test_edit_distance_dispatch() {
        let a = b"GATTACA";
        let b = b"GCATGCT";
        for mode in [EngineMode::Sequential, EngineMode::Parallel] {
            assert_eq!(mode.edit_distance(a, b, 1), 4, "{mode}");
        }
    }
}
