use anyhow::Context;
use flate2::write::GzEncoder;
use serde::Serialize;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::data_types::engine_mode::EngineMode;
use crate::data_types::similarity_report::SimilarityReport;
use crate::parsing::sequence_pairs::SequencePair;

/// Underlying file handle, either plain or gzip compressed
enum ScoreSink {
    Plain(File),
    Gzip(GzEncoder<File>)
}

impl Write for ScoreSink {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        match self {
            ScoreSink::Plain(file) => file.write(buf),
            ScoreSink::Gzip(encoder) => encoder.write(buf)
        }
    }

    fn flush(&mut self) -> std::io::Result<()> {
        match self {
            ScoreSink::Plain(file) => file.flush(),
            ScoreSink::Gzip(encoder) => encoder.flush()
        }
    }
}

impl ScoreSink {
    /// Flushes everything and writes the gzip trailer if compressed
    fn finish(self) -> std::io::Result<()> {
        match self {
            ScoreSink::Plain(mut file) => file.flush(),
            ScoreSink::Gzip(encoder) => encoder.finish().map(|_file| ())
        }
    }
}

/// This is a wrapper for writing out per-pair scores to a file
pub struct ScoreWriter {
    /// Handle on the writer
    csv_writer: csv::Writer<ScoreSink>,
    /// Output path, kept for error messages
    filename: PathBuf
}

/// Contains all the data written to each row of our score file
#[derive(Serialize)]
struct ScoreRow<'a> {
    /// Label of the pair
    label: &'a str,
    /// Symbols in the first sequence
    len_a: usize,
    /// Symbols in the second sequence
    len_b: usize,
    /// Unit-cost edit distance
    distance: usize,
    /// Similarity = (1 - distance / max(len_a, len_b)) * 100
    similarity: f64,
    /// Engine used for the computation
    engine: EngineMode,
    /// True if the identical-sequence shortcut was used
    exact_match: bool
}

impl<'a> ScoreRow<'a> {
    /// Creates a new row from a pair and its report
    fn new(pair: &'a SequencePair, report: &SimilarityReport) -> Self {
        Self {
            label: pair.label(),
            len_a: report.len_a(),
            len_b: report.len_b(),
            distance: report.distance(),
            similarity: report.percentage(),
            engine: report.mode(),
            exact_match: report.is_exact_match()
        }
    }
}

impl ScoreWriter {
    /// Creates a new score writer
    /// # Arguments
    /// * `filename` - path to the output, `.csv` is comma delimited and anything else is tab delimited; `.gz` gets compressed
    /// # Errors
    /// * if the file cannot be created
    pub fn new(filename: &Path) -> anyhow::Result<Self> {
        let is_gz = filename.extension().unwrap_or_default() == "gz";
        let inner_path = if is_gz { filename.with_extension("") } else { filename.to_path_buf() };
        let is_csv: bool = inner_path.extension().unwrap_or_default() == "csv";
        let delimiter: u8 = if is_csv { b',' } else { b'\t' };

        let file = File::create(filename)
            .with_context(|| format!("Error while creating {filename:?}:"))?;
        let sink = if is_gz {
            ScoreSink::Gzip(GzEncoder::new(file, flate2::Compression::default()))
        } else {
            ScoreSink::Plain(file)
        };

        let csv_writer = csv::WriterBuilder::new()
            .delimiter(delimiter)
            .from_writer(sink);
        Ok(Self {
            csv_writer,
            filename: filename.to_path_buf()
        })
    }

    /// Writes a single scored pair
    /// # Arguments
    /// * `pair` - the input pair, only the label is written
    /// * `report` - the computed report for the pair
    pub fn write_score(&mut self, pair: &SequencePair, report: &SimilarityReport) -> csv::Result<()> {
        let row = ScoreRow::new(pair, report);
        self.csv_writer.serialize(&row)
    }

    /// Flushes all buffered rows and finalizes the file, including the gzip trailer.
    /// # Errors
    /// * if flushing or finalizing the output fails
    pub fn finish(self) -> anyhow::Result<()> {
        let filename = self.filename;
        let sink = self.csv_writer.into_inner()
            .map_err(|e| e.into_error())
            .with_context(|| format!("Error while flushing {filename:?}:"))?;
        sink.finish()
            .with_context(|| format!("Error while finalizing {filename:?}:"))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;

    fn example_rows() -> Vec<(SequencePair, SimilarityReport)> {
        vec![
            (
                SequencePair::new("k".to_string(), "abc".to_string(), "abcd".to_string()),
                SimilarityReport::new(3, 4, 1, EngineMode::Parallel)
            ),
            (
                SequencePair::new("e".to_string(), "abc".to_string(), "abc".to_string()),
                SimilarityReport::new_exact(3, EngineMode::Sequential)
            ),
        ]
    }

    fn write_rows(out_fn: &Path) {
        let mut writer = ScoreWriter::new(out_fn).unwrap();
        for (pair, report) in example_rows().iter() {
            writer.write_score(pair, report).unwrap();
        }
        writer.finish().unwrap();
    }

    #[test]
    fn test_write_scores_tsv() {
        let out_fn = std::env::temp_dir().join(format!("nwsim_{}_scores.tsv", std::process::id()));
        write_rows(&out_fn);

        let text = std::fs::read_to_string(&out_fn).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines, vec![
            "label\tlen_a\tlen_b\tdistance\tsimilarity\tengine\texact_match",
            "k\t3\t4\t1\t75.0\tparallel\tfalse",
            "e\t3\t3\t0\t100.0\tsequential\ttrue",
        ]);
        std::fs::remove_file(&out_fn).unwrap();
    }

    #[test]
    fn test_write_scores_csv_gz() {
        let out_fn = std::env::temp_dir().join(format!("nwsim_{}_scores.csv.gz", std::process::id()));
        write_rows(&out_fn);

        // a complete gzip stream decodes cleanly only if the trailer was written
        let mut decoder = flate2::read::MultiGzDecoder::new(File::open(&out_fn).unwrap());
        let mut text = String::new();
        decoder.read_to_string(&mut text).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines, vec![
            "label,len_a,len_b,distance,similarity,engine,exact_match",
            "k,3,4,1,75.0,parallel,false",
            "e,3,3,0,100.0,sequential,true",
        ]);
        std::fs::remove_file(&out_fn).unwrap();
    }

    #[test]
    fn test_write_scores_plain_csv() {
        let out_fn = std::env::temp_dir().join(format!("nwsim_{}_scores.csv", std::process::id()));
        write_rows(&out_fn);

        let text = std::fs::read_to_string(&out_fn).unwrap();
        assert_eq!(text.lines().nth(1), Some("k,3,4,1,75.0,parallel,false"));
        std::fs::remove_file(&out_fn).unwrap();
    }
}
