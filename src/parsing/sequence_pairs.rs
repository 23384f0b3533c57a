use anyhow::{bail, Context};
use flate2::read::MultiGzDecoder;
use itertools::Itertools;
use serde::Deserialize;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// A labeled pair of sequences, the unit of work for batch scoring
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SequencePair {
    /// Label carried through to the output
    label: String,
    /// First sequence
    seq_a: String,
    /// Second sequence
    seq_b: String
}

impl SequencePair {
    /// Constructor
    pub fn new(label: String, seq_a: String, seq_b: String) -> Self {
        Self {
            label, seq_a, seq_b
        }
    }

    // getters
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn seq_a(&self) -> &str {
        &self.seq_a
    }

    pub fn seq_b(&self) -> &str {
        &self.seq_b
    }
}

/// Row layout for pair files
#[derive(Deserialize)]
struct PairRow {
    /// Optional label, defaults to `pair_{row}` when absent or empty
    #[serde(default)]
    label: Option<String>,
    seq1: String,
    seq2: String
}

/// Row layout for all-vs-all files
#[derive(Deserialize)]
struct SequenceRow {
    label: String,
    sequence: String
}

/// Opens a delimited table with a header line.
/// `.csv` files are comma delimited, everything else is tab delimited; a trailing `.gz` is decompressed first.
/// # Arguments
/// * `filename` - the table to open
/// # Errors
/// * if the file cannot be opened
fn open_table(filename: &Path) -> anyhow::Result<csv::Reader<Box<dyn Read>>> {
    let is_gz = filename.extension().unwrap_or_default() == "gz";
    let inner_path = if is_gz { filename.with_extension("") } else { filename.to_path_buf() };
    let is_csv = inner_path.extension().unwrap_or_default() == "csv";
    let delimiter: u8 = if is_csv { b',' } else { b'\t' };

    let file = File::open(filename)
        .with_context(|| format!("Error while opening {filename:?}:"))?;
    let reader: Box<dyn Read> = if is_gz {
        Box::new(MultiGzDecoder::new(file))
    } else {
        Box::new(file)
    };

    Ok(csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .from_reader(reader))
}

/// Loads a table of explicit pairs with the columns `seq1`, `seq2`, and optionally `label`.
/// Pairs are returned in file order.
/// # Arguments
/// * `filename` - the TSV/CSV file to parse, optionally gzipped
/// # Errors
/// * if the file cannot be opened
/// * if any row is missing a required column
pub fn load_sequence_pairs(filename: &Path) -> anyhow::Result<Vec<SequencePair>> {
    let mut csv_reader = open_table(filename)?;
    let mut pairs = vec![];
    for (row_index, result) in csv_reader.deserialize().enumerate() {
        let row: PairRow = result
            .with_context(|| format!("Error while reading row {row_index} of {filename:?}:"))?;
        let label = row.label
            .filter(|l| !l.is_empty())
            .unwrap_or_else(|| format!("pair_{row_index}"));
        pairs.push(SequencePair::new(label, row.seq1, row.seq2));
    }
    Ok(pairs)
}

/// Loads a table of labeled sequences with the columns `label` and `sequence`, then generates every unordered pair.
/// Pairs are labeled `{label1}:{label2}` and follow file order, i.e. (0,1), (0,2), ..., (1,2), ...
/// # Arguments
/// * `filename` - the TSV/CSV file to parse, optionally gzipped
/// # Errors
/// * if the file cannot be opened or a row is malformed
/// * if a label appears more than once
pub fn load_all_vs_all(filename: &Path) -> anyhow::Result<Vec<SequencePair>> {
    let mut csv_reader = open_table(filename)?;
    let rows: Vec<SequenceRow> = csv_reader.deserialize()
        .collect::<Result<_, _>>()
        .with_context(|| format!("Error while reading {filename:?}:"))?;

    if let Some(duplicate) = rows.iter().map(|r| r.label.as_str()).duplicates().next() {
        bail!("Duplicate label found in {filename:?}: {duplicate}");
    }

    let pairs = rows.iter()
        .tuple_combinations()
        .map(|(r1, r2)| SequencePair::new(
            format!("{}:{}", r1.label, r2.label),
            r1.sequence.clone(),
            r2.sequence.clone()
        ))
        .collect();
    Ok(pairs)
}
