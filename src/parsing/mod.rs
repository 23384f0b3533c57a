/*!
# Parsing module
Contains the logic for parsing input files into sequence pairs.
*/
/// Loaders for pair tables and all-vs-all sequence tables
pub mod sequence_pairs;
