/// Sequential and wavefront edit distance engines
pub mod alignment;
/// Command line interface functionality
pub mod cli;
/// Contains various shared data types
pub mod data_types;
/// Tooling for parsing input files into meaningful structs / data
pub mod parsing;
/// Converts edit distances into similarity percentages
pub mod similarity;
/// Various utility functions that tend to be very generic
pub mod util;
/// All output writers
pub mod writers;
