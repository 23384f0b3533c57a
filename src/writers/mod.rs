/*!
# Writers module
Contains the logic for writing the output files for the batch command.
*/
/// Generates the per-pair score table
pub mod score_writer;
