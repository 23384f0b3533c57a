/*!
# CLI module
Command line interface functionality that is specific to nwsim.
*/

/// The batch CLI subcommand
pub mod batch;
/// The main CLI module that contains the top-level CLI parser and help text
pub mod core;
/// The single pair CLI subcommand
pub mod score;
