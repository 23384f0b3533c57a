/// Selects between the sequential and parallel engines
pub mod engine_mode;
/// Result record for a single similarity computation
pub mod similarity_report;
