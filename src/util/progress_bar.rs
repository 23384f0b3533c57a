use indicatif::style::TemplateError;
use indicatif::ProgressStyle;

/// Progress bar styling for work counted in `unit`s, e.g. "pairs".
/// # Arguments
/// * `unit` - plural label shown after the position counter
/// # Errors
/// * if the generated template does not parse
pub fn get_progress_style(unit: &str) -> Result<ProgressStyle, TemplateError> {
    let template = format!(
        "[{{elapsed_precise}}] {{bar:40.green/white}} {{human_pos}}/{{human_len}} {unit} ({{percent}}%); ETA: {{eta}}; {{per_sec}}"
    );
    Ok(ProgressStyle::with_template(&template)?.progress_chars("=> "))
}
