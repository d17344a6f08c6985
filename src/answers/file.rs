//! Answers file loading.
//!
//! Reads a JSON answers document, falling back to YAML when the text is not
//! JSON.

use crate::error::{AppError, Result};
use crate::models::Answers;
use std::path::Path;

/// Parse answers text, trying JSON first and YAML second.
///
/// # Arguments
/// * `text` - The document contents
/// * `origin` - Name of the document, used in error messages
pub fn parse_answers(text: &str, origin: &str) -> Result<Answers> {
    if serde_json::from_str::<serde_json::Value>(text).is_ok() {
        log::debug!("Parsing {origin} as JSON");
        let mut json_deserializer = serde_json::Deserializer::from_str(text);
        return serde_path_to_error::deserialize(&mut json_deserializer).map_err(|e| {
            AppError::Answers(format!(
                "Error parsing JSON answers {origin}: path={} error={}",
                e.path(),
                e.inner()
            ))
        });
    }

    log::debug!("{origin} is not JSON, trying YAML");
    let yaml_deserializer = serde_yaml::Deserializer::from_str(text);
    serde_path_to_error::deserialize(yaml_deserializer).map_err(|e| {
        AppError::Answers(format!(
            "Unable to parse answers file as JSON or YAML: {origin}: path={} error={}",
            e.path(),
            e.inner()
        ))
    })
}

/// Load answers from a JSON or YAML file.
///
/// # Returns
/// * `Ok(Answers)` - The parsed answers
/// * `Err` - If the file cannot be read or is neither JSON nor YAML
pub fn load_answers(path: &Path) -> Result<Answers> {
    let origin = path.display().to_string();
    let text = std::fs::read_to_string(path)
        .map_err(|e| AppError::Answers(format!("Cannot read answers file {origin}: {e}")))?;
    log::info!("Reading answers from file: {origin}");
    parse_answers(&text, &origin)
}
