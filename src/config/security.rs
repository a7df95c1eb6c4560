use crate::errors::ReportError;

/// Free text copied into the rendered report.
const TEXT_FIELDS: &[&str] = &["title", "description"];
const TEXT_PATTERNS: &[&str] = &["<script", "javascript:", "vbscript:", "data:text/html"];

/// Local directories. Relative paths, `..` included, are allowed.
const DIRECTORY_FIELDS: &[&str] = &["report_directory", "template_directory"];
const DIRECTORY_PATTERNS: &[&str] = &["file://", "http://", "https://", "\0"];

/// Reject report text that would inject script into rendered reports, and directory
/// settings that are URLs rather than local paths.
pub fn validate_security_patterns(value: &serde_yaml::Value) -> Result<(), ReportError> {
    let Some(map) = value.as_mapping() else {
        return Ok(());
    };

    for (key, value) in map {
        let (Some(key), Some(text)) = (key.as_str(), value.as_str()) else {
            continue;
        };
        let patterns = if TEXT_FIELDS.contains(&key) {
            TEXT_PATTERNS
        } else if DIRECTORY_FIELDS.contains(&key) {
            DIRECTORY_PATTERNS
        } else {
            continue;
        };

        let lower = text.to_lowercase();
        if let Some(pattern) = patterns.iter().find(|p| lower.contains(*p)) {
            return Err(ReportError::Config(format!(
                "Dangerous pattern '{}' found at settings path: {}",
                pattern.escape_default(),
                key
            )));
        }
    }

    Ok(())
}
