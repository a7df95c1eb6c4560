use std::path::Path;
use crate::errors::ReportError;
use super::types::ReportSettings;
use super::security::validate_security_patterns;
use super::schema::SETTINGS_SCHEMA;
use tracing::warn;

const MAX_SETTINGS_BYTES: u64 = 1_048_576;

pub async fn parse_settings(path: &Path) -> Result<ReportSettings, ReportError> {
    if !path.exists() {
        return Err(ReportError::Config(format!("Settings file not found: {}", path.display())));
    }

    let metadata = tokio::fs::metadata(path).await?;
    if metadata.len() > MAX_SETTINGS_BYTES {
        return Err(ReportError::Config("Settings file exceeds 1MB limit".into()));
    }

    let content = tokio::fs::read_to_string(path).await?;
    parse_settings_str(&content)
}

pub fn parse_settings_str(content: &str) -> Result<ReportSettings, ReportError> {
    // An empty document means "all defaults"
    if content.trim().is_empty() {
        return Ok(ReportSettings::default());
    }

    let yaml: serde_yaml::Value = serde_yaml::from_str(content)?;

    validate_security_patterns(&yaml)?;
    validate_schema(&yaml)?;

    let settings: ReportSettings = serde_yaml::from_value(yaml)?;

    validate_semantics(&settings)?;

    Ok(settings)
}

/// Validate settings against the JSON schema. Violations are logged, not fatal.
fn validate_schema(yaml: &serde_yaml::Value) -> Result<(), ReportError> {
    let json_value = serde_json::to_value(yaml)
        .map_err(|e| ReportError::Config(format!("Settings conversion error: {}", e)))?;

    let compiled = jsonschema::JSONSchema::compile(&SETTINGS_SCHEMA)
        .map_err(|e| ReportError::Config(format!("Schema compilation error: {}", e)))?;

    let result = compiled.validate(&json_value);
    if let Err(errors) = result {
        for e in errors {
            warn!(
                validation_error = %format!("{} at {}", e, e.instance_path),
                "Settings schema warning"
            );
        }
    }

    Ok(())
}

fn validate_semantics(settings: &ReportSettings) -> Result<(), ReportError> {
    if settings.template.trim().is_empty() {
        return Err(ReportError::Config("Template must not be empty".into()));
    }

    if settings.report_name_pattern.contains('/') || settings.report_name_pattern.contains('\\') {
        return Err(ReportError::Config(format!(
            "Report name pattern must not contain path separators: {}",
            settings.report_name_pattern
        )));
    }

    if !settings.risks.any() {
        warn!("No risk levels selected, reports will contain no alerts");
    }
    if !settings.confidences.any() {
        warn!("No confidence levels selected, reports will contain no alerts");
    }

    Ok(())
}
