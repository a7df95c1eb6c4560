use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("Report directory is not writable: {}", .0.display())]
    DirectoryNotWritable(PathBuf),

    #[error("Report file is not writable: {}", .0.display())]
    FileNotWritable(PathBuf),

    #[error("No alerts match the selected scope and filters")]
    NoAlertsMatched,

    #[error("Failed to generate report using template {template}: {message}")]
    GenerationFailed { template: String, message: String },

    #[error("Failed to save report settings: {0}")]
    ConfigPersistenceFailed(String),

    #[error("Unknown report template: {0}")]
    UnknownTemplate(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Report generation cancelled")]
    Cancelled,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}
