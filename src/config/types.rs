use serde::{Deserialize, Serialize};
use crate::models::{ConfidenceFlags, RiskFlags};
use crate::reporting::naming::DEFAULT_NAME_PATTERN;
use crate::templates::REPORT_DATA_JSON;

/// Report defaults persisted between sessions.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ReportSettings {
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Config name of the template.
    #[serde(default = "default_template")]
    pub template: String,
    #[serde(default = "default_report_directory")]
    pub report_directory: String,
    #[serde(default = "default_template_directory")]
    pub template_directory: String,
    #[serde(default = "default_name_pattern")]
    pub report_name_pattern: String,
    #[serde(default)]
    pub display_report: bool,
    #[serde(default)]
    pub risks: RiskFlags,
    #[serde(default)]
    pub confidences: ConfidenceFlags,
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            title: default_title(),
            description: String::new(),
            template: default_template(),
            report_directory: default_report_directory(),
            template_directory: default_template_directory(),
            report_name_pattern: default_name_pattern(),
            display_report: false,
            risks: RiskFlags::default(),
            confidences: ConfidenceFlags::default(),
        }
    }
}

fn default_title() -> String {
    "Scan Report".to_string()
}

fn default_template() -> String {
    REPORT_DATA_JSON.to_string()
}

fn default_report_directory() -> String {
    ".".to_string()
}

fn default_template_directory() -> String {
    "templates".to_string()
}

fn default_name_pattern() -> String {
    DEFAULT_NAME_PATTERN.to_string()
}
