use std::path::PathBuf;

use crate::config::ReportSettings;
use crate::models::{ConfidenceFlags, FilterCriteria, ReportHeader, RiskFlags};
use crate::reporting::naming::{report_base_name, report_file_name};
use crate::templates::Template;

/// Everything the user chose for one generation attempt.
#[derive(Debug, Clone)]
pub struct ReportRequest {
    pub title: String,
    pub description: String,
    /// Template display name or config name.
    pub template: String,
    pub report_directory: PathBuf,
    pub template_directory: String,
    /// Explicit file name including extension; overrides the name pattern.
    pub report_name: Option<String>,
    pub name_pattern: String,
    /// Site the name pattern is expanded against. Falls back to the last selected site.
    pub focused_site: Option<String>,
    pub contexts: Vec<String>,
    pub sites: Vec<String>,
    pub risks: RiskFlags,
    pub confidences: ConfidenceFlags,
    /// Generate even when no alerts survive filtering.
    pub generate_anyway: bool,
    pub display_report: bool,
}

impl ReportRequest {
    /// Start from persisted defaults with an empty scope selection.
    pub fn from_settings(settings: &ReportSettings) -> Self {
        Self {
            title: settings.title.clone(),
            description: settings.description.clone(),
            template: settings.template.clone(),
            report_directory: PathBuf::from(&settings.report_directory),
            template_directory: settings.template_directory.clone(),
            report_name: None,
            name_pattern: settings.report_name_pattern.clone(),
            focused_site: None,
            contexts: Vec::new(),
            sites: Vec::new(),
            risks: settings.risks,
            confidences: settings.confidences,
            generate_anyway: false,
            display_report: settings.display_report,
        }
    }

    pub fn header(&self) -> ReportHeader {
        ReportHeader {
            title: self.title.clone(),
            description: self.description.clone(),
        }
    }

    pub fn criteria(&self) -> FilterCriteria {
        FilterCriteria::from_flags(
            self.contexts.clone(),
            self.sites.clone(),
            &self.risks,
            &self.confidences,
        )
    }

    pub fn focused_site(&self) -> Option<&str> {
        self.focused_site.as_deref().or_else(|| self.sites.last().map(String::as_str))
    }

    /// File name inside the report directory.
    pub fn file_name(&self, template: &Template) -> String {
        match &self.report_name {
            Some(name) => name.clone(),
            None => report_file_name(
                &report_base_name(&self.name_pattern, self.focused_site()),
                &template.extension,
            ),
        }
    }

    pub fn target_path(&self, template: &Template) -> PathBuf {
        self.report_directory.join(self.file_name(template))
    }

    /// Settings to persist after this request, recording the template by config name.
    pub fn to_settings(&self, template: &Template) -> ReportSettings {
        ReportSettings {
            title: self.title.clone(),
            description: self.description.clone(),
            template: template.config_name.clone(),
            report_directory: self.report_directory.to_string_lossy().into_owned(),
            template_directory: self.template_directory.clone(),
            report_name_pattern: self.name_pattern.clone(),
            display_report: self.display_report,
            risks: self.risks,
            confidences: self.confidences,
        }
    }
}
