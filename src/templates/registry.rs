use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use crate::errors::ReportError;
use tracing::{info, warn};

pub const REPORT_DATA_JSON: &str = "report-data-json";

/// A report template as known to the registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Template {
    /// Identifier stored in settings; the template's directory name.
    pub config_name: String,
    pub display_name: String,
    /// File extension without the leading dot.
    pub extension: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub directory: Option<PathBuf>,
}

impl Template {
    pub fn report_data_json() -> Self {
        Self {
            config_name: REPORT_DATA_JSON.to_string(),
            display_name: "Report Data (JSON)".to_string(),
            extension: "json".to_string(),
            directory: None,
        }
    }
}

impl std::fmt::Display for Template {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.display_name, self.config_name)
    }
}

#[derive(Debug, Deserialize)]
struct TemplateManifest {
    #[serde(alias = "name")]
    display_name: String,
    #[serde(alias = "format")]
    extension: String,
}

/// Bidirectional lookup between display names and config names.
#[derive(Debug, Clone)]
pub struct TemplateRegistry {
    templates: Vec<Template>,
}

impl TemplateRegistry {
    pub fn builtin() -> Self {
        Self {
            templates: vec![Template::report_data_json()],
        }
    }

    /// Load `<dir>/*/template.yaml` over the built-in templates. A directory that does
    /// not exist yields just the built-ins.
    pub fn load(templates_dir: &Path) -> Result<Self, ReportError> {
        let mut registry = Self::builtin();

        if !templates_dir.exists() {
            warn!(
                dir = %templates_dir.display(),
                "Template directory not found, using built-in templates"
            );
            return Ok(registry);
        }

        let pattern = templates_dir.join("*").join("template.yaml");
        let pattern_str = pattern.to_string_lossy();

        for entry in glob::glob(&pattern_str)
            .map_err(|e| ReportError::Config(format!("Invalid glob pattern: {}", e)))?
        {
            let path = entry.map_err(|e| ReportError::Config(format!("Glob error: {}", e)))?;
            let Some(dir) = path.parent() else { continue };
            let Some(config_name) = dir.file_name().and_then(|n| n.to_str()) else { continue };

            let content = std::fs::read_to_string(&path)?;
            let manifest: TemplateManifest = serde_yaml::from_str(&content)?;
            registry.insert(Template {
                config_name: config_name.to_string(),
                display_name: manifest.display_name,
                extension: manifest.extension.trim_start_matches('.').to_lowercase(),
                directory: Some(dir.to_path_buf()),
            });
        }

        info!(count = registry.templates.len(), "Loaded report templates");
        Ok(registry)
    }

    /// Add a template, replacing any with the same config name.
    pub fn insert(&mut self, template: Template) {
        let existing = self
            .templates
            .iter_mut()
            .find(|t| t.config_name == template.config_name);
        if let Some(existing) = existing {
            *existing = template;
        } else {
            self.templates.push(template);
        }
    }

    pub fn by_display_name(&self, display_name: &str) -> Option<&Template> {
        self.templates.iter().find(|t| t.display_name == display_name)
    }

    pub fn by_config_name(&self, config_name: &str) -> Option<&Template> {
        self.templates.iter().find(|t| t.config_name == config_name)
    }

    /// Display names sorted for presentation.
    pub fn display_names(&self) -> Vec<String> {
        let mut names: Vec<String> =
            self.templates.iter().map(|t| t.display_name.clone()).collect();
        names.sort();
        names
    }

    /// Look up by display name first, then by config name.
    pub fn resolve(&self, name: &str) -> Result<&Template, ReportError> {
        self.by_display_name(name)
            .or_else(|| self.by_config_name(name))
            .ok_or_else(|| ReportError::UnknownTemplate(name.to_string()))
    }
}
