use std::path::Path;

use async_trait::async_trait;
use crate::errors::ReportError;
use crate::models::ReportData;
use crate::templates::Template;
use tracing::info;

#[async_trait]
pub trait ReportRenderer: Send + Sync {
    /// Render `data` with `template` into `target`.
    async fn render(
        &self,
        data: &ReportData,
        template: &Template,
        target: &Path,
    ) -> Result<(), ReportError>;

    /// Renderer name for logging
    fn renderer_name(&self) -> &str;
}

/// Writes the assembled payload as pretty JSON for an external template engine.
#[derive(Debug, Default, Clone)]
pub struct JsonPayloadRenderer;

#[async_trait]
impl ReportRenderer for JsonPayloadRenderer {
    async fn render(
        &self,
        data: &ReportData,
        template: &Template,
        target: &Path,
    ) -> Result<(), ReportError> {
        let json = serde_json::to_string_pretty(data)?;
        tokio::fs::write(target, json).await?;
        info!(
            path = %target.display(),
            template = %template.config_name,
            alerts = data.alert_count(),
            "Report payload written"
        );
        Ok(())
    }

    fn renderer_name(&self) -> &str {
        "json-payload"
    }
}
