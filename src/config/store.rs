use crate::errors::ReportError;
use super::types::ReportSettings;

/// Persists report defaults across sessions.
pub trait SettingsStore: Send + Sync {
    /// `Ok(None)` when nothing has been saved yet.
    fn load_settings(&self) -> Result<Option<ReportSettings>, ReportError>;

    fn save_settings(&self, settings: &ReportSettings) -> Result<(), ReportError>;
}
