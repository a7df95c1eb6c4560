use crate::config::{ReportSettings, SettingsStore};
use crate::errors::ReportError;
use super::Database;
use tracing::debug;

const REPORT_KEY_PREFIX: &str = "reports.";

impl Database {
    /// `(field, raw JSON)` for every row under the `reports.` prefix.
    fn report_rows(&self) -> Result<Vec<(String, String)>, ReportError> {
        let conn = self.lock()?;
        let mut stmt = conn
            .prepare("SELECT key, value FROM settings WHERE substr(key, 1, ?1) = ?2")
            .map_err(|e| ReportError::Database(format!("Query failed: {}", e)))?;

        let rows = stmt
            .query_map(
                rusqlite::params![REPORT_KEY_PREFIX.len() as i64, REPORT_KEY_PREFIX],
                |row: &rusqlite::Row| Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?)),
            )
            .map_err(|e| ReportError::Database(format!("Query error: {}", e)))?;

        let mut out = Vec::new();
        for row in rows {
            let (key, value) =
                row.map_err(|e| ReportError::Database(format!("Row error: {}", e)))?;
            if let Some(field) = key.strip_prefix(REPORT_KEY_PREFIX) {
                out.push((field.to_string(), value));
            }
        }
        Ok(out)
    }
}

/// One row per top-level settings field, keyed `reports.<field>` with a JSON value.
impl SettingsStore for Database {
    fn load_settings(&self) -> Result<Option<ReportSettings>, ReportError> {
        let rows = self.report_rows()?;
        if rows.is_empty() {
            return Ok(None);
        }

        let mut fields = serde_json::Map::new();
        for (field, raw) in rows {
            fields.insert(field, serde_json::from_str(&raw)?);
        }
        Ok(Some(serde_json::from_value(serde_json::Value::Object(fields))?))
    }

    fn save_settings(&self, settings: &ReportSettings) -> Result<(), ReportError> {
        let value = serde_json::to_value(settings)?;
        let Some(fields) = value.as_object() else {
            return Err(ReportError::Internal("Settings did not serialize to an object".into()));
        };

        let mut conn = self.lock()?;
        let tx = conn
            .transaction()
            .map_err(|e| ReportError::Database(format!("Failed to begin transaction: {}", e)))?;
        for (field, value) in fields {
            tx.execute(
                "INSERT OR REPLACE INTO settings (key, value) VALUES (?1, ?2)",
                rusqlite::params![format!("{}{}", REPORT_KEY_PREFIX, field), value.to_string()],
            )
            .map_err(|e| ReportError::Database(format!("Insert failed: {}", e)))?;
        }
        tx.commit()
            .map_err(|e| ReportError::Database(format!("Commit failed: {}", e)))?;

        debug!(fields = fields.len(), "Saved report settings");
        Ok(())
    }
}
