use std::path::Path;

use serde::{Deserialize, Serialize};
use crate::errors::ReportError;
use crate::models::{AlertNode, Context, SiteNode};
use super::provider::{AlertStore, SessionProvider};
use tracing::info;

/// Point-in-time copy of everything report preparation reads from a session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSnapshot {
    #[serde(default)]
    pub contexts: Vec<Context>,
    #[serde(default = "SiteNode::root")]
    pub site_tree: SiteNode,
    #[serde(default = "AlertNode::root")]
    pub alert_tree: AlertNode,
}

impl Default for SessionSnapshot {
    fn default() -> Self {
        Self {
            contexts: Vec::new(),
            site_tree: SiteNode::root(),
            alert_tree: AlertNode::root(),
        }
    }
}

impl SessionSnapshot {
    pub fn capture(session: &dyn SessionProvider, alerts: &dyn AlertStore) -> Self {
        Self {
            contexts: session.contexts(),
            site_tree: session.site_tree(),
            alert_tree: alerts.alert_tree(),
        }
    }

    /// Load a session export written as JSON.
    pub async fn load(path: &Path) -> Result<Self, ReportError> {
        if !path.exists() {
            return Err(ReportError::Config(format!("Session file not found: {}", path.display())));
        }
        let json = tokio::fs::read_to_string(path).await?;
        let snapshot: SessionSnapshot = serde_json::from_str(&json)?;
        info!(
            path = %path.display(),
            contexts = snapshot.contexts.len(),
            sites = snapshot.site_tree.children.len(),
            alerts = snapshot.alert_tree.alert_count(),
            "Loaded session snapshot"
        );
        Ok(snapshot)
    }
}

impl SessionProvider for SessionSnapshot {
    fn contexts(&self) -> Vec<Context> {
        self.contexts.clone()
    }

    fn site_tree(&self) -> SiteNode {
        self.site_tree.clone()
    }
}

impl AlertStore for SessionSnapshot {
    fn alert_tree(&self) -> AlertNode {
        self.alert_tree.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_load_session_export() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("session.json");
        let json = serde_json::json!({
            "contexts": [{ "name": "Default Context" }],
            "site_tree": { "name": "Sites", "children": [{ "name": "https://a.example" }] },
            "alert_tree": {
                "name": "Alerts",
                "children": [{
                    "name": "XSS",
                    "children": [{
                        "name": "XSS",
                        "risk": 3,
                        "confidence": 2,
                        "site": "https://a.example"
                    }]
                }]
            }
        });
        std::fs::write(&path, json.to_string()).unwrap();

        let snapshot = SessionSnapshot::load(&path).await.unwrap();
        assert_eq!(snapshot.contexts.len(), 1);
        assert_eq!(snapshot.site_tree.site_names(), vec!["https://a.example"]);
        assert_eq!(snapshot.alert_tree.alert_count(), 1);
    }

    #[tokio::test]
    async fn test_missing_trees_default_to_empty_roots() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, "{}").unwrap();
        let snapshot = SessionSnapshot::load(&path).await.unwrap();
        assert!(snapshot.site_tree.children.is_empty());
        assert!(snapshot.alert_tree.children.is_empty());
    }

    #[test]
    fn test_capture_copies_trees() {
        let source = SessionSnapshot {
            contexts: vec![Context::new("ctx")],
            site_tree: SiteNode::root().with_child(SiteNode::new("a")),
            alert_tree: AlertNode::root(),
        };
        let captured = SessionSnapshot::capture(&source, &source);
        assert_eq!(captured.site_tree, source.site_tree);
        assert_eq!(captured.contexts, source.contexts);
    }
}
