use serde::{Deserialize, Serialize};

/// Named grouping of sites within a scan session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Context {
    pub name: String,
}

impl Context {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Node of the site tree. The root is synthetic; its direct children are the sites.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteNode {
    pub name: String,
    #[serde(default)]
    pub children: Vec<SiteNode>,
}

impl SiteNode {
    pub fn root() -> Self {
        Self::new("Sites")
    }

    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            children: Vec::new(),
        }
    }

    pub fn with_child(mut self, child: SiteNode) -> Self {
        self.children.push(child);
        self
    }

    /// Names of the selectable sites, in tree order.
    pub fn site_names(&self) -> Vec<String> {
        self.children.iter().map(|c| c.name.clone()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_site_names_preserve_order() {
        let root = SiteNode::root()
            .with_child(SiteNode::new("https://b.example").with_child(SiteNode::new("login")))
            .with_child(SiteNode::new("https://a.example"));
        assert_eq!(root.site_names(), vec!["https://b.example", "https://a.example"]);
    }

    #[test]
    fn test_empty_root_has_no_sites() {
        assert!(SiteNode::root().site_names().is_empty());
    }

    #[test]
    fn test_context_ignores_extra_session_fields() {
        let json = r#"{"id": 1, "name": "Default Context", "in_scope": true}"#;
        let ctx: Context = serde_json::from_str(json).unwrap();
        assert_eq!(ctx, Context::new("Default Context"));
    }
}
