use serde::{Deserialize, Serialize};
use tracing::warn;

/// Risk level of an alert, ordered from least to most severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Risk {
    Informational,
    Low,
    Medium,
    High,
}

impl Risk {
    pub const ALL: [Risk; 4] = [Risk::Informational, Risk::Low, Risk::Medium, Risk::High];

    /// Informational = 0, Low = 1, Medium = 2, High = 3.
    pub fn ordinal(&self) -> i32 {
        match self {
            Risk::Informational => 0,
            Risk::Low => 1,
            Risk::Medium => 2,
            Risk::High => 3,
        }
    }

    pub fn from_ordinal(ordinal: i32) -> Option<Self> {
        match ordinal {
            0 => Some(Risk::Informational),
            1 => Some(Risk::Low),
            2 => Some(Risk::Medium),
            3 => Some(Risk::High),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Risk::Informational => "informational",
            Risk::Low => "low",
            Risk::Medium => "medium",
            Risk::High => "high",
        }
    }
}

/// How certain the scanner is that an alert is real.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Confidence {
    FalsePositive,
    Low,
    Medium,
    High,
    Confirmed,
}

impl Confidence {
    pub const ALL: [Confidence; 5] = [
        Confidence::FalsePositive,
        Confidence::Low,
        Confidence::Medium,
        Confidence::High,
        Confidence::Confirmed,
    ];

    /// FalsePositive = 0 … Confirmed = 4.
    pub fn ordinal(&self) -> i32 {
        match self {
            Confidence::FalsePositive => 0,
            Confidence::Low => 1,
            Confidence::Medium => 2,
            Confidence::High => 3,
            Confidence::Confirmed => 4,
        }
    }

    pub fn from_ordinal(ordinal: i32) -> Option<Self> {
        match ordinal {
            0 => Some(Confidence::FalsePositive),
            1 => Some(Confidence::Low),
            2 => Some(Confidence::Medium),
            3 => Some(Confidence::High),
            4 => Some(Confidence::Confirmed),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    /// Groups alerts; its own risk and confidence are ignored when filtering.
    Category,
    Alert,
}

/// A node in the findings tree.
///
/// Risk and confidence are kept as raw ordinals so that values outside the defined
/// ranges survive deserialization; the filter simply never matches them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "AlertNodeRecord")]
pub struct AlertNode {
    pub name: String,
    pub kind: NodeKind,
    pub risk: i32,
    pub confidence: i32,
    /// Site (host) the alert was raised against.
    pub site: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub param: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plugin_id: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cwe_id: Option<u32>,
    pub children: Vec<AlertNode>,
}

/// Serialized form of [`AlertNode`], where `kind`, `risk` and `confidence` may be absent.
#[derive(Deserialize)]
struct AlertNodeRecord {
    name: String,
    #[serde(default)]
    kind: Option<NodeKind>,
    #[serde(default = "unset_level")]
    risk: i32,
    #[serde(default = "unset_level")]
    confidence: i32,
    #[serde(default)]
    site: Option<String>,
    #[serde(default)]
    uri: Option<String>,
    #[serde(default)]
    param: Option<String>,
    #[serde(default)]
    plugin_id: Option<u32>,
    #[serde(default)]
    cwe_id: Option<u32>,
    #[serde(default)]
    children: Vec<AlertNode>,
}

fn unset_level() -> i32 {
    -1
}

impl From<AlertNodeRecord> for AlertNode {
    /// Without an explicit kind, a leaf whose levels are both in range is an alert.
    fn from(record: AlertNodeRecord) -> Self {
        let kind = match record.kind {
            Some(kind) => kind,
            None if record.children.is_empty()
                && Risk::from_ordinal(record.risk).is_some()
                && Confidence::from_ordinal(record.confidence).is_some() =>
            {
                NodeKind::Alert
            }
            None => {
                if record.children.is_empty() && record.site.is_some() {
                    warn!(
                        name = %record.name,
                        risk = record.risk,
                        confidence = record.confidence,
                        "Leaf node has no kind and invalid levels, treating it as an empty category"
                    );
                }
                NodeKind::Category
            }
        };

        Self {
            name: record.name,
            kind,
            risk: record.risk,
            confidence: record.confidence,
            site: record.site,
            uri: record.uri,
            param: record.param,
            plugin_id: record.plugin_id,
            cwe_id: record.cwe_id,
            children: record.children,
        }
    }
}

impl AlertNode {
    /// Synthetic root container.
    pub fn root() -> Self {
        Self::category("Alerts")
    }

    pub fn category(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: NodeKind::Category,
            risk: -1,
            confidence: -1,
            site: None,
            uri: None,
            param: None,
            plugin_id: None,
            cwe_id: None,
            children: Vec::new(),
        }
    }

    pub fn alert(
        name: impl Into<String>,
        risk: i32,
        confidence: i32,
        site: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            kind: NodeKind::Alert,
            risk,
            confidence,
            site: Some(site.into()),
            uri: None,
            param: None,
            plugin_id: None,
            cwe_id: None,
            children: Vec::new(),
        }
    }

    pub fn with_child(mut self, child: AlertNode) -> Self {
        self.children.push(child);
        self
    }

    pub fn with_uri(mut self, uri: impl Into<String>) -> Self {
        self.uri = Some(uri.into());
        self
    }

    pub fn is_alert(&self) -> bool {
        self.kind == NodeKind::Alert
    }

    pub fn risk_level(&self) -> Option<Risk> {
        Risk::from_ordinal(self.risk)
    }

    /// Copy of this node's own fields without its children.
    pub fn shallow_copy(&self) -> Self {
        Self {
            name: self.name.clone(),
            kind: self.kind,
            risk: self.risk,
            confidence: self.confidence,
            site: self.site.clone(),
            uri: self.uri.clone(),
            param: self.param.clone(),
            plugin_id: self.plugin_id,
            cwe_id: self.cwe_id,
            children: Vec::new(),
        }
    }

    /// Every alert node below (and including) this one, in depth-first order.
    pub fn alerts(&self) -> Vec<&AlertNode> {
        let mut out = Vec::new();
        collect_alerts(self, &mut out);
        out
    }

    pub fn alert_count(&self) -> usize {
        self.alerts().len()
    }
}

fn collect_alerts<'a>(node: &'a AlertNode, out: &mut Vec<&'a AlertNode>) {
    if node.is_alert() {
        out.push(node);
    }
    for child in &node.children {
        collect_alerts(child, out);
    }
}
