use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use super::alert::{AlertNode, Confidence, Risk};
use super::site::Context;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportHeader {
    pub title: String,
    pub description: String,
}

/// Payload handed to the renderer. Built once per generation attempt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportData {
    pub title: String,
    pub description: String,
    pub contexts: Vec<Context>,
    pub sites: Vec<String>,
    pub risks: BTreeSet<Risk>,
    pub confidences: BTreeSet<Confidence>,
    pub alert_tree: AlertNode,
    pub generated_at: DateTime<Utc>,
}

impl ReportData {
    /// Number of alerts that survived filtering.
    pub fn alert_count(&self) -> usize {
        self.alert_tree.alert_count()
    }

    /// Count of included alerts per risk level; every included level is present.
    pub fn risk_counts(&self) -> BTreeMap<Risk, usize> {
        let mut counts: BTreeMap<Risk, usize> = self.risks.iter().map(|r| (*r, 0)).collect();
        for alert in self.alert_tree.alerts() {
            if let Some(risk) = alert.risk_level() {
                *counts.entry(risk).or_insert(0) += 1;
            }
        }
        counts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ReportData {
        ReportData {
            title: "Weekly scan".into(),
            description: String::new(),
            contexts: vec![],
            sites: vec!["a".into()],
            risks: [Risk::High, Risk::Low].into_iter().collect(),
            confidences: [Confidence::Confirmed].into_iter().collect(),
            alert_tree: AlertNode::root().with_child(
                AlertNode::category("XSS")
                    .with_child(AlertNode::alert("XSS", 3, 4, "a"))
                    .with_child(AlertNode::alert("XSS", 3, 4, "a")),
            ),
            generated_at: Utc::now(),
        }
    }

    #[test]
    fn test_risk_counts_include_zero_levels() {
        let counts = sample().risk_counts();
        assert_eq!(counts.get(&Risk::High), Some(&2));
        assert_eq!(counts.get(&Risk::Low), Some(&0));
        assert_eq!(counts.get(&Risk::Medium), None);
    }

    #[test]
    fn test_alert_count() {
        assert_eq!(sample().alert_count(), 2);
    }

    #[test]
    fn test_risk_counts_skip_malformed_levels() {
        let mut data = sample();
        data.alert_tree.children[0].children[0].risk = 7;
        assert_eq!(data.risk_counts().get(&Risk::High), Some(&1));
    }
}
