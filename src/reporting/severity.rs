use std::collections::BTreeSet;

use crate::models::{Confidence, FilterCriteria, Risk};

/// Risk and confidence inclusion sets. An empty set matches nothing.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SeverityFilter {
    pub risks: BTreeSet<Risk>,
    pub confidences: BTreeSet<Confidence>,
}

impl SeverityFilter {
    pub fn from_criteria(criteria: &FilterCriteria) -> Self {
        Self {
            risks: criteria.risks.clone(),
            confidences: criteria.confidences.clone(),
        }
    }

    /// Ordinals outside the defined ranges never match.
    pub fn matches(&self, risk: i32, confidence: i32) -> bool {
        let risk_ok = Risk::from_ordinal(risk).map_or(false, |r| self.risks.contains(&r));
        let confidence_ok = Confidence::from_ordinal(confidence)
            .map_or(false, |c| self.confidences.contains(&c));
        risk_ok && confidence_ok
    }
}
