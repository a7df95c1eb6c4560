use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use super::alert::{Confidence, Risk};

/// Per-level risk checkboxes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskFlags {
    #[serde(default = "enabled")]
    pub informational: bool,
    #[serde(default = "enabled")]
    pub low: bool,
    #[serde(default = "enabled")]
    pub medium: bool,
    #[serde(default = "enabled")]
    pub high: bool,
}

impl Default for RiskFlags {
    fn default() -> Self {
        Self {
            informational: true,
            low: true,
            medium: true,
            high: true,
        }
    }
}

impl RiskFlags {
    pub fn none() -> Self {
        Self {
            informational: false,
            low: false,
            medium: false,
            high: false,
        }
    }

    pub fn get(&self, risk: Risk) -> bool {
        match risk {
            Risk::Informational => self.informational,
            Risk::Low => self.low,
            Risk::Medium => self.medium,
            Risk::High => self.high,
        }
    }

    pub fn set(&mut self, risk: Risk, include: bool) {
        match risk {
            Risk::Informational => self.informational = include,
            Risk::Low => self.low = include,
            Risk::Medium => self.medium = include,
            Risk::High => self.high = include,
        }
    }

    pub fn any(&self) -> bool {
        Risk::ALL.iter().any(|r| self.get(*r))
    }
}

/// Per-level confidence checkboxes. False positives are excluded by default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfidenceFlags {
    #[serde(default)]
    pub false_positive: bool,
    #[serde(default = "enabled")]
    pub low: bool,
    #[serde(default = "enabled")]
    pub medium: bool,
    #[serde(default = "enabled")]
    pub high: bool,
    #[serde(default = "enabled")]
    pub confirmed: bool,
}

impl Default for ConfidenceFlags {
    fn default() -> Self {
        Self {
            false_positive: false,
            low: true,
            medium: true,
            high: true,
            confirmed: true,
        }
    }
}

impl ConfidenceFlags {
    pub fn none() -> Self {
        Self {
            false_positive: false,
            low: false,
            medium: false,
            high: false,
            confirmed: false,
        }
    }

    pub fn get(&self, confidence: Confidence) -> bool {
        match confidence {
            Confidence::FalsePositive => self.false_positive,
            Confidence::Low => self.low,
            Confidence::Medium => self.medium,
            Confidence::High => self.high,
            Confidence::Confirmed => self.confirmed,
        }
    }

    pub fn set(&mut self, confidence: Confidence, include: bool) {
        match confidence {
            Confidence::FalsePositive => self.false_positive = include,
            Confidence::Low => self.low = include,
            Confidence::Medium => self.medium = include,
            Confidence::High => self.high = include,
            Confidence::Confirmed => self.confirmed = include,
        }
    }

    pub fn any(&self) -> bool {
        Confidence::ALL.iter().any(|c| self.get(*c))
    }
}

fn enabled() -> bool {
    true
}

/// Scope and severity selection for one generation request.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FilterCriteria {
    /// Selected context names; empty means unconstrained.
    pub contexts: Vec<String>,
    /// Selected site names in selection order; empty means all sites.
    pub sites: Vec<String>,
    /// Empty means no risk level matches.
    pub risks: BTreeSet<Risk>,
    /// Empty means no confidence level matches.
    pub confidences: BTreeSet<Confidence>,
}

impl FilterCriteria {
    pub fn from_flags(
        contexts: Vec<String>,
        sites: Vec<String>,
        risks: &RiskFlags,
        confidences: &ConfidenceFlags,
    ) -> Self {
        Self {
            contexts,
            sites,
            risks: Risk::ALL.into_iter().filter(|r| risks.get(*r)).collect(),
            confidences: Confidence::ALL.into_iter().filter(|c| confidences.get(*c)).collect(),
        }
    }
}
