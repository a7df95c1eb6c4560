use chrono::Utc;

use crate::models::{AlertNode, Context, FilterCriteria, ReportData, ReportHeader, SiteNode};
use super::filter::filter_alert_tree;
use super::scope::{resolve_contexts, resolve_sites, SiteScope};
use super::severity::SeverityFilter;
use tracing::debug;

/// Build the renderer payload from the current criteria and session snapshot.
pub fn assemble_report(
    header: &ReportHeader,
    criteria: &FilterCriteria,
    contexts: &[Context],
    site_root: &SiteNode,
    alert_root: &AlertNode,
) -> ReportData {
    let sites = resolve_sites(&criteria.sites, &site_root.site_names());
    let contexts = resolve_contexts(&criteria.contexts, contexts);
    let severity = SeverityFilter::from_criteria(criteria);
    let scope = SiteScope::only(sites.iter().cloned());

    let alert_tree = filter_alert_tree(alert_root, &scope, &severity);

    debug!(
        sites = sites.len(),
        contexts = contexts.len(),
        risks = severity.risks.len(),
        confidences = severity.confidences.len(),
        alerts = alert_tree.alert_count(),
        "Assembled report data"
    );

    ReportData {
        title: header.title.clone(),
        description: header.description.clone(),
        contexts,
        sites,
        risks: severity.risks,
        confidences: severity.confidences,
        alert_tree,
        generated_at: Utc::now(),
    }
}
