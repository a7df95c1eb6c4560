use std::collections::HashSet;

use crate::models::Context;
use tracing::debug;

/// Sites an alert may belong to in order to be reported.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SiteScope {
    sites: HashSet<String>,
}

impl SiteScope {
    pub fn only<I, S>(sites: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            sites: sites.into_iter().map(Into::into).collect(),
        }
    }

    /// Alerts without a site are never in scope.
    pub fn includes(&self, site: Option<&str>) -> bool {
        site.is_some_and(|site| self.sites.contains(site))
    }
}

/// Sites to report on: the selection, or every site in tree order when nothing is
/// selected.
pub fn resolve_sites(selected: &[String], all_sites: &[String]) -> Vec<String> {
    let source = if selected.is_empty() { all_sites } else { selected };
    let mut seen = HashSet::new();
    source
        .iter()
        .filter(|s| seen.insert(s.as_str()))
        .cloned()
        .collect()
}

/// Selected contexts in session order. An empty selection stays empty.
pub fn resolve_contexts(selected: &[String], all: &[Context]) -> Vec<Context> {
    for name in selected {
        if !all.iter().any(|c| &c.name == name) {
            debug!(context = %name, "Selected context not present in session, ignoring");
        }
    }
    all.iter()
        .filter(|c| selected.iter().any(|name| name == &c.name))
        .cloned()
        .collect()
}
