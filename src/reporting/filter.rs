use crate::models::AlertNode;
use super::scope::SiteScope;
use super::severity::SeverityFilter;

/// Prune the alert tree to the alerts inside `scope` whose levels pass `severity`.
///
/// The root is always returned, possibly with no children. Categories keep only their
/// surviving children in original order and disappear when none survive. The source
/// tree is never modified.
pub fn filter_alert_tree(
    root: &AlertNode,
    scope: &SiteScope,
    severity: &SeverityFilter,
) -> AlertNode {
    let mut filtered = root.shallow_copy();
    filtered.children = root
        .children
        .iter()
        .filter_map(|child| filter_node(child, scope, severity))
        .collect();
    filtered
}

fn filter_node(
    node: &AlertNode,
    scope: &SiteScope,
    severity: &SeverityFilter,
) -> Option<AlertNode> {
    if node.is_alert() {
        let included = severity.matches(node.risk, node.confidence)
            && scope.includes(node.site.as_deref());
        return included.then(|| node.shallow_copy());
    }

    let children: Vec<AlertNode> = node
        .children
        .iter()
        .filter_map(|child| filter_node(child, scope, severity))
        .collect();
    if children.is_empty() {
        return None;
    }

    let mut category = node.shallow_copy();
    category.children = children;
    Some(category)
}
