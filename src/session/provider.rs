use crate::models::{AlertNode, Context, SiteNode};

/// Read access to the scan session's contexts and site tree.
pub trait SessionProvider: Send + Sync {
    fn contexts(&self) -> Vec<Context>;

    fn site_tree(&self) -> SiteNode;
}

/// Read access to the current findings tree.
pub trait AlertStore: Send + Sync {
    fn alert_tree(&self) -> AlertNode;
}
