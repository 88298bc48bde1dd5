//! Per-tab product state owned by the host process.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tryon_core::DetectedProduct;

/// Opaque identifier of a browser tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TabId(pub u64);

impl std::fmt::Display for TabId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Keyed store of the latest detection result per tab.
///
/// Each pass's result fully supersedes the previous one for that tab; the
/// lifecycle hooks clear a tab's entry on close and on navigation start so
/// stale products never outlive the page they were detected on. The store
/// is a plain value owned by the host, not a global.
#[derive(Debug, Default)]
pub struct ProductStore {
    tabs: HashMap<TabId, Vec<DetectedProduct>>,
}

impl ProductStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the tab's products with the given pass result. An empty
    /// result clears the entry — "nothing detected" is a real state, not a
    /// no-op.
    pub fn record(&mut self, tab: TabId, products: Vec<DetectedProduct>) {
        if products.is_empty() {
            self.tabs.remove(&tab);
        } else {
            self.tabs.insert(tab, products);
        }
    }

    /// Current products for a tab, newest pass only.
    #[must_use]
    pub fn products(&self, tab: TabId) -> &[DetectedProduct] {
        self.tabs.get(&tab).map_or(&[], Vec::as_slice)
    }

    /// Badge count for a tab.
    #[must_use]
    pub fn count(&self, tab: TabId) -> usize {
        self.products(tab).len()
    }

    /// Lifecycle hook: the tab was closed.
    pub fn tab_closed(&mut self, tab: TabId) {
        self.tabs.remove(&tab);
    }

    /// Lifecycle hook: the tab started navigating to a new page.
    pub fn navigation_started(&mut self, tab: TabId) {
        self.tabs.remove(&tab);
    }

    /// Number of tabs with at least one product.
    #[must_use]
    pub fn tracked_tabs(&self) -> usize {
        self.tabs.len()
    }
}
