//! Product detection engine for storefront pages.
//!
//! Given a static HTML snapshot and its page URL, [`Detector::detect`]
//! extracts at most one best-candidate clothing product by running a
//! cascade of strategies in priority order (site-specific selectors, Open
//! Graph metadata, largest plausible image, schema.org structured data) and
//! returning the first non-empty result. The engine is read-only and
//! synchronous: it never touches the network and is deterministic for a
//! fixed snapshot (modulo the fresh id/timestamp on each pass).

mod classify;
mod dom;
mod error;
mod extract;
mod page;
mod scoring;
mod strategies;


pub use classify::classify_garment;
pub use error::DetectError;
pub use page::PageSnapshot;
pub use strategies::Strategy;

use tryon_core::{DetectedProduct, SiteCatalog};

/// The detection engine. Holds the read-only site-profile catalog; carries
/// no other state across calls.
#[derive(Debug, Clone)]
pub struct Detector {
    catalog: SiteCatalog,
}

impl Detector {
    #[must_use]
    pub fn new(catalog: SiteCatalog) -> Self {
        Self { catalog }
    }

    #[must_use]
    pub fn catalog(&self) -> &SiteCatalog {
        &self.catalog
    }

    /// Run the strategy cascade and return detected products, best first.
    ///
    /// At most one product is returned; an empty vector is the normal
    /// outcome on non-product pages, never an error.
    #[must_use]
    pub fn detect(&self, page: &PageSnapshot) -> Vec<DetectedProduct> {
        match self.detect_with_strategy(page) {
            Some((product, _)) => vec![product],
            None => Vec::new(),
        }
    }

    /// Like [`Detector::detect`], but also reports which cascade strategy
    /// produced the result.
    #[must_use]
    pub fn detect_with_strategy(
        &self,
        page: &PageSnapshot,
    ) -> Option<(DetectedProduct, Strategy)> {
        strategies::run_cascade(page, &self.catalog)
    }
}

impl Default for Detector {
    fn default() -> Self {
        Self::new(SiteCatalog::builtin())
    }
}
