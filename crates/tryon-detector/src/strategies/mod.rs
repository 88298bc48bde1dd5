//! Detection strategy cascade.
//!
//! Strategies are attempted in priority order (site profile, Open Graph,
//! largest plausible image, structured data) and the first one that emits a
//! product wins; results are never merged across strategies.

mod largest;
mod opengraph;
mod site;
mod structured;

use tryon_core::{DetectedProduct, SiteCatalog};

use crate::page::PageSnapshot;

/// Which cascade step produced a detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    SiteProfile,
    OpenGraph,
    LargestImage,
    StructuredData,
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Strategy::SiteProfile => "site-profile",
            Strategy::OpenGraph => "open-graph",
            Strategy::LargestImage => "largest-image",
            Strategy::StructuredData => "structured-data",
        };
        write!(f, "{name}")
    }
}

/// Run the cascade against one page snapshot.
pub(crate) fn run_cascade(
    page: &PageSnapshot,
    catalog: &SiteCatalog,
) -> Option<(DetectedProduct, Strategy)> {
    if let Some(profile) = catalog.find(page.hostname()) {
        tracing::debug!(
            hostname = page.hostname(),
            domain = %profile.domain,
            "matched site profile"
        );
        if let Some(product) = site::detect_site(page, profile) {
            return Some((product, Strategy::SiteProfile));
        }
    }

    if let Some(product) = opengraph::detect_open_graph(page) {
        return Some((product, Strategy::OpenGraph));
    }

    if let Some(product) = largest::detect_largest_image(page) {
        return Some((product, Strategy::LargestImage));
    }

    if let Some(product) = structured::detect_structured_data(page) {
        return Some((product, Strategy::StructuredData));
    }

    tracing::debug!(hostname = page.hostname(), "no product detected");
    None
}
