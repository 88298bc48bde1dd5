//! Per-storefront selector profiles and the catalog that resolves them.
//!
//! A [`SiteProfile`] names a storefront domain and the CSS selectors that
//! locate a product's image, title, and price on that storefront. The
//! builtin table below covers the known set; extra profiles can be layered
//! on from a YAML file (`TRYON_SITES_PATH`). Table order is the match
//! priority: lookup walks the catalog front to back and the first profile
//! whose domain is contained in the page hostname wins.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Ordered CSS selector alternatives for each product field.
///
/// Each field is a comma-joined list; alternatives are tried left to right
/// and the first one that produces a usable value wins.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectorSet {
    pub container: String,
    pub image: String,
    pub title: String,
    pub price: String,
}

/// Static extraction configuration for one storefront domain.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteProfile {
    /// Matched against the page hostname by case-insensitive containment,
    /// e.g. `"zara.com"` matches `www.zara.com`.
    pub domain: String,
    pub selectors: SelectorSet,
}

impl SiteProfile {
    /// Whether this profile applies to the given page hostname.
    #[must_use]
    pub fn matches(&self, hostname: &str) -> bool {
        hostname
            .to_lowercase()
            .contains(&self.domain.to_lowercase())
    }
}

fn profile(
    domain: &str,
    container: &str,
    image: &str,
    title: &str,
    price: &str,
) -> SiteProfile {
    SiteProfile {
        domain: domain.to_string(),
        selectors: SelectorSet {
            container: container.to_string(),
            image: image.to_string(),
            title: title.to_string(),
            price: price.to_string(),
        },
    }
}

/// The builtin storefront table. Order matters: it is the implicit match
/// priority for hostnames that could satisfy more than one entry.
#[must_use]
pub fn builtin_profiles() -> Vec<SiteProfile> {
    vec![
        profile(
            "amazon.",
            "#dp-container, #ppd",
            "#landingImage, #imgTagWrapperId img, #main-image-container img",
            "#productTitle, #title span",
            ".a-price .a-offscreen, #priceblock_ourprice, .a-price-whole",
        ),
        profile(
            "asos.com",
            "[data-testid='product-page'], #product-page",
            "#product-gallery img, [data-testid='gallery'] img",
            "[data-testid='product-title'] h1, h1",
            "[data-testid='current-price'], .current-price",
        ),
        profile(
            "zara.com",
            ".product-detail-view__main, .product-detail",
            "picture.media-image img, .media-image__image",
            "h1.product-detail-info__header-name, h1.product-name",
            ".money-amount__main, .price__amount",
        ),
        profile(
            "hm.com",
            ".product-detail, #main-content",
            ".product-detail-main-image-container img, .pdp-image img",
            "h1.primary.product-item-headline, h1",
            ".price-value, .product-item-price",
        ),
        profile(
            "uniqlo.com",
            ".product-main, .fr-ec-product",
            ".fr-ec-image img, .product-main-image img",
            "h1.fr-ec-display, h1.fr-ec-title",
            ".fr-ec-price-text, .price-now",
        ),
        profile(
            "nordstrom.com",
            "#product-page, .product-page",
            "#pdp-gallery img, img[name='mainProductImage']",
            "h1[itemprop='name'], h1.pdp-title",
            "[data-testid='pricing-current-price'], .price-current",
        ),
        profile(
            "macys.com",
            ".product-detail, #productDetail",
            ".main-picture img, .picture-container img",
            "h1[data-auto='product-name'], .product-title h1",
            "[data-auto='main-price'], .price",
        ),
        profile(
            "mango.com",
            ".product-info, .product-detail",
            ".image-current img, .product-images img",
            "h1.product-name, .product-name.text-title",
            ".product-sale, .product-prices .price",
        ),
        profile(
            "shein.com",
            ".product-intro",
            ".crop-image-container img, .product-intro__main-img img",
            "h1.product-intro__head-name, h1",
            ".product-intro__head-mainprice .from, .original-price",
        ),
    ]
}

/// The effective, ordered set of site profiles for a detection run.
#[derive(Debug, Clone)]
pub struct SiteCatalog {
    profiles: Vec<SiteProfile>,
}

impl SiteCatalog {
    /// Catalog of builtin profiles only.
    #[must_use]
    pub fn builtin() -> Self {
        Self {
            profiles: builtin_profiles(),
        }
    }

    /// Builtin profiles plus a validated YAML overlay. Overlay entries are
    /// appended after the builtins so they can add storefronts but never
    /// shadow a builtin for the same hostname.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file cannot be read, parsed, or fails
    /// validation.
    pub fn with_overlay(path: &Path) -> Result<Self, ConfigError> {
        let mut profiles = builtin_profiles();
        profiles.extend(load_site_profiles(path)?);
        Ok(Self { profiles })
    }

    /// First profile whose domain is contained in `hostname`.
    #[must_use]
    pub fn find(&self, hostname: &str) -> Option<&SiteProfile> {
        self.profiles.iter().find(|p| p.matches(hostname))
    }

    #[must_use]
    pub fn profiles(&self) -> &[SiteProfile] {
        &self.profiles
    }
}

impl Default for SiteCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

#[derive(Debug, Deserialize)]
struct SitesFile {
    sites: Vec<SiteProfile>,
}

/// Load and validate extra site profiles from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails
/// validation.
fn load_site_profiles(path: &Path) -> Result<Vec<SiteProfile>, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::SitesFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let sites_file: SitesFile =
        serde_yaml::from_str(&content).map_err(ConfigError::SitesFileParse)?;

    validate_site_profiles(&sites_file.sites)?;

    Ok(sites_file.sites)
}

fn validate_site_profiles(profiles: &[SiteProfile]) -> Result<(), ConfigError> {
    let mut seen_domains = HashSet::new();

    for site in profiles {
        if site.domain.trim().is_empty() {
            return Err(ConfigError::Validation(
                "site domain must be non-empty".to_string(),
            ));
        }
        if site.selectors.image.trim().is_empty() {
            return Err(ConfigError::Validation(format!(
                "site '{}' has an empty image selector list",
                site.domain
            )));
        }
        if site.selectors.title.trim().is_empty() {
            return Err(ConfigError::Validation(format!(
                "site '{}' has an empty title selector list",
                site.domain
            )));
        }
        if !seen_domains.insert(site.domain.to_lowercase()) {
            return Err(ConfigError::Validation(format!(
                "duplicate site domain: '{}'",
                site.domain
            )));
        }
    }

    Ok(())
}
