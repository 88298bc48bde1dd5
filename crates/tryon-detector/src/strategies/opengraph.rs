//! Strategy 2: Open Graph social-preview metadata.

use tryon_core::DetectedProduct;

use crate::classify::classify_garment;
use crate::dom;
use crate::extract;
use crate::page::PageSnapshot;

/// Extract a product from `og:image` / `og:title` meta tags. The image tag
/// is required; the title falls back to generic extraction.
pub(crate) fn detect_open_graph(page: &PageSnapshot) -> Option<DetectedProduct> {
    let image_url = meta_content(page, "og:image").and_then(|c| dom::absolutize(&c, page.url()))?;

    let title = meta_content(page, "og:title")
        .and_then(|t| extract::clamp_title(&t))
        .or_else(|| extract::generic_title(page))?;
    let price = extract::generic_price(page);
    let garment_type = classify_garment(&title);

    Some(DetectedProduct::new(
        image_url,
        None,
        title,
        price,
        garment_type,
        page.url().to_string(),
        page.hostname().to_string(),
    ))
}

/// `content` of the first meta tag with the given `property` (or `name`,
/// which some generators emit instead).
fn meta_content(page: &PageSnapshot, property: &str) -> Option<String> {
    for selector in [
        format!(r#"meta[property="{property}"]"#),
        format!(r#"meta[name="{property}"]"#),
    ] {
        if let Some(el) = dom::select_first(page.doc(), &selector) {
            if let Some(content) = el.value().attr("content") {
                let trimmed = content.trim();
                if !trimmed.is_empty() {
                    return Some(trimmed.to_string());
                }
            }
        }
    }
    None
}
