//! Strategy 3: largest plausible rendered image.

use tryon_core::DetectedProduct;

use crate::classify::classify_garment;
use crate::extract;
use crate::page::PageSnapshot;
use crate::scoring;

/// Pick the top-scored image candidate and pair it with generically
/// extracted title and price.
pub(crate) fn detect_largest_image(page: &PageSnapshot) -> Option<DetectedProduct> {
    let best = scoring::best_candidate(page)?;
    tracing::debug!(
        url = %best.url,
        width = best.width,
        height = best.height,
        "largest-image candidate selected"
    );

    let title = extract::generic_title(page)?;
    let price = extract::generic_price(page);
    let garment_type = classify_garment(&title);

    Some(DetectedProduct::new(
        best.url,
        None,
        title,
        price,
        garment_type,
        page.url().to_string(),
        page.hostname().to_string(),
    ))
}
