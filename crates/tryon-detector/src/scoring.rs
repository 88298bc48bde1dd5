//! Image candidate enumeration, rejection filters, and relevance scoring
//! for the largest-plausible-image strategy.

use regex::Regex;
use scraper::{ElementRef, Selector};

use crate::dom;
use crate::page::PageSnapshot;

/// Minimum rendered side for a candidate to be considered at all.
const MIN_SIDE_PX: f64 = 150.0;
/// Near-square images with both sides under this are treated as swatches.
const SWATCH_SIDE_PX: f64 = 200.0;
/// Candidates with a side under this take a score penalty.
const SMALL_SIDE_PX: f64 = 300.0;

/// URL substrings that mark an image as page furniture, never a product
/// photo.
const URL_DENYLIST: &[&str] = &[
    "icon",
    "logo",
    "avatar",
    "tracking",
    "pixel",
    "swatch",
    "color-chip",
];

/// An image under consideration: its resolved URL and rendered box.
/// Discarded once the winning candidate is chosen.
#[derive(Debug, Clone)]
pub(crate) struct ImageCandidate {
    pub(crate) url: String,
    pub(crate) width: f64,
    pub(crate) height: f64,
}

impl ImageCandidate {
    /// Hard rejection filters: too small, swatch-shaped, or denylisted URL.
    fn passes_filters(&self) -> bool {
        if self.width < MIN_SIDE_PX || self.height < MIN_SIDE_PX {
            return false;
        }

        // Near-square images in the swatch size range are color chips, not
        // product photos, regardless of what the URL says.
        let ratio = self.width / self.height;
        if self.width < SWATCH_SIDE_PX
            && self.height < SWATCH_SIDE_PX
            && (0.8..=1.2).contains(&ratio)
        {
            return false;
        }

        let url = self.url.to_lowercase();
        if URL_DENYLIST.iter().any(|marker| url.contains(marker)) {
            return false;
        }
        // "thumbnail" only disqualifies while the image is still small; a
        // full-size gallery image served from a /thumbnail/ path survives.
        if url.contains("thumbnail")
            && (self.width < SWATCH_SIDE_PX || self.height < SWATCH_SIDE_PX)
        {
            return false;
        }

        true
    }

    /// Relevance score: rendered area shaped by URL signals.
    fn score(&self) -> f64 {
        let url = self.url.to_lowercase();
        let mut multiplier = 1.0;

        if url.contains("product") {
            multiplier *= 2.0;
        }
        if url.contains("hero") {
            multiplier *= 2.0;
        }
        if url.contains("main") {
            multiplier *= 1.5;
        }
        if url.contains("gallery") {
            multiplier *= 1.5;
        }
        if url.contains("large") || url.contains("zoom") {
            multiplier *= 1.3;
        }
        if url.contains("/images/") {
            multiplier *= 1.2;
        }

        if self.width < SMALL_SIDE_PX || self.height < SMALL_SIDE_PX {
            multiplier *= 0.5;
        }
        for marker in ["thumb", "small", "mini"] {
            if url.contains(marker) {
                multiplier *= 0.3;
            }
        }

        self.width * self.height * multiplier
    }
}

/// Enumerate every rendered image on the page, in document order, with a
/// resolved highest-resolution URL. Images with no rendered box or no
/// resolvable URL are excluded here, before scoring.
pub(crate) fn collect_candidates(page: &PageSnapshot) -> Vec<ImageCandidate> {
    let img_sel = Selector::parse("img").expect("valid selector");
    let mut candidates = Vec::new();

    for el in page.doc().select(&img_sel) {
        let Some((width, height)) = rendered_box(&el) else {
            continue;
        };
        let Some(url) = dom::highest_resolution_url(&el, page.url()) else {
            continue;
        };
        candidates.push(ImageCandidate { url, width, height });
    }

    candidates
}

/// Top-ranked surviving candidate, or `None` when nothing qualifies.
/// Ties keep document order (stable sort; no secondary key is defined).
pub(crate) fn best_candidate(page: &PageSnapshot) -> Option<ImageCandidate> {
    let mut scored: Vec<(f64, ImageCandidate)> = collect_candidates(page)
        .into_iter()
        .filter(ImageCandidate::passes_filters)
        .map(|c| (c.score(), c))
        .collect();

    scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));
    scored.into_iter().map(|(_, c)| c).next()
}

/// Rendered dimensions of an image element in the static snapshot: the
/// `width`/`height` attributes, else pixel values in the inline style.
/// Returns `None` unless both sides are positive.
fn rendered_box(el: &ElementRef<'_>) -> Option<(f64, f64)> {
    let style = el.value().attr("style");
    let width = attr_dimension(el, "width")
        .or_else(|| style.and_then(|s| style_dimension(s, "width")))?;
    let height = attr_dimension(el, "height")
        .or_else(|| style.and_then(|s| style_dimension(s, "height")))?;
    Some((width, height))
}

fn attr_dimension(el: &ElementRef<'_>, attr: &str) -> Option<f64> {
    el.value()
        .attr(attr)
        .and_then(|v| v.trim().parse::<f64>().ok())
        .filter(|v| *v > 0.0)
}

fn style_dimension(style: &str, property: &str) -> Option<f64> {
    // Anchored so "height" does not match "line-height".
    let re = Regex::new(&format!(
        r"(?i)(?:^|[;\s]){property}\s*:\s*(\d+(?:\.\d+)?)px"
    ))
    .expect("valid regex");
    re.captures(style)
        .and_then(|cap| cap.get(1))
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .filter(|v| *v > 0.0)
}
