//! Element-level URL and text resolution.
//!
//! Query results are wrapped in [`ElementKind`] once, so the tag-specific
//! rules for digging a usable image URL out of an element live in one place
//! instead of being re-decided at every call site.

use scraper::{ElementRef, Html, Selector};
use url::Url;

/// Lazy-load attributes checked before `srcset`/`src` on image elements,
/// in order.
const LAZY_SRC_ATTRS: &[&str] = &["data-src", "data-lazy-src", "data-original"];

/// Query the first element matching `selector`, treating an unparseable
/// selector as a miss. Overlay files may carry malformed selectors; they
/// must degrade to "try the next alternative", not abort the pass.
pub(crate) fn select_first<'a>(doc: &'a Html, selector: &str) -> Option<ElementRef<'a>> {
    match Selector::parse(selector) {
        Ok(sel) => doc.select(&sel).next(),
        Err(_) => {
            tracing::debug!(selector, "skipping unparseable selector");
            None
        }
    }
}

/// Split a comma-joined selector list into trimmed, non-empty alternatives.
pub(crate) fn split_selector_list(list: &str) -> impl Iterator<Item = &str> {
    list.split(',').map(str::trim).filter(|s| !s.is_empty())
}

/// Concatenated text of an element with whitespace collapsed.
pub(crate) fn element_text(el: &ElementRef<'_>) -> String {
    el.text()
        .collect::<Vec<_>>()
        .join(" ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// A query result classified once by tag name. Each variant knows how to
/// resolve a usable image URL from its element.
pub(crate) enum ElementKind<'a> {
    Image(ElementRef<'a>),
    Picture(ElementRef<'a>),
    Meta(ElementRef<'a>),
    Generic(ElementRef<'a>),
}

impl<'a> ElementKind<'a> {
    pub(crate) fn of(el: ElementRef<'a>) -> Self {
        match el.value().name() {
            "img" => Self::Image(el),
            "picture" => Self::Picture(el),
            "meta" => Self::Meta(el),
            _ => Self::Generic(el),
        }
    }

    /// Resolve an absolute image URL from this element.
    ///
    /// Image elements prefer a lazy-load attribute over the first `srcset`
    /// entry over `src`; picture elements defer to their first `<source>`
    /// (else nested `<img>`); meta elements read `content`; anything else
    /// falls back to its first descendant `<img>`.
    pub(crate) fn resolve_url(&self, base: &Url) -> Option<String> {
        match self {
            Self::Image(el) => img_url(el, base),
            Self::Picture(el) => picture_url(el, base),
            Self::Meta(el) => el.value().attr("content").and_then(|c| absolutize(c, base)),
            Self::Generic(el) => descendant_img(el).and_then(|img| img_url(&img, base)),
        }
    }
}

fn img_url(el: &ElementRef<'_>, base: &Url) -> Option<String> {
    for attr in LAZY_SRC_ATTRS {
        if let Some(url) = el.value().attr(attr).and_then(|v| absolutize(v, base)) {
            return Some(url);
        }
    }
    if let Some(url) = el
        .value()
        .attr("srcset")
        .and_then(first_srcset_url)
        .and_then(|v| absolutize(v, base))
    {
        return Some(url);
    }
    el.value().attr("src").and_then(|v| absolutize(v, base))
}

fn picture_url(el: &ElementRef<'_>, base: &Url) -> Option<String> {
    let source_sel = Selector::parse("source").expect("valid selector");
    for source in el.select(&source_sel) {
        if let Some(url) = source
            .value()
            .attr("srcset")
            .and_then(first_srcset_url)
            .and_then(|v| absolutize(v, base))
        {
            return Some(url);
        }
    }
    descendant_img(el).and_then(|img| img_url(&img, base))
}

fn descendant_img<'a>(el: &ElementRef<'a>) -> Option<ElementRef<'a>> {
    let img_sel = Selector::parse("img").expect("valid selector");
    el.select(&img_sel).next()
}

/// Highest-resolution URL for an image element: the widest `srcset` entry,
/// then lazy-load attributes, then `src`. Used by the largest-image
/// strategy, where resolution matters more than lazy-load state.
pub(crate) fn highest_resolution_url(el: &ElementRef<'_>, base: &Url) -> Option<String> {
    if let Some(url) = el
        .value()
        .attr("srcset")
        .and_then(largest_srcset_url)
        .and_then(|v| absolutize(v, base))
    {
        return Some(url);
    }
    for attr in LAZY_SRC_ATTRS {
        if let Some(url) = el.value().attr(attr).and_then(|v| absolutize(v, base)) {
            return Some(url);
        }
    }
    el.value().attr("src").and_then(|v| absolutize(v, base))
}

/// First URL in a `srcset` attribute, ignoring its descriptor.
fn first_srcset_url(srcset: &str) -> Option<&str> {
    srcset
        .split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .find_map(|entry| entry.split_whitespace().next())
}

/// URL of the widest `w`-descriptor entry in a `srcset` attribute.
/// Entries without a width descriptor count as width 0.
fn largest_srcset_url(srcset: &str) -> Option<&str> {
    let mut best: Option<(&str, u32)> = None;
    for entry in srcset.split(',') {
        let entry = entry.trim();
        if entry.is_empty() {
            continue;
        }
        let mut parts = entry.split_whitespace();
        let Some(url) = parts.next() else { continue };
        let width = parts
            .next()
            .and_then(|d| d.strip_suffix('w'))
            .and_then(|n| n.parse::<u32>().ok())
            .unwrap_or(0);
        match best {
            Some((_, best_width)) if best_width >= width => {}
            _ => best = Some((url, width)),
        }
    }
    best.map(|(url, _)| url)
}

/// Resolve a raw attribute value into an absolute http(s) URL against the
/// page URL. Empty values, `data:` URIs, and non-http schemes are rejected.
pub(crate) fn absolutize(raw: &str, base: &Url) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed.starts_with("data:") {
        return None;
    }
    let joined = base.join(trimmed).ok()?;
    match joined.scheme() {
        "http" | "https" => Some(String::from(joined)),
        _ => None,
    }
}
