//! Generic title and price extraction, used whenever a strategy has no
//! site- or schema-specific source for a field.

use crate::dom;
use crate::page::PageSnapshot;

/// Accepted title length window, in characters.
const TITLE_MIN_CHARS: usize = 3;
const TITLE_MAX_CHARS: usize = 200;

/// Prioritized selectors for a product title on an arbitrary page.
const TITLE_SELECTORS: &[&str] = &[
    "h1[itemprop='name']",
    "[itemprop='name']",
    "h1.product-title",
    "h1.product-name",
    ".product-title h1",
    ".product-name h1",
    "meta[property='og:title']",
    "h1",
];

/// Prioritized selectors for a displayed price on an arbitrary page.
const PRICE_SELECTORS: &[&str] = &[
    "[itemprop='price']",
    ".price-current",
    ".current-price",
    ".product-price",
    ".price-value",
    "span.price",
    ".price",
];

/// Collapse whitespace and enforce the title length window: too short is
/// rejected, too long is truncated on a char boundary.
pub(crate) fn clamp_title(raw: &str) -> Option<String> {
    let collapsed = raw.split_whitespace().collect::<Vec<_>>().join(" ");
    let chars = collapsed.chars().count();
    if chars < TITLE_MIN_CHARS {
        return None;
    }
    if chars > TITLE_MAX_CHARS {
        return Some(collapsed.chars().take(TITLE_MAX_CHARS).collect());
    }
    Some(collapsed)
}

/// Whether the text carries a recognized currency glyph. Price candidates
/// without one are treated as non-prices (sale badges, installment copy).
pub(crate) fn contains_currency_glyph(text: &str) -> bool {
    text.chars().any(|c| matches!(c, '$' | '€' | '£'))
}

/// Best-effort product title: the prioritized selector list, then the
/// document title trimmed at its first separator.
pub(crate) fn generic_title(page: &PageSnapshot) -> Option<String> {
    for selector in TITLE_SELECTORS {
        let Some(el) = dom::select_first(page.doc(), selector) else {
            continue;
        };
        let raw = if el.value().name() == "meta" {
            el.value().attr("content").unwrap_or_default().to_string()
        } else {
            dom::element_text(&el)
        };
        if let Some(title) = clamp_title(&raw) {
            return Some(title);
        }
    }

    let title_el = dom::select_first(page.doc(), "title")?;
    trim_page_title(&dom::element_text(&title_el))
}

/// Best-effort displayed price: first prioritized selector whose text
/// carries a currency glyph.
pub(crate) fn generic_price(page: &PageSnapshot) -> Option<String> {
    for selector in PRICE_SELECTORS {
        if let Some(el) = dom::select_first(page.doc(), selector) {
            let text = dom::element_text(&el);
            if contains_currency_glyph(&text) {
                return Some(text);
            }
        }
    }
    None
}

/// Document titles usually append the site name ("Wool Coat | Shop" or
/// "Wool Coat - Shop"); keep the product segment.
fn trim_page_title(raw: &str) -> Option<String> {
    let head = raw.split('|').next().unwrap_or_default();
    let head = head.split(" - ").next().unwrap_or_default();
    clamp_title(head)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(html: &str) -> PageSnapshot {
        PageSnapshot::parse(html, "https://shop.example.com/p/1").expect("valid page url")
    }

    // -----------------------------------------------------------------------
    // clamp_title
    // -----------------------------------------------------------------------

    #[test]
    fn clamp_title_collapses_whitespace() {
        assert_eq!(
            clamp_title("  Wool \n\t Overcoat ").as_deref(),
            Some("Wool Overcoat")
        );
    }

    #[test]
    fn clamp_title_rejects_too_short() {
        assert_eq!(clamp_title("AB"), None);
        assert_eq!(clamp_title("   "), None);
    }

    #[test]
    fn clamp_title_truncates_too_long() {
        let long = "x".repeat(500);
        let clamped = clamp_title(&long).expect("long titles truncate, not reject");
        assert_eq!(clamped.chars().count(), 200);
    }

    #[test]
    fn clamp_title_truncates_on_char_boundary() {
        let long = "é".repeat(250);
        let clamped = clamp_title(&long).expect("long titles truncate, not reject");
        assert_eq!(clamped.chars().count(), 200);
    }

    // -----------------------------------------------------------------------
    // currency glyphs
    // -----------------------------------------------------------------------

    #[test]
    fn currency_glyph_accepts_dollar_euro_pound() {
        assert!(contains_currency_glyph("$59.99"));
        assert!(contains_currency_glyph("ab 49,95 €"));
        assert!(contains_currency_glyph("£120"));
    }

    #[test]
    fn currency_glyph_rejects_bare_numbers() {
        assert!(!contains_currency_glyph("59.99"));
        assert!(!contains_currency_glyph("Sale!"));
    }

    // -----------------------------------------------------------------------
    // generic title
    // -----------------------------------------------------------------------

    #[test]
    fn title_prefers_itemprop_heading_over_h1() {
        let html = r#"
            <h1>Welcome</h1>
            <h1 itemprop="name">Wool Overcoat</h1>
        "#;
        assert_eq!(generic_title(&page(html)).as_deref(), Some("Wool Overcoat"));
    }

    #[test]
    fn title_falls_back_to_og_meta_then_h1() {
        let html = r#"
            <meta property="og:title" content="Linen Blazer">
            <p>no headings here</p>
        "#;
        assert_eq!(generic_title(&page(html)).as_deref(), Some("Linen Blazer"));
    }

    #[test]
    fn title_falls_back_to_document_title_split_on_pipe() {
        let html = "<title>Wool Overcoat | Example Shop</title>";
        assert_eq!(generic_title(&page(html)).as_deref(), Some("Wool Overcoat"));
    }

    #[test]
    fn title_falls_back_to_document_title_split_on_dash() {
        let html = "<title>Wool Overcoat - Example Shop</title>";
        assert_eq!(generic_title(&page(html)).as_deref(), Some("Wool Overcoat"));
    }

    #[test]
    fn document_title_split_keeps_hyphenated_product_names() {
        let html = "<title>High-Rise Jeans | Example Shop</title>";
        assert_eq!(generic_title(&page(html)).as_deref(), Some("High-Rise Jeans"));
    }

    #[test]
    fn title_none_when_page_has_nothing_usable() {
        let html = "<p>just a paragraph</p>";
        assert_eq!(generic_title(&page(html)), None);
    }

    #[test]
    fn too_short_h1_is_skipped_for_later_sources() {
        let html = r#"
            <h1>Hi</h1>
            <title>Wool Overcoat | Shop</title>
        "#;
        assert_eq!(generic_title(&page(html)).as_deref(), Some("Wool Overcoat"));
    }

    // -----------------------------------------------------------------------
    // generic price
    // -----------------------------------------------------------------------

    #[test]
    fn price_requires_currency_glyph() {
        let html = r#"<span class="price">59.99</span>"#;
        assert_eq!(generic_price(&page(html)), None);
    }

    #[test]
    fn price_found_via_class_selector() {
        let html = r#"<span class="price">$59.99</span>"#;
        assert_eq!(generic_price(&page(html)).as_deref(), Some("$59.99"));
    }

    #[test]
    fn price_prefers_itemprop_over_class() {
        let html = r#"
            <span class="price">$99.00</span>
            <span itemprop="price">$59.99</span>
        "#;
        assert_eq!(generic_price(&page(html)).as_deref(), Some("$59.99"));
    }

    #[test]
    fn price_none_when_absent() {
        let html = "<p>no price here</p>";
        assert_eq!(generic_price(&page(html)), None);
    }
}
