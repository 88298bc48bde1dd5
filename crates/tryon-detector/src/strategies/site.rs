//! Strategy 1: extraction driven by a matched site profile.

use tryon_core::{DetectedProduct, SiteProfile};

use crate::classify::classify_garment;
use crate::dom::{self, ElementKind};
use crate::extract;
use crate::page::PageSnapshot;

/// Extract a product using the profile's selector lists. Emits only when
/// both an image URL and a title are found; a partial hit falls through to
/// the generic strategies.
pub(crate) fn detect_site(
    page: &PageSnapshot,
    profile: &SiteProfile,
) -> Option<DetectedProduct> {
    let image_url = image_from_list(page, &profile.selectors.image)?;
    let title = title_from_list(page, &profile.selectors.title)?;
    let price = price_from_list(page, &profile.selectors.price);
    let garment_type = classify_garment(&title);

    Some(DetectedProduct::new(
        image_url,
        None,
        title,
        price,
        garment_type,
        page.url().to_string(),
        profile.domain.clone(),
    ))
}

/// First selector alternative that resolves to an absolute image URL.
fn image_from_list(page: &PageSnapshot, list: &str) -> Option<String> {
    for selector in dom::split_selector_list(list) {
        let Some(el) = dom::select_first(page.doc(), selector) else {
            continue;
        };
        if let Some(url) = ElementKind::of(el).resolve_url(page.url()) {
            return Some(url);
        }
    }
    None
}

/// First selector alternative with usable trimmed text.
fn title_from_list(page: &PageSnapshot, list: &str) -> Option<String> {
    for selector in dom::split_selector_list(list) {
        let Some(el) = dom::select_first(page.doc(), selector) else {
            continue;
        };
        if let Some(title) = extract::clamp_title(&dom::element_text(&el)) {
            return Some(title);
        }
    }
    None
}

/// First selector alternative whose text carries a currency glyph.
fn price_from_list(page: &PageSnapshot, list: &str) -> Option<String> {
    for selector in dom::split_selector_list(list) {
        let Some(el) = dom::select_first(page.doc(), selector) else {
            continue;
        };
        let text = dom::element_text(&el);
        if extract::contains_currency_glyph(&text) {
            return Some(text);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use tryon_core::{GarmentType, SelectorSet};

    use super::*;

    fn profile() -> SiteProfile {
        SiteProfile {
            domain: "boutique.example".to_string(),
            selectors: SelectorSet {
                container: ".product".to_string(),
                image: ".gone img, .gallery img".to_string(),
                title: "h1.gone, h1.name".to_string(),
                price: ".gone-price, .price".to_string(),
            },
        }
    }

    fn page(html: &str) -> PageSnapshot {
        PageSnapshot::parse(html, "https://boutique.example/p/77").expect("valid page url")
    }

    #[test]
    fn emits_product_when_image_and_title_resolve() {
        let html = r#"
            <div class="gallery"><img src="/hero.jpg"></div>
            <h1 class="name">Wool Overcoat</h1>
            <span class="price">$249.00</span>
        "#;
        let product = detect_site(&page(html), &profile()).expect("expected a product");
        assert_eq!(product.image_url, "https://boutique.example/hero.jpg");
        assert_eq!(product.title, "Wool Overcoat");
        assert_eq!(product.price.as_deref(), Some("$249.00"));
        assert_eq!(product.garment_type, GarmentType::Coat);
        assert_eq!(product.source_domain, "boutique.example");
        assert_eq!(product.source_url, "https://boutique.example/p/77");
    }

    #[test]
    fn later_selector_alternative_is_used_when_first_misses() {
        // `.gone img` and `h1.gone` match nothing; the second alternatives do.
        let html = r#"
            <div class="gallery"><img src="/hero.jpg"></div>
            <h1 class="name">Silk Blouse</h1>
        "#;
        let product = detect_site(&page(html), &profile()).expect("expected a product");
        assert_eq!(product.garment_type, GarmentType::Blouse);
        assert!(product.price.is_none());
    }

    #[test]
    fn nothing_without_an_image() {
        let html = r#"<h1 class="name">Silk Blouse</h1>"#;
        assert!(detect_site(&page(html), &profile()).is_none());
    }

    #[test]
    fn nothing_without_a_title() {
        let html = r#"<div class="gallery"><img src="/hero.jpg"></div>"#;
        assert!(detect_site(&page(html), &profile()).is_none());
    }

    #[test]
    fn price_without_currency_glyph_is_dropped() {
        let html = r#"
            <div class="gallery"><img src="/hero.jpg"></div>
            <h1 class="name">Silk Blouse</h1>
            <span class="price">249.00</span>
        "#;
        let product = detect_site(&page(html), &profile()).expect("expected a product");
        assert!(product.price.is_none());
    }

    #[test]
    fn image_selector_with_unresolvable_element_falls_through() {
        // First alternative matches an <img> with no source; the second
        // alternative resolves.
        let p = SiteProfile {
            domain: "boutique.example".to_string(),
            selectors: SelectorSet {
                container: String::new(),
                image: ".empty img, .gallery img".to_string(),
                title: "h1".to_string(),
                price: ".price".to_string(),
            },
        };
        let html = r#"
            <div class="empty"><img alt="spacer"></div>
            <div class="gallery"><img src="/real.jpg"></div>
            <h1>Rib-Knit Cardigan</h1>
        "#;
        let product = detect_site(&page(html), &p).expect("expected a product");
        assert_eq!(product.image_url, "https://boutique.example/real.jpg");
        assert_eq!(product.garment_type, GarmentType::Cardigan);
    }
}
