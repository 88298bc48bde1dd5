//! Strategy 4: schema.org structured data (`application/ld+json`).

use scraper::Selector;
use serde_json::Value;

use tryon_core::DetectedProduct;

use crate::classify::classify_garment;
use crate::dom;
use crate::extract;
use crate::page::PageSnapshot;

/// Extract a product from the first JSON-LD block describing one.
/// Malformed blocks are skipped silently; parsing continues with the next.
pub(crate) fn detect_structured_data(page: &PageSnapshot) -> Option<DetectedProduct> {
    let script_sel =
        Selector::parse(r#"script[type="application/ld+json"]"#).expect("valid selector");

    for script in page.doc().select(&script_sel) {
        let raw = script.text().collect::<String>();
        let value: Value = match serde_json::from_str(&raw) {
            Ok(v) => v,
            Err(_) => {
                tracing::debug!("skipping malformed ld+json block");
                continue;
            }
        };

        if let Some(node) = find_product_node(&value) {
            if let Some(product) = product_from_node(page, node) {
                return Some(product);
            }
        }
    }

    None
}

/// Locate a product object: a top-level `@type: Product` object, an element
/// of a top-level array or `@graph` container, or a nested `product` key.
fn find_product_node(value: &Value) -> Option<&Value> {
    match value {
        Value::Object(map) => {
            if is_product_type(map.get("@type")) {
                return Some(value);
            }
            if let Some(graph) = map.get("@graph").and_then(Value::as_array) {
                if let Some(node) = graph.iter().find_map(find_product_node) {
                    return Some(node);
                }
            }
            map.get("product").filter(|nested| nested.is_object())
        }
        Value::Array(items) => items.iter().find_map(find_product_node),
        _ => None,
    }
}

/// `@type` may be a plain string or an array of strings.
fn is_product_type(type_node: Option<&Value>) -> bool {
    match type_node {
        Some(Value::String(s)) => s.eq_ignore_ascii_case("Product"),
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(Value::as_str)
            .any(|s| s.eq_ignore_ascii_case("Product")),
        _ => false,
    }
}

fn product_from_node(page: &PageSnapshot, node: &Value) -> Option<DetectedProduct> {
    let image_raw = match node.get("image") {
        Some(Value::String(s)) => Some(s.as_str()),
        Some(Value::Array(items)) => items.first().and_then(Value::as_str),
        Some(Value::Object(map)) => map.get("url").and_then(Value::as_str),
        _ => None,
    }?;
    let image_url = dom::absolutize(image_raw, page.url())?;

    let title = node
        .get("name")
        .and_then(Value::as_str)
        .and_then(extract::clamp_title)
        .or_else(|| extract::generic_title(page))?;

    let price = offers_price(node)
        .map(|p| format!("${p}"))
        .or_else(|| extract::generic_price(page));
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

/// `offers` may be a single object or an array; `price` may be a string or
/// a number.
fn offers_price(node: &Value) -> Option<String> {
    let offers = node.get("offers")?;
    let offer = match offers {
        Value::Array(items) => items.first()?,
        other => other,
    };
    match offer.get("price")? {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use tryon_core::GarmentType;

    use super::*;

    fn page(html: &str) -> PageSnapshot {
        PageSnapshot::parse(html, "https://shop.example.com/p/5").expect("valid page url")
    }

    fn ld_block(json: &str) -> String {
        format!(r#"<script type="application/ld+json">{json}</script>"#)
    }

    #[test]
    fn emits_product_from_ld_json_block() {
        let html = ld_block(
            r#"{"@type":"Product","name":"Classic Oxford Shirt","image":"https://x/a.jpg","offers":{"price":"59.99"}}"#,
        );
        let product = detect_structured_data(&page(&html)).expect("expected a product");
        assert_eq!(product.title, "Classic Oxford Shirt");
        assert_eq!(product.image_url, "https://x/a.jpg");
        assert_eq!(product.price.as_deref(), Some("$59.99"));
        assert_eq!(product.garment_type, GarmentType::Shirt);
    }

    #[test]
    fn numeric_offer_price_is_formatted() {
        let html = ld_block(
            r#"{"@type":"Product","name":"Slub Tee","image":"https://x/a.jpg","offers":{"price":24.5}}"#,
        );
        let product = detect_structured_data(&page(&html)).expect("expected a product");
        assert_eq!(product.price.as_deref(), Some("$24.5"));
    }

    #[test]
    fn image_array_takes_first_entry() {
        let html = ld_block(
            r#"{"@type":"Product","name":"Slub Tee","image":["https://x/1.jpg","https://x/2.jpg"]}"#,
        );
        let product = detect_structured_data(&page(&html)).expect("expected a product");
        assert_eq!(product.image_url, "https://x/1.jpg");
    }

    #[test]
    fn malformed_block_is_skipped_then_next_block_wins() {
        let html = format!(
            "{}{}",
            ld_block(r#"{"@type": "Product", not json"#),
            ld_block(r#"{"@type":"Product","name":"Slub Tee","image":"https://x/a.jpg"}"#)
        );
        let product = detect_structured_data(&page(&html)).expect("expected a product");
        assert_eq!(product.title, "Slub Tee");
    }

    #[test]
    fn type_array_containing_product_is_accepted() {
        let html = ld_block(
            r#"{"@type":["Thing","Product"],"name":"Slub Tee","image":"https://x/a.jpg"}"#,
        );
        assert!(detect_structured_data(&page(&html)).is_some());
    }

    #[test]
    fn graph_container_is_searched() {
        let html = ld_block(
            r#"{"@graph":[{"@type":"WebPage","name":"page"},{"@type":"Product","name":"Slub Tee","image":"https://x/a.jpg"}]}"#,
        );
        let product = detect_structured_data(&page(&html)).expect("expected a product");
        assert_eq!(product.title, "Slub Tee");
    }

    #[test]
    fn nested_product_object_is_accepted() {
        let html = ld_block(
            r#"{"@type":"WebPage","product":{"name":"Slub Tee","image":"https://x/a.jpg"}}"#,
        );
        let product = detect_structured_data(&page(&html)).expect("expected a product");
        assert_eq!(product.title, "Slub Tee");
    }

    #[test]
    fn non_product_types_are_ignored() {
        let html = ld_block(r#"{"@type":"Article","name":"Holiday lookbook","image":"https://x/a.jpg"}"#);
        assert!(detect_structured_data(&page(&html)).is_none());
    }

    #[test]
    fn block_without_image_is_not_valid() {
        let html = ld_block(r#"{"@type":"Product","name":"Slub Tee"}"#);
        assert!(detect_structured_data(&page(&html)).is_none());
    }

    #[test]
    fn relative_image_is_resolved_against_page_url() {
        let html = ld_block(r#"{"@type":"Product","name":"Slub Tee","image":"/img/tee.jpg"}"#);
        let product = detect_structured_data(&page(&html)).expect("expected a product");
        assert_eq!(product.image_url, "https://shop.example.com/img/tee.jpg");
    }

    #[test]
    fn missing_name_falls_back_to_generic_title() {
        let html = format!(
            "<h1>Slub Tee</h1>{}",
            ld_block(r#"{"@type":"Product","image":"https://x/a.jpg"}"#)
        );
        let product = detect_structured_data(&page(&html)).expect("expected a product");
        assert_eq!(product.title, "Slub Tee");
    }
}
