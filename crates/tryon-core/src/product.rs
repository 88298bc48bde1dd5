//! The detection result record and the garment taxonomy.
//!
//! [`DetectedProduct`] is the one shape that crosses the process boundary to
//! whatever consumes detection results (popup, background worker, CLI
//! output), so its serialized field names are camelCase and must not drift.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Closed garment taxonomy a detected title is classified into.
///
/// Serialized as the lowercase variant name (`"sweater"`, `"jumpsuit"`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GarmentType {
    Top,
    Shirt,
    Blouse,
    Sweater,
    Cardigan,
    Jacket,
    Coat,
    Dress,
    Pants,
    Jeans,
    Shorts,
    Skirt,
    Suit,
    Jumpsuit,
    Other,
}

impl std::fmt::Display for GarmentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            GarmentType::Top => "top",
            GarmentType::Shirt => "shirt",
            GarmentType::Blouse => "blouse",
            GarmentType::Sweater => "sweater",
            GarmentType::Cardigan => "cardigan",
            GarmentType::Jacket => "jacket",
            GarmentType::Coat => "coat",
            GarmentType::Dress => "dress",
            GarmentType::Pants => "pants",
            GarmentType::Jeans => "jeans",
            GarmentType::Shorts => "shorts",
            GarmentType::Skirt => "skirt",
            GarmentType::Suit => "suit",
            GarmentType::Jumpsuit => "jumpsuit",
            GarmentType::Other => "other",
        };
        write!(f, "{name}")
    }
}

/// A single product extracted from a storefront page.
///
/// Created fresh on every detection pass: `id` and `detected_at` never
/// survive re-detection, even of an unchanged page. Everything else is a
/// pure function of the page content.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectedProduct {
    /// Opaque identity for this detection pass only.
    pub id: Uuid,
    /// Absolute, scheme-qualified URL of the product image.
    pub image_url: String,
    /// Preview image; equals `image_url` when the page has no distinct thumbnail.
    pub thumbnail_url: String,
    pub title: String,
    /// Display price including its currency glyph, e.g. `"$59.99"`. Never
    /// parsed into a numeric type.
    pub price: Option<String>,
    pub garment_type: GarmentType,
    /// URL of the page the product was detected on.
    pub source_url: String,
    /// Hostname of the page, or the matched site profile's domain.
    pub source_domain: String,
    pub detected_at: DateTime<Utc>,
}

impl DetectedProduct {
    /// Build a product record with a fresh `id` and `detected_at`.
    #[must_use]
    pub fn new(
        image_url: String,
        thumbnail_url: Option<String>,
        title: String,
        price: Option<String>,
        garment_type: GarmentType,
        source_url: String,
        source_domain: String,
    ) -> Self {
        let thumbnail_url = thumbnail_url.unwrap_or_else(|| image_url.clone());
        Self {
            id: Uuid::new_v4(),
            image_url,
            thumbnail_url,
            title,
            price,
            garment_type,
            source_url,
            source_domain,
            detected_at: Utc::now(),
        }
    }

    /// Whether this record carries a price string.
    #[must_use]
    pub fn has_price(&self) -> bool {
        self.price.is_some()
    }
}
