//! Garment classification from product titles.

use tryon_core::GarmentType;

/// Keyword table in match priority order. The order is load-bearing:
/// titles routinely contain several category words ("denim jean jacket",
/// "pullover hoodie top"), and the first matching row wins. Specific outer
/// layers come before broad knitwear, outerwear before tops, loose tops
/// before structured shirts (so "t-shirt" never lands on the "shirt" row),
/// and jeans before general pants.
const GARMENT_KEYWORDS: &[(&str, GarmentType)] = &[
    ("cardigan", GarmentType::Cardigan),
    ("sweatshirt", GarmentType::Sweater),
    ("sweater", GarmentType::Sweater),
    ("hoodie", GarmentType::Sweater),
    ("pullover", GarmentType::Sweater),
    ("fleece", GarmentType::Sweater),
    ("jacket", GarmentType::Jacket),
    ("blazer", GarmentType::Jacket),
    ("coat", GarmentType::Coat),
    ("parka", GarmentType::Coat),
    ("t-shirt", GarmentType::Top),
    ("tshirt", GarmentType::Top),
    ("tee", GarmentType::Top),
    ("tank", GarmentType::Top),
    ("blouse", GarmentType::Blouse),
    ("crop", GarmentType::Top),
    ("top", GarmentType::Top),
    ("button-up", GarmentType::Shirt),
    ("button up", GarmentType::Shirt),
    ("oxford", GarmentType::Shirt),
    ("shirt", GarmentType::Shirt),
    ("dress", GarmentType::Dress),
    ("gown", GarmentType::Dress),
    ("romper", GarmentType::Jumpsuit),
    ("jumpsuit", GarmentType::Jumpsuit),
    ("suit", GarmentType::Suit),
    ("shorts", GarmentType::Shorts),
    ("skirt", GarmentType::Skirt),
    ("jeans", GarmentType::Jeans),
    ("denim", GarmentType::Jeans),
    ("pants", GarmentType::Pants),
    ("trousers", GarmentType::Pants),
    ("leggings", GarmentType::Pants),
    ("joggers", GarmentType::Pants),
    ("chinos", GarmentType::Pants),
];

/// Classify a product title into the garment taxonomy.
///
/// Pure function of the title: lowercases it and returns the first keyword
/// row it contains, or [`GarmentType::Other`] when nothing matches.
#[must_use]
pub fn classify_garment(title: &str) -> GarmentType {
    let lower = title.to_lowercase();
    for &(keyword, garment) in GARMENT_KEYWORDS {
        if lower.contains(keyword) {
            return garment;
        }
    }
    GarmentType::Other
}
