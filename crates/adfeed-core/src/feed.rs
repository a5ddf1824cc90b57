use serde::{Deserialize, Serialize};

/// Availability label carried by every emitted feed item.
pub const AVAILABILITY_IN_STOCK: &str = "in stock";

/// A published ad reshaped into a flat merchant-feed record.
///
/// Every field is a plain string: optional source data degrades to `""`
/// rather than `null` so downstream feed writers never branch on presence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedItem {
    /// Backend ad ID, e.g. `"3f1c…"`.
    pub id: String,
    /// The product search value the seller picked while creating the ad.
    pub title: String,
    pub description: String,
    /// Canonical storefront URL, e.g. `"https://ayshei.com/product/<id>"`.
    pub link: String,
    /// Absolute image-proxy URL for the first product image, or `""`.
    pub image_link: String,
    pub brand: String,
    /// Price with currency suffix, e.g. `"120 AED"`.
    pub price: String,
    pub availability: String,
    /// GTIN as received, kept as text so no digits are lost.
    pub code_number: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> FeedItem {
        FeedItem {
            id: "a1".to_owned(),
            title: "iPhone 15".to_owned(),
            description: "Sealed box".to_owned(),
            link: "https://example.com/product/a1".to_owned(),
            image_link: String::new(),
            brand: "Apple".to_owned(),
            price: "3500 AED".to_owned(),
            availability: AVAILABILITY_IN_STOCK.to_owned(),
            code_number: "8801234567890".to_owned(),
        }
    }

    #[test]
    fn serializes_code_number_as_string() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["code_number"], "8801234567890");
        assert_eq!(json["availability"], "in stock");
    }
}
