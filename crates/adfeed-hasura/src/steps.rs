//! Typed model of the step-oriented `attributes` payload.
//!
//! The ad-creation wizard stores each stage it collected as a
//! `{ "name": ..., "data": ... }` entry under `steps_data`. The shape of
//! `data` depends on `name`; [`parse_steps`] decodes every known stage into a
//! [`Step`] variant with flat optional fields so extraction never inspects raw
//! JSON.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

pub const AD_TYPE_STEP: &str = "ad_type";
pub const DELIVERY_AND_PAYMENT_STEP: &str = "delivery_and_payment_methods";
pub const SEARCH_PRODUCT_STEP: &str = "search_product";
pub const PRODUCT_DETAIL_STEP: &str = "product_detail";

/// One decoded stage of the ad-creation wizard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// `ad_type`: how the ad is sold (fixed price, auction, ...).
    AdType { type_ad: Option<String> },
    /// `delivery_and_payment_methods`: payment method values in listed order.
    DeliveryAndPayment { payment_methods: Vec<String> },
    /// `search_product`: the catalogue search value the seller chose.
    SearchProduct { input_search_value: Option<String> },
    /// `product_detail`: free-form product fields.
    ProductDetail {
        brand: Option<String>,
        price: Option<String>,
        /// Image source paths in display order.
        image_srcs: Vec<String>,
        ad_type: Option<String>,
    },
    /// A stage the feed does not read.
    Other { name: String },
}

impl Step {
    /// Wizard stage name this step was decoded from.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Step::AdType { .. } => AD_TYPE_STEP,
            Step::DeliveryAndPayment { .. } => DELIVERY_AND_PAYMENT_STEP,
            Step::SearchProduct { .. } => SEARCH_PRODUCT_STEP,
            Step::ProductDetail { .. } => PRODUCT_DETAIL_STEP,
            Step::Other { name } => name,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct RawAttributes {
    #[serde(
        default,
        alias = "stepsData",
        alias = "steps",
        deserialize_with = "null_as_default"
    )]
    steps_data: Vec<RawStep>,
}

#[derive(Debug, Deserialize)]
struct RawStep {
    #[serde(default, deserialize_with = "null_as_default")]
    name: String,
    #[serde(default)]
    data: Value,
}

#[derive(Debug, Default, Deserialize)]
struct AdTypeData {
    #[serde(default)]
    id: Option<AdTypeId>,
}

#[derive(Debug, Default, Deserialize)]
struct AdTypeId {
    #[serde(default, alias = "typeAd")]
    type_ad: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct PaymentData {
    #[serde(default, alias = "paymentMethods")]
    payment_methods: Option<PaymentMethods>,
}

#[derive(Debug, Default, Deserialize)]
struct PaymentMethods {
    #[serde(default, deserialize_with = "null_as_default")]
    data: Vec<PaymentMethod>,
}

#[derive(Debug, Default, Deserialize)]
struct PaymentMethod {
    #[serde(default)]
    value: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct SearchProductData {
    #[serde(default, alias = "inputSearchValue")]
    input_search_value: Option<SearchValue>,
}

#[derive(Debug, Default, Deserialize)]
struct SearchValue {
    #[serde(default)]
    value: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct ProductDetailData {
    #[serde(default)]
    values: Option<ProductValues>,
}

#[derive(Debug, Default, Deserialize)]
struct ProductValues {
    #[serde(default)]
    brand: Option<String>,
    #[serde(default)]
    price: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    images: Vec<ProductImage>,
    #[serde(default, alias = "adType", alias = "type_ad")]
    ad_type: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct ProductImage {
    #[serde(default)]
    src: Option<String>,
}

/// Field-level counterpart of [`decode_data`]: an explicit `null` list or
/// name decodes as empty.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Decodes a step's `data`, treating `null` as the all-default value.
fn decode_data<T>(data: Value) -> Result<T, serde_json::Error>
where
    T: DeserializeOwned + Default,
{
    if data.is_null() {
        Ok(T::default())
    } else {
        serde_json::from_value(data)
    }
}

impl TryFrom<RawStep> for Step {
    type Error = serde_json::Error;

    fn try_from(raw: RawStep) -> Result<Self, Self::Error> {
        let step = match raw.name.as_str() {
            AD_TYPE_STEP => {
                let data: AdTypeData = decode_data(raw.data)?;
                Step::AdType {
                    type_ad: data.id.and_then(|id| id.type_ad),
                }
            }
            DELIVERY_AND_PAYMENT_STEP => {
                let data: PaymentData = decode_data(raw.data)?;
                Step::DeliveryAndPayment {
                    payment_methods: data
                        .payment_methods
                        .map(|m| m.data.into_iter().filter_map(|p| p.value).collect())
                        .unwrap_or_default(),
                }
            }
            SEARCH_PRODUCT_STEP => {
                let data: SearchProductData = decode_data(raw.data)?;
                Step::SearchProduct {
                    input_search_value: data.input_search_value.and_then(|v| v.value),
                }
            }
            PRODUCT_DETAIL_STEP => {
                let values = decode_data::<ProductDetailData>(raw.data)?
                    .values
                    .unwrap_or_default();
                Step::ProductDetail {
                    brand: values.brand,
                    price: values.price,
                    image_srcs: values.images.into_iter().filter_map(|i| i.src).collect(),
                    ad_type: values.ad_type,
                }
            }
            _ => Step::Other { name: raw.name },
        };
        Ok(step)
    }
}

/// Parses an ad's `attributes` payload into its ordered steps.
///
/// Accepts the payload as a JSON object or as a JSON-encoded string of one.
/// `null` yields no steps.
///
/// # Errors
///
/// Returns the underlying [`serde_json::Error`] when the payload, or the
/// `data` of any known step, does not have the expected shape.
pub fn parse_steps(attributes: &Value) -> Result<Vec<Step>, serde_json::Error> {
    let raw: RawAttributes = match attributes {
        Value::Null => RawAttributes::default(),
        Value::String(encoded) => serde_json::from_str(encoded)?,
        other => RawAttributes::deserialize(other)?,
    };

    raw.steps_data.into_iter().map(Step::try_from).collect()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn decodes_every_known_step() {
        let attributes = json!({
            "steps_data": [
                { "name": "ad_type", "data": { "id": { "type_ad": "Fixed" } } },
                { "name": "delivery_and_payment_methods", "data": {
                    "payment_methods": { "data": [
                        { "value": "Cash on Delivery" },
                        { "value": "Online Payment" }
                    ] }
                } },
                { "name": "search_product", "data": { "input_search_value": { "value": "iPhone 15" } } },
                { "name": "product_detail", "data": { "values": {
                    "brand": "Apple",
                    "price": "3500",
                    "images": [ { "src": "front.png" }, { "src": "back.png" } ],
                    "ad_type": "fixed"
                } } }
            ]
        });

        let steps = parse_steps(&attributes).unwrap();
        assert_eq!(
            steps,
            vec![
                Step::AdType {
                    type_ad: Some("Fixed".to_owned())
                },
                Step::DeliveryAndPayment {
                    payment_methods: vec!["Cash on Delivery".to_owned(), "Online Payment".to_owned()]
                },
                Step::SearchProduct {
                    input_search_value: Some("iPhone 15".to_owned())
                },
                Step::ProductDetail {
                    brand: Some("Apple".to_owned()),
                    price: Some("3500".to_owned()),
                    image_srcs: vec!["front.png".to_owned(), "back.png".to_owned()],
                    ad_type: Some("fixed".to_owned()),
                },
            ]
        );
    }

    #[test]
    fn accepts_camel_case_keys() {
        let attributes = json!({
            "stepsData": [
                { "name": "ad_type", "data": { "id": { "typeAd": "Auction" } } },
                { "name": "search_product", "data": { "inputSearchValue": { "value": "Galaxy" } } }
            ]
        });
        let steps = parse_steps(&attributes).unwrap();
        assert_eq!(
            steps[0],
            Step::AdType {
                type_ad: Some("Auction".to_owned())
            }
        );
        assert_eq!(
            steps[1],
            Step::SearchProduct {
                input_search_value: Some("Galaxy".to_owned())
            }
        );
    }

    #[test]
    fn decodes_json_encoded_string_payload() {
        let encoded = json!({ "steps_data": [ { "name": "summary", "data": {} } ] }).to_string();
        let steps = parse_steps(&Value::String(encoded)).unwrap();
        assert_eq!(
            steps,
            vec![Step::Other {
                name: "summary".to_owned()
            }]
        );
        assert_eq!(steps[0].name(), "summary");
    }

    #[test]
    fn null_payload_and_null_data_are_empty() {
        assert!(parse_steps(&Value::Null).unwrap().is_empty());

        let steps = parse_steps(&json!({ "steps_data": [ { "name": "product_detail", "data": null } ] }))
            .unwrap();
        assert_eq!(
            steps,
            vec![Step::ProductDetail {
                brand: None,
                price: None,
                image_srcs: vec![],
                ad_type: None,
            }]
        );
    }

    #[test]
    fn null_lists_decode_as_empty() {
        let attributes = json!({
            "steps_data": [
                { "name": "delivery_and_payment_methods", "data": { "payment_methods": { "data": null } } },
                { "name": "product_detail", "data": { "values": { "price": "10", "images": null } } }
            ]
        });
        let steps = parse_steps(&attributes).unwrap();
        assert_eq!(
            steps,
            vec![
                Step::DeliveryAndPayment {
                    payment_methods: vec![]
                },
                Step::ProductDetail {
                    brand: None,
                    price: Some("10".to_owned()),
                    image_srcs: vec![],
                    ad_type: None,
                },
            ]
        );

        assert!(parse_steps(&json!({ "steps_data": null })).unwrap().is_empty());
    }

    #[test]
    fn step_without_name_is_kept_as_unnamed() {
        let attributes = json!({
            "steps_data": [
                { "data": { "anything": true } },
                { "name": null, "data": {} },
                { "name": "search_product", "data": { "input_search_value": { "value": "Pixel" } } }
            ]
        });
        let steps = parse_steps(&attributes).unwrap();
        assert_eq!(steps.len(), 3);
        assert_eq!(steps[0].name(), "");
        assert_eq!(steps[1].name(), "");
        assert_eq!(
            steps[2],
            Step::SearchProduct {
                input_search_value: Some("Pixel".to_owned())
            }
        );
    }

    #[test]
    fn wrong_type_in_known_step_is_an_error() {
        let attributes = json!({
            "steps_data": [ { "name": "product_detail", "data": { "values": { "price": { "amount": 1 } } } } ]
        });
        assert!(parse_steps(&attributes).is_err());
    }

    #[test]
    fn non_object_payload_is_an_error() {
        assert!(parse_steps(&json!(42)).is_err());
        assert!(parse_steps(&Value::String("{not json".to_owned())).is_err());
    }

    #[test]
    fn unknown_steps_keep_arbitrary_data() {
        let attributes = json!({
            "steps_data": [ { "name": "location", "data": [1, 2, 3] } ]
        });
        let steps = parse_steps(&attributes).unwrap();
        assert_eq!(steps[0].name(), "location");
    }
}
