//! Hasura response types for the `ads` query.
//!
//! ## Observed shape
//!
//! ### `attributes`
//! A `jsonb` column. Hasura returns it as a nested JSON object, but older
//! exports carry it as a JSON-encoded string. We keep it as a raw
//! [`serde_json::Value`] here; [`crate::steps::parse_steps`] decodes both forms.
//!
//! ### `code_number`
//! A numeric column holding a GTIN. Depending on the column type Hasura emits
//! it as a JSON number (`8801234567890`) or a string (`"8801234567890"`), and
//! it may be `null`. It must never pass through `f64`: `serde_json` is built
//! with `arbitrary_precision`, so the number's literal text survives decoding.
//!
//! ### `description` / `draft_id`
//! Nullable text columns; both degrade to `""` during normalization.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::HasuraError;

/// A product code (GTIN) kept as the exact decimal text received.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct CodeNumber(String);

impl CodeNumber {
    #[must_use]
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Display for CodeNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for CodeNumber {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        match serde_json::Value::deserialize(deserializer)? {
            serde_json::Value::Null => Ok(Self::default()),
            serde_json::Value::Number(n) => Ok(Self(n.to_string())),
            serde_json::Value::String(s) => Ok(Self(s)),
            other => Err(D::Error::custom(format!(
                "code_number must be a number or string, got {other}"
            ))),
        }
    }
}

/// A single ad row from the `ads` query.
#[derive(Debug, Clone, Deserialize)]
pub struct RawAd {
    /// Ad UUID as text.
    pub id: String,

    /// Draft the ad was published from; its images live under this ID.
    #[serde(default)]
    pub draft_id: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub code_number: CodeNumber,

    /// Step-oriented attribute payload, undecoded.
    #[serde(default)]
    pub attributes: serde_json::Value,
}

/// `data` member of the `ads` query response.
#[derive(Debug, Deserialize)]
pub struct AdsData {
    #[serde(default)]
    pub ads: Vec<RawAd>,
}

/// Standard GraphQL response envelope.
#[derive(Debug, Deserialize)]
pub struct GraphqlResponse<T> {
    pub data: Option<T>,
    #[serde(default)]
    pub errors: Vec<GraphqlErrorMessage>,
}

#[derive(Debug, Deserialize)]
pub struct GraphqlErrorMessage {
    pub message: String,
}

impl<T> GraphqlResponse<T> {
    /// Returns `data`, or the joined error messages when `errors` is non-empty.
    ///
    /// # Errors
    ///
    /// - [`HasuraError::Graphql`] when the server reported any error.
    /// - [`HasuraError::MissingData`] when neither data nor errors are present.
    pub fn into_data(self) -> Result<T, HasuraError> {
        if !self.errors.is_empty() {
            let joined = self
                .errors
                .iter()
                .map(|e| e.message.as_str())
                .collect::<Vec<_>>()
                .join("; ");
            return Err(HasuraError::Graphql(joined));
        }
        self.data.ok_or(HasuraError::MissingData)
    }
}

/// Decodes a saved ads document: a bare array of ads, `{"ads": [...]}`, or a
/// full GraphQL response `{"data": {"ads": [...]}}`.
///
/// # Errors
///
/// - [`HasuraError::Deserialize`] if the text is not JSON or matches none of
///   the accepted shapes.
/// - [`HasuraError::Graphql`] if the document is a GraphQL error response.
pub fn ads_from_document(body: &str) -> Result<Vec<RawAd>, HasuraError> {
    let deserialize_err = |source| HasuraError::Deserialize {
        context: "ads document".to_owned(),
        source,
    };

    let value: serde_json::Value = serde_json::from_str(body).map_err(deserialize_err)?;

    if value.is_array() {
        return serde_json::from_value(value).map_err(deserialize_err);
    }

    if value.get("data").is_some() || value.get("errors").is_some() {
        let envelope: GraphqlResponse<AdsData> =
            serde_json::from_value(value).map_err(deserialize_err)?;
        return Ok(envelope.into_data()?.ads);
    }

    let data: AdsData = serde_json::from_value(value).map_err(deserialize_err)?;
    Ok(data.ads)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn code_number_keeps_numeric_literal_text() {
        let ad: RawAd =
            serde_json::from_str(r#"{"id":"a1","code_number":12345678901234567890123}"#).unwrap();
        assert_eq!(ad.code_number.as_str(), "12345678901234567890123");
    }

    #[test]
    fn code_number_accepts_string() {
        let ad: RawAd =
            serde_json::from_str(r#"{"id":"a1","code_number":"0088012345678"}"#).unwrap();
        assert_eq!(ad.code_number.as_str(), "0088012345678");
    }

    #[test]
    fn code_number_null_or_missing_is_empty() {
        let ad: RawAd = serde_json::from_str(r#"{"id":"a1","code_number":null}"#).unwrap();
        assert!(ad.code_number.is_empty());
        let ad: RawAd = serde_json::from_str(r#"{"id":"a1"}"#).unwrap();
        assert!(ad.code_number.is_empty());
    }

    #[test]
    fn code_number_rejects_object() {
        let result = serde_json::from_str::<RawAd>(r#"{"id":"a1","code_number":{"v":1}}"#);
        assert!(result.is_err());
    }

    #[test]
    fn into_data_joins_error_messages() {
        let resp: GraphqlResponse<AdsData> = serde_json::from_str(
            r#"{"errors":[{"message":"field not found"},{"message":"bad uuid"}]}"#,
        )
        .unwrap();
        let err = resp.into_data().unwrap_err();
        assert_eq!(err.to_string(), "GraphQL error: field not found; bad uuid");
    }

    #[test]
    fn into_data_without_data_is_missing() {
        let resp: GraphqlResponse<AdsData> = serde_json::from_str("{}").unwrap();
        assert!(matches!(resp.into_data(), Err(HasuraError::MissingData)));
    }

    #[test]
    fn ads_from_document_accepts_all_shapes() {
        let bare = r#"[{"id":"a1","code_number":8801234567890}]"#;
        let wrapped = r#"{"ads":[{"id":"a1","code_number":8801234567890}]}"#;
        let envelope = r#"{"data":{"ads":[{"id":"a1","code_number":8801234567890}]}}"#;
        for doc in [bare, wrapped, envelope] {
            let ads = ads_from_document(doc).unwrap();
            assert_eq!(ads.len(), 1, "doc: {doc}");
            assert_eq!(ads[0].code_number.as_str(), "8801234567890");
        }
    }

    #[test]
    fn ads_from_document_rejects_garbage() {
        assert!(matches!(
            ads_from_document("not json"),
            Err(HasuraError::Deserialize { .. })
        ));
    }
}
