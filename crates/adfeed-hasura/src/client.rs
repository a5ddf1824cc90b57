//! HTTP client for the Hasura GraphQL endpoint that stores ads.
//!
//! Wraps `reqwest` with admin-secret authentication and typed decoding of the
//! `ads` query. One request per batch: no retries and no pagination.

use std::time::Duration;

use chrono::{DateTime, SecondsFormat, Utc};
use reqwest::{Client, Url};
use serde_json::json;
use uuid::Uuid;

use crate::error::HasuraError;
use crate::types::{AdsData, GraphqlResponse, RawAd};

/// Header Hasura reads the admin secret from.
pub const ADMIN_SECRET_HEADER: &str = "X-Hasura-Admin-Secret";

/// Status of ads that are live on the storefront.
pub const PUBLISHED_STATUS: &str = "Published";

pub(crate) const ADS_QUERY: &str = r"query ($status: String!, $categoryId: uuid!, $since: timestamptz!) {
  ads(where: {
    status: {_eq: $status},
    category_id: {_eq: $categoryId},
    updated_at: {_gte: $since}
  }) {
    id
    draft_id
    description
    attributes
    code_number
  }
}";

/// Server-side filter applied by the `ads` query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdsFilter {
    pub status: String,
    pub category_id: Uuid,
    /// Only ads with `updated_at >= updated_since` are returned.
    pub updated_since: DateTime<Utc>,
}

impl AdsFilter {
    /// Published ads in `category_id` updated within the last `window_hours`.
    #[must_use]
    pub fn trailing_window(category_id: Uuid, window_hours: u64) -> Self {
        Self::trailing_window_from(Utc::now(), category_id, window_hours)
    }

    /// Same as [`AdsFilter::trailing_window`] with an explicit `now`.
    #[must_use]
    pub fn trailing_window_from(now: DateTime<Utc>, category_id: Uuid, window_hours: u64) -> Self {
        let hours = i64::try_from(window_hours).unwrap_or(i64::MAX);
        let window = chrono::Duration::try_hours(hours).unwrap_or(chrono::Duration::MAX);
        let updated_since = now
            .checked_sub_signed(window)
            .unwrap_or(DateTime::<Utc>::MIN_UTC);
        Self {
            status: PUBLISHED_STATUS.to_owned(),
            category_id,
            updated_since,
        }
    }

    /// GraphQL variables for [`ADS_QUERY`].
    fn variables(&self) -> serde_json::Value {
        json!({
            "status": self.status,
            "categoryId": self.category_id.to_string(),
            "since": self.updated_since.to_rfc3339_opts(SecondsFormat::Secs, true),
        })
    }
}

/// Client for a Hasura GraphQL endpoint.
///
/// Holds the HTTP client, endpoint, and admin secret. Point `endpoint` at a
/// wiremock server in tests.
pub struct HasuraClient {
    client: Client,
    endpoint: Url,
    admin_secret: String,
}

impl HasuraClient {
    /// Creates a client for `endpoint` (e.g. `https://hasura.example.com/v1/graphql`).
    ///
    /// # Errors
    ///
    /// - [`HasuraError::InvalidEndpoint`] if `endpoint` is not an absolute
    ///   `http`/`https` URL.
    /// - [`HasuraError::Http`] if the underlying `reqwest::Client` cannot be
    ///   constructed.
    pub fn new(
        endpoint: &str,
        admin_secret: &str,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, HasuraError> {
        let endpoint = Self::parse_endpoint(endpoint)?;
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            client,
            endpoint,
            admin_secret: admin_secret.to_owned(),
        })
    }

    fn parse_endpoint(endpoint: &str) -> Result<Url, HasuraError> {
        let url = Url::parse(endpoint.trim()).map_err(|e| HasuraError::InvalidEndpoint {
            endpoint: endpoint.to_owned(),
            reason: e.to_string(),
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(HasuraError::InvalidEndpoint {
                endpoint: endpoint.to_owned(),
                reason: format!("unsupported scheme \"{}\"", url.scheme()),
            });
        }
        Ok(url)
    }

    /// The endpoint requests are sent to.
    #[must_use]
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Fetches every ad matching `filter` in a single request.
    ///
    /// # Errors
    ///
    /// - [`HasuraError::Http`] on network failure.
    /// - [`HasuraError::UnexpectedStatus`] on a non-2xx response.
    /// - [`HasuraError::Deserialize`] if the body is not a GraphQL response
    ///   with the expected `ads` shape.
    /// - [`HasuraError::Graphql`] if Hasura reports query errors.
    /// - [`HasuraError::MissingData`] if the response carries neither data
    ///   nor errors.
    pub async fn fetch_ads(&self, filter: &AdsFilter) -> Result<Vec<RawAd>, HasuraError> {
        let payload = json!({
            "query": ADS_QUERY,
            "variables": filter.variables(),
        });

        tracing::debug!(
            endpoint = %self.endpoint,
            category_id = %filter.category_id,
            since = %filter.updated_since,
            "querying ads"
        );

        let response = self
            .client
            .post(self.endpoint.clone())
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .header(ADMIN_SECRET_HEADER, &self.admin_secret)
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(HasuraError::UnexpectedStatus {
                status: status.as_u16(),
                url: self.endpoint.to_string(),
            });
        }

        let body = response.text().await?;
        let envelope: GraphqlResponse<AdsData> =
            serde_json::from_str(&body).map_err(|e| HasuraError::Deserialize {
                context: format!("ads query from {}", self.endpoint),
                source: e,
            })?;

        let ads = envelope.into_data()?.ads;
        tracing::info!(count = ads.len(), "fetched ads");
        Ok(ads)
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
