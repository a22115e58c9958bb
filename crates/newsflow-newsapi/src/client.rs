use std::time::Duration;

use reqwest::{Client, Url};

use crate::error::NewsApiError;
use crate::types::{Article, EverythingResponse};

const DEFAULT_BASE_URL: &str = "https://newsapi.org/";

/// Client for NewsAPI's `everything` search endpoint.
///
/// Use [`NewsApiClient::new`] for production or
/// [`NewsApiClient::with_base_url`] to point at a mock server in tests.
pub struct NewsApiClient {
    client: Client,
    api_key: String,
    base_url: Url,
}

impl NewsApiClient {
    /// Creates a new client pointed at the production NewsAPI endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`NewsApiError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(api_key: &str, timeout_secs: u64, user_agent: &str) -> Result<Self, NewsApiError> {
        Self::with_base_url(api_key, timeout_secs, user_agent, DEFAULT_BASE_URL)
    }

    /// Creates a new client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`NewsApiError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`NewsApiError::ApiError`] if `base_url`
    /// is not a valid URL.
    pub fn with_base_url(
        api_key: &str,
        timeout_secs: u64,
        user_agent: &str,
        base_url: &str,
    ) -> Result<Self, NewsApiError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| NewsApiError::ApiError {
            code: "invalid_base_url".to_owned(),
            message: format!("'{base_url}': {e}"),
        })?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            base_url,
        })
    }

    /// Searches `/v2/everything` sorted by popularity.
    ///
    /// `from` optionally restricts results to articles published on or after
    /// the given `YYYY-MM-DD` date.
    ///
    /// # Errors
    ///
    /// - [`NewsApiError::ApiError`] if the API returns an error envelope.
    /// - [`NewsApiError::Http`] on network failure or non-2xx HTTP status.
    /// - [`NewsApiError::Deserialize`] if the response does not match the
    ///   expected shape.
    pub async fn everything(
        &self,
        query: &str,
        from: Option<&str>,
    ) -> Result<Vec<Article>, NewsApiError> {
        let mut url = self
            .base_url
            .join("v2/everything")
            .map_err(|e| NewsApiError::ApiError {
                code: "invalid_url".to_owned(),
                message: e.to_string(),
            })?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("q", query);
            if let Some(from) = from {
                pairs.append_pair("from", from);
            }
            pairs.append_pair("sortBy", "popularity");
            pairs.append_pair("apiKey", &self.api_key);
        }

        let body = self
            .client
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .json::<serde_json::Value>()
            .await?;

        let envelope: EverythingResponse =
            serde_json::from_value(body).map_err(|e| NewsApiError::Deserialize {
                context: format!("everything(q={query})"),
                source: e,
            })?;

        if envelope.status != "ok" {
            return Err(NewsApiError::ApiError {
                code: envelope.code.unwrap_or_else(|| "unknown".to_owned()),
                message: envelope.message.unwrap_or_default(),
            });
        }

        tracing::debug!(
            query,
            total_results = envelope.total_results.unwrap_or(0),
            returned = envelope.articles.len(),
            "NewsAPI everything fetch complete"
        );

        Ok(envelope.articles)
    }
}
