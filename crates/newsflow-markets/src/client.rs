use std::time::Duration;

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use reqwest::{Client, Url};

use crate::error::MarketsError;
use crate::retry::retry_fixed;
use crate::types::{CoinDetail, CoinListEntry, InstrumentSnapshot, MarketOverview};

const DEFAULT_BASE_URL: &str = "https://api.coingecko.com/";

/// Path-segment encoding: everything except alphanumerics and the RFC 3986
/// unreserved characters. Coin ids are routinely hyphenated and must reach
/// the provider as literal path text.
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Fixed-wait retry policy applied to every provider request.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    /// Total attempts per request, including the first.
    pub max_attempts: u32,
    /// Wait between attempts.
    pub wait: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            wait: Duration::from_secs(60),
        }
    }
}

/// Client for the instrument data provider.
///
/// Use [`MarketsClient::new`] for production or
/// [`MarketsClient::with_base_url`] to point at a mock server in tests.
pub struct MarketsClient {
    client: Client,
    base_url: Url,
    api_key: Option<String>,
    retry: RetryPolicy,
    /// Politeness delay between successive per-coin detail fetches within
    /// one lookup. Zero disables it (tests).
    detail_delay: Duration,
}

impl MarketsClient {
    /// Creates a client pointed at the production provider.
    ///
    /// # Errors
    ///
    /// Returns [`MarketsError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(
        api_key: Option<&str>,
        timeout_secs: u64,
        retry: RetryPolicy,
        detail_delay: Duration,
    ) -> Result<Self, MarketsError> {
        Self::with_base_url(api_key, timeout_secs, retry, detail_delay, DEFAULT_BASE_URL)
    }

    /// Creates a client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`MarketsError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`MarketsError::ApiError`] if `base_url`
    /// is not a valid URL.
    pub fn with_base_url(
        api_key: Option<&str>,
        timeout_secs: u64,
        retry: RetryPolicy,
        detail_delay: Duration,
        base_url: &str,
    ) -> Result<Self, MarketsError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("newsflow/0.1 (market-correlation)")
            .build()?;

        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised)
            .map_err(|e| MarketsError::ApiError(format!("invalid base URL '{base_url}': {e}")))?;

        Ok(Self {
            client,
            base_url,
            api_key: api_key.map(str::to_owned),
            retry,
            detail_delay,
        })
    }

    /// Looks up every instrument matching `term` and returns its snapshot.
    ///
    /// The term is matched case-insensitively as a substring of the
    /// provider's coin ids and names. Zero matches yields an empty vec, not
    /// an error. Each underlying HTTP request is retried per the configured
    /// [`RetryPolicy`].
    ///
    /// # Errors
    ///
    /// - [`MarketsError::Http`] on network failure or non-2xx HTTP status
    ///   after retries are exhausted.
    /// - [`MarketsError::Deserialize`] if a response does not match the
    ///   expected shape.
    pub async fn lookup(&self, term: &str) -> Result<Vec<InstrumentSnapshot>, MarketsError> {
        let coins = self.coin_list().await?;

        let term_lower = term.to_lowercase();
        let matching: Vec<CoinListEntry> = coins
            .into_iter()
            .filter(|c| {
                c.id.to_lowercase().contains(&term_lower)
                    || c.name.to_lowercase().contains(&term_lower)
            })
            .collect();

        if matching.is_empty() {
            tracing::info!(term, "no matching instruments");
            return Ok(Vec::new());
        }

        let mut snapshots = Vec::with_capacity(matching.len());
        for (i, coin) in matching.iter().enumerate() {
            if i > 0 && !self.detail_delay.is_zero() {
                tokio::time::sleep(self.detail_delay).await;
            }
            let detail = self.coin_detail(&coin.id).await?;
            snapshots.push(InstrumentSnapshot::from(detail));
        }

        tracing::debug!(term, count = snapshots.len(), "instrument lookup complete");
        Ok(snapshots)
    }

    /// Fetches the bulk market state: the top page of coins by market cap
    /// plus the provider's trending list. Both payloads are returned
    /// verbatim for persistence.
    ///
    /// # Errors
    ///
    /// Returns [`MarketsError::Http`] on network failure or non-2xx HTTP
    /// status after retries are exhausted.
    pub async fn market_overview(&self) -> Result<MarketOverview, MarketsError> {
        let mut markets_url = self.build_url("api/v3/coins/markets")?;
        markets_url
            .query_pairs_mut()
            .append_pair("vs_currency", "usd")
            .append_pair("order", "market_cap_desc")
            .append_pair("per_page", "20")
            .append_pair("page", "1")
            .append_pair("sparkline", "false");
        let markets = retry_fixed(self.retry.max_attempts, self.retry.wait, || {
            self.request_json(markets_url.clone())
        })
        .await?;

        let trending_url = self.build_url("api/v3/search/trending")?;
        let trending = retry_fixed(self.retry.max_attempts, self.retry.wait, || {
            self.request_json(trending_url.clone())
        })
        .await?;

        tracing::debug!("market overview fetch complete");
        Ok(MarketOverview { markets, trending })
    }

    async fn coin_list(&self) -> Result<Vec<CoinListEntry>, MarketsError> {
        let url = self.build_url("api/v3/coins/list")?;
        let body = retry_fixed(self.retry.max_attempts, self.retry.wait, || {
            self.request_json(url.clone())
        })
        .await?;

        serde_json::from_value(body).map_err(|e| MarketsError::Deserialize {
            context: "coins/list".to_owned(),
            source: e,
        })
    }

    async fn coin_detail(&self, coin_id: &str) -> Result<CoinDetail, MarketsError> {
        let encoded = utf8_percent_encode(coin_id, PATH_SEGMENT).to_string();
        let url = self.build_url(&format!("api/v3/coins/{encoded}"))?;
        let body = retry_fixed(self.retry.max_attempts, self.retry.wait, || {
            self.request_json(url.clone())
        })
        .await?;

        serde_json::from_value(body).map_err(|e| MarketsError::Deserialize {
            context: format!("coins/{coin_id}"),
            source: e,
        })
    }

    fn build_url(&self, path: &str) -> Result<Url, MarketsError> {
        let mut url = self
            .base_url
            .join(path)
            .map_err(|e| MarketsError::ApiError(format!("invalid path '{path}': {e}")))?;
        if let Some(key) = &self.api_key {
            url.query_pairs_mut().append_pair("x_cg_demo_api_key", key);
        }
        Ok(url)
    }

    async fn request_json(&self, url: Url) -> Result<serde_json::Value, MarketsError> {
        let body = self
            .client
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .json::<serde_json::Value>()
            .await?;
        Ok(body)
    }
}
