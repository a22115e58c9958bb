use serde::{Deserialize, Serialize};
use serde_json::Value;

// ---------------------------------------------------------------------------
// Persisted snapshot types
// ---------------------------------------------------------------------------

/// The reduced instrument payload persisted as a correlation record.
///
/// The provider's coin detail response is verbose; only this subset is kept.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstrumentSnapshot {
    pub id: String,
    pub name: String,
    pub genesis_date: Option<String>,
    pub sentiment_votes_up_percentage: Option<f64>,
    pub sentiment_votes_down_percentage: Option<f64>,
    pub watchlist_portfolio_users: Option<i64>,
    pub market_cap_rank: Option<i64>,
    pub market_data: MarketData,
    pub developer_data: DeveloperData,
    /// Trust score of the first listed ticker, when any ticker exists.
    pub trust_score: Option<String>,
    pub bid_ask_spread_percentage: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MarketData {
    pub current_price_usd: Option<f64>,
    pub high_24h_usd: Option<f64>,
    pub low_24h_usd: Option<f64>,
    pub price_change_24h_usd: Option<f64>,
    pub price_change_percentage_24h_usd: Option<f64>,
    pub market_cap_usd: Option<f64>,
    pub total_volume_usd: Option<f64>,
    pub total_supply: Option<f64>,
    pub max_supply: Option<f64>,
    pub circulating_supply: Option<f64>,
    pub last_updated: Option<String>,
    pub ath_change_percentage_usd: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeveloperData {
    pub forks: Option<i64>,
    pub stars: Option<i64>,
    pub subscribers: Option<i64>,
    pub total_issues: Option<i64>,
    pub closed_issues: Option<i64>,
    pub pull_requests_merged: Option<i64>,
    pub pull_request_contributors: Option<i64>,
}

/// Bulk market state captured once per run: the top market-cap page plus the
/// provider's trending list, both persisted verbatim.
#[derive(Debug, Clone)]
pub struct MarketOverview {
    pub markets: Value,
    pub trending: Value,
}

// ---------------------------------------------------------------------------
// Wire types (provider response shapes)
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub(crate) struct CoinListEntry {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct WireUsd {
    #[serde(default)]
    pub usd: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct WireMarketData {
    #[serde(default)]
    pub current_price: WireUsd,
    #[serde(default)]
    pub high_24h: WireUsd,
    #[serde(default)]
    pub low_24h: WireUsd,
    #[serde(default)]
    pub price_change_24h_in_currency: WireUsd,
    #[serde(default)]
    pub price_change_percentage_24h_in_currency: WireUsd,
    #[serde(default)]
    pub market_cap: WireUsd,
    #[serde(default)]
    pub total_volume: WireUsd,
    #[serde(default)]
    pub total_supply: Option<f64>,
    #[serde(default)]
    pub max_supply: Option<f64>,
    #[serde(default)]
    pub circulating_supply: Option<f64>,
    #[serde(default)]
    pub last_updated: Option<String>,
    #[serde(default)]
    pub ath_change_percentage: WireUsd,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct WireDeveloperData {
    #[serde(default)]
    pub forks: Option<i64>,
    #[serde(default)]
    pub stars: Option<i64>,
    #[serde(default)]
    pub subscribers: Option<i64>,
    #[serde(default)]
    pub total_issues: Option<i64>,
    #[serde(default)]
    pub closed_issues: Option<i64>,
    #[serde(default)]
    pub pull_requests_merged: Option<i64>,
    #[serde(default)]
    pub pull_request_contributors: Option<i64>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct WireTicker {
    #[serde(default)]
    pub trust_score: Option<String>,
    #[serde(default)]
    pub bid_ask_spread_percentage: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CoinDetail {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub genesis_date: Option<String>,
    #[serde(default)]
    pub sentiment_votes_up_percentage: Option<f64>,
    #[serde(default)]
    pub sentiment_votes_down_percentage: Option<f64>,
    #[serde(default)]
    pub watchlist_portfolio_users: Option<i64>,
    #[serde(default)]
    pub market_cap_rank: Option<i64>,
    #[serde(default)]
    pub market_data: WireMarketData,
    #[serde(default)]
    pub developer_data: WireDeveloperData,
    #[serde(default)]
    pub tickers: Vec<WireTicker>,
}

impl From<CoinDetail> for InstrumentSnapshot {
    fn from(detail: CoinDetail) -> Self {
        let md = detail.market_data;
        let dd = detail.developer_data;
        let first_ticker = detail.tickers.into_iter().next();

        Self {
            id: detail.id,
            name: detail.name,
            genesis_date: detail.genesis_date,
            sentiment_votes_up_percentage: detail.sentiment_votes_up_percentage,
            sentiment_votes_down_percentage: detail.sentiment_votes_down_percentage,
            watchlist_portfolio_users: detail.watchlist_portfolio_users,
            market_cap_rank: detail.market_cap_rank,
            market_data: MarketData {
                current_price_usd: md.current_price.usd,
                high_24h_usd: md.high_24h.usd,
                low_24h_usd: md.low_24h.usd,
                price_change_24h_usd: md.price_change_24h_in_currency.usd,
                price_change_percentage_24h_usd: md.price_change_percentage_24h_in_currency.usd,
                market_cap_usd: md.market_cap.usd,
                total_volume_usd: md.total_volume.usd,
                total_supply: md.total_supply,
                max_supply: md.max_supply,
                circulating_supply: md.circulating_supply,
                last_updated: md.last_updated,
                ath_change_percentage_usd: md.ath_change_percentage.usd,
            },
            developer_data: DeveloperData {
                forks: dd.forks,
                stars: dd.stars,
                subscribers: dd.subscribers,
                total_issues: dd.total_issues,
                closed_issues: dd.closed_issues,
                pull_requests_merged: dd.pull_requests_merged,
                pull_request_contributors: dd.pull_request_contributors,
            },
            trust_score: first_ticker.as_ref().and_then(|t| t.trust_score.clone()),
            bid_ask_spread_percentage: first_ticker.and_then(|t| t.bid_ask_spread_percentage),
        }
    }
}
