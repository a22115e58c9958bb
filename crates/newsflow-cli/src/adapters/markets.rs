//! Market-data provider adapter.

use newsflow_markets::MarketsClient;
use newsflow_pipeline::{Instrument, InstrumentProvider, MarketOverview, ProviderError};

pub struct MarketsProvider {
    client: MarketsClient,
}

impl MarketsProvider {
    pub fn new(client: MarketsClient) -> Self {
        Self { client }
    }
}

impl InstrumentProvider for MarketsProvider {
    fn lookup(
        &self,
        term: &str,
    ) -> impl std::future::Future<Output = Result<Vec<Instrument>, ProviderError>> + Send {
        async move {
            let snapshots = self
                .client
                .lookup(term)
                .await
                .map_err(|e| ProviderError(e.to_string()))?;

            let mut instruments = Vec::with_capacity(snapshots.len());
            for snapshot in snapshots {
                let payload = serde_json::to_value(&snapshot)
                    .map_err(|e| ProviderError(format!("snapshot for '{}': {e}", snapshot.id)))?;
                instruments.push(Instrument {
                    id: snapshot.id,
                    snapshot: payload,
                });
            }
            Ok(instruments)
        }
    }

    fn market_overview(
        &self,
    ) -> impl std::future::Future<Output = Result<MarketOverview, ProviderError>> + Send {
        async move {
            let overview = self
                .client
                .market_overview()
                .await
                .map_err(|e| ProviderError(e.to_string()))?;
            Ok(MarketOverview {
                markets: overview.markets,
                trending: overview.trending,
            })
        }
    }
}
