//! HTTP client for a CoinGecko-style instrument data provider.
//!
//! A lookup resolves a query term against the provider's full coin list,
//! then fetches per-coin detail for every candidate and reduces the verbose
//! payload to the [`InstrumentSnapshot`] subset that gets persisted.
//! Transient failures are retried with a fixed inter-attempt wait, and
//! successive detail fetches are paced to stay inside the provider's rate
//! limits.

mod client;
mod error;
mod retry;
mod types;

pub use client::{MarketsClient, RetryPolicy};
pub use error::MarketsError;
pub use types::{DeveloperData, InstrumentSnapshot, MarketData, MarketOverview};
