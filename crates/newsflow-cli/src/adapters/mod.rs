//! Concrete implementations of the pipeline's collaborator traits.

mod ledger;
mod markets;
mod newsapi;

pub use ledger::PgLedger;
pub use markets::MarketsProvider;
pub use newsapi::NewsApiSource;
