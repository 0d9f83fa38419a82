pub mod alpha_vantage;

pub use alpha_vantage::AlphaVantageClient;

use async_trait::async_trait;
use common::{Result, TimeSeries};

/// Abstraction over the daily-quote provider.
///
/// `AlphaVantageClient` implements this for production; tests substitute
/// canned implementations. A failed fetch is per-symbol only — the batch
/// runner logs it and moves on to the next symbol.
#[async_trait]
pub trait QuoteSource: Send + Sync {
    /// Fetch the daily time series for one symbol, newest bar first.
    async fn fetch_daily(&self, symbol: &str) -> Result<TimeSeries>;
}
