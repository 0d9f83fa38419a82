use chrono::NaiveDate;
use tracing::{debug, info, warn};

use common::{FreshnessMode, LimitsConfig};
use notify::Notifier;
use quotes::QuoteSource;

use crate::evaluate;

/// Outcome counters for one batch run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    /// Symbols that made it through fetch and evaluation.
    pub symbols_processed: usize,
    /// Symbols skipped because the quote fetch failed.
    pub symbols_failed: usize,
    /// Alerts the notifier delivered.
    pub alerts_sent: usize,
    /// Alerts the notifier failed to deliver.
    pub sends_failed: usize,
}

impl BatchSummary {
    /// Whether anything went wrong that the exit code should surface.
    pub fn has_failures(&self) -> bool {
        self.symbols_failed > 0 || self.sends_failed > 0
    }
}

/// Drives one batch: fetch, evaluate, and notify each configured symbol,
/// strictly one at a time in configuration order.
///
/// Every symbol's outcome is independent. A failed fetch or a failed send is
/// logged and counted but never short-circuits the rest of the batch.
pub struct BatchRunner<'a> {
    source: &'a dyn QuoteSource,
    notifier: &'a dyn Notifier,
    limits: &'a LimitsConfig,
    recipient: &'a str,
    freshness: FreshnessMode,
}

impl<'a> BatchRunner<'a> {
    pub fn new(
        source: &'a dyn QuoteSource,
        notifier: &'a dyn Notifier,
        limits: &'a LimitsConfig,
        recipient: &'a str,
        freshness: FreshnessMode,
    ) -> Self {
        Self {
            source,
            notifier,
            limits,
            recipient,
            freshness,
        }
    }

    pub async fn run(&self, today: NaiveDate) -> BatchSummary {
        let mut summary = BatchSummary::default();
        info!(symbols = self.limits.len(), "Starting batch run");

        for (symbol, _) in self.limits.iter() {
            let series = match self.source.fetch_daily(symbol).await {
                Ok(series) => series,
                Err(e) => {
                    warn!(%symbol, error = %e, "Quote fetch failed, skipping symbol");
                    summary.symbols_failed += 1;
                    continue;
                }
            };

            // The provider-reported symbol decides which limits apply. A
            // symbol the config no longer knows is skipped, not an error —
            // provider and config may drift.
            let Some((key, limits)) = self.limits.resolve(&series.symbol) else {
                debug!(provider_symbol = %series.symbol, "No configured limits for provider symbol");
                summary.symbols_processed += 1;
                continue;
            };

            let events = evaluate(key, limits, &series, today, self.freshness);
            summary.symbols_processed += 1;

            for event in events {
                match self
                    .notifier
                    .send(&event.subject, &event.body, self.recipient)
                    .await
                {
                    Ok(()) => {
                        info!(
                            symbol = %event.symbol,
                            direction = %event.direction,
                            close = event.close,
                            "Alert sent"
                        );
                        summary.alerts_sent += 1;
                    }
                    Err(e) => {
                        warn!(symbol = %event.symbol, error = %e, "Alert delivery failed");
                        summary.sends_failed += 1;
                    }
                }
            }
        }

        info!(
            processed = summary.symbols_processed,
            failed = summary.symbols_failed,
            sent = summary.alerts_sent,
            send_failures = summary.sends_failed,
            "Batch run complete"
        );
        summary
    }
}
