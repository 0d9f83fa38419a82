use chrono::NaiveDate;
use tracing::debug;

use common::{AlertDirection, AlertEvent, FreshnessMode, SymbolLimits, TimeSeries};

/// Date format used by the provider's daily series keys.
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Decide whether the two most recent closes cross either configured limit.
/// Returns zero, one, or two events.
///
/// Alerts fire only on a transition: today's close beyond a limit that
/// yesterday's close had not passed. A price that stays beyond a limit does
/// not re-alert on every run.
///
/// All missing or invalid data degrades to "no event" — a missed alert beats
/// a false alert from corrupt data. This function never errors and does no
/// I/O.
pub fn evaluate(
    symbol: &str,
    limits: &SymbolLimits,
    series: &TimeSeries,
    today: NaiveDate,
    freshness: FreshnessMode,
) -> Vec<AlertEvent> {
    // A crossing needs two comparison points.
    if series.bars.len() < 2 {
        debug!(%symbol, bars = series.bars.len(), "Not enough bars to evaluate");
        return Vec::new();
    }

    let newest = &series.bars[0];
    let bar_date = match NaiveDate::parse_from_str(&newest.date, DATE_FORMAT) {
        Ok(d) => d,
        Err(e) => {
            debug!(%symbol, date = %newest.date, error = %e, "Unparsable bar date");
            return Vec::new();
        }
    };

    if !freshness.is_fresh(bar_date, today) {
        debug!(%symbol, date = %newest.date, "Newest bar is stale, skipping");
        return Vec::new();
    }

    let today_close = newest.close;
    let yesterday_close = series.bars[1].close;
    if today_close <= 0.0 || yesterday_close <= 0.0 {
        debug!(%symbol, "Missing or non-positive close, skipping");
        return Vec::new();
    }

    let mut events = Vec::new();

    // Yesterday exactly at the limit still counts as "not yet crossed".
    if today_close > limits.high_alert && yesterday_close <= limits.high_alert {
        events.push(render_event(
            symbol,
            AlertDirection::High,
            limits,
            today_close,
        ));
    }

    if today_close < limits.low_alert && yesterday_close >= limits.low_alert {
        events.push(render_event(
            symbol,
            AlertDirection::Low,
            limits,
            today_close,
        ));
    }

    events
}

fn render_event(
    symbol: &str,
    direction: AlertDirection,
    limits: &SymbolLimits,
    close: f64,
) -> AlertEvent {
    let (threshold, subject, body) = match direction {
        AlertDirection::High => (
            limits.high_alert,
            format!("{symbol} - HIGH LIMIT ALERT!"),
            format!(
                "Stock price has exceeded the high limit ({:.2} {}): {:.2} {}",
                limits.high_alert, limits.currency, close, limits.currency
            ),
        ),
        AlertDirection::Low => (
            limits.low_alert,
            format!("{symbol} - LOW LIMIT ALERT!"),
            format!(
                "Stock price has dropped below the low limit ({:.2} {}): {:.2} {}",
                limits.low_alert, limits.currency, close, limits.currency
            ),
        ),
    };

    AlertEvent {
        symbol: symbol.to_string(),
        direction,
        threshold,
        close,
        currency: limits.currency.clone(),
        subject,
        body,
    }
}
