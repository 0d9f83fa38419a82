use chrono::NaiveDate;
use proptest::prelude::*;

use alerts::evaluate;
use common::{AlertDirection, DailyBar, FreshnessMode, SymbolLimits, TimeSeries};

fn bar(date: &str, close: f64) -> DailyBar {
    DailyBar {
        date: date.to_string(),
        open: close,
        high: close,
        low: close,
        close,
    }
}

fn eval_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 8, 28).unwrap()
}

proptest! {
    /// Crossing evaluation on arbitrary finite inputs must never panic,
    /// never emits more than two events, and every emitted event satisfies
    /// its own crossing rule.
    #[test]
    fn evaluate_never_panics_and_events_satisfy_rules(
        today_close in -1_000.0f64..1_000_000.0,
        yesterday_close in -1_000.0f64..1_000_000.0,
        high in 0.0001f64..1_000_000.0,
        low in 0.0001f64..1_000_000.0,
    ) {
        let limits = SymbolLimits {
            high_alert: high,
            low_alert: low,
            currency: "USD".to_string(),
        };
        let series = TimeSeries {
            symbol: "TEST".to_string(),
            bars: vec![
                bar("2026-08-28", today_close),
                bar("2026-08-27", yesterday_close),
            ],
        };

        let events = evaluate("TEST", &limits, &series, eval_date(), FreshnessMode::DayOfMonth);
        prop_assert!(events.len() <= 2);

        for ev in &events {
            match ev.direction {
                AlertDirection::High => {
                    prop_assert_eq!(ev.threshold, high);
                    prop_assert!(ev.close > high);
                    prop_assert!(yesterday_close <= high);
                }
                AlertDirection::Low => {
                    prop_assert_eq!(ev.threshold, low);
                    prop_assert!(ev.close < low);
                    prop_assert!(yesterday_close >= low);
                }
            }
            prop_assert_eq!(ev.close, today_close);
        }
    }

    /// A series whose newest bar is from a different day of the month never
    /// produces an event, whatever the prices are.
    #[test]
    fn stale_series_never_emits(
        today_close in 0.01f64..1_000_000.0,
        yesterday_close in 0.01f64..1_000_000.0,
    ) {
        let limits = SymbolLimits {
            high_alert: 100.0,
            low_alert: 50.0,
            currency: "USD".to_string(),
        };
        // Newest bar dated the 27th, evaluated on the 28th.
        let series = TimeSeries {
            symbol: "TEST".to_string(),
            bars: vec![
                bar("2026-08-27", today_close),
                bar("2026-08-26", yesterday_close),
            ],
        };

        let events = evaluate("TEST", &limits, &series, eval_date(), FreshnessMode::DayOfMonth);
        prop_assert!(events.is_empty());
    }

    /// Rendered text always carries the configured currency label verbatim.
    #[test]
    fn rendered_body_carries_currency(
        currency in "[A-Z]{3}",
    ) {
        let limits = SymbolLimits {
            high_alert: 100.0,
            low_alert: 50.0,
            currency: currency.clone(),
        };
        let series = TimeSeries {
            symbol: "TEST".to_string(),
            bars: vec![bar("2026-08-28", 105.0), bar("2026-08-27", 95.0)],
        };

        let events = evaluate("TEST", &limits, &series, eval_date(), FreshnessMode::DayOfMonth);
        prop_assert_eq!(events.len(), 1);
        prop_assert!(events[0].body.contains(&currency));
    }
}
