use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// One daily candle as reported by the quote provider.
///
/// The date is kept as the provider's raw string. The evaluator parses it
/// lazily, so a malformed date degrades to "no alert" for that symbol
/// instead of failing the whole fetch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyBar {
    /// Trading date in `YYYY-MM-DD` form.
    pub date: String,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    /// Closing price. Must be strictly positive to be usable.
    pub close: f64,
}

/// Daily series for one symbol, ordered newest bar first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeSeries {
    /// Symbol as reported by the provider. Matched case-insensitively
    /// against the configured limits before evaluation.
    pub symbol: String,
    pub bars: Vec<DailyBar>,
}

/// Direction of a threshold crossing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AlertDirection {
    High,
    Low,
}

impl std::fmt::Display for AlertDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AlertDirection::High => write!(f, "HIGH"),
            AlertDirection::Low => write!(f, "LOW"),
        }
    }
}

/// A threshold crossing detected by the evaluator, with the notification
/// text already rendered. Consumed immediately by the batch runner; nothing
/// outlives the run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlertEvent {
    pub symbol: String,
    pub direction: AlertDirection,
    /// The configured limit that was crossed.
    pub threshold: f64,
    /// The close that triggered the crossing.
    pub close: f64,
    pub currency: String,
    pub subject: String,
    pub body: String,
}

/// How the freshness gate compares the newest bar's date against the
/// evaluation date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum FreshnessMode {
    /// Compare day-of-month only. Historical behavior: a bar from the same
    /// day of a *different* month also passes the gate.
    #[default]
    DayOfMonth,
    /// Compare the full calendar date.
    FullDate,
}

impl FreshnessMode {
    /// Whether a bar dated `bar_date` counts as current for an evaluation
    /// running on `today`.
    pub fn is_fresh(self, bar_date: NaiveDate, today: NaiveDate) -> bool {
        match self {
            FreshnessMode::DayOfMonth => bar_date.day() == today.day(),
            FreshnessMode::FullDate => bar_date == today,
        }
    }
}

impl std::fmt::Display for FreshnessMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FreshnessMode::DayOfMonth => write!(f, "day-of-month"),
            FreshnessMode::FullDate => write!(f, "full-date"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn day_of_month_mode_accepts_same_day_of_other_month() {
        let mode = FreshnessMode::DayOfMonth;
        assert!(mode.is_fresh(date(2026, 7, 2), date(2026, 8, 2)));
        assert!(!mode.is_fresh(date(2026, 8, 1), date(2026, 8, 2)));
    }

    #[test]
    fn full_date_mode_requires_exact_date() {
        let mode = FreshnessMode::FullDate;
        assert!(mode.is_fresh(date(2026, 8, 2), date(2026, 8, 2)));
        assert!(!mode.is_fresh(date(2026, 7, 2), date(2026, 8, 2)));
    }
}
