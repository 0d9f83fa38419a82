use std::collections::BTreeMap;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use common::{DailyBar, Error, Result, TimeSeries};

use crate::QuoteSource;

const BASE_URL: &str = "https://www.alphavantage.co";

/// REST client for the Alpha Vantage TIME_SERIES_DAILY endpoint.
/// One unauthenticated GET per symbol; the API key rides in the query string.
pub struct AlphaVantageClient {
    api_key: String,
    base_url: String,
    http: Client,
}

impl AlphaVantageClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_base_url(api_key, BASE_URL)
    }

    /// Point the client at a different host. Used by tests.
    pub fn with_base_url(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: base_url.into(),
            http: Client::builder()
                .use_rustls_tls()
                .build()
                .expect("Failed to build HTTP client"),
        }
    }
}

#[async_trait]
impl QuoteSource for AlphaVantageClient {
    async fn fetch_daily(&self, symbol: &str) -> Result<TimeSeries> {
        let url = format!(
            "{}/query?function=TIME_SERIES_DAILY&symbol={}&apikey={}",
            self.base_url, symbol, self.api_key
        );

        debug!(%symbol, "Requesting daily series");
        let resp = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| Error::Http(e.to_string()))?;

        let status = resp.status();
        let body = resp.text().await.map_err(|e| Error::Http(e.to_string()))?;
        if !status.is_success() {
            return Err(Error::Provider(format!("HTTP {status}: {body}")));
        }

        parse_daily_response(&body)
    }
}

/// Map a raw Alpha Vantage body onto a newest-first `TimeSeries`.
///
/// Rate limits and invalid API keys come back as 200 OK with a "Note" or
/// "Error Message" field instead of a series; both count as per-symbol
/// unavailability.
fn parse_daily_response(body: &str) -> Result<TimeSeries> {
    let resp: DailyResponse = serde_json::from_str(body)?;

    let series = match resp.series {
        Some(series) => series,
        None => {
            let detail = resp
                .error_message
                .or(resp.note)
                .or(resp.information)
                .unwrap_or_else(|| "response contained no time series".to_string());
            return Err(Error::Provider(detail));
        }
    };

    let symbol = resp
        .meta
        .map(|m| m.symbol)
        .ok_or_else(|| Error::Provider("response contained no metadata".to_string()))?;

    // ISO dates sort lexicographically, so descending key order is
    // reverse-chronological: newest bar first.
    let bars = series
        .into_iter()
        .rev()
        .map(|(date, raw)| DailyBar {
            date,
            open: parse_price(&raw.open),
            high: parse_price(&raw.high),
            low: parse_price(&raw.low),
            close: parse_price(&raw.close),
        })
        .collect();

    Ok(TimeSeries { symbol, bars })
}

/// Provider prices are strings. Unparsable values become 0.0, which the
/// evaluator treats as unusable.
fn parse_price(raw: &str) -> f64 {
    raw.parse().unwrap_or(0.0)
}

// ─── Response types ───────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct DailyResponse {
    #[serde(rename = "Meta Data")]
    meta: Option<MetaData>,
    #[serde(rename = "Time Series (Daily)")]
    series: Option<BTreeMap<String, RawBar>>,
    #[serde(rename = "Error Message")]
    error_message: Option<String>,
    #[serde(rename = "Note")]
    note: Option<String>,
    #[serde(rename = "Information")]
    information: Option<String>,
}

#[derive(Deserialize)]
struct MetaData {
    #[serde(rename = "2. Symbol")]
    symbol: String,
}

#[derive(Deserialize)]
struct RawBar {
    #[serde(rename = "1. open")]
    open: String,
    #[serde(rename = "2. high")]
    high: String,
    #[serde(rename = "3. low")]
    low: String,
    #[serde(rename = "4. close")]
    close: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    const DAILY_BODY: &str = r#"{
        "Meta Data": {
            "1. Information": "Daily Prices (open, high, low, close) and Volumes",
            "2. Symbol": "IBM",
            "3. Last Refreshed": "2026-08-28",
            "4. Output Size": "Compact",
            "5. Time Zone": "US/Eastern"
        },
        "Time Series (Daily)": {
            "2026-08-27": {
                "1. open": "241.10",
                "2. high": "244.00",
                "3. low": "240.55",
                "4. close": "242.90",
                "5. volume": "3220154"
            },
            "2026-08-28": {
                "1. open": "243.00",
                "2. high": "248.20",
                "3. low": "242.80",
                "4. close": "247.15",
                "5. volume": "4105733"
            }
        }
    }"#;

    #[test]
    fn maps_daily_body_newest_first() {
        let series = parse_daily_response(DAILY_BODY).unwrap();
        assert_eq!(series.symbol, "IBM");
        assert_eq!(series.bars.len(), 2);
        assert_eq!(series.bars[0].date, "2026-08-28");
        assert_eq!(series.bars[0].close, 247.15);
        assert_eq!(series.bars[1].date, "2026-08-27");
        assert_eq!(series.bars[1].close, 242.90);
    }

    #[test]
    fn rate_limit_note_is_provider_error() {
        let body = r#"{ "Note": "Thank you for using Alpha Vantage! Our standard API rate limit is 25 requests per day." }"#;
        let err = parse_daily_response(body).unwrap_err();
        assert!(matches!(err, Error::Provider(ref msg) if msg.contains("rate limit")));
    }

    #[test]
    fn error_message_is_provider_error() {
        let body = r#"{ "Error Message": "Invalid API call." }"#;
        let err = parse_daily_response(body).unwrap_err();
        assert!(matches!(err, Error::Provider(ref msg) if msg.contains("Invalid API call")));
    }

    #[test]
    fn missing_series_without_detail_is_provider_error() {
        let err = parse_daily_response("{}").unwrap_err();
        assert!(matches!(err, Error::Provider(_)));
    }

    #[test]
    fn non_json_body_is_json_error() {
        let err = parse_daily_response("<html>backend error</html>").unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }

    #[test]
    fn unparsable_close_becomes_zero() {
        let body = r#"{
            "Meta Data": { "2. Symbol": "IBM" },
            "Time Series (Daily)": {
                "2026-08-28": {
                    "1. open": "243.00",
                    "2. high": "248.20",
                    "3. low": "242.80",
                    "4. close": "n/a"
                }
            }
        }"#;
        let series = parse_daily_response(body).unwrap();
        assert_eq!(series.bars[0].close, 0.0);
    }
}
