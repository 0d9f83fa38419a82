use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Per-symbol alert thresholds.
///
/// `low_alert < high_alert` is assumed but not enforced; an inverted pair is
/// the operator's problem, not a startup error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SymbolLimits {
    pub high_alert: f64,
    pub low_alert: f64,
    #[serde(default = "default_currency")]
    pub currency: String,
}

fn default_currency() -> String {
    "USD".to_string()
}

/// The limits file: uppercase symbol -> thresholds.
///
/// Example `configuration/limits.json`:
/// ```json
/// {
///   "AAPL": { "high_alert": 230.0, "low_alert": 180.0 },
///   "NVDA": { "high_alert": 150.0, "low_alert": 95.0, "currency": "USD" }
/// }
/// ```
///
/// A `BTreeMap` keeps iteration deterministic: symbols are processed one at
/// a time in sorted order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LimitsConfig {
    symbols: BTreeMap<String, SymbolLimits>,
}

impl LimitsConfig {
    /// Load from a JSON file. Panics on a missing file or malformed JSON —
    /// a broken limits file must abort before any network activity.
    pub fn load(path: &str) -> Self {
        let content = std::fs::read_to_string(path)
            .unwrap_or_else(|e| panic!("Failed to read limits config at '{path}': {e}"));
        serde_json::from_str(&content)
            .unwrap_or_else(|e| panic!("Failed to parse limits config at '{path}': {e}"))
    }

    pub fn from_entries(entries: impl IntoIterator<Item = (String, SymbolLimits)>) -> Self {
        Self {
            symbols: entries.into_iter().collect(),
        }
    }

    /// Resolve a provider-reported symbol to its configured limits.
    /// Matching is case-insensitive; config keys are uppercase.
    pub fn resolve(&self, provider_symbol: &str) -> Option<(&str, &SymbolLimits)> {
        let key = provider_symbol.to_uppercase();
        self.symbols
            .get_key_value(key.as_str())
            .map(|(k, v)| (k.as_str(), v))
    }

    /// Configured symbols in processing order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &SymbolLimits)> {
        self.symbols.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}
