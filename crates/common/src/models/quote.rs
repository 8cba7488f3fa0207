use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuoteSource {
    Live,
    Fallback,
}

/// Raw per-coin payload as returned by the price API.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceTick {
    pub price: f64,
    pub change_24h: f64,
    pub volume: Option<f64>,
    /// Unix seconds.
    pub last_updated: Option<i64>,
}

/// Latest market state for one symbol. Replaced wholesale on cache refresh.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    pub symbol: String,
    pub price: f64,
    /// Percent.
    pub change_24h: f64,
    pub volume: f64,
    pub last_updated: DateTime<Utc>,
    pub source: QuoteSource,
}

impl Quote {
    /// Builds a live quote, or `None` when the tick carries no usable price.
    pub fn from_tick(symbol: &str, tick: &PriceTick) -> Option<Self> {
        if !tick.price.is_finite() || tick.price <= 0.0 {
            return None;
        }

        let change_24h = if tick.change_24h.is_finite() {
            tick.change_24h
        } else {
            0.0
        };

        let volume = tick
            .volume
            .filter(|v| v.is_finite() && *v >= 0.0)
            .unwrap_or(0.0);

        let last_updated = tick
            .last_updated
            .filter(|secs| *secs > 0)
            .and_then(|secs| DateTime::from_timestamp(secs, 0))
            .unwrap_or_else(Utc::now);

        Some(Self {
            symbol: symbol.to_string(),
            price: tick.price,
            change_24h,
            volume,
            last_updated,
            source: QuoteSource::Live,
        })
    }

    pub fn is_fallback(&self) -> bool {
        self.source == QuoteSource::Fallback
    }
}
