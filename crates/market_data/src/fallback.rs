use std::collections::HashMap;

use chrono::Utc;
use common::{
    Asset,
    models::{Quote, QuoteSource},
};
use rand::Rng;

const PRICE_JITTER: f64 = 0.02;
const CHANGE_RANGE: f64 = 5.0;

/// Synthesizes plausible quotes around the fixed base price of each symbol.
/// Every call draws a fresh sample, even for the same symbol.
#[derive(Debug, Clone, Copy, Default)]
pub struct FallbackQuoteGenerator;

impl FallbackQuoteGenerator {
    pub fn base_price(&self, symbol: &str) -> f64 {
        common::assets::base_price(symbol)
    }

    pub fn fallback<R: Rng + ?Sized>(&self, symbol: &str, rng: &mut R) -> Quote {
        let base = self.base_price(symbol);

        Quote {
            symbol: symbol.to_string(),
            price: base * (1.0 + rng.gen_range(-PRICE_JITTER..=PRICE_JITTER)),
            change_24h: rng.gen_range(-CHANGE_RANGE..=CHANGE_RANGE),
            volume: 0.0,
            last_updated: Utc::now(),
            source: QuoteSource::Fallback,
        }
    }

    pub fn fallback_batch<R: Rng + ?Sized>(
        &self,
        assets: &[Asset],
        rng: &mut R,
    ) -> HashMap<String, Quote> {
        assets
            .iter()
            .map(|a| (a.symbol.to_string(), self.fallback(a.symbol, rng)))
            .collect()
    }
}
