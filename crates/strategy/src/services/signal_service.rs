use std::sync::{Arc, Mutex, PoisonError};

use chrono::Utc;
use common::{
    TRACKED_ASSETS,
    models::{
        IndicatorBundle, PositionTier, Quote, QuoteSource, SignalClass, SignalRecord, Targets,
        round_to,
    },
};
use market_data::{MarketDataFetcher, QuoteCache};
use rand::{SeedableRng, rngs::StdRng};
use thiserror::Error;
use tracing::{debug, error, info};

use crate::{indicators, position, risk, scorer, targets};

#[derive(Debug, Error)]
pub enum SignalError {
    #[error("no quote available for {0}")]
    MissingQuote(String),
    #[error("unusable price {price} for {symbol}")]
    InvalidPrice { symbol: String, price: f64 },
    #[error("non-finite {0} in pipeline output")]
    NonFinite(&'static str),
}

/// Runs the per-asset pipeline on top of a shared quote cache.
pub struct SignalAssembler<F> {
    cache: Arc<QuoteCache<F>>,
    rng: Mutex<StdRng>,
}

impl<F: MarketDataFetcher> SignalAssembler<F> {
    pub fn new(cache: Arc<QuoteCache<F>>) -> Self {
        Self::with_rng(cache, StdRng::from_entropy())
    }

    pub fn with_rng(cache: Arc<QuoteCache<F>>, rng: StdRng) -> Self {
        Self {
            cache,
            rng: Mutex::new(rng),
        }
    }

    pub fn cache(&self) -> &Arc<QuoteCache<F>> {
        &self.cache
    }

    /// Never fails: any problem in the pipeline is logged and answered with
    /// the neutral default record.
    pub async fn generate(&self, symbol: &str) -> SignalRecord {
        let quotes = self.cache.get(&TRACKED_ASSETS).await;

        let result = quotes
            .get(symbol)
            .ok_or_else(|| SignalError::MissingQuote(symbol.to_string()))
            .and_then(|quote| self.assemble(quote));

        match result {
            Ok(record) => record,
            Err(e) => {
                error!("Signal generation failed for {}: {}", symbol, e);
                self.default_record(symbol)
            }
        }
    }

    /// One record per tracked asset, in table order.
    pub async fn generate_all(&self, force_refresh: bool) -> Vec<SignalRecord> {
        if force_refresh {
            self.cache.invalidate().await;
        }

        let mut records = Vec::with_capacity(TRACKED_ASSETS.len());
        for asset in TRACKED_ASSETS.iter() {
            records.push(self.generate(asset.symbol).await);
        }

        let fallback = records.iter().filter(|r| r.fallback).count();
        info!(
            "Generated {} signals ({} from fallback data)",
            records.len(),
            fallback
        );
        records
    }

    pub fn default_record(&self, symbol: &str) -> SignalRecord {
        let price = self.cache.fallback_generator().base_price(symbol);

        SignalRecord {
            symbol: symbol.to_string(),
            price,
            change_24h: 0.0,
            signal_class: SignalClass::Hold,
            confidence: 0.5,
            risk_score: 5,
            position_tier: PositionTier::Medium,
            targets: Targets {
                take_profit: round_to(price * 1.05, 3),
                stop_loss: round_to(price * 0.95, 3),
                risk_reward: 1.0,
            },
            indicators: IndicatorBundle::neutral(),
            source: QuoteSource::Fallback,
            timestamp: Utc::now(),
            fallback: true,
        }
    }

    fn assemble(&self, quote: &Quote) -> Result<SignalRecord, SignalError> {
        if !quote.price.is_finite() || quote.price <= 0.0 {
            return Err(SignalError::InvalidPrice {
                symbol: quote.symbol.clone(),
                price: quote.price,
            });
        }

        let (bundle, risk_score, (class, confidence)) = {
            let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
            let bundle = indicators::derive(quote, &mut *rng);
            let risk_score = risk::score(&bundle);
            let scored = scorer::score(&bundle, risk_score, quote.change_24h, &mut *rng);
            (bundle, risk_score, scored)
        };

        if !confidence.is_finite() {
            return Err(SignalError::NonFinite("confidence"));
        }

        let targets = targets::calculate(quote.price, class, risk_score);
        if ![targets.take_profit, targets.stop_loss, targets.risk_reward]
            .iter()
            .all(|v| v.is_finite())
        {
            return Err(SignalError::NonFinite("targets"));
        }

        debug!(
            "{}: osc={} trend={:?} risk={} -> {} ({:.2})",
            quote.symbol, bundle.oscillator, bundle.trend, risk_score, class, confidence
        );

        Ok(SignalRecord {
            symbol: quote.symbol.clone(),
            price: quote.price,
            change_24h: quote.change_24h,
            signal_class: class,
            confidence,
            risk_score,
            position_tier: position::size(risk_score, confidence),
            targets,
            indicators: bundle,
            source: quote.source,
            timestamp: quote.last_updated,
            fallback: quote.is_fallback(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use common::{FetchError, models::PriceTick};
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    struct StubFetcher {
        calls: AtomicUsize,
        fail: bool,
    }

    impl StubFetcher {
        fn new(fail: bool) -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
                fail,
            })
        }
    }

    #[async_trait]
    impl MarketDataFetcher for StubFetcher {
        async fn fetch(&self, coin_ids: &[String]) -> Result<HashMap<String, PriceTick>, FetchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(FetchError::Http("connection refused".to_string()));
            }

            Ok(coin_ids
                .iter()
                .map(|id| {
                    (
                        id.clone(),
                        PriceTick {
                            price: 10.0,
                            change_24h: 3.0,
                            volume: Some(1_000.0),
                            last_updated: Some(1_700_000_000),
                        },
                    )
                })
                .collect())
        }
    }

    fn assembler(fetcher: Arc<StubFetcher>) -> SignalAssembler<Arc<StubFetcher>> {
        let cache = QuoteCache::with_rng(fetcher, Duration::from_secs(30), StdRng::seed_from_u64(1));
        SignalAssembler::with_rng(Arc::new(cache), StdRng::seed_from_u64(2))
    }

    #[tokio::test]
    async fn live_batch_produces_ordered_valid_records() {
        let fetcher = StubFetcher::new(false);
        let signals = assembler(fetcher.clone());

        let records = signals.generate_all(false).await;

        assert_eq!(fetcher.calls.load(Ordering::SeqCst), 1);
        assert_eq!(records.len(), TRACKED_ASSETS.len());
        for (record, asset) in records.iter().zip(TRACKED_ASSETS.iter()) {
            assert_eq!(record.symbol, asset.symbol);
            assert_eq!(record.price, 10.0);
            assert_eq!(record.source, QuoteSource::Live);
            assert!(!record.fallback);
            assert!((1..=10).contains(&record.risk_score));
            assert!((0.0..=1.0).contains(&record.confidence));
            assert!((0.0..=100.0).contains(&record.indicators.oscillator));
        }
    }

    #[tokio::test]
    async fn live_record_carries_quote_timestamp() {
        let signals = assembler(StubFetcher::new(false));

        let record = signals.generate("BTC").await;

        assert_eq!(record.source, QuoteSource::Live);
        assert_eq!(record.timestamp.timestamp(), 1_700_000_000);
    }

    #[tokio::test]
    async fn failed_fetch_marks_every_record_as_fallback() {
        let signals = assembler(StubFetcher::new(true));

        let records = signals.generate_all(false).await;

        assert_eq!(records.len(), TRACKED_ASSETS.len());
        assert!(records.iter().all(|r| r.fallback && r.source == QuoteSource::Fallback));

        let btc = &records[0];
        assert!((43450.0 * 0.98..=43450.0 * 1.02).contains(&btc.price));
    }

    #[tokio::test]
    async fn unknown_symbol_gets_default_record() {
        let signals = assembler(StubFetcher::new(false));

        let record = signals.generate("XYZ").await;

        assert_eq!(record.price, 100.0);
        assert_eq!(record.signal_class, SignalClass::Hold);
        assert_eq!(record.confidence, 0.5);
        assert_eq!(record.risk_score, 5);
        assert_eq!(record.position_tier, PositionTier::Medium);
        assert_eq!(record.targets.take_profit, 105.0);
        assert_eq!(record.targets.stop_loss, 95.0);
        assert_eq!(record.targets.risk_reward, 1.0);
        assert_eq!(record.indicators, IndicatorBundle::neutral());
        assert!(record.fallback);
    }

    #[tokio::test]
    async fn default_record_uses_known_base_price() {
        let signals = assembler(StubFetcher::new(false));

        let record = signals.default_record("ETH");

        assert_eq!(record.price, 2350.0);
        assert_eq!(record.targets.take_profit, 2467.5);
        assert_eq!(record.targets.stop_loss, 2232.5);
        assert_eq!(record.source, QuoteSource::Fallback);
    }

    #[tokio::test]
    async fn force_refresh_refetches() {
        let fetcher = StubFetcher::new(false);
        let signals = assembler(fetcher.clone());

        signals.generate_all(false).await;
        signals.generate_all(false).await;
        assert_eq!(fetcher.calls.load(Ordering::SeqCst), 1);

        signals.generate_all(true).await;
        assert_eq!(fetcher.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn invalid_price_is_rejected() {
        let signals = assembler(StubFetcher::new(false));
        let quote = Quote {
            symbol: "BTC".to_string(),
            price: f64::NAN,
            change_24h: 0.0,
            volume: 0.0,
            last_updated: Utc::now(),
            source: QuoteSource::Live,
        };

        let err = signals.assemble(&quote).unwrap_err();
        assert!(matches!(err, SignalError::InvalidPrice { .. }));
    }
}
