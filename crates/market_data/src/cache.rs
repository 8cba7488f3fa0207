use std::collections::HashMap;
use std::sync::{Mutex as StdMutex, PoisonError};
use std::time::Duration;

use common::{
    Asset,
    models::{PriceTick, Quote},
};
use rand::{SeedableRng, rngs::StdRng};
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::{debug, error, info};

use crate::fallback::FallbackQuoteGenerator;
use crate::traits::MarketDataFetcher;

struct CacheEntry {
    quotes: HashMap<String, Quote>,
    inserted_at: Instant,
}

/// Holds the latest quote batch for the whole tracked set under a single key.
///
/// The freshness check and the store are separate critical sections: the
/// fetch runs without the lock, so callers that all see an expired entry each
/// perform their own fetch. A failed fetch is answered with a fallback batch
/// that is never stored, so the next call goes back to the live source.
pub struct QuoteCache<F> {
    fetcher: F,
    fallback: FallbackQuoteGenerator,
    ttl: Duration,
    entry: Mutex<Option<CacheEntry>>,
    rng: StdMutex<StdRng>,
}

impl<F: MarketDataFetcher> QuoteCache<F> {
    pub fn new(fetcher: F, ttl: Duration) -> Self {
        Self::with_rng(fetcher, ttl, StdRng::from_entropy())
    }

    pub fn with_rng(fetcher: F, ttl: Duration, rng: StdRng) -> Self {
        Self {
            fetcher,
            fallback: FallbackQuoteGenerator,
            ttl,
            entry: Mutex::new(None),
            rng: StdMutex::new(rng),
        }
    }

    pub fn fallback_generator(&self) -> &FallbackQuoteGenerator {
        &self.fallback
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub async fn get(&self, assets: &[Asset]) -> HashMap<String, Quote> {
        {
            let mut entry = self.entry.lock().await;
            let expired = match entry.as_ref() {
                Some(cached) if cached.inserted_at.elapsed() < self.ttl => {
                    debug!("Quote cache hit ({} quotes)", cached.quotes.len());
                    return cached.quotes.clone();
                }
                Some(_) => true,
                None => false,
            };
            if expired {
                debug!("Quote cache entry expired");
                *entry = None;
            }
        }

        let coin_ids: Vec<String> = assets.iter().map(|a| a.coin_id.to_string()).collect();

        match self.fetcher.fetch(&coin_ids).await {
            Ok(ticks) => {
                let (quotes, live) = self.merge(assets, &ticks);
                info!(
                    "Fetched live data for {}/{} assets",
                    live,
                    assets.len()
                );

                let mut entry = self.entry.lock().await;
                *entry = Some(CacheEntry {
                    quotes: quotes.clone(),
                    inserted_at: Instant::now(),
                });
                quotes
            }
            Err(e) => {
                error!("Error fetching market data: {}", e);
                let batch = {
                    let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
                    self.fallback.fallback_batch(assets, &mut *rng)
                };
                info!("Using fallback data for {} assets (not cached)", batch.len());
                batch
            }
        }
    }

    pub async fn invalidate(&self) {
        let mut entry = self.entry.lock().await;
        *entry = None;
        info!("Quote cache cleared, next read will refetch");
    }

    /// Converts live ticks to quotes and fills every gap from the fallback
    /// generator. Returns the batch and how many quotes came from the live source.
    fn merge(&self, assets: &[Asset], ticks: &HashMap<String, PriceTick>) -> (HashMap<String, Quote>, usize) {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        let mut live = 0;

        let quotes = assets
            .iter()
            .map(|asset| {
                let quote = match ticks
                    .get(asset.coin_id)
                    .and_then(|tick| Quote::from_tick(asset.symbol, tick))
                {
                    Some(quote) => {
                        live += 1;
                        quote
                    }
                    None => {
                        debug!("No live quote for {}, using fallback", asset.symbol);
                        self.fallback.fallback(asset.symbol, &mut *rng)
                    }
                };
                (asset.symbol.to_string(), quote)
            })
            .collect();

        (quotes, live)
    }
}
