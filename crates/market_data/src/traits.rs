use std::collections::HashMap;

use async_trait::async_trait;
use common::{FetchError, models::PriceTick};

/// Batched price source. Keys of the returned map are coin ids.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MarketDataFetcher: Send + Sync {
    async fn fetch(&self, coin_ids: &[String]) -> Result<HashMap<String, PriceTick>, FetchError>;
}

#[async_trait]
impl<T: MarketDataFetcher + ?Sized> MarketDataFetcher for std::sync::Arc<T> {
    async fn fetch(&self, coin_ids: &[String]) -> Result<HashMap<String, PriceTick>, FetchError> {
        (**self).fetch(coin_ids).await
    }
}
