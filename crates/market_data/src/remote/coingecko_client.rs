use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use common::{FetchError, models::PriceTick};
use reqwest::Client;
use tracing::{debug, warn};

use crate::remote::SimplePriceResponse;
use crate::traits::MarketDataFetcher;

#[derive(Clone)]
pub struct CoinGeckoClient {
    client: Client,
    base_url: String,
}

impl CoinGeckoClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, FetchError> {
        let client = Client::builder()
            .user_agent("crypto_signals/0.1.0")
            .timeout(timeout)
            .build()
            .map_err(|e| FetchError::Http(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn simple_price_url(&self) -> String {
        format!("{}/simple/price", self.base_url)
    }
}

#[async_trait]
impl MarketDataFetcher for CoinGeckoClient {
    async fn fetch(&self, coin_ids: &[String]) -> Result<HashMap<String, PriceTick>, FetchError> {
        let ids = coin_ids.join(",");
        debug!("Requesting simple prices for: {}", ids);

        let resp = self
            .client
            .get(self.simple_price_url())
            .query(&[
                ("ids", ids.as_str()),
                ("vs_currencies", "usd"),
                ("include_24hr_change", "true"),
                ("include_24hr_vol", "true"),
                ("include_last_updated_at", "true"),
            ])
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    FetchError::Http(format!("request timed out: {}", e))
                } else {
                    FetchError::Http(e.to_string())
                }
            })?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            warn!("CoinGecko API error: {}", status);
            return Err(FetchError::Status {
                status: status.as_u16(),
                body: body.chars().take(500).collect(),
            });
        }

        let payload = resp
            .json::<SimplePriceResponse>()
            .await
            .map_err(|e| FetchError::Decode(e.to_string()))?;

        Ok(payload
            .into_iter()
            .map(|(coin_id, entry)| (coin_id, entry.to_tick()))
            .collect())
    }
}
