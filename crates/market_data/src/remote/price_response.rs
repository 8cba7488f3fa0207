use std::collections::HashMap;

use common::models::PriceTick;
use serde::Deserialize;

/// Body of `/simple/price`, keyed by coin id.
pub type SimplePriceResponse = HashMap<String, SimplePriceEntry>;

#[derive(Deserialize, Debug, Clone, Default)]
pub struct SimplePriceEntry {
    #[serde(default)]
    pub usd: Option<f64>,
    #[serde(default)]
    pub usd_24h_change: Option<f64>,
    #[serde(default)]
    pub usd_24h_vol: Option<f64>,
    #[serde(default)]
    pub last_updated_at: Option<i64>,
}

impl SimplePriceEntry {
    pub fn to_tick(&self) -> PriceTick {
        PriceTick {
            price: self.usd.unwrap_or(0.0),
            change_24h: self.usd_24h_change.unwrap_or(0.0),
            volume: self.usd_24h_vol,
            last_updated: self.last_updated_at,
        }
    }
}
