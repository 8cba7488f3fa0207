/// A tracked market: display symbol, CoinGecko coin id, and the reference
/// price used whenever live data is unavailable.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Asset {
    pub symbol: &'static str,
    pub coin_id: &'static str,
    pub base_price: f64,
}

/// Base price for symbols outside the tracked set.
pub const DEFAULT_BASE_PRICE: f64 = 100.0;

/// Fixed tracked set, in display order. Defines both cache and fallback coverage.
pub const TRACKED_ASSETS: [Asset; 10] = [
    Asset { symbol: "BTC", coin_id: "bitcoin", base_price: 43450.0 },
    Asset { symbol: "ETH", coin_id: "ethereum", base_price: 2350.0 },
    Asset { symbol: "ADA", coin_id: "cardano", base_price: 0.48 },
    Asset { symbol: "SOL", coin_id: "solana", base_price: 102.0 },
    Asset { symbol: "DOT", coin_id: "polkadot", base_price: 6.85 },
    Asset { symbol: "MATIC", coin_id: "matic-network", base_price: 0.78 },
    Asset { symbol: "BNB", coin_id: "binancecoin", base_price: 315.0 },
    Asset { symbol: "XRP", coin_id: "ripple", base_price: 0.57 },
    Asset { symbol: "DOGE", coin_id: "dogecoin", base_price: 0.085 },
    Asset { symbol: "AVAX", coin_id: "avalanche-2", base_price: 36.5 },
];

pub fn find_by_symbol(symbol: &str) -> Option<&'static Asset> {
    TRACKED_ASSETS.iter().find(|a| a.symbol == symbol)
}

pub fn base_price(symbol: &str) -> f64 {
    find_by_symbol(symbol)
        .map(|a| a.base_price)
        .unwrap_or(DEFAULT_BASE_PRICE)
}
