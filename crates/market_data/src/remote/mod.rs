pub mod coingecko_client;
pub mod price_response;

pub use coingecko_client::CoinGeckoClient;
pub use price_response::{SimplePriceEntry, SimplePriceResponse};
