pub mod cache;
pub mod fallback;
pub mod remote;
pub mod traits;

pub use cache::QuoteCache;
pub use fallback::FallbackQuoteGenerator;
pub use traits::MarketDataFetcher;
