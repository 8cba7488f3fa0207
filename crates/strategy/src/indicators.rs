//! Synthetic indicator generation.
//!
//! Values are sampled within fixed bands chosen from the 24h move; they are
//! not computed from a price series.

use common::models::{IndicatorBundle, Quote, Trend, round_to};
use rand::Rng;

const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// Stable per-symbol bucket in [0, 100), FNV-1a over the UTF-8 bytes.
pub fn symbol_hash(symbol: &str) -> u64 {
    let hash = symbol.bytes().fold(FNV_OFFSET, |acc, byte| {
        (acc ^ u64::from(byte)).wrapping_mul(FNV_PRIME)
    });
    hash % 100
}

/// Persistent skew for a symbol, independent of price action.
pub fn symbol_bias(symbol: &str) -> Option<Trend> {
    match symbol_hash(symbol) {
        h if h < 20 => Some(Trend::Bearish),
        h if h > 80 => Some(Trend::Bullish),
        _ => None,
    }
}

pub fn derive<R: Rng + ?Sized>(quote: &Quote, rng: &mut R) -> IndicatorBundle {
    let change = quote.change_24h;

    let (mut oscillator, mut trend): (f64, Trend) = if change > 8.0 {
        (rng.gen_range(65.0..=80.0), Trend::Bullish)
    } else if change < -6.0 {
        (rng.gen_range(20.0..=35.0), Trend::Bearish)
    } else if change > 2.0 {
        (rng.gen_range(55.0..=70.0), Trend::Bullish)
    } else if change < -2.0 {
        (rng.gen_range(30.0..=45.0), Trend::Bearish)
    } else {
        (rng.gen_range(40.0..=60.0), Trend::Neutral)
    };

    match symbol_bias(&quote.symbol) {
        Some(Trend::Bearish) => {
            oscillator = (oscillator - 15.0).max(20.0);
            trend = Trend::Bearish;
        }
        Some(Trend::Bullish) => {
            oscillator = (oscillator + 15.0).min(80.0);
            trend = Trend::Bullish;
        }
        _ => {}
    }

    let secondary_a = rng.gen_range(-1.5..=1.5);
    let secondary_b = rng.gen_range(-1.2..=1.2);

    IndicatorBundle {
        oscillator: round_to(oscillator.clamp(0.0, 100.0), 1),
        secondary_a: round_to(secondary_a, 3),
        secondary_b: round_to(secondary_b, 3),
        trend,
        volatility: change.abs() / 100.0,
        momentum: change / 100.0,
    }
}
