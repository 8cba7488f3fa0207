pub mod quote;
pub mod signal;

pub use quote::{PriceTick, Quote, QuoteSource};
pub use signal::{IndicatorBundle, PositionTier, SignalClass, SignalRecord, Targets, Trend};

/// Rounds half away from zero to `decimals` places.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::round_to;

    #[test]
    fn rounds_to_requested_places() {
        assert_eq!(round_to(0.854, 2), 0.85);
        assert_eq!(round_to(1.2346, 3), 1.235);
        assert_eq!(round_to(-2.46, 1), -2.5);
        assert_eq!(round_to(49965.0, 3), 49965.0);
    }
}
