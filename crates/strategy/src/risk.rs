use common::models::IndicatorBundle;

pub const MIN_RISK: u8 = 1;
pub const MAX_RISK: u8 = 10;

/// Risk score in [1, 10]: neutral 5, raised by oscillator extremes and by the
/// size of the 24h move (via `volatility`).
pub fn score(indicators: &IndicatorBundle) -> u8 {
    let mut risk: i32 = 5;

    let osc = indicators.oscillator;
    if osc > 80.0 || osc < 20.0 {
        risk += 3;
    } else if osc > 70.0 || osc < 30.0 {
        risk += 1;
    }

    if indicators.volatility > 0.10 {
        risk += 2;
    } else if indicators.volatility > 0.05 {
        risk += 1;
    }

    risk.clamp(i32::from(MIN_RISK), i32::from(MAX_RISK)) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::models::Trend;

    fn bundle(oscillator: f64, volatility: f64) -> IndicatorBundle {
        IndicatorBundle {
            oscillator,
            secondary_a: 0.0,
            secondary_b: 0.0,
            trend: Trend::Neutral,
            volatility,
            momentum: 0.0,
        }
    }

    #[test]
    fn calm_market_is_baseline() {
        assert_eq!(score(&bundle(50.0, 0.02)), 5);
    }

    #[test]
    fn oscillator_extremes_add_risk() {
        assert_eq!(score(&bundle(85.0, 0.0)), 8);
        assert_eq!(score(&bundle(15.0, 0.0)), 8);
        assert_eq!(score(&bundle(75.0, 0.0)), 6);
        assert_eq!(score(&bundle(25.0, 0.0)), 6);
        // Boundaries are exclusive.
        assert_eq!(score(&bundle(80.0, 0.0)), 6);
        assert_eq!(score(&bundle(70.0, 0.0)), 5);
    }

    #[test]
    fn volatility_adds_risk() {
        assert_eq!(score(&bundle(50.0, 0.11)), 7);
        assert_eq!(score(&bundle(50.0, 0.06)), 6);
        assert_eq!(score(&bundle(50.0, 0.05)), 5);
    }

    #[test]
    fn result_is_always_clamped() {
        for osc in (0..=100).map(f64::from) {
            for vol in [0.0, 0.03, 0.07, 0.2, 5.0] {
                let risk = score(&bundle(osc, vol));
                assert!((MIN_RISK..=MAX_RISK).contains(&risk));
            }
        }
        assert_eq!(score(&bundle(95.0, 0.5)), 10);
    }
}
