//! Weighted scoring of indicators into a discrete signal class.

use common::models::{IndicatorBundle, SignalClass, Trend, round_to};
use rand::Rng;

pub const BASE_CONFIDENCE: f64 = 0.6;

/// Score before noise and classification, together with the confidence
/// accumulated from the oscillator.
pub fn raw_score(indicators: &IndicatorBundle, risk: u8, change_24h: f64, noise: f64) -> (f64, f64) {
    let mut score = 0.0;
    let mut confidence = BASE_CONFIDENCE;

    let osc = indicators.oscillator;
    if osc < 25.0 {
        score += 3.0;
        confidence += 0.25;
    } else if osc < 35.0 {
        score += 2.0;
        confidence += 0.15;
    } else if osc > 75.0 {
        score -= 3.0;
        confidence += 0.25;
    } else if osc > 65.0 {
        score -= 2.0;
        confidence += 0.15;
    }

    match indicators.trend {
        Trend::Bullish => score += 1.0,
        Trend::Bearish => score -= 1.0,
        Trend::Neutral => {}
    }

    // Contrarian: a deep dip reads as a buy, a pump as a sell.
    if change_24h < -8.0 {
        score += 1.0;
    } else if change_24h > 8.0 {
        score -= 1.0;
    }

    score += noise;

    if risk > 7 {
        score *= 0.6;
    } else if risk > 5 {
        score *= 0.8;
    }

    (score, confidence)
}

/// Maps a final score to a class. Confidence is clamped to [0, 1] and
/// rounded to two decimals.
pub fn classify(score: f64, confidence: f64) -> (SignalClass, f64) {
    let (class, confidence) = if score >= 2.5 {
        (SignalClass::StrongBuy, (confidence + 0.2).min(0.95))
    } else if score >= 1.5 {
        (SignalClass::Buy, (confidence + 0.1).min(0.85))
    } else if score <= -2.5 {
        (SignalClass::StrongSell, (confidence + 0.2).min(0.95))
    } else if score <= -1.5 {
        (SignalClass::Sell, (confidence + 0.1).min(0.85))
    } else {
        (SignalClass::Hold, confidence.max(0.5))
    };

    (class, round_to(confidence.clamp(0.0, 1.0), 2))
}

pub fn score<R: Rng + ?Sized>(
    indicators: &IndicatorBundle,
    risk: u8,
    change_24h: f64,
    rng: &mut R,
) -> (SignalClass, f64) {
    let noise = rng.gen_range(-1.0..=1.0);
    let (score, confidence) = raw_score(indicators, risk, change_24h, noise);
    classify(score, confidence)
}
