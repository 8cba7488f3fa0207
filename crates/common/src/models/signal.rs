use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::QuoteSource;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Bullish,
    Bearish,
    Neutral,
}

/// Synthetic indicator set derived per request, never cached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorBundle {
    /// RSI-like oscillator in [0, 100].
    pub oscillator: f64,
    /// MACD-like value in [-1.5, 1.5].
    pub secondary_a: f64,
    /// MACD-signal-like value in [-1.2, 1.2].
    pub secondary_b: f64,
    pub trend: Trend,
    pub volatility: f64,
    pub momentum: f64,
}

impl IndicatorBundle {
    pub fn neutral() -> Self {
        Self {
            oscillator: 50.0,
            secondary_a: 0.0,
            secondary_b: 0.0,
            trend: Trend::Neutral,
            volatility: 0.02,
            momentum: 0.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SignalClass {
    StrongBuy,
    Buy,
    Hold,
    Sell,
    StrongSell,
}

impl SignalClass {
    /// Ordinal from the most bearish (0) to the most bullish (4).
    pub fn rank(self) -> u8 {
        match self {
            Self::StrongSell => 0,
            Self::Sell => 1,
            Self::Hold => 2,
            Self::Buy => 3,
            Self::StrongBuy => 4,
        }
    }

    pub fn is_buy_side(self) -> bool {
        matches!(self, Self::Buy | Self::StrongBuy)
    }
}

impl fmt::Display for SignalClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::StrongBuy => "STRONG BUY",
            Self::Buy => "BUY",
            Self::Hold => "HOLD",
            Self::Sell => "SELL",
            Self::StrongSell => "STRONG SELL",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PositionTier {
    Small,
    Medium,
    Large,
}

impl fmt::Display for PositionTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Small => "Small (≤$200)",
            Self::Medium => "Medium ($200-$600)",
            Self::Large => "Large ($600-$1000)",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Targets {
    pub take_profit: f64,
    pub stop_loss: f64,
    pub risk_reward: f64,
}

/// One assembled recommendation. Produced per request, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalRecord {
    pub symbol: String,
    pub price: f64,
    pub change_24h: f64,
    pub signal_class: SignalClass,
    pub confidence: f64,
    pub risk_score: u8,
    pub position_tier: PositionTier,
    pub targets: Targets,
    pub indicators: IndicatorBundle,
    pub source: QuoteSource,
    pub timestamp: DateTime<Utc>,
    pub fallback: bool,
}
