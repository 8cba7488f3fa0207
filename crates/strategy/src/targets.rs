use common::models::{SignalClass, Targets, round_to};

const RISK_DAMPENING: f64 = 0.005;

fn multipliers(class: SignalClass) -> (f64, f64) {
    match class {
        SignalClass::StrongBuy => (1.15, 0.88),
        SignalClass::Buy => (1.10, 0.92),
        SignalClass::Hold => (1.05, 0.95),
        SignalClass::Sell => (0.90, 1.08),
        SignalClass::StrongSell => (0.85, 1.12),
    }
}

/// Distance to take-profit over distance to stop-loss, 1.0 when the stop
/// sits on the price.
pub fn risk_reward(take_profit: f64, price: f64, stop_loss: f64) -> f64 {
    let downside = (price - stop_loss).abs();
    if downside == 0.0 {
        return 1.0;
    }
    round_to((take_profit - price).abs() / downside, 2)
}

pub fn calculate(price: f64, class: SignalClass, risk: u8) -> Targets {
    let (tp_mult, sl_mult) = multipliers(class);

    // Riskier assets get a closer take-profit; the stop is left alone.
    let take_profit = price * tp_mult * (1.0 - f64::from(risk) * RISK_DAMPENING);
    let stop_loss = price * sl_mult;

    Targets {
        take_profit: round_to(take_profit, 3),
        stop_loss: round_to(stop_loss, 3),
        risk_reward: risk_reward(take_profit, price, stop_loss),
    }
}
