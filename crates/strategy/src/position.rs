use common::models::PositionTier;

const BASE_SIZE: f64 = 1000.0;

pub fn size(risk: u8, confidence: f64) -> PositionTier {
    let notional = BASE_SIZE * (1.0 - f64::from(risk) / 20.0) * confidence;

    if notional < 200.0 {
        PositionTier::Small
    } else if notional < 600.0 {
        PositionTier::Medium
    } else {
        PositionTier::Large
    }
}
