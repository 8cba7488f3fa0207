//! Synthetic signal pipeline: indicators, risk, scoring, targets and sizing,
//! assembled per asset by [`services::signal_service::SignalAssembler`].

pub mod indicators;
pub mod position;
pub mod risk;
pub mod scorer;
pub mod services;
pub mod targets;
