pub mod signal_service;

pub use signal_service::{SignalAssembler, SignalError};
