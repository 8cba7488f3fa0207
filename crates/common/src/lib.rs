pub mod actors;
pub mod assets;
pub mod config;
pub mod error;
pub mod logger;
pub mod models;

pub use assets::{Asset, TRACKED_ASSETS};
pub use config::AppConfig;
pub use error::{ConfigError, FetchError};
