use thiserror::Error;

/// Failure of the batched price fetch. There is no partial success: any
/// variant discards the whole response.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP request failed: {0}")]
    Http(String),

    #[error("Price API returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Failed to decode price response: {0}")]
    Decode(String),
}

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value:?}")]
    Invalid { key: String, value: String },
}
