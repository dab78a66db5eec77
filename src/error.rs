use thiserror::Error;

pub type Result<T> = std::result::Result<T, BridgeError>;

#[derive(Error, Debug)]
pub enum BridgeError {
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Token store failure: {0}")]
    StoreFailure(String),

    #[cfg(feature = "remote-catalog")]
    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl BridgeError {
    pub fn validation_error(msg: impl Into<String>) -> Self {
        BridgeError::ValidationError(msg.into())
    }

    pub fn store_failure(msg: impl Into<String>) -> Self {
        BridgeError::StoreFailure(msg.into())
    }

    pub fn config_error(msg: impl Into<String>) -> Self {
        BridgeError::ConfigError(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        BridgeError::Internal(msg.into())
    }
}
