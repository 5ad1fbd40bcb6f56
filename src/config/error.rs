//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid request timeout")]
    InvalidTimeout,

    #[error("Invalid database URL format")]
    InvalidDatabaseUrl,

    #[error("Invalid Redis URL format")]
    InvalidRedisUrl,

    #[error("Invalid billing gateway URL for {0}")]
    InvalidGatewayUrl(&'static str),

    #[error("Pool max_connections must be between 2 and 32")]
    InvalidPoolSize,

    #[error("Batch size must be between 1 and 10000")]
    InvalidBatchSize,

    #[error("Notification channel cannot be empty")]
    EmptyChannel,
}
