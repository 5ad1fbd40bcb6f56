//! Worker configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Batch pass configuration
#[derive(Debug, Clone, Deserialize)]
pub struct WorkerConfig {
    /// Maximum subscriptions fetched per pass
    #[serde(default = "default_batch_size")]
    pub batch_size: u32,

    /// Unit of the linear backoff for retried receipts, in seconds
    #[serde(default = "default_retry_base_delay")]
    pub retry_base_delay_secs: u64,

    /// Environment name
    #[serde(default)]
    pub environment: Environment,

    /// Rust log filter directive
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

/// Application environment
#[derive(Debug, Clone, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl WorkerConfig {
    pub fn retry_base_delay(&self) -> Duration {
        Duration::from_secs(self.retry_base_delay_secs)
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == Environment::Production
    }

    /// Validate worker configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.batch_size == 0 || self.batch_size > 10_000 {
            return Err(ValidationError::InvalidBatchSize);
        }
        Ok(())
    }
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            batch_size: default_batch_size(),
            retry_base_delay_secs: default_retry_base_delay(),
            environment: Environment::default(),
            log_level: default_log_level(),
        }
    }
}

fn default_batch_size() -> u32 {
    100
}

fn default_retry_base_delay() -> u64 {
    5
}

fn default_log_level() -> String {
    "subscription_worker=info".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_worker_config_defaults() {
        let config = WorkerConfig::default();
        assert_eq!(config.batch_size, 100);
        assert_eq!(config.retry_base_delay(), Duration::from_secs(5));
        assert_eq!(config.environment, Environment::Development);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_zero_batch_size() {
        let config = WorkerConfig {
            batch_size: 0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ValidationError::InvalidBatchSize)));
    }

    #[test]
    fn test_validation_batch_size_too_large() {
        let config = WorkerConfig {
            batch_size: 10_001,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_retry_delay_is_allowed() {
        let config = WorkerConfig {
            retry_base_delay_secs: 0,
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_is_production() {
        let config = WorkerConfig {
            environment: Environment::Production,
            ..Default::default()
        };
        assert!(config.is_production());
    }
}
