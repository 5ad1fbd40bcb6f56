//! Billing gateway configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Billing gateway configuration (one base URL per platform)
#[derive(Debug, Clone, Deserialize)]
pub struct BillingConfig {
    /// App Store gateway base URL (ios receipts)
    pub app_store_url: String,

    /// Google Play gateway base URL (android receipts)
    pub google_play_url: String,

    /// Per-attempt request timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

impl BillingConfig {
    /// Get request timeout as Duration
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Validate billing configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_gateway_url(&self.app_store_url, "APP_STORE_URL", "app store")?;
        validate_gateway_url(&self.google_play_url, "GOOGLE_PLAY_URL", "google play")?;
        if self.request_timeout_secs == 0 || self.request_timeout_secs > 300 {
            return Err(ValidationError::InvalidTimeout);
        }
        Ok(())
    }
}

fn validate_gateway_url(
    url: &str,
    key: &'static str,
    name: &'static str,
) -> Result<(), ValidationError> {
    if url.is_empty() {
        return Err(ValidationError::MissingRequired(key));
    }
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ValidationError::InvalidGatewayUrl(name));
    }
    Ok(())
}

impl Default for BillingConfig {
    fn default() -> Self {
        Self {
            app_store_url: String::new(),
            google_play_url: String::new(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

fn default_request_timeout() -> u64 {
    10
}
