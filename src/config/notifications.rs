//! Notification bus configuration

use serde::Deserialize;
use std::time::Duration;

use crate::domain::subscription::SUBSCRIPTION_UPDATED_CHANNEL;

use super::error::ValidationError;

/// Where reconciled outcomes are announced: a Redis pub/sub channel.
#[derive(Debug, Clone, Deserialize)]
pub struct NotificationConfig {
    /// `redis://` or `rediss://` URL of the bus
    pub url: String,

    #[serde(default = "default_channel")]
    pub channel: String,

    /// Bound for opening the bus connection at startup
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,

    /// Bound for one `PUBLISH`; a stalled bus fails only that subscription
    #[serde(default = "default_publish_timeout")]
    pub publish_timeout_secs: u64,
}

impl NotificationConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            channel: default_channel(),
            connect_timeout_secs: default_connect_timeout(),
            publish_timeout_secs: default_publish_timeout(),
        }
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn publish_timeout(&self) -> Duration {
        Duration::from_secs(self.publish_timeout_secs)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.url.is_empty() {
            return Err(ValidationError::MissingRequired("NOTIFICATIONS__URL"));
        }
        if !self.url.starts_with("redis://") && !self.url.starts_with("rediss://") {
            return Err(ValidationError::InvalidRedisUrl);
        }
        if self.channel.trim().is_empty() {
            return Err(ValidationError::EmptyChannel);
        }
        if self.connect_timeout_secs == 0 || self.publish_timeout_secs == 0 {
            return Err(ValidationError::InvalidTimeout);
        }
        Ok(())
    }
}

fn default_channel() -> String {
    SUBSCRIPTION_UPDATED_CHANNEL.to_string()
}

fn default_connect_timeout() -> u64 {
    5
}

fn default_publish_timeout() -> u64 {
    5
}
