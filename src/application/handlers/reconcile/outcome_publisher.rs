//! OutcomePublisher - announces a reconciled subscription.

use std::sync::Arc;
use std::time::Duration;

use crate::domain::subscription::{OutcomeLabel, PublishError, Subscription, SubscriptionUpdated};
use crate::ports::NotificationPublisher;

/// Default bound for one publish call.
pub const DEFAULT_PUBLISH_TIMEOUT: Duration = Duration::from_secs(5);

/// Publishes `SubscriptionUpdated` payloads to one channel, each call
/// bounded by a timeout. No retry.
pub struct OutcomePublisher {
    publisher: Arc<dyn NotificationPublisher>,
    channel: String,
    timeout: Duration,
}

impl OutcomePublisher {
    pub fn new(
        publisher: Arc<dyn NotificationPublisher>,
        channel: impl Into<String>,
        timeout: Duration,
    ) -> Self {
        Self {
            publisher,
            channel: channel.into(),
            timeout,
        }
    }

    pub async fn publish(
        &self,
        subscription: &Subscription,
        label: OutcomeLabel,
    ) -> Result<(), PublishError> {
        let payload = SubscriptionUpdated::new(subscription, label)
            .to_json()
            .map_err(|e| PublishError::Serialization(e.to_string()))?;

        tokio::time::timeout(self.timeout, self.publisher.publish(&self.channel, &payload))
            .await
            .map_err(|_| PublishError::Timeout(self.timeout))?
            .map_err(PublishError::Bus)
    }
}
