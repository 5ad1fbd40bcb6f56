//! In-memory notification bus for testing.
//!
//! # Security Note
//!
//! This adapter is for **testing only** and should not be used in production.
//! It uses `.expect()` on lock operations which will panic if locks are poisoned.
//! Production code should use the Redis publisher.

use async_trait::async_trait;
use std::sync::RwLock;

use crate::domain::foundation::DomainError;
use crate::ports::NotificationPublisher;

/// A message accepted by the bus.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishedMessage {
    pub channel: String,
    pub payload: String,
}

/// In-memory notification bus.
///
/// Captures every published message for assertions. A bus built with
/// [`InMemoryNotificationBus::failing`] rejects every publish instead.
///
/// # Panics
///
/// Methods may panic if internal locks are poisoned. This is acceptable
/// for test code but this adapter should NOT be used in production.
///
/// # Example
///
/// ```ignore
/// let bus = Arc::new(InMemoryNotificationBus::new());
/// bus.publish("notifications.subscription.updated", "{}").await?;
/// assert_eq!(bus.message_count(), 1);
/// ```
#[derive(Default)]
pub struct InMemoryNotificationBus {
    published: RwLock<Vec<PublishedMessage>>,
    fail: bool,
}

impl InMemoryNotificationBus {
    /// Creates a new empty bus.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a bus whose every publish fails.
    pub fn failing() -> Self {
        Self {
            published: RwLock::new(Vec::new()),
            fail: true,
        }
    }

    // === Test Helpers ===

    /// Returns all published messages in publish order.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn messages(&self) -> Vec<PublishedMessage> {
        self.published
            .read()
            .expect("InMemoryNotificationBus: published lock poisoned")
            .clone()
    }

    /// Returns payloads published on `channel`.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn payloads_on(&self, channel: &str) -> Vec<String> {
        self.messages()
            .into_iter()
            .filter(|m| m.channel == channel)
            .map(|m| m.payload)
            .collect()
    }

    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn message_count(&self) -> usize {
        self.published
            .read()
            .expect("InMemoryNotificationBus: published lock poisoned")
            .len()
    }
}

#[async_trait]
impl NotificationPublisher for InMemoryNotificationBus {
    async fn publish(&self, channel: &str, payload: &str) -> Result<(), DomainError> {
        if self.fail {
            return Err(DomainError::event_bus("bus unavailable").with_detail("channel", channel));
        }

        self.published
            .write()
            .expect("InMemoryNotificationBus: published write lock poisoned")
            .push(PublishedMessage {
                channel: channel.to_string(),
                payload: payload.to_string(),
            });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::ErrorCode;

    #[tokio::test]
    async fn publish_captures_messages_in_order() {
        let bus = InMemoryNotificationBus::new();

        bus.publish("a", "1").await.unwrap();
        bus.publish("b", "2").await.unwrap();
        bus.publish("a", "3").await.unwrap();

        assert_eq!(bus.message_count(), 3);
        assert_eq!(bus.payloads_on("a"), vec!["1".to_string(), "3".to_string()]);
        assert_eq!(bus.messages()[1].channel, "b");
    }

    #[tokio::test]
    async fn failing_bus_rejects_and_records_nothing() {
        let bus = InMemoryNotificationBus::failing();

        let err = bus.publish("a", "1").await.unwrap_err();

        assert_eq!(err.code, ErrorCode::EventBusError);
        assert_eq!(bus.message_count(), 0);
    }
}
