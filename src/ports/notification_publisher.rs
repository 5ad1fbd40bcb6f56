//! NotificationPublisher port - Interface for the publish-only event bus.
//!
//! The worker serializes its own payloads; the port only moves a string onto
//! a named channel, without knowing the transport (Redis, in-memory, ...).

use async_trait::async_trait;

use crate::domain::foundation::DomainError;

/// Port for publishing notifications.
///
/// Delivery is fire-and-forget: a successful return means the bus accepted
/// the message, not that any consumer received it.
#[async_trait]
pub trait NotificationPublisher: Send + Sync {
    async fn publish(&self, channel: &str, payload: &str) -> Result<(), DomainError>;
}
