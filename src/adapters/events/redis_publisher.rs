//! Redis pub/sub notification publisher.
//!
//! Publishes with `PUBLISH channel payload` over a multiplexed connection.
//! Redis pub/sub is fire-and-forget: a message published while nobody is
//! subscribed is dropped, which still counts as success here.

use async_trait::async_trait;
use redis::aio::MultiplexedConnection;
use redis::AsyncCommands;

use crate::config::NotificationConfig;
use crate::domain::foundation::{DomainError, ErrorCode};
use crate::ports::NotificationPublisher;

/// Redis-backed notification publisher.
#[derive(Clone)]
pub struct RedisNotificationPublisher {
    conn: MultiplexedConnection,
}

impl RedisNotificationPublisher {
    pub fn new(conn: MultiplexedConnection) -> Self {
        Self { conn }
    }

    /// Opens a multiplexed connection, bounded by the configured timeout.
    pub async fn connect(config: &NotificationConfig) -> Result<Self, DomainError> {
        let client = redis::Client::open(config.url.as_str())
            .map_err(|e| DomainError::event_bus(format!("invalid redis url: {}", e)))?;

        let conn = tokio::time::timeout(
            config.connect_timeout(),
            client.get_multiplexed_tokio_connection(),
        )
        .await
        .map_err(|_| {
            DomainError::new(
                ErrorCode::Timeout,
                format!("redis connect timed out after {:?}", config.connect_timeout()),
            )
        })?
        .map_err(|e| DomainError::event_bus(format!("redis connect failed: {}", e)))?;

        Ok(Self::new(conn))
    }
}

#[async_trait]
impl NotificationPublisher for RedisNotificationPublisher {
    async fn publish(&self, channel: &str, payload: &str) -> Result<(), DomainError> {
        let mut conn = self.conn.clone();

        let receivers: i64 = conn.publish(channel, payload).await.map_err(|e: redis::RedisError| {
            DomainError::event_bus(format!("publish failed: {}", e)).with_detail("channel", channel)
        })?;

        tracing::debug!(channel, receivers, "Notification published");
        Ok(())
    }
}
