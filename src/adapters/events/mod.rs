//! Notification bus adapters.
//!
//! - `RedisNotificationPublisher` - Redis pub/sub for production
//! - `InMemoryNotificationBus` - In-process capture for testing

mod in_memory;
mod redis_publisher;

pub use in_memory::{InMemoryNotificationBus, PublishedMessage};
pub use redis_publisher::RedisNotificationPublisher;
