//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the reconciliation pipeline to external systems:
//! - `billing` - Platform billing gateways over HTTP, with retry and dispatch
//! - `events` - Notification bus (Redis pub/sub, in-memory)
//! - `memory` - In-memory entity store
//! - `mysql` - MySQL entity store

pub mod billing;
pub mod events;
pub mod memory;
pub mod mysql;

pub use billing::{HttpGatewayValidator, PlatformRouter, RetryingValidator};
pub use events::{InMemoryNotificationBus, RedisNotificationPublisher};
pub use memory::InMemoryStore;
pub use mysql::{MySqlCredentialReader, MySqlDeviceReader, MySqlSubscriptionRepository};
