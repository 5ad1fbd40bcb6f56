//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the reconciliation pipeline and the outside world. Adapters implement
//! these ports.
//!
//! ## Entity Stores
//!
//! - `SubscriptionRepository` - Expired working set and point updates
//! - `CredentialReader` - Gateway credentials by application
//! - `DeviceReader` - Devices by id
//!
//! ## Billing Gateway
//!
//! - `ReceiptValidator` - Receipt re-validation per platform
//!
//! ## Event Bus
//!
//! - `NotificationPublisher` - Publish-only notification channel

mod credential_reader;
mod device_reader;
mod notification_publisher;
mod receipt_validator;
mod subscription_repository;

pub use credential_reader::CredentialReader;
pub use device_reader::DeviceReader;
pub use notification_publisher::NotificationPublisher;
pub use receipt_validator::ReceiptValidator;
pub use subscription_repository::SubscriptionRepository;
