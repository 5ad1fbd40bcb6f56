//! MySQL adapters for the entity store ports.
//!
//! Tables: `subscriptions`, `application_credentials`, `devices`.

mod credential_reader;
mod device_reader;
mod subscription_repository;

pub use credential_reader::MySqlCredentialReader;
pub use device_reader::MySqlDeviceReader;
pub use subscription_repository::MySqlSubscriptionRepository;

use secrecy::ExposeSecret;
use sqlx::mysql::{MySqlPool, MySqlPoolOptions};

use crate::config::DatabaseConfig;

/// Opens the pool for one pass. Connections live until the pool is closed.
pub async fn connect_pool(config: &DatabaseConfig) -> Result<MySqlPool, sqlx::Error> {
    tracing::debug!(
        url = %config.redacted_url(),
        max_connections = config.max_connections,
        "Connecting to MySQL"
    );

    MySqlPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(config.connect_timeout())
        .idle_timeout(None)
        .max_lifetime(None)
        .connect(config.url.expose_secret())
        .await
}
