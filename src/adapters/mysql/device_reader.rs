//! MySQL implementation of DeviceReader.

use async_trait::async_trait;
use sqlx::{MySql, MySqlPool, QueryBuilder};

use crate::domain::foundation::{DeviceId, DomainError};
use crate::domain::subscription::Device;
use crate::ports::DeviceReader;

/// MySQL implementation of the DeviceReader port.
pub struct MySqlDeviceReader {
    pool: MySqlPool,
}

impl MySqlDeviceReader {
    /// Creates a new MySqlDeviceReader with the given connection pool.
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct DeviceRow {
    id: u64,
    uid: String,
    platform: String,
    language: String,
}

impl From<DeviceRow> for Device {
    fn from(row: DeviceRow) -> Self {
        Device {
            id: DeviceId::new(row.id),
            uid: row.uid,
            platform: row.platform,
            language: row.language,
        }
    }
}

#[async_trait]
impl DeviceReader for MySqlDeviceReader {
    async fn find_by_ids(&self, ids: &[DeviceId]) -> Result<Vec<Device>, DomainError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut query: QueryBuilder<MySql> =
            QueryBuilder::new("SELECT id, uid, platform, language FROM devices WHERE id IN (");
        let mut separated = query.separated(", ");
        for id in ids {
            separated.push_bind(id.as_u64());
        }
        separated.push_unseparated(")");

        let rows: Vec<DeviceRow> = query
            .build_query_as()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::database(format!("query failed: {}", e)))?;

        Ok(rows.into_iter().map(Device::from).collect())
    }
}
