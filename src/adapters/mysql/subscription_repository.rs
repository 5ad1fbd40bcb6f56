//! MySQL implementation of SubscriptionRepository.

use async_trait::async_trait;
use chrono::NaiveDateTime;
use sqlx::MySqlPool;

use crate::domain::foundation::{
    ApplicationId, DeviceId, DomainError, SubscriptionId, Timestamp,
};
use crate::domain::subscription::{Receipt, Subscription, SubscriptionStatus};
use crate::ports::SubscriptionRepository;

/// MySQL implementation of the SubscriptionRepository port.
///
/// Reads and writes the `subscriptions` table. `expire_date` is a DATETIME
/// holding UTC wall-clock time; `status` is a tinyint flag.
pub struct MySqlSubscriptionRepository {
    pool: MySqlPool,
}

impl MySqlSubscriptionRepository {
    /// Creates a new MySqlSubscriptionRepository with the given connection pool.
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

/// Database row representation of a subscription.
#[derive(Debug, sqlx::FromRow)]
struct SubscriptionRow {
    id: u64,
    device_id: u64,
    application_id: u64,
    receipt: String,
    status: i64,
    expire_date: NaiveDateTime,
}

impl From<SubscriptionRow> for Subscription {
    fn from(row: SubscriptionRow) -> Self {
        Subscription {
            id: SubscriptionId::new(row.id),
            device_id: DeviceId::new(row.device_id),
            application_id: ApplicationId::new(row.application_id),
            receipt: Receipt::new(row.receipt),
            status: SubscriptionStatus::from_flag(row.status),
            expire_date: Timestamp::from_naive_utc(row.expire_date),
        }
    }
}

#[async_trait]
impl SubscriptionRepository for MySqlSubscriptionRepository {
    async fn find_expired(&self, limit: u32) -> Result<Vec<Subscription>, DomainError> {
        let now = Timestamp::now().to_naive_utc();

        let rows: Vec<SubscriptionRow> = sqlx::query_as(
            r#"
            SELECT
                id,
                device_id,
                application_id,
                receipt,
                CAST(status AS SIGNED) AS status,
                expire_date
            FROM subscriptions
            WHERE expire_date < ?
                AND status = 1
            ORDER BY id
            LIMIT ?
            "#,
        )
        .bind(now)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("query failed: {}", e)))?;

        Ok(rows.into_iter().map(Subscription::from).collect())
    }

    async fn set_expire_date(
        &self,
        id: SubscriptionId,
        expire_date: Timestamp,
    ) -> Result<(), DomainError> {
        sqlx::query("UPDATE subscriptions SET expire_date = ? WHERE id = ?")
            .bind(expire_date.to_naive_utc())
            .bind(id.as_u64())
            .execute(&self.pool)
            .await
            .map_err(|e| {
                DomainError::database(format!("update failed: {}", e))
                    .with_detail("subscription_id", id.to_string())
            })?;

        Ok(())
    }

    async fn set_status(
        &self,
        id: SubscriptionId,
        status: SubscriptionStatus,
    ) -> Result<(), DomainError> {
        sqlx::query("UPDATE subscriptions SET status = ? WHERE id = ?")
            .bind(status.as_flag())
            .bind(id.as_u64())
            .execute(&self.pool)
            .await
            .map_err(|e| {
                DomainError::database(format!("update failed: {}", e))
                    .with_detail("subscription_id", id.to_string())
            })?;

        Ok(())
    }
}
