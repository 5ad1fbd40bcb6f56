//! MySQL implementation of CredentialReader.

use async_trait::async_trait;
use sqlx::{MySql, MySqlPool, QueryBuilder};

use crate::domain::foundation::{ApplicationId, CredentialId, DomainError};
use crate::domain::subscription::{ApplicationCredential, Platform};
use crate::ports::CredentialReader;

/// MySQL implementation of the CredentialReader port.
pub struct MySqlCredentialReader {
    pool: MySqlPool,
}

impl MySqlCredentialReader {
    /// Creates a new MySqlCredentialReader with the given connection pool.
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

/// Database row representation of an application credential.
#[derive(sqlx::FromRow)]
struct CredentialRow {
    id: u64,
    application_id: u64,
    platform: String,
    username: String,
    password: String,
}

impl From<CredentialRow> for ApplicationCredential {
    fn from(row: CredentialRow) -> Self {
        ApplicationCredential::new(
            CredentialId::new(row.id),
            ApplicationId::new(row.application_id),
            Platform::parse(&row.platform),
            row.username,
            row.password,
        )
    }
}

#[async_trait]
impl CredentialReader for MySqlCredentialReader {
    async fn find_by_application_ids(
        &self,
        ids: &[ApplicationId],
    ) -> Result<Vec<ApplicationCredential>, DomainError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut query: QueryBuilder<MySql> = QueryBuilder::new(
            "SELECT id, application_id, platform, username, password \
             FROM application_credentials WHERE application_id IN (",
        );
        let mut separated = query.separated(", ");
        for id in ids {
            separated.push_bind(id.as_u64());
        }
        separated.push_unseparated(") ORDER BY id");

        let rows: Vec<CredentialRow> = query
            .build_query_as()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::database(format!("query failed: {}", e)))?;

        Ok(rows.into_iter().map(ApplicationCredential::from).collect())
    }
}
