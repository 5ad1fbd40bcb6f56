//! Application credential reader port.

use async_trait::async_trait;

use crate::domain::foundation::{ApplicationId, DomainError};
use crate::domain::subscription::ApplicationCredential;

/// Read-only access to gateway credentials.
#[async_trait]
pub trait CredentialReader: Send + Sync {
    /// Credentials of the given applications, ordered by credential id.
    /// Unknown ids are simply absent from the result; an application may
    /// appear more than once.
    async fn find_by_application_ids(
        &self,
        ids: &[ApplicationId],
    ) -> Result<Vec<ApplicationCredential>, DomainError>;
}
