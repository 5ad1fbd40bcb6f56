//! SubscriptionStateUpdater - persists a validation outcome.

use std::sync::Arc;

use crate::domain::foundation::{SubscriptionId, Timestamp};
use crate::domain::subscription::{OutcomeLabel, SubscriptionStatus, UpdateError, ValidationOutcome};
use crate::ports::SubscriptionRepository;

/// Turns a validation outcome into exactly one store write.
///
/// - renewed: the gateway's expire date is parsed and persisted; status is
///   left as is.
/// - not renewed: status becomes inactive.
///
/// A renewed outcome whose date does not parse is rejected before any write.
pub struct SubscriptionStateUpdater {
    repository: Arc<dyn SubscriptionRepository>,
}

impl SubscriptionStateUpdater {
    pub fn new(repository: Arc<dyn SubscriptionRepository>) -> Self {
        Self { repository }
    }

    pub async fn apply(
        &self,
        id: SubscriptionId,
        outcome: &ValidationOutcome,
    ) -> Result<OutcomeLabel, UpdateError> {
        if !outcome.renewed {
            self.repository
                .set_status(id, SubscriptionStatus::Inactive)
                .await
                .map_err(UpdateError::Persistence)?;
            return Ok(OutcomeLabel::Canceled);
        }

        let raw = outcome.expire_date.as_deref().unwrap_or_default();
        let expire_date =
            Timestamp::parse_gateway(raw).map_err(|e| UpdateError::InvalidExpireDate {
                value: raw.to_string(),
                reason: e.to_string(),
            })?;

        self.repository
            .set_expire_date(id, expire_date)
            .await
            .map_err(UpdateError::Persistence)?;

        tracing::debug!(
            subscription_id = %id,
            expire_date = %expire_date.to_gateway_string(),
            "Expire date extended"
        );
        Ok(OutcomeLabel::Renewed)
    }
}
