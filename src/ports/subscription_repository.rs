//! Subscription repository port.
//!
//! Reads the expired working set and applies the two point updates the
//! worker is allowed to make.
//!
//! # Example
//!
//! ```ignore
//! let expired = repo.find_expired(100).await?;
//! for sub in &expired {
//!     repo.set_status(sub.id, SubscriptionStatus::Inactive).await?;
//! }
//! ```

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, SubscriptionId, Timestamp};
use crate::domain::subscription::{Subscription, SubscriptionStatus};

/// Repository port for subscriptions.
#[async_trait]
pub trait SubscriptionRepository: Send + Sync {
    /// Active subscriptions whose expiration is before now, in id order,
    /// at most `limit` of them.
    async fn find_expired(&self, limit: u32) -> Result<Vec<Subscription>, DomainError>;

    /// Moves the expiration of one subscription. Status is untouched.
    async fn set_expire_date(
        &self,
        id: SubscriptionId,
        expire_date: Timestamp,
    ) -> Result<(), DomainError>;

    /// Sets the status of one subscription.
    async fn set_status(
        &self,
        id: SubscriptionId,
        status: SubscriptionStatus,
    ) -> Result<(), DomainError>;
}
