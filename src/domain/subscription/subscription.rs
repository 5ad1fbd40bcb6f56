//! Subscription entity and its status.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{ApplicationId, DeviceId, SubscriptionId, Timestamp};

use super::Receipt;

/// Subscription status as persisted (`1` active, `0` inactive).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionStatus {
    Active,
    Inactive,
}

impl SubscriptionStatus {
    /// Maps the stored flag. Any non-zero value counts as active.
    pub fn from_flag(flag: i64) -> Self {
        if flag != 0 {
            SubscriptionStatus::Active
        } else {
            SubscriptionStatus::Inactive
        }
    }

    pub fn as_flag(&self) -> i8 {
        match self {
            SubscriptionStatus::Active => 1,
            SubscriptionStatus::Inactive => 0,
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, SubscriptionStatus::Active)
    }
}

/// A purchased subscription tied to one device and one application.
///
/// The worker never creates or deletes subscriptions; it only moves the
/// expiration forward or flips the status to inactive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subscription {
    pub id: SubscriptionId,
    pub device_id: DeviceId,
    pub application_id: ApplicationId,
    pub receipt: Receipt,
    pub status: SubscriptionStatus,
    pub expire_date: Timestamp,
}

impl Subscription {
    /// True when the subscription is active and its term has lapsed at `now`.
    pub fn is_eligible_at(&self, now: &Timestamp) -> bool {
        self.status.is_active() && self.expire_date.is_before(now)
    }
}
