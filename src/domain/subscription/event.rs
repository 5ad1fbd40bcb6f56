//! Notification payload announced after a subscription is reconciled.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{ApplicationId, DeviceId};

use super::{OutcomeLabel, Subscription};

/// Channel downstream consumers subscribe to.
pub const SUBSCRIPTION_UPDATED_CHANNEL: &str = "notifications.subscription.updated";

/// `{"appId": .., "deviceId": .., "event": "renewed" | "canceled"}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriptionUpdated {
    #[serde(rename = "appId")]
    pub app_id: ApplicationId,

    #[serde(rename = "deviceId")]
    pub device_id: DeviceId,

    pub event: OutcomeLabel,
}

impl SubscriptionUpdated {
    pub fn new(subscription: &Subscription, label: OutcomeLabel) -> Self {
        Self {
            app_id: subscription.application_id,
            device_id: subscription.device_id,
            event: label,
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
