//! Subscription module - Expired-subscription reconciliation domain.
//!
//! # Overview
//!
//! A subscription is eligible for reconciliation when it is active and its
//! expiration has passed. Its receipt is re-validated with the gateway of the
//! platform that issued it, and the result becomes one of two outcomes:
//!
//! - `renewed` - the gateway reports a new expiration, which is persisted
//! - `canceled` - the subscription is marked inactive
//!
//! Each outcome is announced on `notifications.subscription.updated`.

mod credential;
mod device;
mod errors;
mod event;
mod outcome;
mod receipt;
mod retry;
#[allow(clippy::module_inception)]
mod subscription;

pub use credential::{ApplicationCredential, Platform};
pub use device::Device;
pub use errors::{
    ItemError, ItemFailure, PublishError, ReconcileError, UpdateError, ValidationError,
};
pub use event::{SubscriptionUpdated, SUBSCRIPTION_UPDATED_CHANNEL};
pub use outcome::{OutcomeLabel, ValidationOutcome};
pub use receipt::Receipt;
pub use retry::{NoRetry, ReceiptSuffixPolicy, RetryPlan, RetryPolicy};
pub use subscription::{Subscription, SubscriptionStatus};
