//! Reconciliation error taxonomy.
//!
//! | Error | Scope |
//! |-------|-------|
//! | `ReconcileError::Fetch` | whole pass (fatal) |
//! | `ReconcileError::Enrichment` | whole pass (fatal) |
//! | `ValidationError` | one subscription |
//! | `UpdateError` | one subscription |
//! | `PublishError` | one subscription |

use std::time::Duration;

use thiserror::Error;

use crate::domain::foundation::{DomainError, SubscriptionId};

/// Failure to obtain a validation outcome from a billing gateway.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("no billing gateway configured for platform '{0}'")]
    UnsupportedPlatform(String),

    #[error("gateway request failed: {0}")]
    Transport(String),

    #[error("gateway request timed out after {0:?}")]
    Timeout(Duration),

    #[error("unexpected gateway status code: {0}")]
    UnexpectedStatus(u16),

    #[error("failed to decode gateway response: {0}")]
    Decode(String),

    #[error("max retries reached after {attempts} attempts: {last}")]
    RetriesExhausted {
        attempts: u32,
        last: Box<ValidationError>,
    },
}

impl ValidationError {
    /// The failure of the final attempt, unwrapping retry exhaustion.
    pub fn last_failure(&self) -> &ValidationError {
        match self {
            ValidationError::RetriesExhausted { last, .. } => last.last_failure(),
            other => other,
        }
    }

    /// Whether another attempt could produce a different result.
    pub fn is_retryable(&self) -> bool {
        !matches!(
            self,
            ValidationError::UnsupportedPlatform(_) | ValidationError::RetriesExhausted { .. }
        )
    }
}

/// Failure to persist a validation outcome.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UpdateError {
    #[error("invalid expire date '{value}': {reason}")]
    InvalidExpireDate { value: String, reason: String },

    #[error("failed to persist subscription state: {0}")]
    Persistence(DomainError),
}

/// Failure to announce an outcome on the event bus.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PublishError {
    #[error("failed to serialize event: {0}")]
    Serialization(String),

    #[error("publish timed out after {0:?}")]
    Timeout(Duration),

    #[error("failed to publish event: {0}")]
    Bus(DomainError),
}

/// Per-subscription failure recorded by a pass.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ItemError {
    #[error("receipt validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("subscription update failed: {0}")]
    Update(#[from] UpdateError),

    #[error("event publish failed: {0}")]
    Publish(#[from] PublishError),
}

impl ItemError {
    /// Short stage name for logs and reports.
    pub fn stage(&self) -> &'static str {
        match self {
            ItemError::Validation(_) => "validate",
            ItemError::Update(_) => "update",
            ItemError::Publish(_) => "publish",
        }
    }
}

/// A subscription that could not be reconciled in this pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemFailure {
    pub subscription_id: SubscriptionId,
    pub error: ItemError,
}

/// Failures that abort a whole pass.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ReconcileError {
    #[error("fetching expired subscriptions: {0}")]
    Fetch(DomainError),

    #[error("fetching related data: {0}")]
    Enrichment(DomainError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::ErrorCode;

    #[test]
    fn retries_exhausted_wraps_last_failure() {
        let err = ValidationError::RetriesExhausted {
            attempts: 3,
            last: Box::new(ValidationError::UnexpectedStatus(503)),
        };

        assert_eq!(err.last_failure(), &ValidationError::UnexpectedStatus(503));
        assert_eq!(
            err.to_string(),
            "max retries reached after 3 attempts: unexpected gateway status code: 503"
        );
    }

    #[test]
    fn last_failure_of_plain_error_is_itself() {
        let err = ValidationError::Decode("eof".into());
        assert_eq!(err.last_failure(), &err);
    }

    #[test]
    fn unsupported_platform_is_not_retryable() {
        assert!(!ValidationError::UnsupportedPlatform("windows".into()).is_retryable());
        assert!(ValidationError::Timeout(Duration::from_secs(10)).is_retryable());
        assert!(ValidationError::UnexpectedStatus(500).is_retryable());
    }

    #[test]
    fn item_error_reports_stage() {
        let validation: ItemError = ValidationError::UnexpectedStatus(500).into();
        let update: ItemError =
            UpdateError::Persistence(DomainError::database("down")).into();
        let publish: ItemError = PublishError::Timeout(Duration::from_secs(5)).into();

        assert_eq!(validation.stage(), "validate");
        assert_eq!(update.stage(), "update");
        assert_eq!(publish.stage(), "publish");
    }

    #[test]
    fn fatal_errors_display_cause() {
        let err = ReconcileError::Enrichment(DomainError::new(
            ErrorCode::DatabaseError,
            "devices query failed",
        ));
        assert_eq!(
            err.to_string(),
            "fetching related data: [DATABASE_ERROR] devices query failed"
        );
    }
}
