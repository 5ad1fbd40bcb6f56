//! Expired-subscription reconciliation.

mod enrichment;
mod outcome_publisher;
mod process_expired;
mod state_updater;

pub use enrichment::{BatchIds, Enrichment, EnrichmentFetcher};
pub use outcome_publisher::{OutcomePublisher, DEFAULT_PUBLISH_TIMEOUT};
pub use process_expired::{
    ProcessExpiredSubscriptionsCommand, ProcessExpiredSubscriptionsHandler, ReconcileReport,
};
pub use state_updater::SubscriptionStateUpdater;
