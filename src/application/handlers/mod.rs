//! Application handlers.
//!
//! Command handlers that orchestrate domain operations over the ports.

pub mod reconcile;

pub use reconcile::{
    // Handler
    ProcessExpiredSubscriptionsHandler,
    // Commands and Results
    ProcessExpiredSubscriptionsCommand,
    ReconcileReport,
    // Pipeline stages
    BatchIds,
    Enrichment,
    EnrichmentFetcher,
    OutcomePublisher,
    SubscriptionStateUpdater,
    DEFAULT_PUBLISH_TIMEOUT,
};
