//! ProcessExpiredSubscriptionsHandler - one reconciliation pass.
//!
//! ```text
//! Fetching ──empty──────────────────────────────► Done
//!    │
//!    ▼
//! Enriching ──error──► abort (ReconcileError)
//!    │
//!    ▼
//! Iterating(i): missing credential/device ─► skip
//!               validate ─► update ─► publish
//!               item error ─► record, continue
//!    │
//!    ▼
//! Done (ReconcileReport)
//! ```

use std::sync::Arc;

use tracing::Instrument;
use uuid::Uuid;

use super::{BatchIds, EnrichmentFetcher, OutcomePublisher, SubscriptionStateUpdater};
use crate::domain::subscription::{
    ApplicationCredential, ItemError, ItemFailure, OutcomeLabel, ReconcileError, Subscription,
};
use crate::ports::{CredentialReader, DeviceReader, ReceiptValidator, SubscriptionRepository};

/// Command to run one pass over the expired working set.
#[derive(Debug, Clone)]
pub struct ProcessExpiredSubscriptionsCommand {
    /// Upper bound on subscriptions fetched for this pass.
    pub batch_size: u32,
}

/// Summary of a completed pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconcileReport {
    pub fetched: usize,
    pub skipped: usize,
    pub renewed: usize,
    pub canceled: usize,
    pub failures: Vec<ItemFailure>,
}

impl ReconcileReport {
    fn fetched(count: usize) -> Self {
        Self {
            fetched: count,
            ..Self::default()
        }
    }

    fn record(&mut self, label: OutcomeLabel) {
        match label {
            OutcomeLabel::Renewed => self.renewed += 1,
            OutcomeLabel::Canceled => self.canceled += 1,
        }
    }

    /// Subscriptions that went through validate, update and publish.
    pub fn processed(&self) -> usize {
        self.renewed + self.canceled
    }

    /// True when no subscription failed.
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Handler for reconciliation passes.
///
/// Subscriptions are handled one at a time in store order. Only the
/// enrichment lookups run concurrently.
pub struct ProcessExpiredSubscriptionsHandler {
    repository: Arc<dyn SubscriptionRepository>,
    enrichment: EnrichmentFetcher,
    validator: Arc<dyn ReceiptValidator>,
    updater: SubscriptionStateUpdater,
    publisher: OutcomePublisher,
}

impl ProcessExpiredSubscriptionsHandler {
    pub fn new(
        repository: Arc<dyn SubscriptionRepository>,
        credentials: Arc<dyn CredentialReader>,
        devices: Arc<dyn DeviceReader>,
        validator: Arc<dyn ReceiptValidator>,
        publisher: OutcomePublisher,
    ) -> Self {
        Self {
            enrichment: EnrichmentFetcher::new(credentials, devices),
            updater: SubscriptionStateUpdater::new(repository.clone()),
            repository,
            validator,
            publisher,
        }
    }

    pub async fn handle(
        &self,
        cmd: ProcessExpiredSubscriptionsCommand,
    ) -> Result<ReconcileReport, ReconcileError> {
        let span = tracing::info_span!(
            "reconcile_pass",
            run_id = %Uuid::new_v4(),
            batch_size = cmd.batch_size
        );
        self.run(cmd).instrument(span).await
    }

    async fn run(
        &self,
        cmd: ProcessExpiredSubscriptionsCommand,
    ) -> Result<ReconcileReport, ReconcileError> {
        // 1. Fetch the working set
        let subscriptions = self
            .repository
            .find_expired(cmd.batch_size)
            .await
            .map_err(ReconcileError::Fetch)?;

        let mut report = ReconcileReport::fetched(subscriptions.len());
        if subscriptions.is_empty() {
            tracing::info!("No expired subscriptions");
            return Ok(report);
        }

        // 2. Resolve credentials and devices
        let ids = BatchIds::from_subscriptions(&subscriptions);
        let enrichment = self
            .enrichment
            .fetch(&ids)
            .await
            .map_err(ReconcileError::Enrichment)?;

        tracing::info!(
            subscriptions = subscriptions.len(),
            credentials = enrichment.credentials.len(),
            devices = enrichment.devices.len(),
            "Batch enriched"
        );

        // 3. Reconcile one by one
        for subscription in &subscriptions {
            let Some((credential, _device)) = enrichment.resolve(subscription) else {
                tracing::debug!(
                    subscription_id = %subscription.id,
                    "Skipping subscription without credential or device"
                );
                report.skipped += 1;
                continue;
            };

            match self.reconcile_one(subscription, credential).await {
                Ok(label) => {
                    tracing::info!(subscription_id = %subscription.id, outcome = %label, "Subscription reconciled");
                    report.record(label);
                }
                Err(error) => {
                    tracing::warn!(
                        subscription_id = %subscription.id,
                        stage = error.stage(),
                        error = %error,
                        "Subscription reconciliation failed"
                    );
                    report.failures.push(ItemFailure {
                        subscription_id: subscription.id,
                        error,
                    });
                }
            }
        }

        tracing::info!(
            fetched = report.fetched,
            renewed = report.renewed,
            canceled = report.canceled,
            skipped = report.skipped,
            failed = report.failures.len(),
            "Reconcile pass finished"
        );

        Ok(report)
    }

    async fn reconcile_one(
        &self,
        subscription: &Subscription,
        credential: &ApplicationCredential,
    ) -> Result<OutcomeLabel, ItemError> {
        let outcome = self.validator.validate(credential, &subscription.receipt).await?;
        let label = self.updater.apply(subscription.id, &outcome).await?;
        self.publisher.publish(subscription, label).await?;
        Ok(label)
    }
}
