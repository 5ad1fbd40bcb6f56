//! EnrichmentFetcher - resolves credentials and devices for a batch.

use std::collections::hash_map::Entry;
use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use futures::future::try_join;

use crate::domain::foundation::{ApplicationId, DeviceId, DomainError};
use crate::domain::subscription::{ApplicationCredential, Device, Subscription};
use crate::ports::{CredentialReader, DeviceReader};

/// Distinct ids referenced by a batch, in ascending order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchIds {
    pub application_ids: Vec<ApplicationId>,
    pub device_ids: Vec<DeviceId>,
}

impl BatchIds {
    pub fn from_subscriptions(subscriptions: &[Subscription]) -> Self {
        let application_ids: BTreeSet<ApplicationId> =
            subscriptions.iter().map(|s| s.application_id).collect();
        let device_ids: BTreeSet<DeviceId> = subscriptions.iter().map(|s| s.device_id).collect();

        Self {
            application_ids: application_ids.into_iter().collect(),
            device_ids: device_ids.into_iter().collect(),
        }
    }
}

/// Related entities for one batch, keyed for lookup.
#[derive(Debug, Clone, Default)]
pub struct Enrichment {
    pub credentials: HashMap<ApplicationId, ApplicationCredential>,
    pub devices: HashMap<DeviceId, Device>,
}

impl Enrichment {
    /// Both related entities of `subscription`, or `None` if either is
    /// missing.
    pub fn resolve(&self, subscription: &Subscription) -> Option<(&ApplicationCredential, &Device)> {
        let credential = self.credentials.get(&subscription.application_id)?;
        let device = self.devices.get(&subscription.device_id)?;
        Some((credential, device))
    }
}

/// Runs the credential and device lookups concurrently.
///
/// Fail-fast: the first lookup error is returned and no partial mapping
/// escapes.
pub struct EnrichmentFetcher {
    credentials: Arc<dyn CredentialReader>,
    devices: Arc<dyn DeviceReader>,
}

impl EnrichmentFetcher {
    pub fn new(credentials: Arc<dyn CredentialReader>, devices: Arc<dyn DeviceReader>) -> Self {
        Self {
            credentials,
            devices,
        }
    }

    pub async fn fetch(&self, ids: &BatchIds) -> Result<Enrichment, DomainError> {
        let (credentials, devices) = try_join(
            self.credentials.find_by_application_ids(&ids.application_ids),
            self.devices.find_by_ids(&ids.device_ids),
        )
        .await?;

        Ok(Enrichment {
            credentials: key_by_application(credentials),
            devices: devices.into_iter().map(|d| (d.id, d)).collect(),
        })
    }
}

/// One credential per application: the lowest credential id wins.
fn key_by_application(
    credentials: Vec<ApplicationCredential>,
) -> HashMap<ApplicationId, ApplicationCredential> {
    let mut keyed: HashMap<ApplicationId, ApplicationCredential> =
        HashMap::with_capacity(credentials.len());

    for credential in credentials {
        match keyed.entry(credential.application_id) {
            Entry::Vacant(slot) => {
                slot.insert(credential);
            }
            Entry::Occupied(mut slot) => {
                let (kept, ignored) = if credential.id < slot.get().id {
                    let previous = slot.insert(credential);
                    (slot.get().id, previous.id)
                } else {
                    (slot.get().id, credential.id)
                };
                tracing::warn!(
                    application_id = %slot.key(),
                    kept_credential_id = %kept,
                    ignored_credential_id = %ignored,
                    "Application has more than one credential"
                );
            }
        }
    }

    keyed
}
