//! In-memory entity store for testing and local runs.
//!
//! One value implements all three store ports, so a single `Arc` can be
//! handed to every consumer. Every query and write is logged for assertions
//! and individual operations can be made to fail.

use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::RwLock;

use crate::domain::foundation::{
    ApplicationId, DeviceId, DomainError, SubscriptionId, Timestamp,
};
use crate::domain::subscription::{ApplicationCredential, Device, Subscription, SubscriptionStatus};
use crate::ports::{CredentialReader, DeviceReader, SubscriptionRepository};

#[derive(Default)]
struct Tables {
    subscriptions: Vec<Subscription>,
    credentials: Vec<ApplicationCredential>,
    devices: Vec<Device>,
}

#[derive(Default)]
struct Faults {
    fetch: bool,
    credentials: bool,
    devices: bool,
    updates: HashSet<SubscriptionId>,
}

#[derive(Default)]
struct CallLog {
    credential_queries: Vec<Vec<ApplicationId>>,
    device_queries: Vec<Vec<DeviceId>>,
    expire_updates: Vec<(SubscriptionId, Timestamp)>,
    status_updates: Vec<(SubscriptionId, SubscriptionStatus)>,
}

/// In-memory store.
///
/// # Panics
///
/// Methods may panic if internal locks are poisoned. This is acceptable
/// for test code but this adapter should NOT be used in production.
#[derive(Default)]
pub struct InMemoryStore {
    tables: RwLock<Tables>,
    faults: RwLock<Faults>,
    calls: RwLock<CallLog>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    // === Seeding ===

    pub fn with_subscription(self, subscription: Subscription) -> Self {
        self.write_tables().subscriptions.push(subscription);
        self
    }

    pub fn with_credential(self, credential: ApplicationCredential) -> Self {
        self.write_tables().credentials.push(credential);
        self
    }

    pub fn with_device(self, device: Device) -> Self {
        self.write_tables().devices.push(device);
        self
    }

    // === Fault injection ===

    /// Makes `find_expired` fail.
    pub fn fail_fetch(self) -> Self {
        self.write_faults().fetch = true;
        self
    }

    /// Makes credential lookups fail.
    pub fn fail_credentials(self) -> Self {
        self.write_faults().credentials = true;
        self
    }

    /// Makes device lookups fail.
    pub fn fail_devices(self) -> Self {
        self.write_faults().devices = true;
        self
    }

    /// Makes both update operations fail for `id`.
    pub fn fail_updates_for(self, id: SubscriptionId) -> Self {
        self.write_faults().updates.insert(id);
        self
    }

    // === Test Helpers ===

    /// Current stored state of one subscription.
    pub fn subscription(&self, id: SubscriptionId) -> Option<Subscription> {
        self.read_tables()
            .subscriptions
            .iter()
            .find(|s| s.id == id)
            .cloned()
    }

    /// Id lists passed to `find_by_application_ids`, in call order.
    pub fn credential_queries(&self) -> Vec<Vec<ApplicationId>> {
        self.read_calls().credential_queries.clone()
    }

    /// Id lists passed to `find_by_ids`, in call order.
    pub fn device_queries(&self) -> Vec<Vec<DeviceId>> {
        self.read_calls().device_queries.clone()
    }

    pub fn expire_updates(&self) -> Vec<(SubscriptionId, Timestamp)> {
        self.read_calls().expire_updates.clone()
    }

    pub fn status_updates(&self) -> Vec<(SubscriptionId, SubscriptionStatus)> {
        self.read_calls().status_updates.clone()
    }

    /// Total writes of either kind.
    pub fn write_count(&self) -> usize {
        let calls = self.read_calls();
        calls.expire_updates.len() + calls.status_updates.len()
    }

    fn read_tables(&self) -> std::sync::RwLockReadGuard<'_, Tables> {
        self.tables.read().expect("InMemoryStore: tables lock poisoned")
    }

    fn write_tables(&self) -> std::sync::RwLockWriteGuard<'_, Tables> {
        self.tables.write().expect("InMemoryStore: tables write lock poisoned")
    }

    fn read_faults(&self) -> std::sync::RwLockReadGuard<'_, Faults> {
        self.faults.read().expect("InMemoryStore: faults lock poisoned")
    }

    fn write_faults(&self) -> std::sync::RwLockWriteGuard<'_, Faults> {
        self.faults.write().expect("InMemoryStore: faults write lock poisoned")
    }

    fn read_calls(&self) -> std::sync::RwLockReadGuard<'_, CallLog> {
        self.calls.read().expect("InMemoryStore: calls lock poisoned")
    }

    fn write_calls(&self) -> std::sync::RwLockWriteGuard<'_, CallLog> {
        self.calls.write().expect("InMemoryStore: calls write lock poisoned")
    }

    fn check_update_fault(&self, id: SubscriptionId) -> Result<(), DomainError> {
        if self.read_faults().updates.contains(&id) {
            return Err(DomainError::database("injected update failure")
                .with_detail("subscription_id", id.to_string()));
        }
        Ok(())
    }

    fn modify(&self, id: SubscriptionId, apply: impl FnOnce(&mut Subscription)) {
        if let Some(sub) = self.write_tables().subscriptions.iter_mut().find(|s| s.id == id) {
            apply(sub);
        }
    }
}

#[async_trait]
impl SubscriptionRepository for InMemoryStore {
    async fn find_expired(&self, limit: u32) -> Result<Vec<Subscription>, DomainError> {
        if self.read_faults().fetch {
            return Err(DomainError::database("injected fetch failure"));
        }

        let now = Timestamp::now();
        let tables = self.read_tables();
        let mut expired: Vec<Subscription> = tables
            .subscriptions
            .iter()
            .filter(|s| s.is_eligible_at(&now))
            .cloned()
            .collect();
        drop(tables);
        expired.sort_by_key(|s| s.id);
        expired.truncate(limit as usize);
        Ok(expired)
    }

    async fn set_expire_date(
        &self,
        id: SubscriptionId,
        expire_date: Timestamp,
    ) -> Result<(), DomainError> {
        self.check_update_fault(id)?;
        self.write_calls().expire_updates.push((id, expire_date));
        self.modify(id, |s| s.expire_date = expire_date);
        Ok(())
    }

    async fn set_status(
        &self,
        id: SubscriptionId,
        status: SubscriptionStatus,
    ) -> Result<(), DomainError> {
        self.check_update_fault(id)?;
        self.write_calls().status_updates.push((id, status));
        self.modify(id, |s| s.status = status);
        Ok(())
    }
}

#[async_trait]
impl CredentialReader for InMemoryStore {
    async fn find_by_application_ids(
        &self,
        ids: &[ApplicationId],
    ) -> Result<Vec<ApplicationCredential>, DomainError> {
        self.write_calls().credential_queries.push(ids.to_vec());
        if self.read_faults().credentials {
            return Err(DomainError::database("injected credential lookup failure"));
        }

        let wanted: HashSet<&ApplicationId> = ids.iter().collect();
        let tables = self.read_tables();
        let mut found: Vec<ApplicationCredential> = tables
            .credentials
            .iter()
            .filter(|c| wanted.contains(&c.application_id))
            .cloned()
            .collect();
        drop(tables);
        found.sort_by_key(|c| c.id);
        Ok(found)
    }
}

#[async_trait]
impl DeviceReader for InMemoryStore {
    async fn find_by_ids(&self, ids: &[DeviceId]) -> Result<Vec<Device>, DomainError> {
        self.write_calls().device_queries.push(ids.to_vec());
        if self.read_faults().devices {
            return Err(DomainError::database("injected device lookup failure"));
        }

        let wanted: HashSet<&DeviceId> = ids.iter().collect();
        let tables = self.read_tables();
        Ok(tables
            .devices
            .iter()
            .filter(|d| wanted.contains(&d.id))
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::CredentialId;
    use crate::domain::subscription::{Platform, Receipt};

    fn subscription(id: u64, status: SubscriptionStatus, expire_date: Timestamp) -> Subscription {
        Subscription {
            id: SubscriptionId::new(id),
            device_id: DeviceId::new(20),
            application_id: ApplicationId::new(10),
            receipt: Receipt::new("AB1234"),
            status,
            expire_date,
        }
    }

    #[tokio::test]
    async fn find_expired_returns_active_lapsed_in_id_order() {
        let past = Timestamp::now().minus_days(1);
        let future = Timestamp::now().add_days(1);
        let store = InMemoryStore::new()
            .with_subscription(subscription(3, SubscriptionStatus::Active, past))
            .with_subscription(subscription(1, SubscriptionStatus::Active, past))
            .with_subscription(subscription(2, SubscriptionStatus::Inactive, past))
            .with_subscription(subscription(4, SubscriptionStatus::Active, future));

        let expired = store.find_expired(100).await.unwrap();
        let ids: Vec<u64> = expired.iter().map(|s| s.id.as_u64()).collect();

        assert_eq!(ids, vec![1, 3]);
    }

    #[tokio::test]
    async fn find_expired_respects_limit() {
        let past = Timestamp::now().minus_days(1);
        let store = InMemoryStore::new()
            .with_subscription(subscription(1, SubscriptionStatus::Active, past))
            .with_subscription(subscription(2, SubscriptionStatus::Active, past));

        assert_eq!(store.find_expired(1).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn updates_modify_stored_subscription() {
        let past = Timestamp::now().minus_days(1);
        let renewed = Timestamp::now().add_days(30);
        let store = InMemoryStore::new()
            .with_subscription(subscription(1, SubscriptionStatus::Active, past))
            .with_subscription(subscription(2, SubscriptionStatus::Active, past));

        store.set_expire_date(SubscriptionId::new(1), renewed).await.unwrap();
        store
            .set_status(SubscriptionId::new(2), SubscriptionStatus::Inactive)
            .await
            .unwrap();

        assert_eq!(store.subscription(SubscriptionId::new(1)).unwrap().expire_date, renewed);
        assert_eq!(
            store.subscription(SubscriptionId::new(2)).unwrap().status,
            SubscriptionStatus::Inactive
        );
        assert_eq!(store.write_count(), 2);
    }

    #[tokio::test]
    async fn injected_update_failure_writes_nothing() {
        let past = Timestamp::now().minus_days(1);
        let store = InMemoryStore::new()
            .with_subscription(subscription(1, SubscriptionStatus::Active, past))
            .fail_updates_for(SubscriptionId::new(1));

        let result = store
            .set_status(SubscriptionId::new(1), SubscriptionStatus::Inactive)
            .await;

        assert!(result.is_err());
        assert_eq!(store.write_count(), 0);
        assert!(store.subscription(SubscriptionId::new(1)).unwrap().status.is_active());
    }

    #[tokio::test]
    async fn lookups_filter_by_id_and_record_queries() {
        let store = InMemoryStore::new()
            .with_credential(ApplicationCredential::new(
                CredentialId::new(1),
                ApplicationId::new(10),
                Platform::Ios,
                "u",
                "p",
            ))
            .with_credential(ApplicationCredential::new(
                CredentialId::new(2),
                ApplicationId::new(11),
                Platform::Android,
                "u",
                "p",
            ))
            .with_device(Device {
                id: DeviceId::new(20),
                uid: "uid-20".into(),
                platform: "ios".into(),
                language: "en".into(),
            });

        let creds = store
            .find_by_application_ids(&[ApplicationId::new(11)])
            .await
            .unwrap();
        let devices = store.find_by_ids(&[DeviceId::new(20), DeviceId::new(21)]).await.unwrap();

        assert_eq!(creds.len(), 1);
        assert_eq!(creds[0].application_id, ApplicationId::new(11));
        assert_eq!(devices.len(), 1);
        assert_eq!(store.credential_queries(), vec![vec![ApplicationId::new(11)]]);
        assert_eq!(
            store.device_queries(),
            vec![vec![DeviceId::new(20), DeviceId::new(21)]]
        );
    }

    #[tokio::test]
    async fn credentials_come_back_in_id_order() {
        let store = InMemoryStore::new()
            .with_credential(ApplicationCredential::new(
                CredentialId::new(9),
                ApplicationId::new(10),
                Platform::Android,
                "u",
                "p",
            ))
            .with_credential(ApplicationCredential::new(
                CredentialId::new(4),
                ApplicationId::new(10),
                Platform::Ios,
                "u",
                "p",
            ));

        let creds = store
            .find_by_application_ids(&[ApplicationId::new(10)])
            .await
            .unwrap();

        let ids: Vec<CredentialId> = creds.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![CredentialId::new(4), CredentialId::new(9)]);
    }

    #[tokio::test]
    async fn injected_lookup_failures_surface_as_errors() {
        let store = InMemoryStore::new().fail_credentials().fail_devices();

        assert!(store.find_by_application_ids(&[]).await.is_err());
        assert!(store.find_by_ids(&[]).await.is_err());
    }

    #[tokio::test]
    async fn injected_fetch_failure_surfaces_as_error() {
        let store = InMemoryStore::new().fail_fetch();
        assert!(store.find_expired(10).await.is_err());
    }
}
