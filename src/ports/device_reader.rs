//! Device reader port.

use async_trait::async_trait;

use crate::domain::foundation::{DeviceId, DomainError};
use crate::domain::subscription::Device;

/// Read-only access to registered devices.
#[async_trait]
pub trait DeviceReader: Send + Sync {
    /// Devices with the given ids. Unknown ids are simply absent from the
    /// result.
    async fn find_by_ids(&self, ids: &[DeviceId]) -> Result<Vec<Device>, DomainError>;
}
