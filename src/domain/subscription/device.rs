//! Device entity.

use crate::domain::foundation::DeviceId;

/// A registered device. Read-only from the worker's perspective.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Device {
    pub id: DeviceId,
    pub uid: String,
    pub platform: String,
    pub language: String,
}
