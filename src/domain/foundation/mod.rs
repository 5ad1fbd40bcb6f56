//! Foundation module - Shared domain primitives.
//!
//! Contains identifiers, the timestamp value object and the error types
//! that the ports and adapters share.

mod errors;
mod ids;
mod timestamp;

pub use errors::{DomainError, ErrorCode};
pub use ids::{ApplicationId, CredentialId, DeviceId, SubscriptionId};
pub use timestamp::{Timestamp, TimestampParseError, GATEWAY_DATETIME_FORMAT};
