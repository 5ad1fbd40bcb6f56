//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, timestamps, errors)
//! - `subscription` - Subscriptions, credentials, devices, validation outcomes

pub mod foundation;
pub mod subscription;
