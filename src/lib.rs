//! Subscription Worker - Expired subscription reconciliation
//!
//! Each pass fetches active subscriptions whose term has lapsed, re-validates
//! their receipts with the billing gateway of the issuing platform, persists
//! the outcome and announces it on the notification bus.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
