//! sessia-audit
//!
//! Structured audit events. Each mutating API action emits an event via
//! `tracing` (CloudWatch) and persists it as an append-only document in
//! the audit collection.

pub mod error;
pub mod events;
pub mod store;
