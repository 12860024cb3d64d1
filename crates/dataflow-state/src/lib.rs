//! dataflow-state: capture and replication-set state for the scheduler.
//!
//! # Architecture
//!
//! Capture membership and table ownership are maintained by external
//! subsystems. This crate defines the shared data model and the two
//! snapshot interfaces schedulers read from:
//!
//! ```text
//! membership subsystem ──► CaptureRegistry      ──► CaptureSnapshot
//! scheduling runtime   ──► ReplicationSetStore  ──► ReplicationSnapshot
//! ```
//!
//! Snapshots are ordered maps so that identical inputs always iterate in
//! the same order.

pub mod error;
pub mod store;
pub mod types;

pub use error::{StateError, StateResult};
pub use store::{CaptureRegistry, MemoryCaptureRegistry, MemoryReplicationStore, ReplicationSetStore};
pub use types::*;
