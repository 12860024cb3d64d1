//! Snapshot collaborators and their in-memory implementations.
//!
//! The membership subsystem owns capture state and the scheduling runtime
//! owns replication sets. Schedulers only ever see point-in-time snapshots
//! through [`CaptureRegistry`] and [`ReplicationSetStore`].
//!
//! The memory-backed implementations are `Clone` (backed by `Arc<RwLock<_>>`)
//! and can be shared between the owning subsystem and the control loop.

use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::debug;

use crate::error::{StateError, StateResult};
use crate::types::*;

/// Read-only view of the captures known to the cluster.
pub trait CaptureRegistry: Send + Sync {
    fn captures(&self) -> StateResult<CaptureSnapshot>;
}

/// Read-only view of the current replication sets.
pub trait ReplicationSetStore: Send + Sync {
    fn replications(&self) -> StateResult<ReplicationSnapshot>;
}

fn read<T>(lock: &RwLock<T>) -> StateResult<RwLockReadGuard<'_, T>> {
    lock.read().map_err(|e| StateError::Lock(e.to_string()))
}

fn write<T>(lock: &RwLock<T>) -> StateResult<RwLockWriteGuard<'_, T>> {
    lock.write().map_err(|e| StateError::Lock(e.to_string()))
}

// ── Captures ──────────────────────────────────────────────────────

#[derive(Clone, Default)]
pub struct MemoryCaptureRegistry {
    captures: Arc<RwLock<CaptureSnapshot>>,
}

impl MemoryCaptureRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a capture.
    pub fn upsert(&self, capture: Capture) -> StateResult<()> {
        let mut captures = write(&self.captures)?;
        debug!(capture_id = %capture.id, state = ?capture.state, "capture stored");
        captures.insert(capture.id.clone(), capture);
        Ok(())
    }

    /// Change the state of a known capture.
    pub fn set_state(&self, capture_id: &str, state: CaptureState) -> StateResult<()> {
        let mut captures = write(&self.captures)?;
        let capture = captures
            .get_mut(capture_id)
            .ok_or_else(|| StateError::CaptureNotFound(capture_id.to_string()))?;
        capture.state = state;
        debug!(%capture_id, ?state, "capture state changed");
        Ok(())
    }

    /// Remove a capture. Returns true if it existed.
    pub fn remove(&self, capture_id: &str) -> StateResult<bool> {
        let mut captures = write(&self.captures)?;
        Ok(captures.remove(capture_id).is_some())
    }
}

impl CaptureRegistry for MemoryCaptureRegistry {
    fn captures(&self) -> StateResult<CaptureSnapshot> {
        Ok(read(&self.captures)?.clone())
    }
}

// ── Replication sets ──────────────────────────────────────────────

#[derive(Clone, Default)]
pub struct MemoryReplicationStore {
    replications: Arc<RwLock<ReplicationSnapshot>>,
}

impl MemoryReplicationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the replication set of a table.
    pub fn upsert(&self, replication: ReplicationSet) -> StateResult<()> {
        let mut replications = write(&self.replications)?;
        debug!(table_id = replication.table_id, "replication set stored");
        replications.insert(replication.table_id, replication);
        Ok(())
    }

    /// Remove a table. Returns true if it existed.
    pub fn remove(&self, table_id: TableId) -> StateResult<bool> {
        let mut replications = write(&self.replications)?;
        Ok(replications.remove(&table_id).is_some())
    }
}

impl ReplicationSetStore for MemoryReplicationStore {
    fn replications(&self) -> StateResult<ReplicationSnapshot> {
        Ok(read(&self.replications)?.clone())
    }
}
