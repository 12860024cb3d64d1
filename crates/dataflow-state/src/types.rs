//! Domain types for captures and replicated tables.
//!
//! A capture is a worker process that can host replication duty for tables.
//! A replication set records which captures currently serve one table.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{StateError, StateResult};

/// Identifier of a replicated table.
pub type TableId = i64;

/// Identifier of a capture (worker process).
pub type CaptureId = String;

/// Point-in-time view of all known captures, ordered by id.
pub type CaptureSnapshot = BTreeMap<CaptureId, Capture>;

/// Point-in-time view of all replication sets, ordered by table id.
pub type ReplicationSnapshot = BTreeMap<TableId, ReplicationSet>;

// ── Capture ───────────────────────────────────────────────────────

/// Lifecycle state of a capture as reported by the membership subsystem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CaptureState {
    /// Joined but not yet reporting its tables.
    Idle,
    /// Serving tables normally.
    Ready,
    /// Draining before shutdown.
    Stopping,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Capture {
    pub id: CaptureId,
    pub address: String,
    pub state: CaptureState,
}

impl Capture {
    pub fn new(id: impl Into<CaptureId>, address: impl Into<String>, state: CaptureState) -> Self {
        Self {
            id: id.into(),
            address: address.into(),
            state,
        }
    }

    pub fn is_stopping(&self) -> bool {
        self.state == CaptureState::Stopping
    }
}

// ── Replication set ───────────────────────────────────────────────

/// Current primary/secondary ownership of one table.
///
/// Either holder may be absent. When both are present they differ.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplicationSet {
    pub table_id: TableId,
    pub primary: Option<CaptureId>,
    pub secondary: Option<CaptureId>,
}

impl ReplicationSet {
    pub fn new(
        table_id: TableId,
        primary: Option<CaptureId>,
        secondary: Option<CaptureId>,
    ) -> StateResult<Self> {
        if let (Some(p), Some(s)) = (&primary, &secondary) {
            if p == s {
                return Err(StateError::InvalidReplicationSet {
                    table_id,
                    reason: format!("primary and secondary are both {p}"),
                });
            }
        }
        Ok(Self {
            table_id,
            primary,
            secondary,
        })
    }

    /// A table served by a single primary capture.
    pub fn with_primary(table_id: TableId, primary: impl Into<CaptureId>) -> Self {
        Self {
            table_id,
            primary: Some(primary.into()),
            secondary: None,
        }
    }

    /// Captures currently holding this table, primary first.
    pub fn captures(&self) -> impl Iterator<Item = &CaptureId> {
        self.primary.iter().chain(self.secondary.iter())
    }

    pub fn is_served_by(&self, capture_id: &str) -> bool {
        self.captures().any(|c| c == capture_id)
    }
}
