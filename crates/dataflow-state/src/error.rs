//! Error types for the capture and replication-set state.

use thiserror::Error;

use crate::types::{CaptureId, TableId};

/// Result type alias for state operations.
pub type StateResult<T> = Result<T, StateError>;

#[derive(Debug, Error)]
pub enum StateError {
    #[error("invalid replication set for table {table_id}: {reason}")]
    InvalidReplicationSet { table_id: TableId, reason: String },

    #[error("capture not found: {0}")]
    CaptureNotFound(CaptureId),

    #[error("lock poisoned: {0}")]
    Lock(String),
}
