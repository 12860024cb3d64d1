//! Schedule tasks produced by a scheduling round.
//!
//! Tasks are transient: they are handed to the runtime that issues the
//! corresponding RPCs and are never persisted.

use dataflow_state::{CaptureId, TableId};

/// Move one table to a destination capture.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MoveTable {
    pub table_id: TableId,
    pub destination: CaptureId,
}

impl MoveTable {
    pub fn new(table_id: TableId, destination: impl Into<CaptureId>) -> Self {
        Self {
            table_id,
            destination: destination.into(),
        }
    }
}

/// A single scheduling decision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScheduleTask {
    MoveTable(MoveTable),
}

impl ScheduleTask {
    /// The table this task operates on.
    pub fn table_id(&self) -> TableId {
        match self {
            ScheduleTask::MoveTable(m) => m.table_id,
        }
    }
}

impl From<MoveTable> for ScheduleTask {
    fn from(m: MoveTable) -> Self {
        ScheduleTask::MoveTable(m)
    }
}
