//! The scheduler interface driven by the control loop.

use dataflow_state::{CaptureSnapshot, ReplicationSnapshot, TableId};

use crate::task::ScheduleTask;

/// A scheduler turns a view of the cluster into schedule tasks.
///
/// `schedule` is invoked serially by a single owner, once per control loop
/// tick, and may mutate the scheduler's own state between rounds.
pub trait Scheduler: Send {
    fn name(&self) -> &'static str;

    fn schedule(
        &mut self,
        current_tables: &[TableId],
        captures: &CaptureSnapshot,
        replications: &ReplicationSnapshot,
    ) -> Vec<ScheduleTask>;
}
