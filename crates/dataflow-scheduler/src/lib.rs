//! dataflow-scheduler: table balance scheduling.
//!
//! Decides *when* replicated tables should be moved between captures and
//! turns the external planner's decisions into schedule tasks.
//!
//! # Architecture
//!
//! ```text
//! BalanceLoop (tokio interval)
//!   ├── CaptureRegistry      → CaptureSnapshot
//!   ├── ReplicationSetStore  → ReplicationSnapshot
//!   └── Scheduler (BalanceScheduler)
//!       ├── cool-down gate / force_balance hysteresis
//!       ├── stopping-capture safety check
//!       └── MoveTablePlanner (external) → ScheduleTask::MoveTable
//! ```

pub mod balance;
pub mod error;
pub mod planner;
pub mod runner;
pub mod scheduler;
pub mod task;

pub use balance::BalanceScheduler;
pub use error::{SchedulerError, SchedulerResult};
pub use planner::MoveTablePlanner;
pub use runner::BalanceLoop;
pub use scheduler::Scheduler;
pub use task::{MoveTable, ScheduleTask};
