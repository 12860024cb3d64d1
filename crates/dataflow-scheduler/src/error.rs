//! Scheduler error types.

use thiserror::Error;

/// Errors that can occur while driving scheduling rounds.
#[derive(Debug, Error)]
pub enum SchedulerError {
    #[error("state error: {0}")]
    State(#[from] dataflow_state::StateError),

    #[error("schedule task consumer has gone away")]
    TaskChannelClosed,

    #[error("tick interval must be greater than zero")]
    ZeroTickInterval,
}

pub type SchedulerResult<T> = Result<T, SchedulerError>;
