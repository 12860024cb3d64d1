//! dataflow-dispatch: two-phase worker dispatch to executors.
//!
//! Creates workers on remote executors through a reserve/confirm exchange,
//! retrying the reservation on transient failures and telling the caller
//! which failures are certain and which leave the executor's state unknown.
//!
//! # Architecture
//!
//! ```text
//! TaskDispatcher::dispatch_task(ctx, args, start_worker, abort_worker)
//!   ├── PreDispatchTask (fresh request id per attempt)
//!   │   ├── retryable code → wait retry interval, try again
//!   │   ├── Aborted / transport error → fail
//!   │   └── AlreadyExists → InvariantViolation (fatal)
//!   ├── start_worker()
//!   └── ConfirmDispatchTask (sent once)
//!       ├── Aborted / NotFound → abort_worker(err), fail
//!       └── anything else → warn, report success
//! ```

pub mod context;
pub mod dispatcher;
pub mod error;
pub mod rpc;

pub use context::DispatchContext;
pub use dispatcher::{
    DispatchOutcome, DispatchTaskArgs, PRE_DISPATCH_TASK_RETRY_INTERVAL, TaskDispatcher,
};
pub use error::{DispatchError, DispatchResult};
pub use rpc::{
    Code, ConfirmDispatchTaskRequest, ExecutorClient, ExecutorRequest, ExecutorResponse,
    PreDispatchTaskRequest, ProjectInfo, RpcError,
};
