//! Deadline and cancellation for a single dispatch call.
//!
//! Every blocking step of a dispatch (RPC sends, retry waits) observes the
//! same [`DispatchContext`]: an optional absolute deadline and a cooperative
//! cancellation token owned by the caller.

use std::future::Future;
use std::time::Duration;

use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use crate::error::{DispatchError, DispatchResult};

#[derive(Debug, Clone, Default)]
pub struct DispatchContext {
    deadline: Option<Instant>,
    cancel: CancellationToken,
}

impl DispatchContext {
    /// No deadline and a fresh, never-cancelled token.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Deadline relative to now. A timeout too far out to represent leaves
    /// the call without a deadline.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.deadline = Instant::now().checked_add(timeout);
        self
    }

    /// Observe a caller-owned token instead of the default one.
    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn cancellation(&self) -> &CancellationToken {
        &self.cancel
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Fail if the call was cancelled or its deadline has passed.
    pub fn check(&self) -> DispatchResult<()> {
        if self.cancel.is_cancelled() {
            return Err(DispatchError::Cancelled);
        }
        if let Some(deadline) = self.deadline {
            if Instant::now() >= deadline {
                return Err(DispatchError::DeadlineExceeded("deadline passed"));
            }
        }
        Ok(())
    }

    /// Whether waiting `wait` from now would overrun the deadline. A wait
    /// that cannot be represented as an instant overruns any deadline.
    pub fn would_exceed_deadline(&self, wait: Duration) -> bool {
        self.deadline.is_some_and(|deadline| {
            Instant::now()
                .checked_add(wait)
                .is_none_or(|end| end > deadline)
        })
    }

    /// Resolves once the call is cancelled.
    pub async fn cancelled(&self) {
        self.cancel.cancelled().await
    }

    /// Run `fut` bounded by the deadline, if any. `None` means the deadline
    /// elapsed first.
    pub async fn within_deadline<F: Future>(&self, fut: F) -> Option<F::Output> {
        match self.deadline {
            Some(deadline) => tokio::time::timeout_at(deadline, fut).await.ok(),
            None => Some(fut.await),
        }
    }
}
