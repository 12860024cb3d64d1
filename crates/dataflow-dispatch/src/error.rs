//! Dispatch error types.

use thiserror::Error;

use crate::rpc::RpcError;

pub type DispatchResult<T> = Result<T, DispatchError>;

/// Errors returned by the task dispatcher.
///
/// `dispatch_task` only ever returns the two phase wrappers; the other
/// variants appear as their causes.
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("executor pre-dispatch failed: {0}")]
    PreDispatchFailed(#[source] Box<DispatchError>),

    #[error("executor confirm-dispatch failed: {0}")]
    ConfirmDispatchFailed(#[source] Box<DispatchError>),

    #[error(transparent)]
    Rpc(#[from] RpcError),

    #[error("dispatch cancelled")]
    Cancelled,

    #[error("deadline exceeded: {0}")]
    DeadlineExceeded(&'static str),

    /// A uniqueness guarantee was broken somewhere else; nothing on this
    /// path can be trusted any more and the owning process should stop.
    #[error("unrecoverable invariant violation: {0}")]
    InvariantViolation(String),
}

impl DispatchError {
    pub(crate) fn pre_dispatch(err: DispatchError) -> Self {
        DispatchError::PreDispatchFailed(Box::new(err))
    }

    pub(crate) fn confirm_dispatch(err: DispatchError) -> Self {
        DispatchError::ConfirmDispatchFailed(Box::new(err))
    }

    /// The innermost error, skipping phase wrappers.
    pub fn root(&self) -> &DispatchError {
        match self {
            DispatchError::PreDispatchFailed(inner) | DispatchError::ConfirmDispatchFailed(inner) => {
                inner.root()
            }
            other => other,
        }
    }

    /// True if an invariant violation is anywhere in the chain.
    pub fn is_fatal(&self) -> bool {
        matches!(self.root(), DispatchError::InvariantViolation(_))
    }

    /// The RPC failure at the root of the chain, if that is what it was.
    pub fn rpc_error(&self) -> Option<&RpcError> {
        match self.root() {
            DispatchError::Rpc(e) => Some(e),
            _ => None,
        }
    }
}
