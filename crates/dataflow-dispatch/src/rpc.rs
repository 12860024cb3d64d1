//! Executor RPC capability.
//!
//! The dispatcher talks to executors through [`ExecutorClient`], a single
//! `send` operation over a closed request enum. Failures come back as
//! [`RpcError`]: either a structured status with a [`Code`], or an opaque
//! transport failure with no code at all. Any transport that can produce
//! these (the tonic conversions below cover gRPC) is substitutable.

use std::fmt;

use thiserror::Error;

/// Status codes an executor or the RPC layer can return.
///
/// Mirrors the canonical gRPC codes, minus `OK`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Code {
    Cancelled,
    Unknown,
    InvalidArgument,
    DeadlineExceeded,
    NotFound,
    AlreadyExists,
    PermissionDenied,
    ResourceExhausted,
    FailedPrecondition,
    Aborted,
    OutOfRange,
    Unimplemented,
    Internal,
    Unavailable,
    DataLoss,
    Unauthenticated,
}

impl Code {
    pub fn as_str(&self) -> &'static str {
        match self {
            Code::Cancelled => "Canceled",
            Code::Unknown => "Unknown",
            Code::InvalidArgument => "InvalidArgument",
            Code::DeadlineExceeded => "DeadlineExceeded",
            Code::NotFound => "NotFound",
            Code::AlreadyExists => "AlreadyExists",
            Code::PermissionDenied => "PermissionDenied",
            Code::ResourceExhausted => "ResourceExhausted",
            Code::FailedPrecondition => "FailedPrecondition",
            Code::Aborted => "Aborted",
            Code::OutOfRange => "OutOfRange",
            Code::Unimplemented => "Unimplemented",
            Code::Internal => "Internal",
            Code::Unavailable => "Unavailable",
            Code::DataLoss => "DataLoss",
            Code::Unauthenticated => "Unauthenticated",
        }
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<tonic::Code> for Code {
    fn from(code: tonic::Code) -> Self {
        match code {
            tonic::Code::Cancelled => Code::Cancelled,
            tonic::Code::InvalidArgument => Code::InvalidArgument,
            tonic::Code::DeadlineExceeded => Code::DeadlineExceeded,
            tonic::Code::NotFound => Code::NotFound,
            tonic::Code::AlreadyExists => Code::AlreadyExists,
            tonic::Code::PermissionDenied => Code::PermissionDenied,
            tonic::Code::ResourceExhausted => Code::ResourceExhausted,
            tonic::Code::FailedPrecondition => Code::FailedPrecondition,
            tonic::Code::Aborted => Code::Aborted,
            tonic::Code::OutOfRange => Code::OutOfRange,
            tonic::Code::Unimplemented => Code::Unimplemented,
            tonic::Code::Internal => Code::Internal,
            tonic::Code::Unavailable => Code::Unavailable,
            tonic::Code::DataLoss => Code::DataLoss,
            tonic::Code::Unauthenticated => Code::Unauthenticated,
            // An error status carrying OK is malformed.
            tonic::Code::Ok | tonic::Code::Unknown => Code::Unknown,
        }
    }
}

/// A failed executor RPC.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RpcError {
    #[error("rpc error: code = {code} desc = {message}")]
    Status { code: Code, message: String },

    /// Failure below the RPC layer; the request may or may not have arrived.
    #[error("transport error: {0}")]
    Transport(String),
}

impl RpcError {
    pub fn status(code: Code, message: impl Into<String>) -> Self {
        RpcError::Status {
            code,
            message: message.into(),
        }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        RpcError::Transport(message.into())
    }

    /// The structured status code, if any.
    pub fn code(&self) -> Option<Code> {
        match self {
            RpcError::Status { code, .. } => Some(*code),
            RpcError::Transport(_) => None,
        }
    }
}

impl From<tonic::Status> for RpcError {
    fn from(status: tonic::Status) -> Self {
        RpcError::Status {
            code: status.code().into(),
            message: status.message().to_string(),
        }
    }
}

impl From<tonic::transport::Error> for RpcError {
    fn from(err: tonic::transport::Error) -> Self {
        RpcError::Transport(err.to_string())
    }
}

// ── Requests ──────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProjectInfo {
    pub tenant_id: String,
    pub project_id: String,
}

impl ProjectInfo {
    pub fn new(tenant_id: impl Into<String>, project_id: impl Into<String>) -> Self {
        Self {
            tenant_id: tenant_id.into(),
            project_id: project_id.into(),
        }
    }
}

/// Phase one: reserve a worker slot on the executor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreDispatchTaskRequest {
    pub project_info: ProjectInfo,
    pub task_type_id: i64,
    pub task_config: Vec<u8>,
    pub master_id: String,
    pub worker_id: String,
    /// Fresh for every attempt.
    pub request_id: String,
}

/// Phase two: start the worker reserved by `request_id`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmDispatchTaskRequest {
    pub worker_id: String,
    pub request_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecutorRequest {
    PreDispatchTask(PreDispatchTaskRequest),
    ConfirmDispatchTask(ConfirmDispatchTaskRequest),
}

impl ExecutorRequest {
    /// Command name for logs.
    pub fn command(&self) -> &'static str {
        match self {
            ExecutorRequest::PreDispatchTask(_) => "PreDispatchTask",
            ExecutorRequest::ConfirmDispatchTask(_) => "ConfirmDispatchTask",
        }
    }

    pub fn request_id(&self) -> &str {
        match self {
            ExecutorRequest::PreDispatchTask(r) => &r.request_id,
            ExecutorRequest::ConfirmDispatchTask(r) => &r.request_id,
        }
    }
}

/// Acknowledgement; both dispatch RPCs carry no response payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ExecutorResponse;

/// Sends typed requests to an executor.
///
/// Shared by every concurrent dispatch, so implementations must tolerate
/// concurrent use.
#[tonic::async_trait]
pub trait ExecutorClient: Send + Sync {
    async fn send(&self, request: ExecutorRequest) -> Result<ExecutorResponse, RpcError>;
}
