//! Two-phase task dispatch.
//!
//! 1. **PreDispatchTask** reserves a worker slot on the executor. Retried at
//!    a fixed interval on retryable failures, with a fresh request id per
//!    attempt, until it succeeds, fails for good, or the deadline would be
//!    overrun by the next wait.
//! 2. **ConfirmDispatchTask** starts the reserved worker. Never retried:
//!    the executor does not make it idempotent.
//!
//! Between the phases the caller's `start_worker` hook runs, so that the
//! caller is already expecting heartbeats when the worker comes up.
//! `abort_worker` runs only when the failure is known to have happened on
//! the executor side.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, error, warn};
use uuid::Uuid;

use dataflow_core::{ConfigResult, DispatchConfig};

use crate::context::DispatchContext;
use crate::error::{DispatchError, DispatchResult};
use crate::rpc::{
    Code, ConfirmDispatchTaskRequest, ExecutorClient, ExecutorRequest, ExecutorResponse,
    PreDispatchTaskRequest, ProjectInfo, RpcError,
};

pub const PRE_DISPATCH_TASK_RETRY_INTERVAL: Duration = Duration::from_secs(1);

/// Everything needed to create one worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchTaskArgs {
    pub project_info: ProjectInfo,
    pub worker_id: String,
    pub master_id: String,
    pub worker_type: i64,
    pub worker_config: Vec<u8>,
}

/// How a ConfirmDispatchTask call ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    Success,
    /// The executor itself rejected the confirmation; the worker will not run.
    GuaranteedFailure(RpcError),
    /// The call failed somewhere the executor's state cannot be inferred from.
    UndeterminedFailure(RpcError),
}

enum Attempt {
    Dispatched(String),
    Retry(DispatchError),
    Fail(DispatchError),
}

/// Drives the two-phase protocol against an [`ExecutorClient`].
///
/// Holds no per-call state, so one dispatcher can serve any number of
/// concurrent dispatches.
#[derive(Clone)]
pub struct TaskDispatcher {
    client: Arc<dyn ExecutorClient>,
    retry_interval: Duration,
}

impl TaskDispatcher {
    pub fn new(client: Arc<dyn ExecutorClient>) -> Self {
        Self {
            client,
            retry_interval: PRE_DISPATCH_TASK_RETRY_INTERVAL,
        }
    }

    pub fn with_retry_interval(mut self, retry_interval: Duration) -> Self {
        self.retry_interval = retry_interval;
        self
    }

    /// Build from the `[dispatch]` section of the engine config.
    pub fn from_config(client: Arc<dyn ExecutorClient>, config: &DispatchConfig) -> ConfigResult<Self> {
        Ok(Self::new(client).with_retry_interval(config.pre_dispatch_retry_interval()?))
    }

    pub fn retry_interval(&self) -> Duration {
        self.retry_interval
    }

    /// Create a worker on the executor.
    ///
    /// `start_worker` runs once, after PreDispatchTask succeeded and before
    /// ConfirmDispatchTask is sent. `abort_worker` runs at most once: with
    /// the unwrapped cause when PreDispatchTask fails, with the returned
    /// error when the confirmation is rejected. An undetermined confirmation
    /// is reported as success; the caller's heartbeat timeout covers it.
    pub async fn dispatch_task<S, A>(
        &self,
        ctx: &DispatchContext,
        args: &DispatchTaskArgs,
        start_worker: S,
        abort_worker: A,
    ) -> DispatchResult<()>
    where
        S: FnOnce(),
        A: FnOnce(&DispatchError),
    {
        let request_id = match self.pre_dispatch_task_with_retry(ctx, args).await {
            Ok(id) => id,
            Err(e) => {
                abort_worker(&e);
                return Err(DispatchError::pre_dispatch(e));
            }
        };

        start_worker();

        match self
            .confirm_dispatch_task(ctx, &request_id, &args.worker_id)
            .await
        {
            DispatchOutcome::Success => {
                debug!(worker_id = %args.worker_id, request_id = %request_id, "worker dispatched");
                Ok(())
            }
            DispatchOutcome::GuaranteedFailure(e) => {
                let err = DispatchError::confirm_dispatch(e.into());
                abort_worker(&err);
                Err(err)
            }
            DispatchOutcome::UndeterminedFailure(e) => {
                warn!(
                    worker_id = %args.worker_id,
                    request_id = %request_id,
                    error = %e,
                    "ConfirmDispatchTask encountered error, but the server's state is undetermined"
                );
                Ok(())
            }
        }
    }

    /// Run PreDispatchTask until it succeeds or fails for good. Returns the
    /// request id of the successful attempt.
    pub async fn pre_dispatch_task_with_retry(
        &self,
        ctx: &DispatchContext,
        args: &DispatchTaskArgs,
    ) -> DispatchResult<String> {
        loop {
            ctx.check()?;

            let err = match self.pre_dispatch_task_once(ctx, args).await {
                Attempt::Dispatched(request_id) => return Ok(request_id),
                Attempt::Fail(e) => return Err(e),
                Attempt::Retry(e) => e,
            };

            if ctx.would_exceed_deadline(self.retry_interval) {
                debug!(error = %err, "giving up PreDispatchTask before the deadline");
                return Err(DispatchError::DeadlineExceeded(
                    "would exceed deadline if waiting",
                ));
            }

            tokio::select! {
                _ = ctx.cancelled() => return Err(DispatchError::Cancelled),
                _ = tokio::time::sleep(self.retry_interval) => {}
            }
        }
    }

    async fn pre_dispatch_task_once(&self, ctx: &DispatchContext, args: &DispatchTaskArgs) -> Attempt {
        let request_id = Uuid::new_v4().to_string();
        let request = ExecutorRequest::PreDispatchTask(PreDispatchTaskRequest {
            project_info: args.project_info.clone(),
            task_type_id: args.worker_type,
            task_config: args.worker_config.clone(),
            master_id: args.master_id.clone(),
            worker_id: args.worker_id.clone(),
            request_id: request_id.clone(),
        });

        let sent = tokio::select! {
            _ = ctx.cancelled() => return Attempt::Fail(DispatchError::Cancelled),
            sent = self.send(ctx, request) => sent,
        };
        let Some(result) = sent else {
            return Attempt::Fail(DispatchError::DeadlineExceeded(
                "PreDispatchTask did not complete in time",
            ));
        };

        let err = match result {
            Ok(_) => return Attempt::Dispatched(request_id),
            Err(e) => e,
        };

        match err.code() {
            // Not a status from the executor; not ours to retry.
            None => Attempt::Fail(err.into()),
            Some(Code::Aborted) => Attempt::Fail(err.into()),
            Some(Code::AlreadyExists) => {
                error!(
                    worker_id = %args.worker_id,
                    request_id = %request_id,
                    error = %err,
                    "PreDispatchTask reported a duplicate request id"
                );
                Attempt::Fail(DispatchError::InvariantViolation(format!(
                    "executor already has request {request_id}: {err}"
                )))
            }
            Some(_) => {
                warn!(
                    worker_id = %args.worker_id,
                    request_id = %request_id,
                    error = %err,
                    "PreDispatchTask encountered error, retrying"
                );
                Attempt::Retry(err.into())
            }
        }
    }

    /// Send ConfirmDispatchTask once and classify the result.
    ///
    /// Not interrupted by cancellation: once the worker may be starting, the
    /// answer is worth waiting for. The deadline still bounds the call, and
    /// running out of time leaves the outcome undetermined.
    pub async fn confirm_dispatch_task(
        &self,
        ctx: &DispatchContext,
        request_id: &str,
        worker_id: &str,
    ) -> DispatchOutcome {
        let request = ExecutorRequest::ConfirmDispatchTask(ConfirmDispatchTaskRequest {
            worker_id: worker_id.to_string(),
            request_id: request_id.to_string(),
        });

        let Some(result) = self.send(ctx, request).await else {
            return DispatchOutcome::UndeterminedFailure(RpcError::status(
                Code::DeadlineExceeded,
                "ConfirmDispatchTask did not complete in time",
            ));
        };

        match result {
            Ok(_) => DispatchOutcome::Success,
            Err(e) => match e.code() {
                Some(Code::Aborted | Code::NotFound) => DispatchOutcome::GuaranteedFailure(e),
                _ => DispatchOutcome::UndeterminedFailure(e),
            },
        }
    }

    /// One RPC, bounded by the deadline. `None` if the deadline hit first.
    async fn send(
        &self,
        ctx: &DispatchContext,
        request: ExecutorRequest,
    ) -> Option<Result<ExecutorResponse, RpcError>> {
        debug!(
            command = request.command(),
            request_id = request.request_id(),
            "sending executor request"
        );
        ctx.within_deadline(self.client.send(request)).await
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use tokio::time::Instant;
    use tokio_util::sync::CancellationToken;
    use tracing::{Event, Level, Subscriber};
    use tracing_subscriber::layer::{Context, SubscriberExt};
    use tracing_subscriber::{Layer, Registry};

    use super::*;

    type Reply = Result<ExecutorResponse, RpcError>;

    /// Replies from per-command scripts and records every request.
    /// An exhausted script answers Ok.
    #[derive(Default)]
    struct MockClient {
        pre_dispatch: Mutex<VecDeque<Reply>>,
        confirm: Mutex<VecDeque<Reply>>,
        sent: Mutex<Vec<ExecutorRequest>>,
    }

    impl MockClient {
        fn new(pre_dispatch: Vec<Reply>, confirm: Vec<Reply>) -> Arc<Self> {
            Arc::new(Self {
                pre_dispatch: Mutex::new(pre_dispatch.into()),
                confirm: Mutex::new(confirm.into()),
                sent: Mutex::default(),
            })
        }

        fn sent(&self) -> Vec<ExecutorRequest> {
            self.sent.lock().unwrap().clone()
        }

        fn pre_dispatch_ids(&self) -> Vec<String> {
            self.sent()
                .iter()
                .filter_map(|r| match r {
                    ExecutorRequest::PreDispatchTask(p) => Some(p.request_id.clone()),
                    _ => None,
                })
                .collect()
        }

        fn confirm_ids(&self) -> Vec<String> {
            self.sent()
                .iter()
                .filter_map(|r| match r {
                    ExecutorRequest::ConfirmDispatchTask(c) => Some(c.request_id.clone()),
                    _ => None,
                })
                .collect()
        }
    }

    #[tonic::async_trait]
    impl ExecutorClient for MockClient {
        async fn send(&self, request: ExecutorRequest) -> Result<ExecutorResponse, RpcError> {
            let script = match &request {
                ExecutorRequest::PreDispatchTask(_) => &self.pre_dispatch,
                ExecutorRequest::ConfirmDispatchTask(_) => &self.confirm,
            };
            let reply = script.lock().unwrap().pop_front();
            self.sent.lock().unwrap().push(request);
            reply.unwrap_or(Ok(ExecutorResponse))
        }
    }

    fn status(code: Code) -> Reply {
        Err(RpcError::status(code, "injected"))
    }

    fn args() -> DispatchTaskArgs {
        DispatchTaskArgs {
            project_info: ProjectInfo::new("tenant-1", "project-1"),
            worker_id: "worker-1".to_string(),
            master_id: "master-1".to_string(),
            worker_type: 3,
            worker_config: b"{\"partitions\":4}".to_vec(),
        }
    }

    /// Records hook invocations in order.
    #[derive(Default)]
    struct Hooks {
        calls: Mutex<Vec<&'static str>>,
        abort_errors: Mutex<Vec<String>>,
    }

    impl Hooks {
        fn calls(&self) -> Vec<&'static str> {
            self.calls.lock().unwrap().clone()
        }
    }

    async fn dispatch(
        dispatcher: &TaskDispatcher,
        ctx: &DispatchContext,
        hooks: &Hooks,
    ) -> DispatchResult<()> {
        dispatcher
            .dispatch_task(
                ctx,
                &args(),
                || hooks.calls.lock().unwrap().push("start"),
                |err| {
                    hooks.calls.lock().unwrap().push("abort");
                    hooks.abort_errors.lock().unwrap().push(err.to_string());
                },
            )
            .await
    }

    #[tokio::test(start_paused = true)]
    async fn successful_dispatch_confirms_the_reserved_request() {
        let client = MockClient::new(vec![], vec![]);
        let dispatcher = TaskDispatcher::new(client.clone());
        let hooks = Hooks::default();

        dispatch(&dispatcher, &DispatchContext::new(), &hooks)
            .await
            .unwrap();

        assert_eq!(hooks.calls(), vec!["start"]);
        let pre = client.pre_dispatch_ids();
        assert_eq!(pre.len(), 1);
        assert_eq!(client.confirm_ids(), pre);

        match &client.sent()[0] {
            ExecutorRequest::PreDispatchTask(req) => {
                assert_eq!(req.project_info, ProjectInfo::new("tenant-1", "project-1"));
                assert_eq!(req.task_type_id, 3);
                assert_eq!(req.master_id, "master-1");
                assert_eq!(req.worker_id, "worker-1");
            }
            other => panic!("unexpected first request {other:?}"),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn retryable_failure_retries_with_fresh_request_id() {
        let client = MockClient::new(vec![status(Code::Unavailable)], vec![]);
        let dispatcher = TaskDispatcher::new(client.clone());
        let hooks = Hooks::default();

        let start = Instant::now();
        dispatch(&dispatcher, &DispatchContext::new(), &hooks)
            .await
            .unwrap();

        assert_eq!(start.elapsed(), PRE_DISPATCH_TASK_RETRY_INTERVAL);
        let pre = client.pre_dispatch_ids();
        assert_eq!(pre.len(), 2);
        assert_ne!(pre[0], pre[1]);
        assert_eq!(client.confirm_ids(), vec![pre[1].clone()]);
        assert_eq!(hooks.calls(), vec!["start"]);
    }

    #[tokio::test(start_paused = true)]
    async fn gives_up_when_next_wait_would_pass_deadline() {
        let client = MockClient::new(
            vec![
                status(Code::Unavailable),
                status(Code::Unavailable),
                status(Code::Unavailable),
                status(Code::Unavailable),
            ],
            vec![],
        );
        let dispatcher = TaskDispatcher::new(client.clone());
        let hooks = Hooks::default();
        let ctx = DispatchContext::new().with_timeout(Duration::from_millis(2500));

        let start = Instant::now();
        let err = dispatch(&dispatcher, &ctx, &hooks).await.unwrap_err();

        assert_eq!(client.pre_dispatch_ids().len(), 3);
        assert_eq!(start.elapsed(), Duration::from_secs(2));
        assert!(matches!(err, DispatchError::PreDispatchFailed(_)));
        assert!(matches!(err.root(), DispatchError::DeadlineExceeded(_)));
        assert_eq!(hooks.calls(), vec!["abort"]);
        assert!(client.confirm_ids().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn aborted_pre_dispatch_is_not_retried() {
        let client = MockClient::new(vec![status(Code::Aborted)], vec![]);
        let dispatcher = TaskDispatcher::new(client.clone());
        let hooks = Hooks::default();

        let err = dispatch(&dispatcher, &DispatchContext::new(), &hooks)
            .await
            .unwrap_err();

        assert_eq!(client.sent().len(), 1);
        assert_eq!(err.rpc_error().and_then(RpcError::code), Some(Code::Aborted));
        assert_eq!(hooks.calls(), vec!["abort"]);
        // The hook sees the cause; the caller gets it wrapped.
        let abort_errors = hooks.abort_errors.lock().unwrap();
        assert_eq!(abort_errors[0], err.root().to_string());
        assert_eq!(
            err.to_string(),
            format!("executor pre-dispatch failed: {}", abort_errors[0])
        );
    }

    #[tokio::test(start_paused = true)]
    async fn transport_failure_on_pre_dispatch_is_not_retried() {
        let client = MockClient::new(vec![Err(RpcError::transport("connection refused"))], vec![]);
        let dispatcher = TaskDispatcher::new(client.clone());
        let hooks = Hooks::default();

        let err = dispatch(&dispatcher, &DispatchContext::new(), &hooks)
            .await
            .unwrap_err();

        assert_eq!(client.sent().len(), 1);
        assert!(matches!(err.rpc_error(), Some(RpcError::Transport(_))));
        assert!(!err.is_fatal());
        assert_eq!(hooks.calls(), vec!["abort"]);
    }

    #[tokio::test(start_paused = true)]
    async fn duplicate_request_id_is_fatal() {
        let client = MockClient::new(vec![status(Code::AlreadyExists)], vec![]);
        let dispatcher = TaskDispatcher::new(client.clone());
        let hooks = Hooks::default();

        let err = dispatch(&dispatcher, &DispatchContext::new(), &hooks)
            .await
            .unwrap_err();

        assert!(err.is_fatal());
        assert_eq!(client.sent().len(), 1);
        assert_eq!(hooks.calls(), vec!["abort"]);
    }

    #[tokio::test(start_paused = true)]
    async fn confirm_not_found_aborts_after_start() {
        let client = MockClient::new(vec![], vec![status(Code::NotFound)]);
        let dispatcher = TaskDispatcher::new(client.clone());
        let hooks = Hooks::default();

        let err = dispatch(&dispatcher, &DispatchContext::new(), &hooks)
            .await
            .unwrap_err();

        assert!(matches!(err, DispatchError::ConfirmDispatchFailed(_)));
        assert_eq!(err.rpc_error().and_then(RpcError::code), Some(Code::NotFound));
        assert_eq!(hooks.calls(), vec!["start", "abort"]);
    }

    #[tokio::test(start_paused = true)]
    async fn confirm_aborted_is_a_guaranteed_failure() {
        let client = MockClient::new(vec![], vec![status(Code::Aborted)]);
        let dispatcher = TaskDispatcher::new(client.clone());

        let outcome = dispatcher
            .confirm_dispatch_task(&DispatchContext::new(), "req-1", "worker-1")
            .await;
        assert_eq!(
            outcome,
            DispatchOutcome::GuaranteedFailure(RpcError::status(Code::Aborted, "injected"))
        );
    }

    #[tokio::test(start_paused = true)]
    async fn confirm_unavailable_is_undetermined() {
        let client = MockClient::new(vec![], vec![status(Code::Unavailable)]);
        let dispatcher = TaskDispatcher::new(client.clone());
        let hooks = Hooks::default();

        dispatch(&dispatcher, &DispatchContext::new(), &hooks)
            .await
            .unwrap();

        // Confirmation is never retried.
        assert_eq!(client.confirm_ids().len(), 1);
        assert_eq!(hooks.calls(), vec!["start"]);
    }

    struct WarnCounter(Arc<AtomicUsize>);

    impl<S: Subscriber> Layer<S> for WarnCounter {
        fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
            if *event.metadata().level() == Level::WARN {
                self.0.fetch_add(1, Ordering::SeqCst);
            }
        }
    }

    #[tokio::test(start_paused = true)]
    async fn confirm_transport_error_is_logged_and_treated_as_success() {
        let warnings = Arc::new(AtomicUsize::new(0));
        let subscriber = Registry::default().with(WarnCounter(warnings.clone()));
        let _guard = tracing::subscriber::set_default(subscriber);

        let client = MockClient::new(vec![], vec![Err(RpcError::transport("broken pipe"))]);
        let dispatcher = TaskDispatcher::new(client.clone());
        let hooks = Hooks::default();

        dispatch(&dispatcher, &DispatchContext::new(), &hooks)
            .await
            .unwrap();

        assert_eq!(hooks.calls(), vec!["start"]);
        assert_eq!(warnings.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn cancelled_before_start_sends_nothing() {
        let client = MockClient::new(vec![], vec![]);
        let dispatcher = TaskDispatcher::new(client.clone());
        let hooks = Hooks::default();
        let token = CancellationToken::new();
        token.cancel();
        let ctx = DispatchContext::new().with_cancellation(token);

        let err = dispatch(&dispatcher, &ctx, &hooks).await.unwrap_err();

        assert!(matches!(err.root(), DispatchError::Cancelled));
        assert!(client.sent().is_empty());
        assert_eq!(hooks.calls(), vec!["abort"]);
    }

    #[tokio::test(start_paused = true)]
    async fn cancellation_interrupts_retry_wait() {
        let client = MockClient::new(vec![status(Code::Unavailable)], vec![]);
        let dispatcher = TaskDispatcher::new(client.clone()).with_retry_interval(Duration::from_secs(60));
        let token = CancellationToken::new();
        let ctx = DispatchContext::new().with_cancellation(token.clone());

        let canceller = tokio::spawn(async move {
            tokio::time::sleep(Duration::from_secs(5)).await;
            token.cancel();
        });

        let start = Instant::now();
        let err = dispatcher
            .pre_dispatch_task_with_retry(&ctx, &args())
            .await
            .unwrap_err();
        canceller.await.unwrap();

        assert!(matches!(err, DispatchError::Cancelled));
        assert_eq!(start.elapsed(), Duration::from_secs(5));
        assert_eq!(client.sent().len(), 1);
    }

    /// Never answers PreDispatchTask; confirmations succeed.
    #[derive(Default)]
    struct HangingClient {
        sent: Mutex<Vec<ExecutorRequest>>,
    }

    #[tonic::async_trait]
    impl ExecutorClient for HangingClient {
        async fn send(&self, request: ExecutorRequest) -> Result<ExecutorResponse, RpcError> {
            let hang = matches!(request, ExecutorRequest::PreDispatchTask(_));
            self.sent.lock().unwrap().push(request);
            if hang {
                std::future::pending::<()>().await;
            }
            Ok(ExecutorResponse)
        }
    }

    impl HangingClient {
        fn commands(&self) -> Vec<&'static str> {
            self.sent.lock().unwrap().iter().map(ExecutorRequest::command).collect()
        }
    }

    #[tokio::test(start_paused = true)]
    async fn cancellation_interrupts_in_flight_pre_dispatch() {
        let client = Arc::new(HangingClient::default());
        let dispatcher = TaskDispatcher::new(client.clone());
        let hooks = Hooks::default();
        let token = CancellationToken::new();
        let ctx = DispatchContext::new().with_cancellation(token.clone());

        let canceller = tokio::spawn(async move {
            tokio::time::sleep(Duration::from_secs(2)).await;
            token.cancel();
        });

        let start = Instant::now();
        let err = dispatch(&dispatcher, &ctx, &hooks).await.unwrap_err();
        canceller.await.unwrap();

        assert_eq!(start.elapsed(), Duration::from_secs(2));
        assert!(matches!(err, DispatchError::PreDispatchFailed(_)));
        assert!(matches!(err.root(), DispatchError::Cancelled));
        assert_eq!(hooks.calls(), vec!["abort"]);
        assert_eq!(client.commands(), vec!["PreDispatchTask"]);
    }

    #[tokio::test(start_paused = true)]
    async fn deadline_interrupts_in_flight_pre_dispatch() {
        let client = Arc::new(HangingClient::default());
        let dispatcher = TaskDispatcher::new(client.clone());
        let hooks = Hooks::default();
        let ctx = DispatchContext::new().with_timeout(Duration::from_secs(3));

        let start = Instant::now();
        let err = dispatch(&dispatcher, &ctx, &hooks).await.unwrap_err();

        assert_eq!(start.elapsed(), Duration::from_secs(3));
        assert!(matches!(err.root(), DispatchError::DeadlineExceeded(_)));
        assert!(!err.is_fatal());
        assert_eq!(hooks.calls(), vec!["abort"]);
        assert_eq!(client.commands(), vec!["PreDispatchTask"]);
    }

    #[tokio::test(start_paused = true)]
    async fn huge_retry_interval_gives_up_instead_of_overflowing() {
        let config = DispatchConfig {
            pre_dispatch_retry_interval: "18446744073709551615s".to_string(),
        };
        let client = MockClient::new(vec![status(Code::Unavailable)], vec![]);
        let dispatcher = TaskDispatcher::from_config(client.clone(), &config).unwrap();
        let hooks = Hooks::default();
        let ctx = DispatchContext::new().with_timeout(Duration::from_secs(1));

        let err = dispatch(&dispatcher, &ctx, &hooks).await.unwrap_err();

        assert!(matches!(err.root(), DispatchError::DeadlineExceeded(_)));
        assert_eq!(client.sent().len(), 1);
        assert_eq!(hooks.calls(), vec!["abort"]);
    }

    #[test]
    fn from_config_reads_retry_interval() {
        let config = DispatchConfig {
            pre_dispatch_retry_interval: "250ms".to_string(),
        };
        let client = MockClient::new(vec![], vec![]);
        let dispatcher = TaskDispatcher::from_config(client, &config).unwrap();
        assert_eq!(dispatcher.retry_interval(), Duration::from_millis(250));
    }
}
