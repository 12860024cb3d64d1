//! Balance scheduler: periodically moves tables between captures.
//!
//! Each round is gated by a cool-down interval unless the previous round
//! produced moves, in which case the next round runs immediately
//! (`force_balance`). Rounds never run while any capture is stopping.

use std::time::Duration;

use rand::SeedableRng;
use rand::rngs::StdRng;
use tokio::time::Instant;
use tracing::{debug, info, warn};

use dataflow_core::{ConfigResult, SchedulerConfig};
use dataflow_state::{CaptureSnapshot, ReplicationSnapshot, TableId};

use crate::planner::MoveTablePlanner;
use crate::scheduler::Scheduler;
use crate::task::ScheduleTask;

/// The scheduler for balancing tables among all captures.
pub struct BalanceScheduler {
    random: StdRng,
    planner: Box<dyn MoveTablePlanner>,
    /// `None` until the first interval-gated round.
    last_rebalance_time: Option<Instant>,
    check_balance_interval: Duration,
    /// Skips the interval gate on the next round. Set whenever a round
    /// produced tasks, since more moves are likely pending.
    force_balance: bool,
    max_task_concurrency: usize,
}

impl BalanceScheduler {
    /// Create a balance scheduler with an OS-seeded random source.
    pub fn new(
        check_balance_interval: Duration,
        max_task_concurrency: usize,
        planner: impl MoveTablePlanner + 'static,
    ) -> Self {
        Self {
            random: StdRng::from_os_rng(),
            planner: Box::new(planner),
            last_rebalance_time: None,
            check_balance_interval,
            force_balance: false,
            max_task_concurrency,
        }
    }

    /// Build from the `[scheduler]` section of the engine config.
    pub fn from_config(
        config: &SchedulerConfig,
        planner: impl MoveTablePlanner + 'static,
    ) -> ConfigResult<Self> {
        Ok(Self::new(
            config.check_balance_interval()?,
            config.max_task_concurrency,
            planner,
        ))
    }

    /// Replace the random source with a deterministic one.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.random = StdRng::seed_from_u64(seed);
        self
    }

    pub fn last_rebalance_time(&self) -> Option<Instant> {
        self.last_rebalance_time
    }

    pub fn force_balance(&self) -> bool {
        self.force_balance
    }

    pub fn max_task_concurrency(&self) -> usize {
        self.max_task_concurrency
    }

    /// Run one round as of `now`.
    pub fn schedule_at(
        &mut self,
        now: Instant,
        captures: &CaptureSnapshot,
        replications: &ReplicationSnapshot,
    ) -> Vec<ScheduleTask> {
        // A forced round deliberately leaves last_rebalance_time alone.
        if !self.force_balance {
            if let Some(last) = self.last_rebalance_time {
                if now.saturating_duration_since(last) < self.check_balance_interval {
                    debug!("balance interval not elapsed, skip balance");
                    return Vec::new();
                }
            }
            self.last_rebalance_time = Some(now);
        }

        if let Some(capture) = captures.values().find(|c| c.is_stopping()) {
            debug!(
                capture_id = %capture.id,
                "capture is stopping, premature to balance table"
            );
            return Vec::new();
        }

        let mut moves = self.planner.plan(
            &mut self.random,
            captures,
            replications,
            self.max_task_concurrency,
        );
        if moves.len() > self.max_task_concurrency {
            warn!(
                returned = moves.len(),
                max = self.max_task_concurrency,
                "move planner exceeded its budget, dropping surplus moves"
            );
            moves.truncate(self.max_task_concurrency);
        }

        let tasks: Vec<ScheduleTask> = moves.into_iter().map(ScheduleTask::MoveTable).collect();
        self.force_balance = !tasks.is_empty();
        if !tasks.is_empty() {
            info!(tasks = tasks.len(), "balance round produced move tasks");
        }
        tasks
    }
}

impl Scheduler for BalanceScheduler {
    fn name(&self) -> &'static str {
        "balance-scheduler"
    }

    fn schedule(
        &mut self,
        _current_tables: &[TableId],
        captures: &CaptureSnapshot,
        replications: &ReplicationSnapshot,
    ) -> Vec<ScheduleTask> {
        self.schedule_at(Instant::now(), captures, replications)
    }
}
