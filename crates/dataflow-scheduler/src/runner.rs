//! Balance control loop.
//!
//! Ticks a [`Scheduler`] on a fixed interval against fresh snapshots from
//! the capture registry and replication-set store, and forwards the tasks
//! it produces to the runtime that executes moves.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use dataflow_core::{ConfigError, ConfigResult, SchedulerConfig};
use dataflow_state::{CaptureRegistry, ReplicationSetStore, TableId};

use crate::error::{SchedulerError, SchedulerResult};
use crate::scheduler::Scheduler;
use crate::task::ScheduleTask;

pub struct BalanceLoop {
    scheduler: Box<dyn Scheduler>,
    captures: Arc<dyn CaptureRegistry>,
    replications: Arc<dyn ReplicationSetStore>,
    tick_interval: Duration,
}

impl BalanceLoop {
    /// `tick_interval` must be non-zero for [`run`](Self::run).
    pub fn new(
        scheduler: impl Scheduler + 'static,
        captures: Arc<dyn CaptureRegistry>,
        replications: Arc<dyn ReplicationSetStore>,
        tick_interval: Duration,
    ) -> Self {
        Self {
            scheduler: Box::new(scheduler),
            captures,
            replications,
            tick_interval,
        }
    }

    /// Build with the tick interval from the `[scheduler]` section of the
    /// engine config.
    pub fn from_config(
        config: &SchedulerConfig,
        scheduler: impl Scheduler + 'static,
        captures: Arc<dyn CaptureRegistry>,
        replications: Arc<dyn ReplicationSetStore>,
    ) -> ConfigResult<Self> {
        let tick_interval = config.tick_interval()?;
        if tick_interval.is_zero() {
            return Err(ConfigError::Invalid {
                field: "scheduler.tick_interval",
                reason: "must be greater than zero".to_string(),
            });
        }
        Ok(Self::new(scheduler, captures, replications, tick_interval))
    }

    pub fn tick_interval(&self) -> Duration {
        self.tick_interval
    }

    /// Run a single scheduling round against fresh snapshots.
    pub fn tick(&mut self) -> SchedulerResult<Vec<ScheduleTask>> {
        let captures = self.captures.captures()?;
        let replications = self.replications.replications()?;
        let current_tables: Vec<TableId> = replications.keys().copied().collect();

        let tasks = self
            .scheduler
            .schedule(&current_tables, &captures, &replications);
        debug!(
            scheduler = self.scheduler.name(),
            captures = captures.len(),
            tables = current_tables.len(),
            tasks = tasks.len(),
            "scheduling round finished"
        );
        Ok(tasks)
    }

    /// Tick until `shutdown` fires.
    ///
    /// Snapshot failures are logged and retried on the next tick. Returns
    /// [`SchedulerError::TaskChannelClosed`] if the task consumer is gone and
    /// [`SchedulerError::ZeroTickInterval`] if there is nothing to tick on.
    /// Shutdown is observed while waiting on a full task channel too; tasks
    /// not yet delivered are dropped.
    pub async fn run(
        mut self,
        tasks: mpsc::Sender<ScheduleTask>,
        mut shutdown: watch::Receiver<bool>,
    ) -> SchedulerResult<()> {
        if self.tick_interval.is_zero() {
            return Err(SchedulerError::ZeroTickInterval);
        }
        let mut interval = tokio::time::interval(self.tick_interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        info!(
            scheduler = self.scheduler.name(),
            interval = ?self.tick_interval,
            "balance loop started"
        );

        loop {
            tokio::select! {
                _ = interval.tick() => {}
                _ = shutdown.changed() => break,
            }

            let batch = match self.tick() {
                Ok(batch) => batch,
                Err(e) => {
                    warn!(error = %e, "balance tick failed");
                    continue;
                }
            };
            let total = batch.len();
            for (sent, task) in batch.into_iter().enumerate() {
                tokio::select! {
                    res = tasks.send(task) => {
                        if res.is_err() {
                            warn!("schedule task receiver dropped, stopping balance loop");
                            return Err(SchedulerError::TaskChannelClosed);
                        }
                    }
                    _ = shutdown.changed() => {
                        info!(undelivered = total - sent, "balance loop shutting down");
                        return Ok(());
                    }
                }
            }
        }

        info!("balance loop shutting down");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use dataflow_state::{
        Capture, CaptureSnapshot, CaptureState, MemoryCaptureRegistry, MemoryReplicationStore,
        ReplicationSet, ReplicationSnapshot, StateError, StateResult,
    };

    const TICK: Duration = Duration::from_secs(1);

    /// Echoes every current table back as a move to "c2".
    struct EchoScheduler;

    impl Scheduler for EchoScheduler {
        fn name(&self) -> &'static str {
            "echo"
        }

        fn schedule(
            &mut self,
            current_tables: &[TableId],
            _captures: &CaptureSnapshot,
            _replications: &ReplicationSnapshot,
        ) -> Vec<ScheduleTask> {
            current_tables
                .iter()
                .map(|t| crate::task::MoveTable::new(*t, "c2").into())
                .collect()
        }
    }

    struct BrokenRegistry;

    impl CaptureRegistry for BrokenRegistry {
        fn captures(&self) -> StateResult<CaptureSnapshot> {
            Err(StateError::Lock("poisoned".to_string()))
        }
    }

    #[test]
    fn tick_passes_table_ids_in_order() {
        let registry = MemoryCaptureRegistry::new();
        registry
            .upsert(Capture::new("c1", "10.0.0.1:8300", CaptureState::Ready))
            .unwrap();
        let store = MemoryReplicationStore::new();
        store.upsert(ReplicationSet::with_primary(9, "c1")).unwrap();
        store.upsert(ReplicationSet::with_primary(3, "c1")).unwrap();

        let mut lp = BalanceLoop::new(EchoScheduler, Arc::new(registry), Arc::new(store), TICK);
        let tasks = lp.tick().unwrap();

        let ids: Vec<TableId> = tasks.iter().map(ScheduleTask::table_id).collect();
        assert_eq!(ids, vec![3, 9]);
    }

    #[test]
    fn tick_surfaces_snapshot_errors() {
        let mut lp = BalanceLoop::new(
            EchoScheduler,
            Arc::new(BrokenRegistry),
            Arc::new(MemoryReplicationStore::new()),
            TICK,
        );
        assert!(matches!(lp.tick(), Err(SchedulerError::State(_))));
    }

    #[tokio::test(start_paused = true)]
    async fn run_survives_snapshot_errors_until_shutdown() {
        let lp = BalanceLoop::new(
            EchoScheduler,
            Arc::new(BrokenRegistry),
            Arc::new(MemoryReplicationStore::new()),
            TICK,
        );
        let (tx, _rx) = mpsc::channel(8);
        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        let handle = tokio::spawn(lp.run(tx, shutdown_rx));
        tokio::time::sleep(Duration::from_secs(5)).await;
        shutdown_tx.send(true).unwrap();

        assert!(handle.await.unwrap().is_ok());
    }

    #[test]
    fn from_config_reads_tick_interval() {
        let config = SchedulerConfig {
            tick_interval: "250ms".to_string(),
            ..SchedulerConfig::default()
        };
        let lp = BalanceLoop::from_config(
            &config,
            EchoScheduler,
            Arc::new(MemoryCaptureRegistry::new()),
            Arc::new(MemoryReplicationStore::new()),
        )
        .unwrap();
        assert_eq!(lp.tick_interval(), Duration::from_millis(250));
    }

    #[test]
    fn from_config_rejects_zero_tick() {
        let config = SchedulerConfig {
            tick_interval: "0s".to_string(),
            ..SchedulerConfig::default()
        };
        let result = BalanceLoop::from_config(
            &config,
            EchoScheduler,
            Arc::new(MemoryCaptureRegistry::new()),
            Arc::new(MemoryReplicationStore::new()),
        );
        assert!(matches!(
            result,
            Err(ConfigError::Invalid { field: "scheduler.tick_interval", .. })
        ));
    }

    #[tokio::test]
    async fn run_rejects_zero_tick() {
        let lp = BalanceLoop::new(
            EchoScheduler,
            Arc::new(MemoryCaptureRegistry::new()),
            Arc::new(MemoryReplicationStore::new()),
            Duration::ZERO,
        );
        let (tx, _rx) = mpsc::channel(1);
        let (_shutdown_tx, shutdown_rx) = watch::channel(false);

        assert!(matches!(
            lp.run(tx, shutdown_rx).await,
            Err(SchedulerError::ZeroTickInterval)
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn shutdown_is_seen_while_task_channel_is_full() {
        let registry = MemoryCaptureRegistry::new();
        let store = MemoryReplicationStore::new();
        for t in 1..=3 {
            store.upsert(ReplicationSet::with_primary(t, "c1")).unwrap();
        }
        let lp = BalanceLoop::new(EchoScheduler, Arc::new(registry), Arc::new(store), TICK);

        // Room for one task and nobody reading: the loop blocks on the second.
        let (tx, mut rx) = mpsc::channel(1);
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let handle = tokio::spawn(lp.run(tx, shutdown_rx));

        tokio::time::sleep(Duration::from_secs(5)).await;
        shutdown_tx.send(true).unwrap();

        let result = tokio::time::timeout(Duration::from_secs(1), handle)
            .await
            .expect("balance loop ignored shutdown")
            .unwrap();
        assert!(result.is_ok());
        assert_eq!(rx.recv().await.map(|t| t.table_id()), Some(1));
    }
}
