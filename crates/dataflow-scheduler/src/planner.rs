//! Move planning contract.
//!
//! The heuristic that picks which tables to move and where lives outside
//! this crate. Schedulers only rely on the contract below.

use rand::RngCore;

use dataflow_state::{CaptureSnapshot, ReplicationSnapshot};

use crate::task::MoveTable;

/// Chooses table moves for one balance round.
///
/// Implementations must return at most `max_moves` decisions and must be
/// deterministic for a fixed random seed and fixed inputs.
pub trait MoveTablePlanner: Send + Sync {
    fn plan(
        &self,
        random: &mut dyn RngCore,
        captures: &CaptureSnapshot,
        replications: &ReplicationSnapshot,
        max_moves: usize,
    ) -> Vec<MoveTable>;
}
