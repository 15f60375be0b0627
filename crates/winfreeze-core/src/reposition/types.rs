use std::time::Duration;

use crate::geometry::{Point, Size};
use crate::reconcile::MatchTier;
use crate::snapshot::WindowSnapshot;

/// Default wall-clock budget for the retry loop.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
/// Default pause between attempts.
pub const DEFAULT_RETRY_INTERVAL: Duration = Duration::from_millis(250);
/// Default per-axis position tolerance, inclusive.
pub const DEFAULT_TOLERANCE: f64 = 5.0;

#[derive(Debug, Clone, PartialEq)]
pub struct RepositionOptions {
    pub timeout: Duration,
    pub retry_interval: Duration,
    pub tolerance: f64,
}

impl Default for RepositionOptions {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            retry_interval: DEFAULT_RETRY_INTERVAL,
            tolerance: DEFAULT_TOLERANCE,
        }
    }
}

/// A matched window waiting to reach its recorded geometry.
#[derive(Debug)]
pub struct RepositionTask<'a, H> {
    /// Caller-side key, returned untouched in the matching [`TaskOutcome`].
    pub key: usize,
    pub snapshot: &'a WindowSnapshot,
    pub handle: H,
    pub tier: MatchTier,
    pub target_position: Point,
    pub target_size: Size,
}

impl<'a, H> RepositionTask<'a, H> {
    /// Task targeting the snapshot's recorded position and size.
    pub fn new(key: usize, snapshot: &'a WindowSnapshot, handle: H, tier: MatchTier) -> Self {
        Self {
            key,
            snapshot,
            handle,
            tier,
            target_position: snapshot.position(),
            target_size: snapshot.size(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TaskStatus {
    /// Observed within tolerance after `attempts` write rounds.
    Converged { attempts: u32 },
    /// Still off target when the budget ran out. `last_position` is the last
    /// readable position, if any.
    Unconverged { last_position: Option<Point> },
}

#[derive(Debug, Clone, PartialEq)]
pub struct TaskOutcome {
    pub key: usize,
    pub tier: MatchTier,
    pub status: TaskStatus,
}

impl TaskOutcome {
    pub fn is_converged(&self) -> bool {
        matches!(self.status, TaskStatus::Converged { .. })
    }
}

/// Result of one repositioning run.
#[derive(Debug, Clone, PartialEq)]
pub struct RepositionSummary {
    /// One entry per input task, converged tasks first in convergence order.
    pub outcomes: Vec<TaskOutcome>,
    pub attempts: u32,
    pub elapsed: Duration,
}

impl RepositionSummary {
    pub fn unconverged(&self) -> impl Iterator<Item = &TaskOutcome> {
        self.outcomes.iter().filter(|o| !o.is_converged())
    }

    pub fn timed_out(&self) -> bool {
        self.unconverged().next().is_some()
    }
}
