use std::time::Duration;

use serde::Serialize;

use crate::geometry::Point;
use crate::reconcile::MatchTier;
use crate::snapshot::WindowSnapshot;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum OutcomeStatus {
    Converged {
        tier: MatchTier,
        attempts: u32,
    },
    Unconverged {
        tier: MatchTier,
        last_position: Option<Point>,
    },
    /// No live window could be associated with the snapshot.
    Unmatched,
    /// The owning process's controllable windows could not be listed.
    Skipped {
        reason: String,
    },
}

impl OutcomeStatus {
    pub fn label(&self) -> &'static str {
        match self {
            OutcomeStatus::Converged { .. } => "converged",
            OutcomeStatus::Unconverged { .. } => "unconverged",
            OutcomeStatus::Unmatched => "unmatched",
            OutcomeStatus::Skipped { .. } => "skipped",
        }
    }

    pub fn tier(&self) -> Option<MatchTier> {
        match self {
            OutcomeStatus::Converged { tier, .. } | OutcomeStatus::Unconverged { tier, .. } => {
                Some(*tier)
            }
            OutcomeStatus::Unmatched | OutcomeStatus::Skipped { .. } => None,
        }
    }
}

/// Restore result for one snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WindowOutcome {
    pub app_name: String,
    pub window_id: u32,
    pub pid: i32,
    pub title: Option<String>,
    #[serde(flatten)]
    pub status: OutcomeStatus,
}

impl WindowOutcome {
    pub fn new(snapshot: &WindowSnapshot, status: OutcomeStatus) -> Self {
        Self {
            app_name: snapshot.app_name().to_string(),
            window_id: snapshot.window_id(),
            pid: snapshot.pid(),
            title: snapshot.title().map(str::to_string),
            status,
        }
    }

    pub fn is_converged(&self) -> bool {
        matches!(self.status, OutcomeStatus::Converged { .. })
    }
}

/// Report of a whole restore pass, one outcome per input snapshot in input
/// order.
#[derive(Debug, Clone, PartialEq)]
pub struct RestoreReport {
    pub outcomes: Vec<WindowOutcome>,
    /// Write rounds performed by the repositioner.
    pub attempts: u32,
    pub elapsed: Duration,
}

impl RestoreReport {
    pub fn converged_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_converged()).count()
    }

    pub fn failures(&self) -> impl Iterator<Item = &WindowOutcome> {
        self.outcomes.iter().filter(|o| !o.is_converged())
    }

    /// Every snapshot matched and converged.
    pub fn is_complete(&self) -> bool {
        self.failures().next().is_none()
    }
}
