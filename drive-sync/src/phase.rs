//! Controller phase machine
//!
//! The monitor's lifecycle, as distinct from the server-side task status:
//!
//! ```text
//! Idle → Submitting → Polling → Completed
//!            ↓           ↓
//!            ↓           ├──→ Failed
//!            ↓           └──→ Cancelled
//!            └──→ Idle (submission rejected)
//! ```
//!
//! Terminal phases transition only back to `Submitting` when a new task is
//! started on the same monitor.

use serde::{Deserialize, Serialize};

/// The current phase of a sync monitor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SyncPhase {
    /// No task has been submitted yet
    Idle,
    /// Submission request is in flight
    Submitting,
    /// Task accepted, status polls are running
    Polling,
    /// Task finished successfully
    Completed,
    /// Task failed, or a status poll itself failed
    Failed,
    /// The monitor was cancelled before the task finished
    Cancelled,
}

impl SyncPhase {
    /// Check if this phase ends a run
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            SyncPhase::Completed | SyncPhase::Failed | SyncPhase::Cancelled
        )
    }

    /// Check if a task is currently in flight
    pub fn is_in_flight(&self) -> bool {
        matches!(self, SyncPhase::Submitting | SyncPhase::Polling)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SyncPhase::Idle => "idle",
            SyncPhase::Submitting => "submitting",
            SyncPhase::Polling => "polling",
            SyncPhase::Completed => "completed",
            SyncPhase::Failed => "failed",
            SyncPhase::Cancelled => "cancelled",
        }
    }

    /// Check whether moving to `to` is a legal lifecycle step
    pub fn can_transition(&self, to: SyncPhase) -> bool {
        match (self, to) {
            (SyncPhase::Idle, SyncPhase::Submitting) => true,

            // Submission either enters the poll loop, bounces back to idle
            // on rejection, or is cancelled before the loop spawns
            (SyncPhase::Submitting, SyncPhase::Polling) => true,
            (SyncPhase::Submitting, SyncPhase::Idle) => true,
            (SyncPhase::Submitting, SyncPhase::Cancelled) => true,

            (SyncPhase::Polling, SyncPhase::Polling) => true,
            (SyncPhase::Polling, SyncPhase::Completed) => true,
            (SyncPhase::Polling, SyncPhase::Failed) => true,
            (SyncPhase::Polling, SyncPhase::Cancelled) => true,

            // A finished monitor can host a fresh run
            (prev, SyncPhase::Submitting) if prev.is_terminal() => true,

            _ => false,
        }
    }
}

impl std::fmt::Display for SyncPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
