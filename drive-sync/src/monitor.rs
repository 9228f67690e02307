//! Sync task submission and polling
//!
//! The monitor owns the whole client side of a sync run: the single
//! in-flight guard, the poll loop, the progress heuristic, and teardown.

use drive_api::{DriveApi, DriveStats, SyncOptions, TaskStatus};
use serde::Serialize;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::sleep;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument, warn};

use crate::error::{Result, SyncError};
use crate::phase::SyncPhase;

/// Poll loop configuration
#[derive(Debug, Clone)]
pub struct PollConfig {
    /// Delay between status polls
    pub interval: Duration,

    /// Progress added per non-terminal poll
    pub progress_step: u8,

    /// Progress ceiling while the task is still running; only a terminal
    /// `completed` jumps to 100
    pub progress_cap: u8,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_millis(2000),
            progress_step: 10,
            progress_cap: 90,
        }
    }
}

/// A point-in-time view of a sync run
///
/// Published over the monitor's watch channel after every phase or progress
/// change. The host renders this directly.
#[derive(Debug, Clone, Serialize)]
pub struct SyncSnapshot {
    /// Controller phase
    pub phase: SyncPhase,

    /// Task being driven, once submission succeeded
    pub task_id: Option<String>,

    /// Heuristic progress estimate (0-100)
    pub progress: u8,

    /// Failure detail, when the phase is `Failed`
    pub error_message: Option<String>,

    /// Refreshed aggregate counters, attached on completion
    pub stats: Option<DriveStats>,
}

impl SyncSnapshot {
    fn idle() -> Self {
        Self {
            phase: SyncPhase::Idle,
            task_id: None,
            progress: 0,
            error_message: None,
            stats: None,
        }
    }
}

/// Slot for the run currently in flight
struct ActiveSync {
    token: CancellationToken,
}

/// Drives a sync task from submission to a terminal state
///
/// # Example
///
/// ```ignore
/// use drive_sync::{PollConfig, SyncMonitor};
/// use drive_api::SyncOptions;
///
/// let monitor = SyncMonitor::new(api, PollConfig::default());
/// let mut progress = monitor.subscribe();
///
/// let task_id = monitor.start(SyncOptions::default()).await?;
/// while progress.changed().await.is_ok() {
///     let snapshot = progress.borrow().clone();
///     println!("{}: {}%", snapshot.phase, snapshot.progress);
///     if snapshot.phase.is_terminal() {
///         break;
///     }
/// }
/// ```
pub struct SyncMonitor {
    api: Arc<dyn DriveApi>,
    config: PollConfig,
    active: Arc<Mutex<Option<ActiveSync>>>,
    snapshot_tx: Arc<watch::Sender<SyncSnapshot>>,
    root_token: CancellationToken,
}

impl SyncMonitor {
    /// Create a monitor over the given backend
    pub fn new(api: Arc<dyn DriveApi>, config: PollConfig) -> Self {
        let (snapshot_tx, _) = watch::channel(SyncSnapshot::idle());

        Self {
            api,
            config,
            active: Arc::new(Mutex::new(None)),
            snapshot_tx: Arc::new(snapshot_tx),
            root_token: CancellationToken::new(),
        }
    }

    /// Observe snapshot changes
    pub fn subscribe(&self) -> watch::Receiver<SyncSnapshot> {
        self.snapshot_tx.subscribe()
    }

    /// The latest published snapshot
    pub fn snapshot(&self) -> SyncSnapshot {
        self.snapshot_tx.borrow().clone()
    }

    /// Whether a run is currently in flight
    pub fn is_running(&self) -> bool {
        self.active.lock().expect("active slot lock poisoned").is_some()
    }

    /// Submit a sync task and spawn its poll loop
    ///
    /// Returns the backend task id. The submission slot is reserved before
    /// the request goes out, so two overlapping `start` calls can never
    /// spawn two pollers.
    ///
    /// # Errors
    ///
    /// - [`SyncError::AlreadyRunning`] if a run is already in flight
    /// - [`SyncError::Submit`] if the backend rejects the submission; the
    ///   monitor returns to `Idle`
    #[instrument(skip(self), fields(full_resync = options.full_resync))]
    pub async fn start(&self, options: SyncOptions) -> Result<String> {
        let run_token = self.root_token.child_token();

        {
            let mut active = self.active.lock().expect("active slot lock poisoned");
            if active.is_some() {
                return Err(SyncError::AlreadyRunning);
            }
            *active = Some(ActiveSync {
                token: run_token.clone(),
            });
        }

        publish(
            &self.snapshot_tx,
            SyncSnapshot {
                phase: SyncPhase::Submitting,
                ..SyncSnapshot::idle()
            },
        );

        let submission = match self.api.start_sync(options).await {
            Ok(submission) => submission,
            Err(e) => {
                warn!(error = %e, "Sync submission rejected");
                self.clear_active();
                publish(&self.snapshot_tx, SyncSnapshot::idle());
                return Err(SyncError::Submit(e));
            }
        };

        info!(task_id = %submission.task_id, "Sync task submitted");

        if run_token.is_cancelled() {
            // Cancelled between submission and loop spawn; the server task
            // keeps running but nothing polls it.
            self.clear_active();
            publish(
                &self.snapshot_tx,
                SyncSnapshot {
                    phase: SyncPhase::Cancelled,
                    task_id: Some(submission.task_id.clone()),
                    ..SyncSnapshot::idle()
                },
            );
            return Ok(submission.task_id);
        }

        publish(
            &self.snapshot_tx,
            SyncSnapshot {
                phase: SyncPhase::Polling,
                task_id: Some(submission.task_id.clone()),
                ..SyncSnapshot::idle()
            },
        );

        tokio::spawn(poll_loop(
            self.api.clone(),
            self.config.clone(),
            self.active.clone(),
            self.snapshot_tx.clone(),
            run_token,
            submission.task_id.clone(),
        ));

        Ok(submission.task_id)
    }

    /// Stop the in-flight run, if any
    ///
    /// The poll loop observes the cancellation on its next wakeup and
    /// publishes a `Cancelled` snapshot. No-op when idle.
    pub fn cancel(&self) {
        let token = self
            .active
            .lock()
            .expect("active slot lock poisoned")
            .as_ref()
            .map(|active| active.token.clone());

        if let Some(token) = token {
            info!("Cancelling sync monitor run");
            token.cancel();
        }
    }

    fn clear_active(&self) {
        self.active.lock().expect("active slot lock poisoned").take();
    }
}

impl Drop for SyncMonitor {
    fn drop(&mut self) {
        // Teardown must stop the poll loop even if the host forgot to
        // cancel explicitly.
        self.root_token.cancel();
    }
}

fn publish(tx: &watch::Sender<SyncSnapshot>, next: SyncSnapshot) {
    debug_assert!(
        tx.borrow().phase.can_transition(next.phase) || tx.borrow().phase == next.phase,
        "illegal phase transition: {} -> {}",
        tx.borrow().phase,
        next.phase
    );
    tx.send_replace(next);
}

/// Poll the task until it reaches a terminal state or is cancelled
///
/// The in-flight slot is cleared exactly once, before the terminal snapshot
/// is published, so observers of a terminal snapshot always see
/// `is_running() == false`.
async fn poll_loop(
    api: Arc<dyn DriveApi>,
    config: PollConfig,
    active: Arc<Mutex<Option<ActiveSync>>>,
    snapshot_tx: Arc<watch::Sender<SyncSnapshot>>,
    token: CancellationToken,
    task_id: String,
) {
    let mut progress: u8 = 0;

    let terminal = loop {
        tokio::select! {
            _ = token.cancelled() => {
                debug!(task_id = %task_id, "Poll loop cancelled");
                break SyncSnapshot {
                    phase: SyncPhase::Cancelled,
                    task_id: Some(task_id.clone()),
                    progress,
                    error_message: None,
                    stats: None,
                };
            }
            _ = sleep(config.interval) => {}
        }

        let report = match api.sync_status(&task_id).await {
            Ok(report) => report,
            Err(e) => {
                // A failed poll is terminal; there is no retry.
                warn!(task_id = %task_id, error = %e, "Status poll failed");
                break SyncSnapshot {
                    phase: SyncPhase::Failed,
                    task_id: Some(task_id.clone()),
                    progress,
                    error_message: None,
                    stats: None,
                };
            }
        };

        match report.status {
            TaskStatus::Completed => {
                info!(task_id = %task_id, "Sync task completed");
                let stats = api.user_stats().await.ok();
                break SyncSnapshot {
                    phase: SyncPhase::Completed,
                    task_id: Some(task_id.clone()),
                    progress: 100,
                    error_message: None,
                    stats,
                };
            }
            TaskStatus::Failed => {
                warn!(
                    task_id = %task_id,
                    error = report.error_message.as_deref().unwrap_or("unknown"),
                    "Sync task failed"
                );
                break SyncSnapshot {
                    phase: SyncPhase::Failed,
                    task_id: Some(task_id.clone()),
                    progress,
                    error_message: report.error_message,
                    stats: None,
                };
            }
            TaskStatus::Pending | TaskStatus::Running => {
                progress = progress
                    .saturating_add(config.progress_step)
                    .min(config.progress_cap);
                publish(
                    &snapshot_tx,
                    SyncSnapshot {
                        phase: SyncPhase::Polling,
                        task_id: Some(task_id.clone()),
                        progress,
                        error_message: None,
                        stats: None,
                    },
                );
            }
        }
    };

    active.lock().expect("active slot lock poisoned").take();
    publish(&snapshot_tx, terminal);
}
