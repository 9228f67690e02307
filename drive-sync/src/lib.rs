//! # Sync Monitor
//!
//! Drives a server-side Drive sync task from submission to a terminal state.
//!
//! ## Overview
//!
//! The backend runs sync as an asynchronous job and exposes only a status
//! endpoint, so this crate polls: submit, then check the task on a fixed
//! interval until it completes or fails. Observers receive progress
//! snapshots over a watch channel. Because the backend reports no true
//! percentage, progress advances by a fixed step per poll, capped below 100
//! until the task actually finishes.
//!
//! ## Components
//!
//! - **Phase machine** (`phase`): controller lifecycle with validated
//!   transitions
//! - **Monitor** (`monitor`): submission guard, poll loop, cancellation,
//!   stats refresh on completion
//!
//! A `SyncMonitor` allows one task in flight at a time; a second `start`
//! while a poll loop is live is rejected rather than spawning a duplicate
//! poller. Dropping the monitor (or calling `cancel`) stops the loop
//! deterministically via its `CancellationToken`.

pub mod error;
pub mod monitor;
pub mod phase;

pub use error::{Result, SyncError};
pub use monitor::{PollConfig, SyncMonitor, SyncSnapshot};
pub use phase::SyncPhase;
