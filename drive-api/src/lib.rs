//! # Drive API Client
//!
//! Typed operations over the Cerebrum `/drive/*` integration backend.
//!
//! ## Overview
//!
//! This crate provides:
//! - Wire types for the Drive backend (files, sync tasks, conflicts, stats)
//! - The `DriveApi` trait that the sync monitor and file picker consume
//! - `DriveClient`, the HTTP-backed implementation
//!
//! ## Error policy
//!
//! The client enforces an asymmetric error policy that callers rely on:
//! state-changing operations (auth URL, code exchange, revoke, sync start)
//! propagate failures so the host can surface them, while read/query
//! operations (health, stats, conflicts, listings, folder tree, sync status)
//! resolve to a documented safe fallback so the host always has a
//! render-able value. See each operation's docs for its fallback.

pub mod api;
pub mod client;
pub mod error;
pub mod types;

pub use api::DriveApi;
pub use client::DriveClient;
pub use error::{DriveError, Result};
pub use types::{
    AuthUrl, Conflict, DriveFile, DriveStats, FolderTreeResponse, PathSegment, SyncOptions,
    SyncStatusReport, SyncSubmission, SyncTask, TaskStatus,
};
