//! Drive backend wire types
//!
//! Data structures for the `/drive/*` REST surface. File resources use the
//! provider's camelCase field names; backend-owned records (sync tasks,
//! conflicts, stats) use snake_case.

use crate::error::DriveError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// A file or folder snapshot from the remote provider
///
/// Identity is `id`, an opaque string minted by the provider. Listings are
/// immutable snapshots; staleness is handled by re-fetching, not by local
/// invalidation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DriveFile {
    /// Opaque provider file ID
    pub id: String,

    /// File name
    pub name: String,

    /// MIME type
    pub mime_type: String,

    /// File size in bytes (omitted for folders)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,

    /// Last modification time (RFC 3339)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified_time: Option<DateTime<Utc>>,

    /// Whether this entry is a folder
    #[serde(default)]
    pub is_folder: bool,

    /// Parent folder IDs
    #[serde(default)]
    pub parents: Vec<String>,

    /// Link for opening the file in the provider UI
    #[serde(skip_serializing_if = "Option::is_none")]
    pub web_view_link: Option<String>,
}

/// The status of a server-side sync task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    /// Task has been accepted but not yet started
    Pending,
    /// Task is currently running
    Running,
    /// Task completed successfully
    Completed,
    /// Task failed with an error
    Failed,
}

impl TaskStatus {
    /// Check if this status represents a terminal state
    pub fn is_terminal(&self) -> bool {
        matches!(self, TaskStatus::Completed | TaskStatus::Failed)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Pending => "pending",
            TaskStatus::Running => "running",
            TaskStatus::Completed => "completed",
            TaskStatus::Failed => "failed",
        }
    }
}

impl FromStr for TaskStatus {
    type Err = DriveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(TaskStatus::Pending),
            "running" => Ok(TaskStatus::Running),
            "completed" => Ok(TaskStatus::Completed),
            "failed" => Ok(TaskStatus::Failed),
            _ => Err(DriveError::Parse(format!("Unknown task status: {}", s))),
        }
    }
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A server-side sync task record
///
/// Created by `start_sync`, observed via repeated status polls until a
/// terminal state. Recent tasks also appear in [`DriveStats`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyncTask {
    /// Opaque task identifier
    pub task_id: String,

    /// Current lifecycle status
    pub status: TaskStatus,

    /// When the task started (RFC 3339)
    pub started_at: DateTime<Utc>,

    /// When the task reached a terminal state
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,

    /// Files mirrored so far
    #[serde(default)]
    pub files_synced: u64,

    /// Folders mirrored so far
    #[serde(default)]
    pub folders_synced: u64,

    /// Errors encountered while syncing
    #[serde(default)]
    pub errors: Vec<String>,
}

/// A server-detected divergence between local and remote versions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conflict {
    /// Opaque conflict identifier
    pub conflict_id: String,

    /// Server-defined conflict category
    pub conflict_type: String,

    /// Local version label, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub local_version: Option<String>,

    /// Remote version label, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remote_version: Option<String>,

    /// When the conflict was detected (RFC 3339)
    pub detected_at: DateTime<Utc>,

    /// Whether the server has resolved it
    #[serde(default)]
    pub resolved: bool,
}

/// Aggregate sync counters for the current user
///
/// `Default` is the all-zero value, which is also the documented fallback
/// when the stats endpoint is unreachable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DriveStats {
    #[serde(default)]
    pub total_syncs: u64,
    #[serde(default)]
    pub successful_syncs: u64,
    #[serde(default)]
    pub failed_syncs: u64,
    #[serde(default)]
    pub total_files_synced: u64,
    #[serde(default)]
    pub total_folders_synced: u64,
    #[serde(default)]
    pub recent_tasks: Vec<SyncTask>,
}

/// Authorization URL handed out by the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthUrl {
    /// URL the user should visit to authorize the integration
    pub auth_url: String,
    /// CSRF state to relay back through the callback
    pub state: String,
}

/// Options for submitting a sync task
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SyncOptions {
    /// Re-mirror everything instead of picking up from the last sync
    #[serde(default)]
    pub full_resync: bool,

    /// Restrict the sync to a single folder subtree
    #[serde(skip_serializing_if = "Option::is_none")]
    pub folder_id: Option<String>,
}

/// Acknowledgement returned when a sync task is submitted
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyncSubmission {
    pub task_id: String,
    pub status: TaskStatus,
    pub message: String,
}

/// A single poll of a sync task's status
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyncStatusReport {
    pub status: TaskStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl SyncStatusReport {
    /// Synthetic `failed` report used when the status endpoint itself is
    /// unreachable, so pollers observe a terminal state instead of an error.
    pub fn failed(error_message: Option<String>) -> Self {
        Self {
            status: TaskStatus::Failed,
            error_message,
        }
    }
}

/// A `{id, name}` step along a folder path
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathSegment {
    pub id: String,
    pub name: String,
}

/// One level of the remote folder hierarchy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FolderTreeResponse {
    /// ID of the folder this level describes
    pub id: String,

    /// Folder display name
    pub name: String,

    /// Immediate children (folders and files)
    #[serde(default)]
    pub children: Vec<DriveFile>,

    /// Path from the root down to this folder
    #[serde(default)]
    pub path: Vec<PathSegment>,
}

impl FolderTreeResponse {
    /// Synthetic single-node tree used when the tree endpoint is
    /// unreachable; keeps the picker render-able with an empty root.
    pub fn fallback(folder_id: Option<&str>) -> Self {
        Self {
            id: folder_id.unwrap_or("root").to_string(),
            name: "My Drive".to_string(),
            children: Vec::new(),
            path: Vec::new(),
        }
    }
}
